//! Declared-return-shape resolution.
//!
//! # Design
//! Instead of reflecting over generic parameters at runtime, the host
//! supplies a `TypeShape` value describing the declared return type once
//! at setup time. The factory turns a recognized shape into an immutable
//! `AdapterDescriptor` naming the adapter mode and the payload type the
//! decoding layer must produce; the descriptor is then reused for every
//! call of that shape. Unrecognized shapes pass to the next handler in
//! the chain rather than failing.

use crate::error::AdapterError;

/// Outer wrapper name the factory recognizes.
pub const FUTURE_TYPE: &str = "Future";
/// Envelope name that switches the factory into envelope mode.
pub const RESPONSE_TYPE: &str = "Response";
/// Upper bound assigned to unbounded wildcards.
pub const ANY_TYPE: &str = "Any";

/// Structural description of a declared return type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeShape {
    /// A plain, unparameterized type name.
    Named(String),
    /// A parameterized type such as `Future<T>`.
    Generic { name: String, args: Vec<TypeShape> },
    /// A wildcard parameter, optionally bounded from above.
    Wildcard { upper: Option<Box<TypeShape>> },
}

impl TypeShape {
    pub fn named(name: impl Into<String>) -> Self {
        TypeShape::Named(name.into())
    }

    pub fn generic(name: impl Into<String>, args: Vec<TypeShape>) -> Self {
        TypeShape::Generic {
            name: name.into(),
            args,
        }
    }

    pub fn wildcard(upper: Option<TypeShape>) -> Self {
        TypeShape::Wildcard {
            upper: upper.map(Box::new),
        }
    }

    /// Resolve wildcards to their upper bound; unbounded wildcards resolve
    /// to the top type.
    fn upper_bound(&self) -> TypeShape {
        match self {
            TypeShape::Wildcard { upper: Some(upper) } => upper.upper_bound(),
            TypeShape::Wildcard { upper: None } => TypeShape::named(ANY_TYPE),
            other => other.clone(),
        }
    }

    /// The unparameterized name of this shape.
    fn raw_name(&self) -> &str {
        match self {
            TypeShape::Named(name) => name,
            TypeShape::Generic { name, .. } => name,
            TypeShape::Wildcard { upper: Some(upper) } => upper.raw_name(),
            TypeShape::Wildcard { upper: None } => ANY_TYPE,
        }
    }

    fn type_args(&self) -> &[TypeShape] {
        match self {
            TypeShape::Generic { args, .. } => args,
            _ => &[],
        }
    }
}

/// Whether the consumer receives the decoded body or the full envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdapterMode {
    /// Deliver the decoded body; non-success statuses become failures.
    Body,
    /// Deliver the full response envelope regardless of status.
    Envelope,
}

/// Resolved description of a declared return shape.
///
/// Built once per declared return type at setup time and reused across
/// all calls of that shape. `payload` names the type the decoding layer
/// must produce for each call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterDescriptor {
    pub mode: AdapterMode,
    pub payload: TypeShape,
}

/// One handler in the return-type resolution chain.
pub trait ReturnTypeHandler {
    /// Answer with a descriptor for a recognized shape, `Ok(None)` to pass
    /// to the next handler, or an error for a shape this handler
    /// recognizes but that is malformed. Handlers must not fail for
    /// shapes they do not recognize.
    fn resolve(&self, declared: &TypeShape) -> Result<Option<AdapterDescriptor>, AdapterError>;
}

/// Resolves `Future<T>` and `Future<Response<T>>` declarations.
#[derive(Debug, Clone, Copy, Default)]
pub struct FutureAdapterFactory;

impl FutureAdapterFactory {
    pub fn new() -> Self {
        FutureAdapterFactory
    }
}

impl ReturnTypeHandler for FutureAdapterFactory {
    fn resolve(&self, declared: &TypeShape) -> Result<Option<AdapterDescriptor>, AdapterError> {
        let declared = declared.upper_bound();
        if declared.raw_name() != FUTURE_TYPE {
            return Ok(None);
        }
        let Some(inner) = declared.type_args().first() else {
            return Err(AdapterError::UnparameterizedFuture);
        };
        let inner = inner.upper_bound();
        if inner.raw_name() != RESPONSE_TYPE {
            return Ok(Some(AdapterDescriptor {
                mode: AdapterMode::Body,
                payload: inner,
            }));
        }
        let Some(payload) = inner.type_args().first() else {
            return Err(AdapterError::UnparameterizedResponse);
        };
        Ok(Some(AdapterDescriptor {
            mode: AdapterMode::Envelope,
            payload: payload.upper_bound(),
        }))
    }
}

/// Ordered chain of return-type handlers. The first handler that answers
/// with a descriptor wins; configuration errors abort resolution.
#[derive(Default)]
pub struct HandlerChain {
    handlers: Vec<Box<dyn ReturnTypeHandler + Send + Sync>>,
}

impl HandlerChain {
    pub fn new() -> Self {
        HandlerChain::default()
    }

    pub fn register(mut self, handler: impl ReturnTypeHandler + Send + Sync + 'static) -> Self {
        self.handlers.push(Box::new(handler));
        self
    }

    pub fn resolve(
        &self,
        declared: &TypeShape,
    ) -> Result<Option<AdapterDescriptor>, AdapterError> {
        for handler in &self.handlers {
            if let Some(descriptor) = handler.resolve(declared)? {
                return Ok(Some(descriptor));
            }
        }
        Ok(None)
    }
}

impl std::fmt::Debug for HandlerChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerChain")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
