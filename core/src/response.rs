//! Response envelope delivered by a pending call.
//!
//! # Design
//! `Response` describes a completed HTTP exchange as plain data: status,
//! raw header metadata, and the decoded body if the executing layer
//! produced one. The adapter never inspects bodies or headers itself; it
//! only branches on `is_success` and hands the rest through. All fields
//! use owned types so envelopes can move freely across callback threads.

/// A decoded HTTP response, whatever its status.
///
/// Produced by the layer executing the call and handed to the adapter's
/// completion callback. The body is `None` when the executing layer had
/// nothing to decode (empty body, or a failure status it chose not to
/// decode).
#[derive(Debug, Clone)]
pub struct Response<T> {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Option<T>,
}

impl<T> Response<T> {
    /// True for any 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body-erased copy of the envelope metadata, used to report failure
    /// statuses without making the error type generic over the payload.
    pub fn raw(&self) -> RawResponse {
        RawResponse {
            status: self.status,
            headers: self.headers.clone(),
        }
    }

    pub fn into_body(self) -> Option<T> {
        self.body
    }
}

/// Status and header metadata of a response, without the decoded body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16) -> Response<String> {
        Response {
            status,
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some("payload".to_string()),
        }
    }

    #[test]
    fn two_hundred_range_is_success() {
        assert!(response(200).is_success());
        assert!(response(204).is_success());
        assert!(response(299).is_success());
    }

    #[test]
    fn other_statuses_are_not_success() {
        assert!(!response(199).is_success());
        assert!(!response(301).is_success());
        assert!(!response(404).is_success());
        assert!(!response(500).is_success());
    }

    #[test]
    fn raw_preserves_status_and_headers() {
        let raw = response(404).raw();
        assert_eq!(raw.status, 404);
        assert_eq!(
            raw.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
    }
}
