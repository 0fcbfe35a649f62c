//! Tiny HTTP fixture for adapter integration tests.
//!
//! Serves a success route, a guaranteed 404, and a deliberately slow route
//! so cancellation races can be exercised over real HTTP.

use std::time::Duration;

use axum::{http::StatusCode, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

/// Delay applied by `/slow` before answering.
pub const SLOW_DELAY: Duration = Duration::from_millis(500);

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Greeting {
    pub message: String,
}

pub fn app() -> Router {
    Router::new()
        .route("/greeting", get(greeting))
        .route("/missing", get(missing))
        .route("/slow", get(slow))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn greeting() -> Json<Greeting> {
    Json(Greeting {
        message: "hello".to_string(),
    })
}

async fn missing() -> StatusCode {
    StatusCode::NOT_FOUND
}

async fn slow() -> Json<Greeting> {
    tokio::time::sleep(SLOW_DELAY).await;
    Json(Greeting {
        message: "eventually".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greeting_serializes_to_json() {
        let greeting = Greeting {
            message: "hello".to_string(),
        };
        let json = serde_json::to_value(&greeting).unwrap();
        assert_eq!(json["message"], "hello");
    }

    #[test]
    fn greeting_roundtrips_through_json() {
        let greeting = Greeting {
            message: "roundtrip".to_string(),
        };
        let json = serde_json::to_string(&greeting).unwrap();
        let back: Greeting = serde_json::from_str(&json).unwrap();
        assert_eq!(back, greeting);
    }
}
