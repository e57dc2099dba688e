//-----------------------------------------------------
// HELPER FUNCTIONS
//-----------------------------------------------------

use crate::error::{DriverError, DriverResult};
use crate::models::ErrorResponse;
use serde::Serialize;
use warp::http::StatusCode;
use warp::reply::{Json, WithStatus};

// Helper functions for response generation
pub fn success_response<T: Serialize>(body: T) -> WithStatus<Json> {
    warp::reply::with_status(warp::reply::json(&body), StatusCode::OK)
}

pub fn error_response(message: &str) -> WithStatus<Json> {
    status_response(message, StatusCode::INTERNAL_SERVER_ERROR)
}

pub fn status_response(message: &str, status: StatusCode) -> WithStatus<Json> {
    let body = ErrorResponse {
        err: message.to_string(),
    };
    warp::reply::with_status(warp::reply::json(&body), status)
}

// Lifecycle calls make blocking ZFS calls; keep them off the reactor threads
pub async fn run_blocking<T, F>(f: F) -> DriverResult<T>
where
    F: FnOnce() -> DriverResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| DriverError::Task(e.to_string()))?
}
