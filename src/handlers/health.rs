use actix_web::{HttpResponse, Result};

use crate::models::HealthResponse;

/// Health check endpoint
///
/// # Errors
///
/// Never fails
pub async fn health() -> Result<HttpResponse> {
    let response = HealthResponse {
        status: "ok".to_string(),
        message: "Curator authentication service is running".to_string(),
    };
    Ok(HttpResponse::Ok().json(response))
}
