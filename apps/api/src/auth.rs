//! Owner access gate. The password lives in server configuration and is
//! checked per request; clients never see it.

use std::sync::Arc;

use axum::http::HeaderMap;
use tracing::warn;

use crate::errors::AppError;

pub const ADMIN_HEADER: &str = "x-admin-password";

#[derive(Clone)]
pub struct AccessGate {
    password: Arc<str>,
}

impl AccessGate {
    pub fn new(password: &str) -> Self {
        Self {
            password: Arc::from(password),
        }
    }

    /// Passes when the request carries the owner password header.
    pub fn check(&self, headers: &HeaderMap) -> Result<(), AppError> {
        let supplied = headers
            .get(ADMIN_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();

        if constant_time_eq(supplied.as_bytes(), self.password.as_bytes()) {
            Ok(())
        } else {
            warn!("Rejected owner request with missing or wrong password");
            Err(AppError::Unauthorized)
        }
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
