use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppError;

#[derive(Deserialize, Debug, ToSchema)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        if !self.email.contains('@') {
            return Err(AppError::BadRequest("email is invalid".into()));
        }
        if self.password.len() < 8 {
            return Err(AppError::BadRequest(
                "password must be at least 8 characters".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
}

/// JWT payload; `role` gates the admin endpoints.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct Claims {
    pub sub: String,
    pub role: String,
    pub exp: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_validation() {
        let ok = RegisterRequest {
            email: "editor@example.com".into(),
            password: "long-enough".into(),
        };
        assert!(ok.validate().is_ok());

        let short = RegisterRequest {
            email: "editor@example.com".into(),
            password: "short".into(),
        };
        assert!(short.validate().is_err());

        let bad_email = RegisterRequest {
            email: "editor".into(),
            password: "long-enough".into(),
        };
        assert!(bad_email.validate().is_err());
    }
}
