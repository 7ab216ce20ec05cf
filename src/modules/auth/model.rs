use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// JWT claims: identity plus role, issued with a fixed expiry. There is no
// refresh mechanism; expiry forces re-login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user_id
    pub email: String,
    pub role: String,
    pub exp: usize,
    pub iat: usize,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    pub token: String,
}

/// The identity subset returned by `GET /api/auth/verify`.
#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
pub struct VerifiedUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VerifyResponse {
    pub user: VerifiedUser,
    pub token: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_validation() {
        let dto = RegisterRequest {
            name: "Ada".to_string(),
            email: "ada@x.com".to_string(),
            password: "pw123456".to_string(),
        };
        assert!(dto.validate().is_ok());

        let dto = RegisterRequest {
            name: "Ada".to_string(),
            email: "ada@x.com".to_string(),
            password: "short".to_string(),
        };
        assert!(dto.validate().is_err());

        let dto = RegisterRequest {
            name: "".to_string(),
            email: "ada@x.com".to_string(),
            password: "pw123456".to_string(),
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_login_request_validation() {
        let dto = LoginRequest {
            email: "ada@x.com".to_string(),
            password: "pw123456".to_string(),
        };
        assert!(dto.validate().is_ok());

        let dto = LoginRequest {
            email: "nonsense".to_string(),
            password: "pw123456".to_string(),
        };
        assert!(dto.validate().is_err());
    }
}
