pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::UserResponse;

// Re-export necessary items
pub use extractors::AuthenticatedUserId;
pub use middleware::AuthMiddleware;
pub use password::{hash_password, verify_password};
pub use token::{generate_reset_token, generate_token, verify_token, Claims};

lazy_static! {
    // Reset tokens are 32 lowercase hex chars; reject anything else before
    // the database lookup.
    static ref RESET_TOKEN_REGEX: regex::Regex = regex::Regex::new(r"^[0-9a-f]{32}$").unwrap();
}

/// Payload for a new account registration.
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    /// Must be a valid email format. Uniqueness is enforced by the database.
    #[validate(email)]
    pub email: String,
    /// Must be at least 8 characters long. Hashed immediately, never stored.
    #[validate(length(min = 8))]
    pub password: String,
    #[validate(length(max = 100))]
    pub first_name: Option<String>,
    #[validate(length(max = 100))]
    pub last_name: Option<String>,
}

/// Payload for a login attempt.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
}

/// Payload for requesting a password-reset token.
#[derive(Debug, Deserialize, Validate)]
pub struct ForgotPasswordRequest {
    #[validate(email)]
    pub email: String,
}

/// Payload for consuming a password-reset token.
#[derive(Debug, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[validate(regex(path = "RESET_TOKEN_REGEX", message = "malformed reset token"))]
    pub token: String,
    #[validate(length(min = 8))]
    pub new_password: String,
}

/// Payload for changing the password of an authenticated user.
#[derive(Debug, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    #[validate(length(min = 8))]
    pub new_password: String,
}

/// Response after a successful login: the bearer token plus the public
/// projection of the authenticated user.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserResponse,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_signup_request_validation() {
        let valid = SignupRequest {
            email: "test@example.com".to_string(),
            password: "password123".to_string(),
            first_name: Some("Test".to_string()),
            last_name: None,
        };
        assert!(valid.validate().is_ok());

        let bad_email = SignupRequest {
            email: "testexample.com".to_string(),
            password: "password123".to_string(),
            first_name: None,
            last_name: None,
        };
        assert!(bad_email.validate().is_err());

        let short_password = SignupRequest {
            email: "test@example.com".to_string(),
            password: "short".to_string(),
            first_name: None,
            last_name: None,
        };
        assert!(short_password.validate().is_err());
    }

    #[test]
    fn test_login_request_validation() {
        let valid = LoginRequest {
            email: "test@example.com".to_string(),
            password: "password123".to_string(),
        };
        assert!(valid.validate().is_ok());

        let invalid_email = LoginRequest {
            email: "not-an-email".to_string(),
            password: "password123".to_string(),
        };
        assert!(invalid_email.validate().is_err());
    }

    #[test]
    fn test_reset_password_request_validation() {
        let valid = ResetPasswordRequest {
            token: "0123456789abcdef0123456789abcdef".to_string(),
            new_password: "new_password".to_string(),
        };
        assert!(valid.validate().is_ok());

        // wrong length
        let short_token = ResetPasswordRequest {
            token: "abc123".to_string(),
            new_password: "new_password".to_string(),
        };
        assert!(short_token.validate().is_err());

        // uppercase / non-hex characters
        let bad_chars = ResetPasswordRequest {
            token: "0123456789ABCDEF0123456789ABCDEZ".to_string(),
            new_password: "new_password".to_string(),
        };
        assert!(bad_chars.validate().is_err());

        let short_password = ResetPasswordRequest {
            token: "0123456789abcdef0123456789abcdef".to_string(),
            new_password: "short".to_string(),
        };
        assert!(short_password.validate().is_err());
    }

    #[test]
    fn test_generated_reset_token_matches_expected_shape() {
        let token = generate_reset_token();
        assert!(RESET_TOKEN_REGEX.is_match(&token), "bad token: {}", token);
    }
}
