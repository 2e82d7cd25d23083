use crate::{
    auth::{
        generate_reset_token, generate_token, hash_password, verify_password, AuthResponse,
        AuthenticatedUserId, ChangePasswordRequest, ForgotPasswordRequest, LoginRequest,
        ResetPasswordRequest, SignupRequest,
    },
    config::Config,
    error::AppError,
    models::{User, UserResponse},
};
use actix_web::{post, web, HttpResponse, Responder};
use serde_json::json;
use sqlx::PgPool;
use validator::Validate;

const USER_COLUMNS: &str = "id, email, password_hash, first_name, last_name, is_verified, \
     last_login, reset_token, reset_expires, created_at, updated_at";

/// Create a new user account.
///
/// The password is hashed before the insert and the plaintext is dropped with
/// the request body. A duplicate email surfaces as 400 via the unique
/// constraint, so concurrent signups cannot both succeed.
#[post("/signup")]
pub async fn signup(
    pool: web::Data<PgPool>,
    signup_data: web::Json<SignupRequest>,
) -> Result<impl Responder, AppError> {
    signup_data.validate()?;

    let password_hash = hash_password(&signup_data.password)?;

    let user = sqlx::query_as::<_, User>(&format!(
        "INSERT INTO users (email, password_hash, first_name, last_name)
         VALUES ($1, $2, $3, $4)
         RETURNING {USER_COLUMNS}"
    ))
    .bind(&signup_data.email)
    .bind(&password_hash)
    .bind(signup_data.first_name.clone().unwrap_or_default())
    .bind(signup_data.last_name.clone().unwrap_or_default())
    .fetch_one(&**pool)
    .await
    .map_err(|err| match err {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
            AppError::ValidationError("email is already registered".into())
        }
        other => other.into(),
    })?;

    Ok(HttpResponse::Created().json(json!({
        "message": "User created successfully",
        "user": UserResponse::from(user),
    })))
}

/// Authenticate a user and issue a bearer token.
///
/// An unknown email is 404; a wrong password is 401. On success `last_login`
/// is bumped with a single-column update.
#[post("/login")]
pub async fn login(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    login_data.validate()?;

    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
    ))
    .bind(&login_data.email)
    .fetch_optional(&**pool)
    .await?
    .ok_or_else(|| AppError::NotFound("user not found".into()))?;

    if !verify_password(&login_data.password, &user.password_hash)? {
        return Err(AppError::Unauthorized("invalid credentials".into()));
    }

    let token = generate_token(user.id, &config.jwt_secret)?;

    sqlx::query("UPDATE users SET last_login = NOW() WHERE id = $1")
        .bind(user.id)
        .execute(&**pool)
        .await?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        token,
        user: UserResponse::from(user),
    }))
}

/// Start a password reset: store a fresh high-entropy token with a 24-hour
/// expiry on the user row.
#[post("/forgot-password")]
pub async fn forgot_password(
    pool: web::Data<PgPool>,
    forgot_data: web::Json<ForgotPasswordRequest>,
) -> Result<impl Responder, AppError> {
    forgot_data.validate()?;

    let user_id: i32 = sqlx::query_scalar("SELECT id FROM users WHERE email = $1")
        .bind(&forgot_data.email)
        .fetch_optional(&**pool)
        .await?
        .ok_or_else(|| AppError::NotFound("user not found".into()))?;

    let reset_token = generate_reset_token();

    sqlx::query(
        "UPDATE users SET reset_token = $1, reset_expires = NOW() + INTERVAL '24 hours'
         WHERE id = $2",
    )
    .bind(&reset_token)
    .bind(user_id)
    .execute(&**pool)
    .await?;

    // TODO: deliver the reset token by email once an SMTP collaborator exists

    Ok(HttpResponse::Ok().json(json!({
        "message": "Password reset instructions sent to your email"
    })))
}

/// Consume a reset token and set a new password.
///
/// Match and expiry are checked in a single query; the token and its expiry
/// are cleared in the same update that stores the new hash, so a token cannot
/// be replayed.
#[post("/reset-password")]
pub async fn reset_password(
    pool: web::Data<PgPool>,
    reset_data: web::Json<ResetPasswordRequest>,
) -> Result<impl Responder, AppError> {
    reset_data.validate()?;

    let user_id: i32 =
        sqlx::query_scalar("SELECT id FROM users WHERE reset_token = $1 AND reset_expires > NOW()")
            .bind(&reset_data.token)
            .fetch_optional(&**pool)
            .await?
            .ok_or_else(|| AppError::Unauthorized("invalid or expired reset token".into()))?;

    let password_hash = hash_password(&reset_data.new_password)?;

    sqlx::query(
        "UPDATE users
         SET password_hash = $1, reset_token = NULL, reset_expires = NULL, updated_at = NOW()
         WHERE id = $2",
    )
    .bind(&password_hash)
    .bind(user_id)
    .execute(&**pool)
    .await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Password reset successfully"
    })))
}

/// Change the password of the authenticated caller after re-verifying the
/// current one.
#[post("/change-password")]
pub async fn change_password(
    pool: web::Data<PgPool>,
    user_id: AuthenticatedUserId,
    change_data: web::Json<ChangePasswordRequest>,
) -> Result<impl Responder, AppError> {
    change_data.validate()?;

    let stored_hash: String = sqlx::query_scalar("SELECT password_hash FROM users WHERE id = $1")
        .bind(user_id.0)
        .fetch_one(&**pool)
        .await?;

    if !verify_password(&change_data.current_password, &stored_hash)? {
        return Err(AppError::Unauthorized("current password is incorrect".into()));
    }

    let password_hash = hash_password(&change_data.new_password)?;

    sqlx::query("UPDATE users SET password_hash = $1, updated_at = NOW() WHERE id = $2")
        .bind(&password_hash)
        .bind(user_id.0)
        .execute(&**pool)
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Password changed successfully"
    })))
}

#[cfg(test)]
mod tests {
    use crate::auth::{LoginRequest, ResetPasswordRequest, SignupRequest};
    use validator::Validate;

    #[test]
    fn test_signup_payload_validation() {
        let invalid_email = SignupRequest {
            email: "invalid-email".to_string(),
            password: "password123".to_string(),
            first_name: None,
            last_name: None,
        };
        assert!(invalid_email.validate().is_err());

        let short_password = SignupRequest {
            email: "test@example.com".to_string(),
            password: "short".to_string(),
            first_name: None,
            last_name: None,
        };
        assert!(short_password.validate().is_err());
    }

    #[test]
    fn test_login_payload_validation() {
        let invalid_email = LoginRequest {
            email: "invalid-email".to_string(),
            password: "password123".to_string(),
        };
        assert!(invalid_email.validate().is_err());
    }

    #[test]
    fn test_reset_payload_rejects_malformed_token() {
        let bad_token = ResetPasswordRequest {
            token: "'; DROP TABLE users; --".to_string(),
            new_password: "password123".to_string(),
        };
        assert!(bad_token.validate().is_err());
    }
}
