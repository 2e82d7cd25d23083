use crate::{
    auth::AuthenticatedUserId,
    error::AppError,
    models::{UserQuery, UserResponse},
};
use actix_web::{get, web, HttpResponse, Responder};
use sqlx::PgPool;

const PUBLIC_USER_COLUMNS: &str =
    "id, email, first_name, last_name, created_at, updated_at";

/// Lists users as public projections, optionally filtered by a search term
/// over email and names.
#[get("")]
pub async fn list_users(
    pool: web::Data<PgPool>,
    query_params: web::Query<UserQuery>,
) -> Result<impl Responder, AppError> {
    let users = if let Some(search) = &query_params.search {
        sqlx::query_as::<_, UserResponse>(&format!(
            "SELECT {PUBLIC_USER_COLUMNS} FROM users
             WHERE email ILIKE $1 OR first_name ILIKE $1 OR last_name ILIKE $1
             ORDER BY id"
        ))
        .bind(format!("%{}%", search))
        .fetch_all(&**pool)
        .await?
    } else {
        sqlx::query_as::<_, UserResponse>(&format!(
            "SELECT {PUBLIC_USER_COLUMNS} FROM users ORDER BY id"
        ))
        .fetch_all(&**pool)
        .await?
    };

    Ok(HttpResponse::Ok().json(users))
}

/// Returns the authenticated caller's own record.
#[get("/me")]
pub async fn me(
    pool: web::Data<PgPool>,
    user_id: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    let user = sqlx::query_as::<_, UserResponse>(&format!(
        "SELECT {PUBLIC_USER_COLUMNS} FROM users WHERE id = $1"
    ))
    .bind(user_id.0)
    .fetch_optional(&**pool)
    .await?
    .ok_or_else(|| AppError::NotFound("user not found".into()))?;

    Ok(HttpResponse::Ok().json(user))
}
