use crate::{
    auth::AuthenticatedUserId,
    error::AppError,
    models::{Project, ProjectDetail, ProjectInput, ProjectQuery, Task},
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use sqlx::PgPool;
use validator::Validate;

/// Creates a project and records the creator as a member.
///
/// `status` defaults to "active" when omitted. Insert and membership row go
/// through one transaction.
#[post("")]
pub async fn create_project(
    pool: web::Data<PgPool>,
    user_id: AuthenticatedUserId,
    project_data: web::Json<ProjectInput>,
) -> Result<impl Responder, AppError> {
    project_data.validate()?;

    let mut tx = pool.begin().await?;

    let project = sqlx::query_as::<_, Project>(
        "INSERT INTO projects (title, description, status)
         VALUES ($1, $2, COALESCE($3, 'active'))
         RETURNING id, title, description, status, created_at, updated_at",
    )
    .bind(&project_data.title)
    .bind(&project_data.description)
    .bind(&project_data.status)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query("INSERT INTO user_projects (user_id, project_id) VALUES ($1, $2)")
        .bind(user_id.0)
        .bind(project.id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(HttpResponse::Created().json(project))
}

/// Lists projects, newest first.
///
/// ## Query Parameters:
/// - `status` (optional): exact match on the free-text status.
/// - `search` (optional): case-insensitive match against title or description.
#[get("")]
pub async fn list_projects(
    pool: web::Data<PgPool>,
    query_params: web::Query<ProjectQuery>,
) -> Result<impl Responder, AppError> {
    let mut sql = String::from(
        "SELECT id, title, description, status, created_at, updated_at FROM projects",
    );
    let mut param_count = 1;

    let mut conditions: Vec<String> = Vec::new();

    if query_params.status.is_some() {
        conditions.push(format!("status = ${}", param_count));
        param_count += 1;
    }
    if query_params.search.is_some() {
        conditions.push(format!(
            "(title ILIKE ${} OR description ILIKE ${})",
            param_count,
            param_count + 1
        ));
    }

    if !conditions.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&conditions.join(" AND "));
    }

    sql.push_str(" ORDER BY created_at DESC");

    let mut query_builder = sqlx::query_as::<_, Project>(&sql);

    if let Some(status) = &query_params.status {
        query_builder = query_builder.bind(status);
    }
    if let Some(search) = &query_params.search {
        let search_pattern = format!("%{}%", search);
        query_builder = query_builder.bind(search_pattern.clone());
        query_builder = query_builder.bind(search_pattern);
    }

    let projects = query_builder.fetch_all(&**pool).await?;

    Ok(HttpResponse::Ok().json(projects))
}

/// Retrieves a project together with its tasks.
#[get("/{id}")]
pub async fn get_project(
    pool: web::Data<PgPool>,
    project_id: web::Path<i32>,
) -> Result<impl Responder, AppError> {
    let project_id = project_id.into_inner();

    let project = sqlx::query_as::<_, Project>(
        "SELECT id, title, description, status, created_at, updated_at
         FROM projects WHERE id = $1",
    )
    .bind(project_id)
    .fetch_optional(&**pool)
    .await?
    .ok_or_else(|| AppError::NotFound("Project not found".into()))?;

    let tasks = sqlx::query_as::<_, Task>(
        "SELECT id, title, description, status, priority, due_date, project_id, assigned_to, \
         created_at, updated_at
         FROM tasks WHERE project_id = $1 ORDER BY created_at DESC",
    )
    .bind(project_id)
    .fetch_all(&**pool)
    .await?;

    Ok(HttpResponse::Ok().json(ProjectDetail { project, tasks }))
}

/// Updates a project's title, description, and status with an explicit
/// field-level statement.
#[put("/{id}")]
pub async fn update_project(
    pool: web::Data<PgPool>,
    project_id: web::Path<i32>,
    project_data: web::Json<ProjectInput>,
) -> Result<impl Responder, AppError> {
    project_data.validate()?;

    let project = sqlx::query_as::<_, Project>(
        "UPDATE projects
         SET title = $1, description = $2, status = COALESCE($3, status), updated_at = NOW()
         WHERE id = $4
         RETURNING id, title, description, status, created_at, updated_at",
    )
    .bind(&project_data.title)
    .bind(&project_data.description)
    .bind(&project_data.status)
    .bind(project_id.into_inner())
    .fetch_optional(&**pool)
    .await?
    .ok_or_else(|| AppError::NotFound("Project not found".into()))?;

    Ok(HttpResponse::Ok().json(project))
}

/// Deletes a project. Member and task rows go with it via the schema's
/// cascade rules.
#[delete("/{id}")]
pub async fn delete_project(
    pool: web::Data<PgPool>,
    project_id: web::Path<i32>,
) -> Result<impl Responder, AppError> {
    let result = sqlx::query("DELETE FROM projects WHERE id = $1")
        .bind(project_id.into_inner())
        .execute(&**pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Project not found".into()));
    }

    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use crate::models::ProjectInput;
    use validator::Validate;

    #[test]
    fn test_project_input_validation() {
        let invalid_empty_title = ProjectInput {
            title: "".to_string(),
            description: Some("Test Description".to_string()),
            status: None,
        };
        assert!(
            invalid_empty_title.validate().is_err(),
            "Validation should fail for empty title."
        );

        let valid_input = ProjectInput {
            title: "Valid Title".to_string(),
            description: Some("Test Description".to_string()),
            status: Some("archived".to_string()),
        };
        assert!(
            valid_input.validate().is_ok(),
            "Validation should pass for valid input."
        );

        let invalid_long_desc = ProjectInput {
            title: "Valid title for desc test".to_string(),
            description: Some("b".repeat(1001)),
            status: None,
        };
        assert!(
            invalid_long_desc.validate().is_err(),
            "Validation should fail for overly long description."
        );
    }
}
