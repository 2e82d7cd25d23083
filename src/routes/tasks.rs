use crate::{
    error::AppError,
    models::{Task, TaskInput, TaskPriority, TaskQuery, TaskStatus},
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use sqlx::PgPool;
use validator::Validate;

const TASK_COLUMNS: &str = "id, title, description, status, priority, due_date, project_id, \
     assigned_to, created_at, updated_at";

/// Creates a task under a project.
///
/// Status defaults to `todo` and priority to `medium` when omitted. The
/// parent project must exist.
#[post("/projects/{id}/tasks")]
pub async fn create_task(
    pool: web::Data<PgPool>,
    project_id: web::Path<i32>,
    task_data: web::Json<TaskInput>,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;
    let project_id = project_id.into_inner();

    sqlx::query_scalar::<_, i32>("SELECT id FROM projects WHERE id = $1")
        .bind(project_id)
        .fetch_optional(&**pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Project not found".into()))?;

    let input = task_data.into_inner();
    let status = input.status.unwrap_or(TaskStatus::Todo);
    let priority = input.priority.unwrap_or(TaskPriority::Medium);

    let task = sqlx::query_as::<_, Task>(&format!(
        "INSERT INTO tasks (title, description, status, priority, due_date, project_id, assigned_to)
         VALUES ($1, $2, $3, $4, $5, $6, $7)
         RETURNING {TASK_COLUMNS}"
    ))
    .bind(&input.title)
    .bind(&input.description)
    .bind(status)
    .bind(priority)
    .bind(input.due_date)
    .bind(project_id)
    .bind(input.assigned_to)
    .fetch_one(&**pool)
    .await?;

    Ok(HttpResponse::Created().json(task))
}

/// Lists a project's tasks, newest first.
///
/// ## Query Parameters:
/// - `status` (optional): "todo", "in_progress", or "done".
/// - `priority` (optional): "low", "medium", or "high".
/// - `assigned_to` (optional): assignee user id.
/// - `search` (optional): case-insensitive match against title or description.
#[get("/projects/{id}/tasks")]
pub async fn list_tasks(
    pool: web::Data<PgPool>,
    project_id: web::Path<i32>,
    query_params: web::Query<TaskQuery>,
) -> Result<impl Responder, AppError> {
    let project_id = project_id.into_inner();

    sqlx::query_scalar::<_, i32>("SELECT id FROM projects WHERE id = $1")
        .bind(project_id)
        .fetch_optional(&**pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Project not found".into()))?;

    // Conditions for status, priority, assignee, and search are appended
    // dynamically; bind order must match the order below.
    let mut sql = format!("SELECT {TASK_COLUMNS} FROM tasks WHERE project_id = $1");
    let mut param_count = 2;

    let mut conditions: Vec<String> = Vec::new();

    if query_params.status.is_some() {
        conditions.push(format!("status = ${}", param_count));
        param_count += 1;
    }
    if query_params.priority.is_some() {
        conditions.push(format!("priority = ${}", param_count));
        param_count += 1;
    }
    if query_params.assigned_to.is_some() {
        conditions.push(format!("assigned_to = ${}", param_count));
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
        sql.push_str(" AND ");
        sql.push_str(&conditions.join(" AND "));
    }

    sql.push_str(" ORDER BY created_at DESC");

    let mut query_builder = sqlx::query_as::<_, Task>(&sql);

    query_builder = query_builder.bind(project_id);

    if let Some(status) = query_params.status {
        query_builder = query_builder.bind(status);
    }
    if let Some(priority) = query_params.priority {
        query_builder = query_builder.bind(priority);
    }
    if let Some(assigned_to) = query_params.assigned_to {
        query_builder = query_builder.bind(assigned_to);
    }
    if let Some(search) = &query_params.search {
        let search_pattern = format!("%{}%", search);
        query_builder = query_builder.bind(search_pattern.clone());
        query_builder = query_builder.bind(search_pattern);
    }

    let tasks = query_builder.fetch_all(&**pool).await?;

    Ok(HttpResponse::Ok().json(tasks))
}

/// Retrieves a single task by id.
#[get("/tasks/{id}")]
pub async fn get_task(
    pool: web::Data<PgPool>,
    task_id: web::Path<i32>,
) -> Result<impl Responder, AppError> {
    let task = sqlx::query_as::<_, Task>(&format!(
        "SELECT {TASK_COLUMNS} FROM tasks WHERE id = $1"
    ))
    .bind(task_id.into_inner())
    .fetch_optional(&**pool)
    .await?
    .ok_or_else(|| AppError::NotFound("Task not found".into()))?;

    Ok(HttpResponse::Ok().json(task))
}

/// Updates a task with an explicit field-level statement. Omitted status or
/// priority keeps the stored value.
#[put("/tasks/{id}")]
pub async fn update_task(
    pool: web::Data<PgPool>,
    task_id: web::Path<i32>,
    task_data: web::Json<TaskInput>,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;

    let task = sqlx::query_as::<_, Task>(&format!(
        "UPDATE tasks
         SET title = $1, description = $2, status = COALESCE($3, status),
             priority = COALESCE($4, priority), due_date = $5, assigned_to = $6,
             updated_at = NOW()
         WHERE id = $7
         RETURNING {TASK_COLUMNS}"
    ))
    .bind(&task_data.title)
    .bind(&task_data.description)
    .bind(task_data.status)
    .bind(task_data.priority)
    .bind(task_data.due_date)
    .bind(task_data.assigned_to)
    .bind(task_id.into_inner())
    .fetch_optional(&**pool)
    .await?
    .ok_or_else(|| AppError::NotFound("Task not found".into()))?;

    Ok(HttpResponse::Ok().json(task))
}

/// Deletes a task by id.
#[delete("/tasks/{id}")]
pub async fn delete_task(
    pool: web::Data<PgPool>,
    task_id: web::Path<i32>,
) -> Result<impl Responder, AppError> {
    let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
        .bind(task_id.into_inner())
        .execute(&**pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Task not found".into()));
    }

    Ok(HttpResponse::NoContent().finish())
}
