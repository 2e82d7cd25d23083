use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::Task;

/// A project row. `status` is free text (default "active"); no state machine
/// is enforced on it.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Project {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating or updating a project.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct ProjectInput {
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    #[validate(length(max = 1000))]
    pub description: Option<String>,

    /// Omitted on create means "active"; omitted on update keeps the stored
    /// value.
    #[validate(length(min = 1, max = 50))]
    pub status: Option<String>,
}

/// A project together with its tasks, as returned by the detail endpoint.
#[derive(Debug, Serialize)]
pub struct ProjectDetail {
    #[serde(flatten)]
    pub project: Project,
    pub tasks: Vec<Task>,
}

/// Query parameters for listing projects.
#[derive(Debug, Deserialize)]
pub struct ProjectQuery {
    pub status: Option<String>,
    /// Case-insensitive match against title or description.
    pub search: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_input_validation() {
        let valid = ProjectInput {
            title: "Launch checklist".to_string(),
            description: Some("Everything left before the launch".to_string()),
            status: None,
        };
        assert!(valid.validate().is_ok());

        let empty_title = ProjectInput {
            title: "".to_string(),
            description: None,
            status: None,
        };
        assert!(empty_title.validate().is_err());

        let long_title = ProjectInput {
            title: "a".repeat(201),
            description: None,
            status: None,
        };
        assert!(long_title.validate().is_err());

        let empty_status = ProjectInput {
            title: "Valid".to_string(),
            description: None,
            status: Some("".to_string()),
        };
        assert!(empty_status.validate().is_err());
    }

    #[test]
    fn test_project_detail_flattens_project_fields() {
        let detail = ProjectDetail {
            project: Project {
                id: 4,
                title: "Board".to_string(),
                description: None,
                status: "active".to_string(),
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
            tasks: vec![],
        };

        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["id"], 4);
        assert_eq!(json["status"], "active");
        assert!(json["tasks"].as_array().unwrap().is_empty());
    }
}
