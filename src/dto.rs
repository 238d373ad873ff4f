use crate::domain;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};
use validator::{Validate, ValidationError};

/// Registry of schema components shared across the API's OpenAPI documentation
#[derive(OpenApi)]
#[openapi(components(
    schemas(NewTodo, InsertedTodo, TodoItem, ToggledTodo, DeletionConfirmation, Health),
    responses(crate::routing_utils::BasicErrorResponse)
))]
pub struct OpenApiSchemas;

/// DTO for creating a new todo via the API
#[derive(Deserialize, Display, Validate, ToSchema)]
#[display("{task}")]
#[cfg_attr(test, derive(Serialize, Clone))]
pub struct NewTodo {
    #[validate(custom = "task_not_blank")]
    #[schema(example = "buy milk")]
    pub task: String,
}

impl From<NewTodo> for domain::todo::NewTodo {
    fn from(value: NewTodo) -> Self {
        domain::todo::NewTodo { task: value.task }
    }
}

/// Rejects tasks which are empty once surrounding whitespace is stripped
fn task_not_blank(task: &str) -> Result<(), ValidationError> {
    if task.trim().is_empty() {
        let mut empty_task_error = ValidationError::new("task_not_blank");
        empty_task_error.message = Some("Task cannot be empty".into());
        return Err(empty_task_error);
    }

    Ok(())
}

/// DTO for a newly created todo. The completion flag is reported as 0/1 on the wire.
#[derive(Serialize, ToSchema)]
#[cfg_attr(test, derive(Deserialize, Debug))]
pub struct InsertedTodo {
    #[schema(example = 5)]
    pub id: i64,
    #[schema(example = "buy milk")]
    pub task: String,
    #[schema(example = 0)]
    pub completed: u8,
}

impl From<domain::todo::TodoItem> for InsertedTodo {
    fn from(value: domain::todo::TodoItem) -> Self {
        InsertedTodo {
            id: value.id,
            task: value.task,
            completed: u8::from(value.completed),
        }
    }
}

/// DTO for a returned todo on the API
#[derive(Serialize, ToSchema)]
#[cfg_attr(test, derive(Deserialize, PartialEq, Eq, Debug))]
pub struct TodoItem {
    #[schema(example = 10)]
    pub id: i64,
    #[schema(example = "buy milk")]
    pub task: String,
    #[schema(example = 1)]
    pub completed: u8,
    #[schema(example = "2026-08-05T10:27:44.018775")]
    pub created_at: String,
}

impl From<domain::todo::TodoItem> for TodoItem {
    fn from(value: domain::todo::TodoItem) -> Self {
        TodoItem {
            id: value.id,
            task: value.task,
            completed: u8::from(value.completed),
            created_at: value.created_at,
        }
    }
}

/// DTO reporting a todo's completion state after a toggle
#[derive(Serialize, ToSchema)]
#[cfg_attr(test, derive(Deserialize, PartialEq, Eq, Debug))]
pub struct ToggledTodo {
    #[schema(example = 10)]
    pub id: i64,
    #[schema(example = 1)]
    pub completed: u8,
}

/// DTO confirming the removal of a todo
#[derive(Serialize, ToSchema)]
#[cfg_attr(test, derive(Deserialize, Debug))]
pub struct DeletionConfirmation {
    #[schema(example = "Todo deleted")]
    pub message: String,
}

/// DTO reporting service liveness and the environment it runs in
#[derive(Serialize, ToSchema)]
#[cfg_attr(test, derive(Deserialize, Debug))]
pub struct Health {
    #[schema(example = "healthy")]
    pub status: String,
    #[schema(example = "development")]
    pub environment: String,
}
