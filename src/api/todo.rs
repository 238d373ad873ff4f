use crate::domain::todo::driving_ports::TodoError;
use crate::external_connections::ExternalConnectivity;
use crate::routing_utils::{
    GenericErrorResponse, Json, TodoErrorResponse, ValidationErrorResponse,
};
use crate::{AppState, SharedData, domain, dto, persistence};
use axum::Router;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::ErrorResponse;
use axum::routing::{delete, get, post, put};
use std::sync::Arc;
use tracing::{error, info};
use utoipa::OpenApi;
use validator::Validate;

#[derive(OpenApi)]
#[openapi(paths(list_todos, create_todo, toggle_todo, delete_todo))]
/// Defines the OpenAPI documentation for the todo API
pub struct TodoApi;
/// Constant used to group todo endpoints in OpenAPI documentation
pub const TODO_API_GROUP: &str = "Todos";

/// Adds the routes under "/todos" to the application router
pub fn todo_routes() -> Router<Arc<SharedData>> {
    Router::new()
        .route(
            "/todos",
            get(|State(app_state): AppState| async move {
                let mut ext_cxn = app_state.ext_cxn.clone();
                let todo_service = domain::todo::TodoService {};

                list_todos(&mut ext_cxn, &todo_service).await
            }),
        )
        .route(
            "/todos",
            post(
                |State(app_state): AppState, Json(new_todo): Json<dto::NewTodo>| async move {
                    let mut ext_cxn = app_state.ext_cxn.clone();
                    let todo_service = domain::todo::TodoService {};

                    create_todo(new_todo, &mut ext_cxn, &todo_service).await
                },
            ),
        )
        .route(
            "/todos/:todo_id",
            put(
                |State(app_state): AppState, Path(todo_id): Path<i64>| async move {
                    let mut ext_cxn = app_state.ext_cxn.clone();
                    let todo_service = domain::todo::TodoService {};

                    toggle_todo(todo_id, &mut ext_cxn, &todo_service).await
                },
            ),
        )
        .route(
            "/todos/:todo_id",
            delete(
                |State(app_state): AppState, Path(todo_id): Path<i64>| async move {
                    let mut ext_cxn = app_state.ext_cxn.clone();
                    let todo_service = domain::todo::TodoService {};

                    delete_todo(todo_id, &mut ext_cxn, &todo_service).await
                },
            ),
        )
}

/// Retrieves the full set of stored todos, newest first
#[utoipa::path(
    get,
    path = "/api/todos",
    tag = TODO_API_GROUP,
    responses(
        (status = 200, description = "The stored todos, newest first", body = Vec<dto::TodoItem>),
        (status = 500, description = "The todos could not be read from storage"),
    ),
)]
async fn list_todos(
    ext_cxn: &mut impl ExternalConnectivity,
    todo_service: &impl domain::todo::driving_ports::TodoPort,
) -> Result<Json<Vec<dto::TodoItem>>, ErrorResponse> {
    info!("Requested todo list");
    let todo_read = persistence::db_todo_driven_ports::DbTodoReader {};

    let todos_result = todo_service.list_todos(&mut *ext_cxn, &todo_read).await;
    match todos_result {
        Ok(todos) => Ok(Json(todos.into_iter().map(dto::TodoItem::from).collect())),
        Err(err) => {
            error!("Could not retrieve todos: {err}");
            Err(GenericErrorResponse(err).into())
        }
    }
}

/// Creates a new, incomplete todo
#[utoipa::path(
    post,
    path = "/api/todos",
    tag = TODO_API_GROUP,
    request_body = dto::NewTodo,
    responses(
        (status = 201, description = "Todo successfully created", body = dto::InsertedTodo),
        (status = 400, description = "The request body was missing or the task was blank"),
        (status = 500, description = "The todo could not be saved"),
    ),
)]
async fn create_todo(
    new_todo: dto::NewTodo,
    ext_cxn: &mut impl ExternalConnectivity,
    todo_service: &impl domain::todo::driving_ports::TodoPort,
) -> Result<(StatusCode, Json<dto::InsertedTodo>), ErrorResponse> {
    info!("Attempt to create todo: {new_todo}");
    new_todo.validate().map_err(ValidationErrorResponse::from)?;

    let todo_write = persistence::db_todo_driven_ports::DbTodoWriter {};
    let domain_new_todo = domain::todo::NewTodo::from(new_todo);

    let creation_result = todo_service
        .create_todo(&domain_new_todo, &mut *ext_cxn, &todo_write)
        .await;
    match creation_result {
        Ok(created_todo) => Ok((
            StatusCode::CREATED,
            Json(dto::InsertedTodo::from(created_todo)),
        )),
        Err(err) => {
            error!("Todo create failure: {err}");
            Err(GenericErrorResponse(err).into())
        }
    }
}

/// Flips the completion state of a todo. The operation accepts no target value, it
/// strictly toggles whatever is currently stored.
#[utoipa::path(
    put,
    path = "/api/todos/{todo_id}",
    tag = TODO_API_GROUP,
    params(
        ("todo_id" = i64, Path, description = "ID of the todo to toggle"),
    ),
    responses(
        (status = 200, description = "The todo's resulting completion state", body = dto::ToggledTodo),
        (status = 404, description = "No todo exists with the given ID"),
        (status = 500, description = "The todo could not be updated"),
    ),
)]
async fn toggle_todo(
    todo_id: i64,
    ext_cxn: &mut impl ExternalConnectivity,
    todo_service: &impl domain::todo::driving_ports::TodoPort,
) -> Result<Json<dto::ToggledTodo>, ErrorResponse> {
    info!("Toggling todo {todo_id}");
    let todo_read = persistence::db_todo_driven_ports::DbTodoReader {};
    let todo_write = persistence::db_todo_driven_ports::DbTodoWriter {};

    let toggle_result = todo_service
        .toggle_todo(todo_id, &mut *ext_cxn, &todo_read, &todo_write)
        .await;
    if let Err(TodoError::PortError(ref port_err)) = toggle_result {
        // The "no matching todo" case doesn't merit an error log
        error!("Failed to toggle todo {todo_id}: {port_err}");
    }
    let now_completed = toggle_result.map_err(TodoErrorResponse::from)?;

    Ok(Json(dto::ToggledTodo {
        id: todo_id,
        completed: u8::from(now_completed),
    }))
}

/// Deletes a todo
#[utoipa::path(
    delete,
    path = "/api/todos/{todo_id}",
    tag = TODO_API_GROUP,
    params(
        ("todo_id" = i64, Path, description = "ID of the todo to delete"),
    ),
    responses(
        (status = 200, description = "The todo was removed", body = dto::DeletionConfirmation),
        (status = 404, description = "No todo exists with the given ID"),
        (status = 500, description = "The todo could not be deleted"),
    ),
)]
async fn delete_todo(
    todo_id: i64,
    ext_cxn: &mut impl ExternalConnectivity,
    todo_service: &impl domain::todo::driving_ports::TodoPort,
) -> Result<Json<dto::DeletionConfirmation>, ErrorResponse> {
    info!("Deleting todo {todo_id}");
    let todo_write = persistence::db_todo_driven_ports::DbTodoWriter {};

    let delete_result = todo_service
        .delete_todo(todo_id, &mut *ext_cxn, &todo_write)
        .await;
    if let Err(TodoError::PortError(ref port_err)) = delete_result {
        error!("Failed to delete todo {todo_id}: {port_err}");
    }
    delete_result.map_err(TodoErrorResponse::from)?;

    Ok(Json(dto::DeletionConfirmation {
        message: "Todo deleted".to_owned(),
    }))
}
