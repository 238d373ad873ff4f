use super::test_util::{empty_request, json_request, prepare_db_and_test};
use crate::api::test_util::deserialize_body;
use crate::dto;
use axum::http::StatusCode;
use serde_json::{Value, json};
use tower::ServiceExt;

#[tokio::test]
#[cfg_attr(not(feature = "integration_test"), ignore)]
async fn todos_survive_a_full_crud_lifecycle() {
    prepare_db_and_test(|app| async move {
        // Create
        let create_response = app
            .clone()
            .oneshot(json_request("POST", "/api/todos", r#"{"task":"write spec"}"#))
            .await
            .expect("create request failed");
        assert_eq!(StatusCode::CREATED, create_response.status());
        let inserted: dto::InsertedTodo = deserialize_body(create_response.into_body()).await;
        assert_eq!(1, inserted.id);
        assert_eq!("write spec", inserted.task);
        assert_eq!(0, inserted.completed);

        // List contains the new todo
        let list_response = app
            .clone()
            .oneshot(empty_request("GET", "/api/todos"))
            .await
            .expect("list request failed");
        assert_eq!(StatusCode::OK, list_response.status());
        let todos: Vec<dto::TodoItem> = deserialize_body(list_response.into_body()).await;
        assert_eq!(1, todos.len());
        assert_eq!(1, todos[0].id);
        assert_eq!("write spec", todos[0].task);
        assert_eq!(0, todos[0].completed);
        assert!(!todos[0].created_at.is_empty());

        // Toggle
        let toggle_response = app
            .clone()
            .oneshot(empty_request("PUT", "/api/todos/1"))
            .await
            .expect("toggle request failed");
        assert_eq!(StatusCode::OK, toggle_response.status());
        let toggled: dto::ToggledTodo = deserialize_body(toggle_response.into_body()).await;
        assert_eq!(dto::ToggledTodo { id: 1, completed: 1 }, toggled);

        // Delete
        let delete_response = app
            .clone()
            .oneshot(empty_request("DELETE", "/api/todos/1"))
            .await
            .expect("delete request failed");
        assert_eq!(StatusCode::OK, delete_response.status());
        let confirmation: dto::DeletionConfirmation =
            deserialize_body(delete_response.into_body()).await;
        assert_eq!("Todo deleted", confirmation.message);

        // Nothing remains
        let final_list_response = app
            .clone()
            .oneshot(empty_request("GET", "/api/todos"))
            .await
            .expect("final list request failed");
        let remaining_todos: Vec<dto::TodoItem> =
            deserialize_body(final_list_response.into_body()).await;
        assert!(remaining_todos.is_empty());
    })
    .await;
}

#[tokio::test]
#[cfg_attr(not(feature = "integration_test"), ignore)]
async fn created_tasks_are_trimmed() {
    prepare_db_and_test(|app| async move {
        let create_response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/todos",
                r#"{"task":"  buy milk  "}"#,
            ))
            .await
            .expect("create request failed");
        assert_eq!(StatusCode::CREATED, create_response.status());
        let inserted: dto::InsertedTodo = deserialize_body(create_response.into_body()).await;
        assert_eq!("buy milk", inserted.task);

        let list_response = app
            .clone()
            .oneshot(empty_request("GET", "/api/todos"))
            .await
            .expect("list request failed");
        let todos: Vec<dto::TodoItem> = deserialize_body(list_response.into_body()).await;
        assert_eq!("buy milk", todos[0].task);
    })
    .await;
}

#[tokio::test]
#[cfg_attr(not(feature = "integration_test"), ignore)]
async fn blank_tasks_are_rejected_without_inserting() {
    prepare_db_and_test(|app| async move {
        for bad_body in [r#"{"task":""}"#, r#"{"task":"   "}"#] {
            let create_response = app
                .clone()
                .oneshot(json_request("POST", "/api/todos", bad_body))
                .await
                .expect("create request failed");
            assert_eq!(StatusCode::BAD_REQUEST, create_response.status());
            let error_body: Value = deserialize_body(create_response.into_body()).await;
            assert_eq!(json!("invalid_input"), error_body["error_code"]);
        }

        let list_response = app
            .clone()
            .oneshot(empty_request("GET", "/api/todos"))
            .await
            .expect("list request failed");
        let todos: Vec<dto::TodoItem> = deserialize_body(list_response.into_body()).await;
        assert!(todos.is_empty());
    })
    .await;
}

#[tokio::test]
#[cfg_attr(not(feature = "integration_test"), ignore)]
async fn a_missing_body_is_rejected_distinctly_from_a_blank_task() {
    prepare_db_and_test(|app| async move {
        let create_response = app
            .clone()
            .oneshot(empty_request("POST", "/api/todos"))
            .await
            .expect("create request failed");
        assert_eq!(StatusCode::BAD_REQUEST, create_response.status());
        let error_body: Value = deserialize_body(create_response.into_body()).await;
        assert_eq!(json!("invalid_json"), error_body["error_code"]);
    })
    .await;
}

#[tokio::test]
#[cfg_attr(not(feature = "integration_test"), ignore)]
async fn listing_returns_newest_todos_first() {
    prepare_db_and_test(|app| async move {
        for task in [r#"{"task":"first"}"#, r#"{"task":"second"}"#] {
            let create_response = app
                .clone()
                .oneshot(json_request("POST", "/api/todos", task))
                .await
                .expect("create request failed");
            assert_eq!(StatusCode::CREATED, create_response.status());
        }

        let list_response = app
            .clone()
            .oneshot(empty_request("GET", "/api/todos"))
            .await
            .expect("list request failed");
        let todos: Vec<dto::TodoItem> = deserialize_body(list_response.into_body()).await;
        assert_eq!(2, todos.len());
        assert_eq!("second", todos[0].task);
        assert_eq!("first", todos[1].task);
    })
    .await;
}

#[tokio::test]
#[cfg_attr(not(feature = "integration_test"), ignore)]
async fn double_toggle_restores_the_original_state() {
    prepare_db_and_test(|app| async move {
        let create_response = app
            .clone()
            .oneshot(json_request("POST", "/api/todos", r#"{"task":"flip me"}"#))
            .await
            .expect("create request failed");
        assert_eq!(StatusCode::CREATED, create_response.status());

        let first_toggle_response = app
            .clone()
            .oneshot(empty_request("PUT", "/api/todos/1"))
            .await
            .expect("first toggle failed");
        let first_toggle: dto::ToggledTodo =
            deserialize_body(first_toggle_response.into_body()).await;
        assert_eq!(1, first_toggle.completed);

        let second_toggle_response = app
            .clone()
            .oneshot(empty_request("PUT", "/api/todos/1"))
            .await
            .expect("second toggle failed");
        let second_toggle: dto::ToggledTodo =
            deserialize_body(second_toggle_response.into_body()).await;
        assert_eq!(0, second_toggle.completed);

        let list_response = app
            .clone()
            .oneshot(empty_request("GET", "/api/todos"))
            .await
            .expect("list request failed");
        let todos: Vec<dto::TodoItem> = deserialize_body(list_response.into_body()).await;
        assert_eq!(0, todos[0].completed);
    })
    .await;
}

#[tokio::test]
#[cfg_attr(not(feature = "integration_test"), ignore)]
async fn operations_on_unknown_ids_return_404_and_change_nothing() {
    prepare_db_and_test(|app| async move {
        let create_response = app
            .clone()
            .oneshot(json_request("POST", "/api/todos", r#"{"task":"survivor"}"#))
            .await
            .expect("create request failed");
        assert_eq!(StatusCode::CREATED, create_response.status());

        let toggle_response = app
            .clone()
            .oneshot(empty_request("PUT", "/api/todos/999"))
            .await
            .expect("toggle request failed");
        assert_eq!(StatusCode::NOT_FOUND, toggle_response.status());
        let toggle_error: Value = deserialize_body(toggle_response.into_body()).await;
        assert_eq!(json!("not_found"), toggle_error["error_code"]);

        let delete_response = app
            .clone()
            .oneshot(empty_request("DELETE", "/api/todos/999"))
            .await
            .expect("delete request failed");
        assert_eq!(StatusCode::NOT_FOUND, delete_response.status());

        let list_response = app
            .clone()
            .oneshot(empty_request("GET", "/api/todos"))
            .await
            .expect("list request failed");
        let todos: Vec<dto::TodoItem> = deserialize_body(list_response.into_body()).await;
        assert_eq!(1, todos.len());
        assert_eq!("survivor", todos[0].task);
    })
    .await;
}

#[tokio::test]
#[cfg_attr(not(feature = "integration_test"), ignore)]
async fn deleting_the_same_todo_twice_returns_404() {
    prepare_db_and_test(|app| async move {
        let create_response = app
            .clone()
            .oneshot(json_request("POST", "/api/todos", r#"{"task":"fleeting"}"#))
            .await
            .expect("create request failed");
        assert_eq!(StatusCode::CREATED, create_response.status());

        let first_delete_response = app
            .clone()
            .oneshot(empty_request("DELETE", "/api/todos/1"))
            .await
            .expect("first delete failed");
        assert_eq!(StatusCode::OK, first_delete_response.status());

        let second_delete_response = app
            .clone()
            .oneshot(empty_request("DELETE", "/api/todos/1"))
            .await
            .expect("second delete failed");
        assert_eq!(StatusCode::NOT_FOUND, second_delete_response.status());
    })
    .await;
}
