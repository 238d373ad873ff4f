use super::test_util::{empty_request, prepare_db_and_test};
use crate::api::test_util::deserialize_body;
use crate::dto;
use axum::http::StatusCode;
use tower::ServiceExt;

#[tokio::test]
#[cfg_attr(not(feature = "integration_test"), ignore)]
async fn health_responds_on_both_path_forms() {
    prepare_db_and_test(|app| async move {
        for health_path in ["/health", "/health/"] {
            let health_response = app
                .clone()
                .oneshot(empty_request("GET", health_path))
                .await
                .expect("health request failed");
            assert_eq!(StatusCode::OK, health_response.status());

            let health: dto::Health = deserialize_body(health_response.into_body()).await;
            assert_eq!("healthy", health.status);
            assert_eq!("test", health.environment);
        }
    })
    .await;
}

#[tokio::test]
#[cfg_attr(not(feature = "integration_test"), ignore)]
async fn the_root_path_serves_the_frontend() {
    prepare_db_and_test(|app| async move {
        let frontend_response = app
            .clone()
            .oneshot(empty_request("GET", "/"))
            .await
            .expect("frontend request failed");
        assert_eq!(StatusCode::OK, frontend_response.status());

        let content_type = frontend_response
            .headers()
            .get("content-type")
            .expect("no content type on frontend response")
            .to_str()
            .expect("unreadable content type");
        assert!(content_type.starts_with("text/html"));
    })
    .await;
}
