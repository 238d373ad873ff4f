use crate::persistence::ExternalConnectivity;
use crate::{SharedData, db, routes};
use axum::Router;
use axum::body::Body;
use axum::http::{Request, header};
use rand::{Rng, thread_rng};
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

/// Provisions a throwaway SQLite database, hands a fully assembled application router
/// to [test_fn], and removes the database file once the test completes.
pub async fn prepare_db_and_test<F, R>(test_fn: F)
where
    R: Future<Output = ()>,
    F: FnOnce(Router) -> R,
{
    let db_path = throwaway_db_path();
    let db_path_str = db_path
        .to_str()
        .expect("throwaway database path was not valid UTF-8")
        .to_owned();

    let db_pool = db::connect_sqlite(&db_path_str)
        .await
        .expect("could not open the throwaway database");
    db::init_schema(&db_pool)
        .await
        .expect("could not initialize the todos schema");

    let shared_data = Arc::new(SharedData {
        ext_cxn: ExternalConnectivity::new(db_pool.clone()),
        environment: "test".to_owned(),
    });
    let app = routes::build_router(shared_data);

    test_fn(app).await;

    db_pool.close().await;
    let _ = std::fs::remove_file(&db_path);
}

fn throwaway_db_path() -> PathBuf {
    let db_id: u32 = thread_rng().gen_range(10_000..99_999);
    std::env::temp_dir().join(format!("todo_rest_test_{db_id}.db"))
}

/// Builds a request carrying a JSON body
pub fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_owned()))
        .expect("could not build JSON request")
}

/// Builds a request with no body at all
pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("could not build empty request")
}
