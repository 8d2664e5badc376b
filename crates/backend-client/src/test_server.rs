//! Throwaway local server standing in for the managed backend in tests.

use axum::Router;

use crate::config::BackendConfig;
use crate::http::BackendHttp;

pub const ANON_KEY: &str = "anon-key";

/// Serve `router` on an ephemeral port and return a client pointed at it.
pub async fn spawn(router: Router) -> BackendHttp {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    BackendHttp::new(BackendConfig::new(&format!("http://{}", addr), ANON_KEY).unwrap())
}

/// Value of the bearer token on a request, if any.
pub fn bearer(headers: &axum::http::HeaderMap) -> Option<String> {
    headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_string)
}

pub type Rows = std::sync::Arc<std::sync::Mutex<Vec<serde_json::Value>>>;

/// A table endpoint answering like the REST service: `eq.` filters on any
/// column, writes echo the affected rows.
pub fn table(path: &str, rows: Rows) -> Router {
    use std::collections::HashMap;

    use axum::extract::{Query, State};
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::Json;
    use serde_json::Value;

    fn matches(row: &Value, query: &HashMap<String, String>) -> bool {
        query.iter().all(|(column, filter)| match filter.strip_prefix("eq.") {
            Some(expected) => match &row[column.as_str()] {
                Value::String(actual) => actual == expected,
                other => other.to_string() == expected,
            },
            None => true,
        })
    }

    async fn select(State(rows): State<Rows>, Query(query): Query<HashMap<String, String>>) -> Json<Value> {
        let rows = rows.lock().unwrap();
        Json(Value::Array(
            rows.iter().filter(|row| matches(row, &query)).cloned().collect(),
        ))
    }

    async fn insert(State(rows): State<Rows>, Json(row): Json<Value>) -> (StatusCode, Json<Value>) {
        rows.lock().unwrap().push(row.clone());
        (StatusCode::CREATED, Json(Value::Array(vec![row])))
    }

    async fn update(
        State(rows): State<Rows>,
        Query(query): Query<HashMap<String, String>>,
        Json(patch): Json<Value>,
    ) -> Json<Value> {
        let mut rows = rows.lock().unwrap();
        let mut updated = Vec::new();
        for row in rows.iter_mut().filter(|row| matches(row, &query)) {
            if let (Value::Object(target), Value::Object(fields)) = (&mut *row, &patch) {
                for (key, value) in fields {
                    target.insert(key.clone(), value.clone());
                }
            }
            updated.push(row.clone());
        }
        Json(Value::Array(updated))
    }

    async fn delete(State(rows): State<Rows>, Query(query): Query<HashMap<String, String>>) -> Json<Value> {
        let mut rows = rows.lock().unwrap();
        let (removed, kept): (Vec<Value>, Vec<Value>) =
            rows.drain(..).partition(|row| matches(row, &query));
        *rows = kept;
        Json(Value::Array(removed))
    }

    Router::new()
        .route(path, get(select).post(insert).patch(update).delete(delete))
        .with_state(rows)
}
