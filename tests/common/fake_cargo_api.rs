//! Fake CargoExport server for integration tests.
//!
//! Spins up a minimal `axum` HTTP server on a random TCP port bound to
//! 127.0.0.1. A single route, `GET /export`, answers CargoExport queries:
//! rows registered for the requested `tables` value are sliced by the
//! `offset` and `limit` parameters and returned as a JSON array.
//!
//! Every request is recorded so tests can assert on pagination, and a table
//! can be switched to fail with an HTTP error at a given offset.
//!
//! # Example
//!
//! ```rust,no_run
//! let api = FakeCargoApi::start().await.unwrap();
//! api.set_rows("Traits", rows).await;
//! let config = config_for(&api.export_url());
//! ```

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::Value;
use sto_core::config::CargoQuery;
use sto_core::Category;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

/// One request as seen by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub tables: String,
    pub offset: usize,
    pub limit: usize,
    pub params: HashMap<String, String>,
}

#[derive(Default)]
struct ApiState {
    rows: HashMap<String, Vec<Value>>,
    /// Tables that answer 500 from this offset on.
    failures: HashMap<String, usize>,
    requests: Vec<Request>,
}

type Shared = Arc<Mutex<ApiState>>;

/// Handle to the running fake CargoExport server.
pub struct FakeCargoApi {
    addr: SocketAddr,
    state: Shared,
}

impl FakeCargoApi {
    /// Start the server on a random port. Returns once it is listening.
    pub async fn start() -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let state = Shared::default();

        let app = Router::new()
            .route("/export", get(export))
            .with_state(state.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Ok(Self { addr, state })
    }

    /// URL to put in `[wiki] export_url`.
    pub fn export_url(&self) -> String {
        format!("http://{}/export", self.addr)
    }

    /// Rows served for a CargoExport table.
    pub async fn set_rows(&self, table: &str, rows: Vec<Value>) {
        self.state.lock().await.rows.insert(table.to_string(), rows);
    }

    /// Rows served for the table behind `category`.
    pub async fn set_category_rows(&self, category: Category, rows: Value) {
        let table = table_of(category);
        let rows = match rows {
            Value::Array(rows) => rows,
            other => panic!("fixture rows must be an array, got {other}"),
        };
        self.set_rows(table, rows).await;
    }

    /// Answer 500 for `category` from `offset` on.
    pub async fn fail_from(&self, category: Category, offset: usize) {
        let table = table_of(category).to_string();
        self.state.lock().await.failures.insert(table, offset);
    }

    pub async fn requests(&self) -> Vec<Request> {
        self.state.lock().await.requests.clone()
    }

    /// Offsets requested for `category`, in order.
    pub async fn offsets(&self, category: Category) -> Vec<usize> {
        let table = table_of(category);
        self.requests()
            .await
            .into_iter()
            .filter(|r| r.tables == table)
            .map(|r| r.offset)
            .collect()
    }
}

pub fn table_of(category: Category) -> &'static str {
    CargoQuery::for_category(category)
        .expect("known category")
        .tables
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

async fn export(State(state): State<Shared>, Query(params): Query<HashMap<String, String>>) -> Response {
    let number = |key: &str| params.get(key).and_then(|v| v.parse::<usize>().ok());
    let (Some(tables), Some(offset), Some(limit)) =
        (params.get("tables").cloned(), number("offset"), number("limit"))
    else {
        return (StatusCode::BAD_REQUEST, "missing tables/offset/limit").into_response();
    };

    let mut state = state.lock().await;
    state.requests.push(Request {
        tables: tables.clone(),
        offset,
        limit,
        params: params.clone(),
    });

    if state.failures.get(&tables).is_some_and(|&from| offset >= from) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response();
    }

    let page: Vec<Value> = state
        .rows
        .get(&tables)
        .map(|rows| rows.iter().skip(offset).take(limit).cloned().collect())
        .unwrap_or_default();
    Json(page).into_response()
}
