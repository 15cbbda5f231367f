//! In-memory clavis store speaking the same wire protocol as the real one.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{DefaultBodyLimit, Query, State},
    http::{header::AUTHORIZATION, HeaderMap},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

pub const CODE_OK: u32 = 0;
pub const CODE_NOT_FOUND: u32 = 1;
pub const CODE_BAD_REQUEST: u32 = 400;
pub const CODE_UNAUTHORIZED: u32 = 401;

/// Largest accepted `/set` body.
pub const MAX_BODY_BYTES: usize = 64 * 1024 * 1024;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GetResponse {
    pub code: u32,
    pub msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SetResponse {
    pub code: u32,
    pub msg: String,
}

#[derive(Deserialize)]
pub struct GetParams {
    pub key: Option<String>,
}

#[derive(Deserialize)]
pub struct SetRequest {
    pub key: String,
    pub value: String,
}

pub struct Store {
    token: String,
    entries: RwLock<HashMap<String, String>>,
}

pub type Db = Arc<Store>;

pub fn app(token: &str) -> Router {
    let db: Db = Arc::new(Store {
        token: token.to_string(),
        entries: RwLock::new(HashMap::new()),
    });
    Router::new()
        .route("/get", get(get_value))
        .route("/set", post(set_value))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(db)
}

pub async fn run(listener: TcpListener, token: &str) -> Result<(), std::io::Error> {
    axum::serve(listener, app(token)).await
}

/// True when the request carries `Authorization: Bearer {token}`.
fn authorized(db: &Store, headers: &HeaderMap) -> bool {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .is_some_and(|t| t == db.token)
}

async fn get_value(
    State(db): State<Db>,
    headers: HeaderMap,
    Query(params): Query<GetParams>,
) -> Json<GetResponse> {
    if !authorized(&db, &headers) {
        tracing::warn!("get rejected: bad token");
        return Json(GetResponse {
            code: CODE_UNAUTHORIZED,
            msg: "unauthorized".to_string(),
            data: None,
        });
    }
    let Some(key) = params.key.filter(|k| !k.is_empty()) else {
        return Json(GetResponse {
            code: CODE_BAD_REQUEST,
            msg: "key is empty".to_string(),
            data: None,
        });
    };
    let entries = db.entries.read().await;
    match entries.get(&key) {
        Some(value) => Json(GetResponse {
            code: CODE_OK,
            msg: String::new(),
            data: Some(value.clone()),
        }),
        None => Json(GetResponse {
            code: CODE_NOT_FOUND,
            msg: "not found".to_string(),
            data: None,
        }),
    }
}

async fn set_value(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(input): Json<SetRequest>,
) -> Json<SetResponse> {
    if !authorized(&db, &headers) {
        tracing::warn!("set rejected: bad token");
        return Json(SetResponse {
            code: CODE_UNAUTHORIZED,
            msg: "unauthorized".to_string(),
        });
    }
    if input.key.is_empty() {
        return Json(SetResponse {
            code: CODE_BAD_REQUEST,
            msg: "key is empty".to_string(),
        });
    }
    tracing::debug!(key = %input.key, "set");
    db.entries.write().await.insert(input.key, input.value);
    Json(SetResponse {
        code: CODE_OK,
        msg: String::new(),
    })
}
