//! In-process stand-in for the OpenSearch document APIs the store uses.
//!
//! Writes are visible immediately. An index named `broken` answers every
//! request with a 500; reads and searches against `hung` never answer.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, head, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};

pub const BROKEN_INDEX: &str = "broken";
pub const HUNG_INDEX: &str = "hung";

type Reply = (StatusCode, Json<Value>);

#[derive(Debug, Clone, Deserialize)]
pub struct SearchParams {
    pub from: Option<usize>,
    pub size: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct RecordedSearch {
    pub index: String,
    pub params: SearchParams,
    pub body: Value,
}

#[derive(Default)]
struct Inner {
    indices: HashMap<String, BTreeMap<String, Value>>,
    mappings: HashMap<String, Value>,
    searches: Vec<RecordedSearch>,
    hung_requests: usize,
}

#[derive(Clone, Default)]
pub struct FakeState {
    inner: Arc<Mutex<Inner>>,
}

impl FakeState {
    /// Store a raw `_source` body, bypassing the product codec.
    pub fn insert_raw(&self, index: &str, id: &str, source: Value) {
        let mut inner = self.inner.lock().unwrap();
        inner
            .indices
            .entry(index.to_string())
            .or_default()
            .insert(id.to_string(), source);
    }

    pub fn source(&self, index: &str, id: &str) -> Option<Value> {
        let inner = self.inner.lock().unwrap();
        inner.indices.get(index).and_then(|docs| docs.get(id).cloned())
    }

    pub fn mapping(&self, index: &str) -> Option<Value> {
        self.inner.lock().unwrap().mappings.get(index).cloned()
    }

    pub fn searches(&self) -> Vec<RecordedSearch> {
        self.inner.lock().unwrap().searches.clone()
    }

    /// Requests that reached a `hung` index handler.
    pub fn hung_requests(&self) -> usize {
        self.inner.lock().unwrap().hung_requests
    }

    async fn hang(&self) -> Reply {
        self.inner.lock().unwrap().hung_requests += 1;
        std::future::pending().await
    }
}

pub struct FakeOpenSearch {
    pub url: String,
    pub state: FakeState,
}

impl FakeOpenSearch {
    pub async fn spawn() -> Self {
        let state = FakeState::default();
        let app = Router::new()
            .route("/", get(info))
            .route("/{index}", head(index_exists).put(create_index))
            .route("/{index}/_doc/{id}", post(put_doc).put(put_doc))
            .route("/{index}/_source/{id}", get(get_source))
            .route("/{index}/_search", get(search).post(search))
            .route("/{index}/_mget", get(mget).post(mget))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            url: format!("http://{}", addr),
            state,
        }
    }
}

fn error_reply(status: StatusCode, kind: &str, reason: String) -> Reply {
    (
        status,
        Json(json!({
            "error": { "root_cause": [ { "type": kind, "reason": reason } ], "type": kind, "reason": reason },
            "status": status.as_u16()
        })),
    )
}

fn index_not_found(index: &str) -> Reply {
    error_reply(
        StatusCode::NOT_FOUND,
        "index_not_found_exception",
        format!("no such index [{}]", index),
    )
}

fn broken() -> Reply {
    error_reply(
        StatusCode::INTERNAL_SERVER_ERROR,
        "illegal_state_exception",
        "shard failure".to_string(),
    )
}

fn parse_body(body: &Bytes) -> Value {
    if body.is_empty() {
        return json!({});
    }
    serde_json::from_slice(body).unwrap_or(Value::Null)
}

fn tokens(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
        .collect()
}

async fn info() -> Reply {
    (
        StatusCode::OK,
        Json(json!({
            "name": "fake-node",
            "cluster_name": "fake",
            "version": { "distribution": "opensearch", "number": "2.11.0" },
            "tagline": "The OpenSearch Project: https://opensearch.org/"
        })),
    )
}

async fn index_exists(State(state): State<FakeState>, Path(index): Path<String>) -> StatusCode {
    let inner = state.inner.lock().unwrap();
    if inner.indices.contains_key(&index) {
        StatusCode::OK
    } else {
        StatusCode::NOT_FOUND
    }
}

async fn create_index(
    State(state): State<FakeState>,
    Path(index): Path<String>,
    body: Bytes,
) -> Reply {
    let mut inner = state.inner.lock().unwrap();
    if inner.indices.contains_key(&index) {
        return error_reply(
            StatusCode::BAD_REQUEST,
            "resource_already_exists_exception",
            format!("index [{}] already exists", index),
        );
    }
    inner.indices.insert(index.clone(), BTreeMap::new());
    inner.mappings.insert(index.clone(), parse_body(&body));
    (
        StatusCode::OK,
        Json(json!({ "acknowledged": true, "index": index })),
    )
}

async fn put_doc(
    State(state): State<FakeState>,
    Path((index, id)): Path<(String, String)>,
    body: Bytes,
) -> Reply {
    if index == BROKEN_INDEX {
        return broken();
    }
    let source = parse_body(&body);
    let mut inner = state.inner.lock().unwrap();
    let created = inner
        .indices
        .entry(index.clone())
        .or_default()
        .insert(id.clone(), source)
        .is_none();
    let (status, result) = if created {
        (StatusCode::CREATED, "created")
    } else {
        (StatusCode::OK, "updated")
    };
    (
        status,
        Json(json!({ "_index": index, "_id": id, "result": result })),
    )
}

async fn get_source(
    State(state): State<FakeState>,
    Path((index, id)): Path<(String, String)>,
) -> Reply {
    if index == BROKEN_INDEX {
        return broken();
    }
    if index == HUNG_INDEX {
        return state.hang().await;
    }
    let inner = state.inner.lock().unwrap();
    let Some(docs) = inner.indices.get(&index) else {
        return index_not_found(&index);
    };
    match docs.get(&id) {
        Some(source) => (StatusCode::OK, Json(source.clone())),
        None => error_reply(
            StatusCode::NOT_FOUND,
            "resource_not_found_exception",
            format!("Document not found [{}]/[{}]", index, id),
        ),
    }
}

async fn search(
    State(state): State<FakeState>,
    Path(index): Path<String>,
    Query(params): Query<SearchParams>,
    body: Bytes,
) -> Reply {
    if index == BROKEN_INDEX {
        return broken();
    }
    if index == HUNG_INDEX {
        return state.hang().await;
    }
    let body = parse_body(&body);
    let mut inner = state.inner.lock().unwrap();
    inner.searches.push(RecordedSearch {
        index: index.clone(),
        params: params.clone(),
        body: body.clone(),
    });

    let Some(docs) = inner.indices.get(&index) else {
        return index_not_found(&index);
    };

    let terms = body["query"]["multi_match"]["query"]
        .as_str()
        .map(tokens);
    let matching: Vec<(&String, &Value)> = docs
        .iter()
        .filter(|(_, source)| match &terms {
            None => true,
            Some(terms) => ["name", "description"].iter().any(|field| {
                let words = tokens(source[*field].as_str().unwrap_or_default());
                terms.iter().any(|term| words.contains(term))
            }),
        })
        .collect();

    let hits: Vec<Value> = matching
        .iter()
        .skip(params.from.unwrap_or(0))
        .take(params.size.unwrap_or(10))
        .map(|(id, source)| json!({ "_index": index, "_id": id, "_score": 1.0, "_source": source }))
        .collect();

    (
        StatusCode::OK,
        Json(json!({
            "took": 1,
            "timed_out": false,
            "hits": {
                "total": { "value": matching.len(), "relation": "eq" },
                "max_score": 1.0,
                "hits": hits
            }
        })),
    )
}

async fn mget(
    State(state): State<FakeState>,
    Path(index): Path<String>,
    body: Bytes,
) -> Reply {
    if index == BROKEN_INDEX {
        return broken();
    }
    let body = parse_body(&body);
    let inner = state.inner.lock().unwrap();
    let Some(stored) = inner.indices.get(&index) else {
        return index_not_found(&index);
    };
    let Some(requested) = body["docs"].as_array() else {
        return error_reply(
            StatusCode::BAD_REQUEST,
            "action_request_validation_exception",
            "no documents to get".to_string(),
        );
    };

    // Answer in reverse request order so callers cannot rely on request order.
    let docs: Vec<Value> = requested
        .iter()
        .rev()
        .map(|doc| {
            let id = doc["_id"].as_str().unwrap_or_default();
            match stored.get(id) {
                Some(source) => json!({
                    "_index": index, "_id": id, "_version": 1, "found": true, "_source": source
                }),
                None => json!({ "_index": index, "_id": id, "found": false }),
            }
        })
        .collect();

    (StatusCode::OK, Json(json!({ "docs": docs })))
}
