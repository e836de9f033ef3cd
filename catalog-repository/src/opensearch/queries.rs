//! OpenSearch request bodies.
//!
//! Pagination (`from`/`size`) is passed as URL parameters, not in the bodies.

use serde_json::{json, Value};

/// Fields matched by full-text search.
pub const SEARCH_FIELDS: [&str; 2] = ["name", "description"];

/// Build an unfiltered listing query.
pub fn build_list_query() -> Value {
    json!({
        "query": {
            "match_all": {}
        }
    })
}

/// Build a full-text query over name and description.
///
/// `multi_match` with the default `best_fields` type: a document matches when
/// either field matches, scored by the backend.
pub fn build_search_query(query_text: &str) -> Value {
    json!({
        "query": {
            "multi_match": {
                "query": query_text,
                "fields": SEARCH_FIELDS
            }
        }
    })
}

/// Build a multi-get body for the given ids.
pub fn build_multi_get_body(ids: &[String]) -> Value {
    let docs: Vec<Value> = ids.iter().map(|id| json!({ "_id": id })).collect();
    json!({ "docs": docs })
}
