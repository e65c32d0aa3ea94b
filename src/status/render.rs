//! Precomputed per-state response content and Accept-header negotiation
//!
//! Both encodings of a state's body are rendered once at engine construction.
//! Serving a request is a lookup plus a scan of the Accept header values.

use axum::body::Bytes;
use axum::http::header::{ACCEPT, CONTENT_TYPE};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

const CONTENT_TYPE_JSON: &str = "application/json; charset=utf-8";
const CONTENT_TYPE_PLAINTEXT: &str = "text/plain";

/// JSON body shape. Empty fields are omitted from the output.
#[derive(Serialize)]
struct BodyFields<'a> {
    #[serde(skip_serializing_if = "str::is_empty")]
    compatibility: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    application: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    resource: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    state: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    version: &'a str,
}

/// Immutable response content for one engine state.
pub(crate) struct StateContent {
    status: StatusCode,
    json: Bytes,
    plaintext: Bytes,
}

impl StateContent {
    pub(crate) fn new(
        status: StatusCode,
        application: &str,
        resource: &str,
        state: &str,
        version: &str,
    ) -> Self {
        let compatibility = format!("{application}:{state}");

        let mut plaintext = compatibility.clone();
        if !version.is_empty() {
            plaintext.push_str("\nversion:");
            plaintext.push_str(version);
        }
        let plaintext = plaintext.trim().to_string();

        let json = serde_json::to_vec_pretty(&BodyFields {
            compatibility: &compatibility,
            application,
            resource,
            state,
            version,
        })
        .expect("state content serialization");

        Self {
            status,
            json: Bytes::from(json),
            plaintext: Bytes::from(plaintext),
        }
    }

    /// Build the response for one request, negotiating the encoding from its
    /// Accept header values.
    pub(crate) fn respond(&self, headers: &HeaderMap) -> Response {
        if accepts_json(headers) {
            (
                self.status,
                [(CONTENT_TYPE, CONTENT_TYPE_JSON)],
                self.json.clone(),
            )
                .into_response()
        } else {
            (
                self.status,
                [(CONTENT_TYPE, CONTENT_TYPE_PLAINTEXT)],
                self.plaintext.clone(),
            )
                .into_response()
        }
    }
}

/// JSON wins for an absent Accept set, wildcards, and anything json-flavored;
/// every other non-empty Accept set gets plain text.
fn accepts_json(headers: &HeaderMap) -> bool {
    let mut present = false;
    for value in headers.get_all(ACCEPT) {
        present = true;
        let Ok(value) = value.to_str() else { continue };
        if value.contains("*/*") || value.contains("/json") {
            return true;
        }
    }
    !present
}

#[cfg(test)]
#[path = "render_test.rs"]
mod tests;
