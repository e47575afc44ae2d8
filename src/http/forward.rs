//! Forwarding of passed-through requests to the upstream application.
//!
//! # Responsibilities
//! - Select the upstream by path prefix
//! - Rewrite the URI authority, clean and extend headers
//! - Stream request and response bodies without buffering
//!
//! # Design Decisions
//! - No retries: one upstream call per request
//! - Connection failures map to 502, missing upstream to 404
//! - Requests are sent upstream as HTTP/1.1 regardless of the client protocol

use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{
        uri::{PathAndQuery, Scheme},
        Request, StatusCode, Uri, Version,
    },
    response::{IntoResponse, Response},
};

use crate::http::headers::{set_forwarded, strip_hop_by_hop};
use crate::http::request::request_id;
use crate::http::server::AppState;
use crate::observability::metrics;

/// Fallback handler: forward everything that reached the application layer.
pub async fn forward_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let path = request.uri().path().to_owned();
    let request_id = request_id(&request).to_owned();

    let Some(upstream) = state.upstreams.match_path(&path).cloned() else {
        tracing::warn!(request_id = %request_id, path = %path, "No upstream matched");
        return (StatusCode::NOT_FOUND, "No matching upstream").into_response();
    };

    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);

    let (mut parts, body) = request.into_parts();
    strip_hop_by_hop(&mut parts.headers);
    set_forwarded(&mut parts.headers, peer, state.proto);

    let mut uri_parts = parts.uri.clone().into_parts();
    uri_parts.scheme = Some(Scheme::HTTP);
    uri_parts.authority = Some(upstream.authority.clone());
    if uri_parts.path_and_query.is_none() {
        uri_parts.path_and_query = Some(PathAndQuery::from_static("/"));
    }
    parts.uri = match Uri::from_parts(uri_parts) {
        Ok(uri) => uri,
        Err(e) => {
            tracing::error!(request_id = %request_id, upstream = %upstream.name, error = %e, "Failed to build upstream URI");
            return (StatusCode::BAD_GATEWAY, "Upstream request failed").into_response();
        }
    };
    parts.version = Version::HTTP_11;

    tracing::debug!(
        request_id = %request_id,
        upstream = %upstream.name,
        uri = %parts.uri,
        "Forwarding request"
    );

    match state.client.request(Request::from_parts(parts, body)).await {
        Ok(response) => {
            metrics::record_upstream(&upstream.name, response.status().as_u16(), start_time);
            let (mut parts, body) = response.into_parts();
            strip_hop_by_hop(&mut parts.headers);
            Response::from_parts(parts, Body::new(body))
        }
        Err(e) => {
            tracing::error!(request_id = %request_id, upstream = %upstream.name, error = %e, "Upstream error");
            metrics::record_upstream(&upstream.name, StatusCode::BAD_GATEWAY.as_u16(), start_time);
            (StatusCode::BAD_GATEWAY, "Upstream request failed").into_response()
        }
    }
}
