use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use super::error::ApiError;
use super::{SharedState, INDEX_HTML};
use crate::shortener::{self, Decoded, Determined};

#[derive(Debug, Deserialize)]
pub struct EncodeParams {
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct DecodeParams {
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct DetermineParams {
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct EncodeBody {
    pub url: String,
}

fn query_escape(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

/// GET /
pub async fn index(State(state): State<SharedState>) -> Html<String> {
    if let Some(dir) = &state.static_dir {
        let path = dir.join("index.html");
        match tokio::fs::read_to_string(&path).await {
            Ok(page) => return Html(page),
            Err(e) => tracing::debug!(path = %path.display(), "no custom index page: {}", e),
        }
    }
    Html(INDEX_HTML.to_string())
}

/// GET /encode?value=
pub async fn encode(
    State(state): State<SharedState>,
    params: Result<Query<EncodeParams>, QueryRejection>,
) -> Result<Json<EncodeBody>, ApiError> {
    let Query(params) = params?;
    let url = state.shortener.encode(&params.value).await?;
    Ok(Json(EncodeBody { url }))
}

/// GET /decode?url=
pub async fn decode(
    State(state): State<SharedState>,
    params: Result<Query<DecodeParams>, QueryRejection>,
) -> Result<Json<Decoded>, ApiError> {
    let Query(params) = params?;
    Ok(Json(state.shortener.decode(&params.url).await?))
}

/// GET /determine?query=
pub async fn determine(
    State(state): State<SharedState>,
    params: Result<Query<DetermineParams>, QueryRejection>,
) -> Result<Redirect, ApiError> {
    let Query(params) = params?;
    let redirect = match state.shortener.determine(&params.query) {
        Determined::Decode(url) => Redirect::to(&format!("/decode?url={}", query_escape(&url))),
        Determined::Encode(value) => {
            Redirect::to(&format!("/encode?value={}", query_escape(&value)))
        }
    };
    Ok(redirect)
}

/// GET /{code}, /redirect/{code}, /{short url}
///
/// The result element links to `/{short url}`, so the full URL (scheme
/// included) arrives here as the path.
pub async fn follow(
    State(state): State<SharedState>,
    Path(path): Path<String>,
) -> Result<Response, ApiError> {
    let target = path.strip_prefix("redirect/").unwrap_or(&path);
    match state.shortener.follow(target).await? {
        shortener::Redirect::External(url) => Ok(Redirect::temporary(&url).into_response()),
        shortener::Redirect::Decode(code) => {
            Ok(Redirect::to(&format!("/decode?url={}", query_escape(&code))).into_response())
        }
    }
}
