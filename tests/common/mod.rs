//! Shared helpers: a stub upstream served on a local port and request
//! helpers driving the router with `oneshot`.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Body;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing;
use axum::{Json, Router};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use cine_proxy::config::{AuthMode, Config, ProviderKind};
use cine_proxy::server::{build_router, AppState};
use cine_proxy::upstream::build_source;

#[derive(Debug, Clone)]
pub enum Behavior {
    /// TMDB discover page with `posters` poster-bearing results followed by
    /// `missing` results without a poster.
    Tmdb { posters: usize, missing: usize },
    /// OMDb search pages with the given mix and `totalResults`.
    Omdb {
        posters: usize,
        missing: usize,
        total: usize,
    },
    /// Any request answers with this status and a short body.
    Status(u16),
    /// Answer with a body that is not JSON.
    Garbage,
    /// Sleep before answering an empty TMDB page.
    Slow(Duration),
}

#[derive(Debug, Clone)]
pub struct Call {
    pub query: HashMap<String, String>,
    pub authorization: Option<String>,
}

#[derive(Clone)]
pub struct Stub {
    pub addr: SocketAddr,
    behavior: Behavior,
    calls: Arc<Mutex<Vec<Call>>>,
}

impl Stub {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn tmdb_base(&self) -> String {
        format!("http://{}/3", self.addr)
    }

    pub fn omdb_base(&self) -> String {
        format!("http://{}", self.addr)
    }
}

pub async fn spawn_stub(behavior: Behavior) -> Stub {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let stub = Stub {
        addr,
        behavior,
        calls: Arc::new(Mutex::new(Vec::new())),
    };

    let app = Router::new()
        .route("/3/discover/movie", routing::get(upstream))
        .route("/", routing::get(upstream))
        .with_state(stub.clone());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    stub
}

async fn upstream(
    State(stub): State<Stub>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    let authorization = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let page: usize = query.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
    stub.calls.lock().unwrap().push(Call {
        query,
        authorization,
    });

    match stub.behavior {
        Behavior::Tmdb { posters, missing } => Json(tmdb_page(posters, missing)).into_response(),
        Behavior::Omdb {
            posters,
            missing,
            total,
        } => Json(omdb_page(page, posters, missing, total)).into_response(),
        Behavior::Status(code) => (
            StatusCode::from_u16(code).unwrap(),
            r#"{"status_message":"Invalid API key"}"#,
        )
            .into_response(),
        Behavior::Garbage => "<html>not json</html>".into_response(),
        Behavior::Slow(delay) => {
            tokio::time::sleep(delay).await;
            Json(tmdb_page(0, 0)).into_response()
        }
    }
}

fn tmdb_page(posters: usize, missing: usize) -> Value {
    let mut results = Vec::new();
    for i in 0..posters {
        results.push(json!({
            "id": i + 1,
            "title": format!("Movie {}", i + 1),
            "release_date": "2020-01-01",
            "poster_path": format!("/p{}.jpg", i + 1),
            "vote_average": 6.5,
        }));
    }
    for i in 0..missing {
        results.push(json!({ "id": 1000 + i, "title": "No Poster", "poster_path": null }));
    }
    json!({ "page": 1, "results": results, "total_pages": 1 })
}

fn omdb_page(page: usize, posters: usize, missing: usize, total: usize) -> Value {
    let mut search = Vec::new();
    for i in 0..posters {
        search.push(json!({
            "Title": format!("Movie {page}-{i}"),
            "Year": "2010",
            "imdbID": format!("tt{page:03}{i:04}"),
            "Type": "movie",
            "Poster": format!("https://img.test/{page}-{i}.jpg"),
        }));
    }
    for i in 0..missing {
        search.push(json!({
            "Title": "No Poster",
            "Year": "2010",
            "imdbID": format!("tt9{page:03}{i:03}"),
            "Type": "movie",
            "Poster": "N/A",
        }));
    }
    json!({ "Search": search, "totalResults": total.to_string(), "Response": "True" })
}

pub fn tmdb_config(stub: &Stub) -> Config {
    let mut config = Config::default();
    config.provider = ProviderKind::Tmdb;
    config.tmdb.api_key = Some("0123456789abcdef0123456789abcdef".to_string());
    config.tmdb.auth_mode = AuthMode::ApiKey;
    config.tmdb.base_url = stub.tmdb_base();
    config.tmdb.timeout_secs = 1;
    config
}

pub fn omdb_config(stub: &Stub) -> Config {
    let mut config = Config::default();
    config.provider = ProviderKind::Omdb;
    config.omdb.api_key = Some("omdbkey".to_string());
    config.omdb.base_url = stub.omdb_base();
    config.omdb.timeout_secs = 1;
    config
}

pub fn build_app(config: Config) -> Router {
    let source = build_source(&config).unwrap();
    build_router(AppState::new(config, source))
}

pub async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
