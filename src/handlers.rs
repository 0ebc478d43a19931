use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse, Response},
    Json,
};
use futures::future::join_all;
use serde::Serialize;
use std::collections::HashMap;
use tracing::{info, warn};

use crate::catalog::Category;
use crate::config::RenderMode;
use crate::error::AppError;
use crate::render::{render_prerendered, render_shell, ShellOptions};
use crate::server::AppState;
use crate::upstream::{MovieSource, MovieSummary};

#[derive(Debug, Serialize)]
pub struct CategoryMovies {
    pub category: &'static str,
    pub movies: Vec<MovieSummary>,
}

/// Fetch one category, turning any upstream failure into an empty list.
pub async fn fetch_or_empty(source: &dyn MovieSource, category: &Category) -> Vec<MovieSummary> {
    match source.fetch(category).await {
        Ok(movies) => {
            info!(
                provider = source.provider().display_name(),
                category = category.id,
                count = movies.len(),
                "upstream returned movies"
            );
            movies
        }
        Err(e) => {
            warn!(
                provider = source.provider().display_name(),
                category = category.id,
                error = %e,
                "upstream fetch failed, answering with no movies"
            );
            Vec::new()
        }
    }
}

pub async fn movies(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response, AppError> {
    let Some(source) = state.source.as_deref() else {
        return Err(AppError::MissingCredential(
            state.config.provider.credential_var(),
        ));
    };

    let category = state.catalog.resolve(params.get("category").map(String::as_str));
    let movies = fetch_or_empty(source, category).await;

    if state.config.api.envelope {
        Ok(Json(CategoryMovies {
            category: category.name,
            movies,
        })
        .into_response())
    } else {
        Ok(Json(movies).into_response())
    }
}

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let opts = ShellOptions {
        provider: state.config.provider,
        missing_credential: state.source.is_none(),
    };

    match (state.config.render, state.source.as_deref()) {
        (RenderMode::Client, _) => Html(render_shell(&state.catalog, &opts)),
        (RenderMode::Prerendered, None) => Html(render_prerendered(&state.catalog, &[], &opts)),
        (RenderMode::Prerendered, Some(source)) => {
            let categories = state.catalog.categories();
            let results = join_all(
                categories
                    .iter()
                    .map(|category| fetch_or_empty(source, category)),
            )
            .await;
            let sections: Vec<(&Category, Vec<MovieSummary>)> =
                categories.iter().zip(results).collect();
            Html(render_prerendered(&state.catalog, &sections, &opts))
        }
    }
}

pub async fn healthz() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
