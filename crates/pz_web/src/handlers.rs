use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Form,
};
use pz_core::{Business, Result, ReviewSummary};
use pz_reviews::summarize_document;
use serde::Deserialize;
use std::sync::Arc;

use crate::{views, AppState};

/// `name` and `count` arrive as a posted form or as a query string.
#[derive(Debug, Default, Deserialize)]
pub struct FindParams {
    pub name: Option<String>,
    pub count: Option<String>,
}

pub async fn index() -> Html<String> {
    Html(views::search_form())
}

pub async fn find(State(state): State<Arc<AppState>>, Form(params): Form<FindParams>) -> Response {
    let term = match params.name.as_deref().map(str::trim) {
        Some(term) if !term.is_empty() => term.to_string(),
        _ => return Html(views::search_form()).into_response(),
    };
    let count = state.config.review_count(params.count.as_deref());

    match lookup(&state, &term, count).await {
        Ok(Some((business, summary))) => Html(views::results(&term, &business, &summary)).into_response(),
        Ok(None) => Html(views::no_match(&term)).into_response(),
        Err(e) => {
            tracing::error!("❌ Lookup for {:?} failed: {}", term, e);
            (StatusCode::INTERNAL_SERVER_ERROR, Html(views::failure())).into_response()
        }
    }
}

async fn lookup(state: &AppState, term: &str, count: usize) -> Result<Option<(Business, ReviewSummary)>> {
    let business = match state.search.find_business(term).await? {
        Some(business) => business,
        None => return Ok(None),
    };
    let summary = summarize_document(state.fetcher.as_ref(), &business.url, count).await?;
    Ok(Some((business, summary)))
}
