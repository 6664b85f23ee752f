use axum::{extract::State, http::Uri, routing::get, Json, Router};
use tracing::instrument;

use crate::{
    domain::{jobs::JobResponse, search::SearchError, search::SearchResponse},
    AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(search_jobs))
}

#[instrument(name = "GET /jobs", skip(app_state))]
async fn search_jobs(
    State(app_state): State<AppState>,
    uri: Uri,
) -> Result<Json<SearchResponse<JobResponse>>, SearchError> {
    // dropped with the request if the server shuts down first
    let cancel = app_state.shutdown.child_token();

    let response = app_state.job_search.handle(&uri, cancel).await?;

    Ok(Json(response))
}
