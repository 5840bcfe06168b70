use std::sync::{Arc, Mutex, MutexGuard};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::apply::{ApplicationError, ApplicationFlow, ApplicationForm, ApplicationSink};
use super::catalog::JobId;
use super::events::{BoardEvent, EventOutcome, JobBoard};
use super::filter::FilterCriteria;
use super::render::{escape_html, JobCard};
use super::storage::KeyValueStore;

/// Board shared between handlers. The mutex serializes events.
pub type SharedBoard<S, K> = Arc<Mutex<JobBoard<S, K>>>;

/// Query string for the listing endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ListingQuery {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

impl From<ListingQuery> for FilterCriteria {
    fn from(query: ListingQuery) -> Self {
        FilterCriteria {
            search_term: query.search.unwrap_or_default(),
            category: query.category,
            location: query.location,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CardsResponse {
    pub criteria: FilterCriteria,
    pub cards: Vec<JobCard>,
}

#[derive(Debug, Serialize)]
pub struct BookmarkResponse {
    pub job_id: JobId,
    pub bookmarked: bool,
}

/// Public view of the apply modal.
#[derive(Debug, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ModalView {
    Open {
        job_id: JobId,
        job_title: String,
        form: ApplicationForm,
    },
    Closed,
}

impl From<&ApplicationFlow> for ModalView {
    fn from(flow: &ApplicationFlow) -> Self {
        match flow.draft() {
            Some(draft) => ModalView::Open {
                job_id: draft.job_id,
                job_title: draft.job_title.clone(),
                form: draft.form.clone(),
            },
            None => ModalView::Closed,
        }
    }
}

/// Router exposing the board as a JSON and HTML rendering surface.
pub fn board_router<S, K>(board: SharedBoard<S, K>) -> Router
where
    S: KeyValueStore + 'static,
    K: ApplicationSink + 'static,
{
    Router::new()
        .route("/api/v1/jobs", get(listing_handler::<S, K>))
        .route("/api/v1/bookmarks", get(bookmarks_handler::<S, K>))
        .route(
            "/api/v1/jobs/:job_id/bookmark",
            post(bookmark_handler::<S, K>),
        )
        .route("/api/v1/jobs/:job_id/apply", post(apply_handler::<S, K>))
        .route(
            "/api/v1/application",
            get(modal_handler::<S, K>)
                .post(submit_handler::<S, K>)
                .delete(close_handler::<S, K>),
        )
        .route("/board", get(page_handler::<S, K>))
        .with_state(board)
}

fn lock<S, K>(board: &SharedBoard<S, K>) -> Result<MutexGuard<'_, JobBoard<S, K>>, Response> {
    board.lock().map_err(|_| {
        let payload = json!({ "error": "board state unavailable" });
        (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
    })
}

pub(crate) async fn listing_handler<S, K>(
    State(board): State<SharedBoard<S, K>>,
    Query(query): Query<ListingQuery>,
) -> Response
where
    S: KeyValueStore + 'static,
    K: ApplicationSink + 'static,
{
    let mut board = match lock(&board) {
        Ok(guard) => guard,
        Err(response) => return response,
    };

    let criteria = FilterCriteria::from(query);
    board.handle(BoardEvent::CriteriaChanged(criteria.clone()));

    let body = CardsResponse {
        criteria,
        cards: board.listing().cards().to_vec(),
    };
    (StatusCode::OK, Json(body)).into_response()
}

pub(crate) async fn bookmarks_handler<S, K>(State(board): State<SharedBoard<S, K>>) -> Response
where
    S: KeyValueStore + 'static,
    K: ApplicationSink + 'static,
{
    let board = match lock(&board) {
        Ok(guard) => guard,
        Err(response) => return response,
    };

    let body = json!({ "cards": board.saved().cards() });
    (StatusCode::OK, Json(body)).into_response()
}

pub(crate) async fn bookmark_handler<S, K>(
    State(board): State<SharedBoard<S, K>>,
    Path(job_id): Path<u32>,
) -> Response
where
    S: KeyValueStore + 'static,
    K: ApplicationSink + 'static,
{
    let mut board = match lock(&board) {
        Ok(guard) => guard,
        Err(response) => return response,
    };

    let job_id = JobId(job_id);
    let bookmarked = match board.handle(BoardEvent::BookmarkClicked(job_id)) {
        EventOutcome::BookmarkToggled { bookmarked, .. } => bookmarked,
        _ => board.bookmarks().contains(job_id),
    };

    (StatusCode::OK, Json(BookmarkResponse { job_id, bookmarked })).into_response()
}

pub(crate) async fn apply_handler<S, K>(
    State(board): State<SharedBoard<S, K>>,
    Path(job_id): Path<u32>,
) -> Response
where
    S: KeyValueStore + 'static,
    K: ApplicationSink + 'static,
{
    let mut board = match lock(&board) {
        Ok(guard) => guard,
        Err(response) => return response,
    };

    board.handle(BoardEvent::ApplyClicked(JobId(job_id)));
    let view = ModalView::from(board.flow());
    (StatusCode::OK, Json(view)).into_response()
}

pub(crate) async fn modal_handler<S, K>(State(board): State<SharedBoard<S, K>>) -> Response
where
    S: KeyValueStore + 'static,
    K: ApplicationSink + 'static,
{
    let board = match lock(&board) {
        Ok(guard) => guard,
        Err(response) => return response,
    };

    let view = ModalView::from(board.flow());
    (StatusCode::OK, Json(view)).into_response()
}

pub(crate) async fn close_handler<S, K>(State(board): State<SharedBoard<S, K>>) -> Response
where
    S: KeyValueStore + 'static,
    K: ApplicationSink + 'static,
{
    let mut board = match lock(&board) {
        Ok(guard) => guard,
        Err(response) => return response,
    };

    board.handle(BoardEvent::CloseModal);
    let view = ModalView::from(board.flow());
    (StatusCode::OK, Json(view)).into_response()
}

pub(crate) async fn submit_handler<S, K>(
    State(board): State<SharedBoard<S, K>>,
    Json(form): Json<ApplicationForm>,
) -> Response
where
    S: KeyValueStore + 'static,
    K: ApplicationSink + 'static,
{
    let mut board = match lock(&board) {
        Ok(guard) => guard,
        Err(response) => return response,
    };

    match board.submit(form) {
        Ok(record) => (StatusCode::CREATED, Json(record)).into_response(),
        Err(ApplicationError::NotOpen) => {
            let payload = json!({ "error": ApplicationError::NotOpen.to_string() });
            (StatusCode::CONFLICT, Json(payload)).into_response()
        }
        Err(ApplicationError::MissingField(field)) => {
            let payload = json!({
                "error": ApplicationError::MissingField(field).to_string(),
                "field": field.label(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
        Err(err @ ApplicationError::Sink(_)) => {
            let payload = json!({ "error": err.to_string() });
            (StatusCode::BAD_GATEWAY, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn page_handler<S, K>(State(board): State<SharedBoard<S, K>>) -> Response
where
    S: KeyValueStore + 'static,
    K: ApplicationSink + 'static,
{
    let board = match lock(&board) {
        Ok(guard) => guard,
        Err(response) => return response,
    };

    let modal = match board.flow().draft() {
        Some(draft) => format!(
            "<div id=\"application-modal\" style=\"display:block\"><h2 id=\"job-title\">{}</h2></div>",
            escape_html(&draft.job_title)
        ),
        None => String::new(),
    };
    let page = format!(
        concat!(
            "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>Job Board</title></head><body>",
            "<section id=\"jobs\"><div id=\"jobs-container\">{listing}</div></section>",
            "<section id=\"bookmarks\"><div id=\"bookmarks-container\">{saved}</div></section>",
            "{modal}",
            "</body></html>"
        ),
        listing = board.listing().to_html(),
        saved = board.saved().to_html(),
        modal = modal,
    );
    Html(page).into_response()
}
