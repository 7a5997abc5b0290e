#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use axum::Router;
use axum::extract::{Path, RawQuery, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch};
use tokio::net::TcpListener;

use search_ui::config::Config;
use search_ui::controller::SearchController;
use search_ui::navigator::Navigator;
use search_ui::view::{FormMode, ResultLink, ResultsView};

// =============================================================================
// Mock search API
// =============================================================================

pub struct MockReply {
    pub status: StatusCode,
    pub body: String,
    pub delay: Duration,
}

impl MockReply {
    pub fn json(body: serde_json::Value) -> Self {
        Self::raw(StatusCode::OK, body.to_string())
    }

    pub fn raw(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            delay: Duration::ZERO,
        }
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

type Responder = dyn Fn(&str) -> MockReply + Send + Sync;

#[derive(Clone)]
struct SearchState {
    raw_queries: Arc<Mutex<Vec<String>>>,
    responder: Arc<Responder>,
}

pub struct MockSearchApi {
    pub base_url: String,
    raw_queries: Arc<Mutex<Vec<String>>>,
}

impl MockSearchApi {
    /// Raw query strings as received, e.g. `q=rust%20vs%20go`.
    pub fn raw_queries(&self) -> Vec<String> {
        self.raw_queries.lock().unwrap().clone()
    }
}

async fn search_handler(State(state): State<SearchState>, RawQuery(raw): RawQuery) -> Response {
    let raw = raw.unwrap_or_default();
    state.raw_queries.lock().unwrap().push(raw.clone());

    let q = raw.strip_prefix("q=").unwrap_or_default();
    let q = urlencoding::decode(q).map(|q| q.into_owned()).unwrap_or_default();
    let reply = (state.responder)(&q);

    tokio::time::sleep(reply.delay).await;
    (
        reply.status,
        [(header::CONTENT_TYPE, "application/json")],
        reply.body,
    )
        .into_response()
}

/// Serve `/search`, answering each decoded query with `responder`.
pub async fn spawn_search_api<F>(responder: F) -> Result<MockSearchApi>
where
    F: Fn(&str) -> MockReply + Send + Sync + 'static,
{
    let raw_queries = Arc::new(Mutex::new(Vec::new()));
    let state = SearchState {
        raw_queries: raw_queries.clone(),
        responder: Arc::new(responder),
    };
    let app = Router::new()
        .route("/search", get(search_handler))
        .with_state(state);
    let addr = serve(app).await?;

    Ok(MockSearchApi {
        base_url: format!("http://{addr}"),
        raw_queries,
    })
}

// =============================================================================
// Mock ML API
// =============================================================================

#[derive(Debug, Clone)]
pub struct VisitReport {
    pub search_query_id: String,
    pub content_type: Option<String>,
    pub body: serde_json::Value,
}

#[derive(Clone)]
struct MlState {
    reports: Arc<Mutex<Vec<VisitReport>>>,
    delay: Duration,
}

pub struct MockMlApi {
    pub base_url: String,
    reports: Arc<Mutex<Vec<VisitReport>>>,
}

impl MockMlApi {
    pub fn reports(&self) -> Vec<VisitReport> {
        self.reports.lock().unwrap().clone()
    }
}

async fn visited_urls_handler(
    State(state): State<MlState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: String,
) -> StatusCode {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = serde_json::from_str(&body).unwrap_or(serde_json::Value::Null);
    state.reports.lock().unwrap().push(VisitReport {
        search_query_id: id,
        content_type,
        body,
    });

    tokio::time::sleep(state.delay).await;
    StatusCode::NO_CONTENT
}

/// Serve the visited-urls endpoint, holding every answer back for `delay`.
pub async fn spawn_ml_api(delay: Duration) -> Result<MockMlApi> {
    let reports = Arc::new(Mutex::new(Vec::new()));
    let state = MlState {
        reports: reports.clone(),
        delay,
    };
    let app = Router::new()
        .route("/search-queries/:id/visited-urls/", patch(visited_urls_handler))
        .with_state(state);
    let addr = serve(app).await?;

    Ok(MockMlApi {
        base_url: format!("http://{addr}"),
        reports,
    })
}

async fn serve(app: Router) -> Result<SocketAddr> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });
    Ok(addr)
}

/// A base URL nothing listens on.
pub async fn unreachable_base_url() -> Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(format!("http://{addr}"))
}

// =============================================================================
// Recording view and navigator
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Link(ResultLink),
    Notice(String),
}

#[derive(Default)]
pub struct RecordingView {
    entries: Mutex<Vec<Entry>>,
    modes: Mutex<Vec<FormMode>>,
    clears: AtomicUsize,
}

impl RecordingView {
    pub fn entries(&self) -> Vec<Entry> {
        self.entries.lock().unwrap().clone()
    }

    pub fn links(&self) -> Vec<ResultLink> {
        self.entries()
            .into_iter()
            .filter_map(|e| match e {
                Entry::Link(link) => Some(link),
                Entry::Notice(_) => None,
            })
            .collect()
    }

    pub fn form_modes(&self) -> Vec<FormMode> {
        self.modes.lock().unwrap().clone()
    }

    pub fn clears(&self) -> usize {
        self.clears.load(Ordering::SeqCst)
    }
}

impl ResultsView for RecordingView {
    fn clear(&self) {
        self.clears.fetch_add(1, Ordering::SeqCst);
        self.entries.lock().unwrap().clear();
    }

    fn set_form_mode(&self, mode: FormMode) {
        self.modes.lock().unwrap().push(mode);
    }

    fn append_link(&self, link: &ResultLink) {
        self.entries.lock().unwrap().push(Entry::Link(link.clone()));
    }

    fn append_notice(&self, text: &str) {
        self.entries
            .lock()
            .unwrap()
            .push(Entry::Notice(text.to_string()));
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    visits: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn visits(&self) -> Vec<String> {
        self.visits.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, url: &str) {
        self.visits.lock().unwrap().push(url.to_string());
    }
}

// =============================================================================
// Wiring
// =============================================================================

pub struct Harness {
    pub controller: Arc<SearchController>,
    pub view: Arc<RecordingView>,
    pub navigator: Arc<RecordingNavigator>,
}

pub fn harness(config: &Config) -> Result<Harness> {
    let view = Arc::new(RecordingView::default());
    let navigator = Arc::new(RecordingNavigator::default());
    let client = reqwest::Client::builder().no_proxy().build()?;
    let controller = Arc::new(SearchController::with_client(
        client,
        config,
        view.clone(),
        navigator.clone(),
    ));
    Ok(Harness {
        controller,
        view,
        navigator,
    })
}
