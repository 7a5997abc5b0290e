use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use reqwest::Client;

use crate::api::models::SearchResponse;
use crate::api::{MlApi, SearchApi};
use crate::config::{Config, ResponseOrdering};
use crate::error::{ClickError, SEARCH_FAILED_MESSAGE};
use crate::navigator::Navigator;
use crate::reporter::{ClickReporter, NotificationHandle};
use crate::session::ResultSession;
use crate::view::{FormMode, ResultsView};

/// What a finished search did to the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Rendered(Arc<ResultSession>),
    /// The generic error notice replaced the results.
    Failed,
    /// A newer search was submitted first; the view was left alone.
    Discarded,
}

#[derive(Debug)]
pub struct ClickOutcome {
    pub url: String,
    /// Present when the click is being reported.
    pub notification: Option<NotificationHandle>,
}

#[derive(Default)]
struct Rendered {
    session: Option<Arc<ResultSession>>,
    form_mode: FormMode,
}

/// Drives one search box: submits queries, renders results into a
/// [`ResultsView`] and handles clicks on the rendered links.
pub struct SearchController {
    search_api: SearchApi,
    reporter: ClickReporter,
    view: Arc<dyn ResultsView>,
    navigator: Arc<dyn Navigator>,
    ordering: ResponseOrdering,
    submitted: AtomicU64,
    rendered: Mutex<Rendered>,
}

impl SearchController {
    pub fn new(config: &Config, view: Arc<dyn ResultsView>, navigator: Arc<dyn Navigator>) -> Self {
        Self::with_client(Client::new(), config, view, navigator)
    }

    pub fn with_client(
        client: Client,
        config: &Config,
        view: Arc<dyn ResultsView>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            search_api: SearchApi::new(client.clone(), config.search_api_base_url.clone()),
            reporter: ClickReporter::new(MlApi::new(client, config.ml_api_base_url.clone())),
            view,
            navigator,
            ordering: config.ordering,
            submitted: AtomicU64::new(0),
            rendered: Mutex::new(Rendered::default()),
        }
    }

    /// The result set currently on screen, if any.
    pub fn current_session(&self) -> Option<Arc<ResultSession>> {
        self.rendered().session.clone()
    }

    pub fn form_mode(&self) -> FormMode {
        self.rendered().form_mode
    }

    /// Submit `query` and render whatever comes back.
    ///
    /// Overlapping calls are allowed. Under [`ResponseOrdering::ArrivalOrder`]
    /// the response that resolves last is what stays on screen.
    pub async fn perform_search(&self, query: &str) -> SearchOutcome {
        let seq = self.submitted.fetch_add(1, Ordering::SeqCst) + 1;
        let result = self.search_api.search(query).await;

        let mut rendered = self.rendered();
        if self.ordering == ResponseOrdering::LatestSubmission
            && seq < self.submitted.load(Ordering::SeqCst)
        {
            log::info!("discarding response to search #{seq}, a newer search is pending");
            return SearchOutcome::Discarded;
        }

        // Any JSON answer minimizes the form, even one that is not a result set.
        let response = result.and_then(|body| {
            self.view.clear();
            if rendered.form_mode == FormMode::Full {
                rendered.form_mode = FormMode::Minimized;
                self.view.set_form_mode(FormMode::Minimized);
            }
            SearchResponse::from_body(&body)
        });

        match response {
            Ok(response) => {
                let session = Arc::new(ResultSession::new(seq, response));
                log::info!(
                    "search #{seq} returned {} pages, tracking id: {:?}",
                    session.pages().len(),
                    session.search_query_id()
                );
                for link in session.links() {
                    self.view.append_link(&link);
                }
                rendered.session = Some(session.clone());
                SearchOutcome::Rendered(session)
            }
            Err(e) => {
                log::error!("search #{seq} failed, error: {:#}", e);
                self.view.clear();
                self.view.append_notice(SEARCH_FAILED_MESSAGE);
                rendered.session = None;
                SearchOutcome::Failed
            }
        }
    }

    /// Activate result link `index` of the current result set: report the
    /// click when the set is tracked, then navigate. Never waits on the report.
    pub fn activate(&self, index: usize) -> Result<ClickOutcome, ClickError> {
        let session = self.current_session().ok_or(ClickError::NoResults)?;
        let page = session.page(index).ok_or(ClickError::NoSuchLink(index))?;

        let notification = self.reporter.dispatch(&session, &page.url);
        log::info!("navigating to {}", page.url);
        self.navigator.navigate(&page.url);

        Ok(ClickOutcome {
            url: page.url.clone(),
            notification,
        })
    }

    fn rendered(&self) -> MutexGuard<'_, Rendered> {
        self.rendered.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
