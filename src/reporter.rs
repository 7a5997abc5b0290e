use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::api::MlApi;
use crate::session::ResultSession;

/// A click report running on its own task.
///
/// The report's result is ignored: the task logs a failure and ends. Dropping
/// the handle detaches the task, it is not cancelled.
#[derive(Debug)]
pub struct NotificationHandle {
    task: JoinHandle<()>,
}

impl NotificationHandle {
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the report to be delivered or to fail.
    pub async fn finished(self) {
        if let Err(e) = self.task.await {
            log::debug!("click report task ended abnormally: {e}");
        }
    }
}

/// Sends click-throughs to the ML API without ever waiting for them.
#[derive(Debug, Clone)]
pub struct ClickReporter {
    ml_api: MlApi,
}

impl ClickReporter {
    pub fn new(ml_api: MlApi) -> Self {
        Self { ml_api }
    }

    /// Start reporting a click on `url`, if `session` is tracked.
    ///
    /// Returns immediately; `None` when nothing was sent.
    pub fn dispatch(&self, session: &ResultSession, url: &str) -> Option<NotificationHandle> {
        let id = session.tracking_id()?.clone();
        let runtime = match Handle::try_current() {
            Ok(runtime) => runtime,
            Err(e) => {
                log::warn!("no async runtime, click on {url} not reported: {e}");
                return None;
            }
        };

        let ml_api = self.ml_api.clone();
        let url = url.to_string();
        let task = runtime.spawn(async move {
            if let Err(e) = ml_api.report_visited_url(&id, &url).await {
                log::debug!("ignoring failed click report for query {id}: {e}");
            }
        });
        Some(NotificationHandle { task })
    }
}
