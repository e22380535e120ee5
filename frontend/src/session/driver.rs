//! Async event loop driving one [`BrowsingSession`].

use std::sync::Arc;
use std::time::Duration;

use common::filter_state::FilterTransition;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::api::products_api::{FetchOutcome, ProductsApi};
use crate::data_definitions::url_sync::Navigator;
use crate::session::browsing_session::{BrowsingSession, SessionView};
use crate::session::fetch_orchestrator::FetchTicket;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Transition(FilterTransition),
    /// Raw search box contents; applied after the debounce delay.
    SearchInput(String),
    /// Back/forward landed on this query string.
    Navigated(String),
    Shutdown,
}

pub struct SessionHandle {
    pub events: mpsc::Sender<SessionEvent>,
    pub view: watch::Receiver<SessionView>,
    pub task: JoinHandle<()>,
}

impl SessionHandle {
    pub async fn send(&self, event: SessionEvent) -> anyhow::Result<()> {
        self.events.send(event).await.map_err(|_| anyhow::anyhow!("session driver has stopped"))
    }

    pub async fn shutdown(self) -> anyhow::Result<()> {
        self.send(SessionEvent::Shutdown).await?;
        self.task.await?;
        Ok(())
    }
}

type Completion = (FetchTicket, FetchOutcome);

fn spawn_fetch(api: &Arc<dyn ProductsApi>, completions: &mpsc::UnboundedSender<Completion>, ticket: FetchTicket) {
    let api = api.clone();
    let completions = completions.clone();
    tokio::spawn(async move {
        let outcome = api.fetch_products(&ticket.snapshot).await;
        // the driver may already be gone
        let _ = completions.send((ticket, outcome));
    });
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

/// Starts the session from the navigator's URL and processes events one at a time.
pub fn spawn_session<N>(navigator: N, api: Arc<dyn ProductsApi>, search_debounce: Duration) -> SessionHandle
where
    N: Navigator + 'static,
{
    let (events_tx, mut events_rx) = mpsc::channel::<SessionEvent>(64);
    let (completions_tx, mut completions_rx) = mpsc::unbounded_channel::<Completion>();

    let (mut session, ticket) = BrowsingSession::from_url(navigator, search_debounce);
    let (view_tx, view_rx) = watch::channel(session.view());

    let task = tokio::spawn(async move {
        spawn_fetch(&api, &completions_tx, ticket);
        loop {
            let deadline = session.search_deadline();
            let ticket = tokio::select! {
                event = events_rx.recv() => match event {
                    Some(SessionEvent::Transition(transition)) => session.apply(transition),
                    Some(SessionEvent::SearchInput(term)) => {
                        session.type_search(term, Instant::now());
                        None
                    }
                    Some(SessionEvent::Navigated(query)) => session.on_navigation(&query),
                    Some(SessionEvent::Shutdown) | None => break,
                },
                Some((ticket, outcome)) = completions_rx.recv() => {
                    session.complete(&ticket, outcome);
                    None
                }
                _ = wait_until(deadline) => session.poll_search(Instant::now()),
            };
            if let Some(ticket) = ticket {
                spawn_fetch(&api, &completions_tx, ticket);
            }
            view_tx.send_replace(session.view());
        }
        tracing::info!("session driver stopped");
    });

    SessionHandle { events: events_tx, view: view_rx, task }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use common::filter_state::FilterState;
    use common::products_response::{AccessLevel, QueryResult};
    use pretty_assertions::assert_eq;

    use crate::data_definitions::url_sync::MemoryNavigator;
    use crate::session::fetch_orchestrator::FetchStatus;

    /// Answers with one page per request and remembers what was asked.
    #[derive(Default)]
    struct RecordingApi {
        requests: Mutex<Vec<FilterState>>,
        delay: Duration,
    }

    #[async_trait]
    impl ProductsApi for RecordingApi {
        async fn fetch_products(&self, state: &FilterState) -> FetchOutcome {
            if let Ok(mut requests) = self.requests.lock() {
                requests.push(state.clone());
            }
            tokio::time::sleep(self.delay).await;
            FetchOutcome::Success(QueryResult {
                total_count: 100,
                page: state.page,
                page_size: state.page_size,
                total_pages: 4,
                access_level: AccessLevel::Full,
                ..QueryResult::default()
            })
        }
    }

    fn requested_terms(api: &RecordingApi) -> Vec<String> {
        api.requests.lock().expect("lock").iter().map(|s| s.search_term.clone()).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn initial_fetch_then_transition() {
        let api = Arc::new(RecordingApi::default());
        let mut handle = spawn_session(MemoryNavigator::new("category=1"), api.clone(), Duration::from_millis(300));

        let view = handle.view.wait_for(|v| v.status == FetchStatus::Success).await.expect("view").clone();
        assert_eq!(view.result.total_pages, 4);
        assert_eq!(view.url, "category=1");

        handle.send(SessionEvent::Transition(FilterTransition::SetPage(2))).await.expect("send");
        let view = handle
            .view
            .wait_for(|v| v.state.page == 2 && v.status == FetchStatus::Success)
            .await
            .expect("view")
            .clone();
        assert_eq!(view.url, "category=1&page=2");
        assert_eq!(api.requests.lock().expect("lock").len(), 2);

        handle.shutdown().await.expect("shutdown");
    }

    #[tokio::test(start_paused = true)]
    async fn search_input_is_debounced() {
        let api = Arc::new(RecordingApi::default());
        let mut handle = spawn_session(MemoryNavigator::new(""), api.clone(), Duration::from_millis(300));
        handle.view.wait_for(|v| v.status == FetchStatus::Success).await.expect("view");

        for term in ["p", "pi", "pika", "pikachu"] {
            handle.send(SessionEvent::SearchInput(term.to_string())).await.expect("send");
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        let view = handle
            .view
            .wait_for(|v| v.state.search_term == "pikachu" && v.status == FetchStatus::Success)
            .await
            .expect("view")
            .clone();
        assert_eq!(view.url, "category=3&q=pikachu");
        assert_eq!(requested_terms(&api), vec!["".to_string(), "pikachu".to_string()]);

        handle.shutdown().await.expect("shutdown");
    }

    #[tokio::test(start_paused = true)]
    async fn only_latest_of_overlapping_fetches_lands() {
        let api = Arc::new(RecordingApi { delay: Duration::from_millis(500), ..RecordingApi::default() });
        let mut handle = spawn_session(MemoryNavigator::new("category=3"), api.clone(), Duration::from_millis(300));

        handle.send(SessionEvent::Transition(FilterTransition::SetCategory(1))).await.expect("send");
        handle.send(SessionEvent::Navigated("category=68".to_string())).await.expect("send");
        let view = handle.view.wait_for(|v| v.status == FetchStatus::Success).await.expect("view").clone();
        assert_eq!(view.state.category, 68);
        assert_eq!(view.result.page, 1);
        assert_eq!(api.requests.lock().expect("lock").len(), 3);

        handle.shutdown().await.expect("shutdown");
    }
}
