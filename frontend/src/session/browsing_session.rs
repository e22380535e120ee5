//! One user's browsing session: filter state, URL and the fetch lifecycle.

use std::time::Duration;

use common::filter_state::{FilterState, FilterTransition};
use common::products_response::QueryResult;
use common::url_codec::{decode, encode};
use tokio::time::Instant;

use crate::api::products_api::FetchOutcome;
use crate::data_definitions::url_sync::{Navigator, sync_url};
use crate::session::fetch_orchestrator::{FetchOrchestrator, FetchStatus, FetchTicket};
use crate::session::search_debounce::SearchDebounce;

/// Snapshot of the session for rendering.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionView {
    pub state: FilterState,
    pub url: String,
    pub status: FetchStatus,
    pub result: QueryResult,
    pub error_message: Option<String>,
}

pub struct BrowsingSession<N: Navigator> {
    state: FilterState,
    navigator: N,
    orchestrator: FetchOrchestrator,
    debounce: SearchDebounce,
    known_total_pages: Option<u32>,
}

impl<N: Navigator> BrowsingSession<N> {
    /// Seeds the state from the navigator's URL, canonicalizes the URL and
    /// starts the initial fetch.
    pub fn from_url(mut navigator: N, search_debounce: Duration) -> (Self, FetchTicket) {
        let state = decode(&navigator.current_query());
        sync_url(&mut navigator, &state);
        let mut session = Self {
            state,
            navigator,
            orchestrator: FetchOrchestrator::new(),
            debounce: SearchDebounce::new(search_debounce),
            known_total_pages: None,
        };
        let ticket = session.orchestrator.begin(session.state.clone());
        (session, ticket)
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn status(&self) -> FetchStatus {
        self.orchestrator.status()
    }

    pub fn result(&self) -> &QueryResult {
        self.orchestrator.result()
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            state: self.state.clone(),
            url: encode(&self.state),
            status: self.orchestrator.status(),
            result: self.orchestrator.result().clone(),
            error_message: self.orchestrator.error_message().map(String::from),
        }
    }

    /// Applies a user transition. No-op transitions neither touch the URL nor fetch.
    /// Only paging keeps the known page count; any other change invalidates it.
    pub fn apply(&mut self, transition: FilterTransition) -> Option<FetchTicket> {
        let paging = matches!(transition, FilterTransition::SetPage(_));
        let mut next = self.state.apply(transition);
        if let (true, Some(total_pages)) = (paging, self.known_total_pages) {
            next = next.clamp_page(total_pages);
        }
        if next == self.state {
            return None;
        }
        if next.search_term != self.state.search_term {
            self.debounce.cancel();
        }
        if !paging {
            self.known_total_pages = None;
        }
        self.state = next;
        sync_url(&mut self.navigator, &self.state);
        Some(self.orchestrator.begin(self.state.clone()))
    }

    /// History navigation (back/forward): adopts the URL's state without rewriting it.
    pub fn on_navigation(&mut self, query: &str) -> Option<FetchTicket> {
        let decoded = decode(query);
        if decoded == self.state {
            return None;
        }
        self.debounce.cancel();
        self.known_total_pages = None;
        self.state = decoded;
        Some(self.orchestrator.begin(self.state.clone()))
    }

    /// Records a keystroke in the search box.
    pub fn type_search(&mut self, term: String, now: Instant) {
        self.debounce.record(term, now);
    }

    pub fn search_deadline(&self) -> Option<Instant> {
        self.debounce.deadline()
    }

    /// Applies the debounced search term once its deadline has passed.
    pub fn poll_search(&mut self, now: Instant) -> Option<FetchTicket> {
        let term = self.debounce.take_due(now)?;
        self.apply(FilterTransition::SetSearchTerm(term))
    }

    /// Hands a finished fetch to the orchestrator. Returns whether it was applied.
    pub fn complete(&mut self, ticket: &FetchTicket, outcome: FetchOutcome) -> bool {
        let applied = self.orchestrator.complete(ticket, &self.state, outcome);
        if applied {
            self.known_total_pages = match self.orchestrator.status() {
                FetchStatus::Success | FetchStatus::AccessDenied => Some(self.orchestrator.result().total_pages),
                _ => None,
            };
        }
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_definitions::url_sync::MemoryNavigator;
    use crate::session::search_debounce::DEFAULT_SEARCH_DEBOUNCE;
    use common::facet_values::{PriceRange, SortColumn};
    use common::products_response::AccessLevel;
    use pretty_assertions::assert_eq;

    fn session(query: &str) -> (BrowsingSession<MemoryNavigator>, FetchTicket) {
        BrowsingSession::from_url(MemoryNavigator::new(query), DEFAULT_SEARCH_DEBOUNCE)
    }

    fn pages(total_pages: u32) -> FetchOutcome {
        FetchOutcome::Success(QueryResult {
            total_count: total_pages as u64 * 25,
            page: 1,
            page_size: 25,
            total_pages,
            access_level: AccessLevel::Full,
            ..QueryResult::default()
        })
    }

    #[test]
    fn starts_from_url_and_canonicalizes_it() {
        let (session, ticket) = session("?sort_dir=asc&category=1&limit=25");
        assert_eq!(session.navigator().current_query(), "category=1&sort_dir=asc");
        assert_eq!(session.status(), FetchStatus::Loading);
        assert_eq!(ticket.snapshot, *session.state());
    }

    #[test]
    fn transitions_replace_url_and_refetch() {
        let (mut session, _) = session("category=3&page=4");
        let ticket = session.apply(FilterTransition::SetPriceRange(PriceRange::From5To20)).expect("fetch");
        assert_eq!(ticket.snapshot.page, 1);
        assert_eq!(session.navigator().current_query(), "category=3&price=5-20");
        assert_eq!(session.navigator().history_len(), 1);

        assert_eq!(session.apply(FilterTransition::SetPriceRange(PriceRange::From5To20)), None);
        assert_eq!(session.navigator().replacements(), 1);
    }

    #[test]
    fn sort_toggle_round_trips_through_url() {
        let (mut session, _) = session("category=3");
        session.apply(FilterTransition::SetSort(SortColumn::Name));
        assert_eq!(session.navigator().current_query(), "category=3&sort_by=name&sort_dir=asc");
        session.apply(FilterTransition::SetSort(SortColumn::Name));
        assert_eq!(session.navigator().current_query(), "category=3&sort_by=name");
    }

    #[test]
    fn page_requests_clamp_to_known_total() {
        let (mut session, ticket) = session("category=3");
        assert!(session.complete(&ticket, pages(3)));

        let ticket = session.apply(FilterTransition::SetPage(9)).expect("fetch");
        assert_eq!(ticket.snapshot.page, 3);
        assert_eq!(session.apply(FilterTransition::SetPage(7)), None);
    }

    #[test]
    fn page_count_is_forgotten_when_the_result_set_changes() {
        let (mut navigated, ticket) = session("category=3");
        assert!(navigated.complete(&ticket, pages(3)));
        navigated.on_navigation("category=1").expect("fetch");
        let ticket = navigated.apply(FilterTransition::SetPage(9)).expect("fetch");
        assert_eq!(ticket.snapshot.page, 9);

        let (mut switched, ticket) = session("category=3");
        assert!(switched.complete(&ticket, pages(3)));
        switched.apply(FilterTransition::SetCategory(68)).expect("fetch");
        let ticket = switched.apply(FilterTransition::SetPage(9)).expect("fetch");
        assert_eq!(ticket.snapshot.page, 9);
    }

    #[test]
    fn stale_completion_does_not_overwrite_newer_state() {
        let (mut session, first) = session("category=3");
        let second = session.apply(FilterTransition::SetCategory(1)).expect("fetch");
        assert!(!session.complete(&first, pages(9)));
        assert_eq!(session.status(), FetchStatus::Loading);
        assert!(session.complete(&second, pages(2)));
        assert_eq!(session.result().total_pages, 2);
    }

    #[test]
    fn history_navigation_adopts_state_without_rewriting() {
        let (mut session, _) = session("category=3");
        session.apply(FilterTransition::SetCategory(68));
        let replacements = session.navigator().replacements();

        let ticket = session.on_navigation("category=3&page=2").expect("fetch");
        assert_eq!(ticket.snapshot.page, 2);
        assert_eq!(session.state().category, 3);
        assert_eq!(session.navigator().replacements(), replacements);
        assert_eq!(session.on_navigation("?page=2&category=3"), None);
    }

    #[tokio::test(start_paused = true)]
    async fn debounced_search_applies_last_term() {
        let (mut session, _) = session("category=3&page=2");
        let now = Instant::now();
        session.type_search("char".to_string(), now);
        session.type_search("charizard ".to_string(), now + Duration::from_millis(100));
        assert_eq!(session.poll_search(now + Duration::from_millis(300)), None);

        let ticket = session.poll_search(now + Duration::from_millis(400)).expect("fetch");
        assert_eq!(ticket.snapshot.search_term, "charizard");
        assert_eq!(ticket.snapshot.page, 1);
        assert_eq!(session.navigator().current_query(), "category=3&q=charizard");
    }
}
