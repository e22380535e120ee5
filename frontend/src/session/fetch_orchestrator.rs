//! Fetch lifecycle of one session and the supersession rule for results.

use common::filter_state::FilterState;
use common::products_response::QueryResult;

use crate::api::products_api::FetchOutcome;

pub const GENERIC_ERROR_MESSAGE: &str = "Failed to load products. Please try again later.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchStatus {
    #[default]
    Idle,
    Loading,
    Success,
    AccessDenied,
    Error,
}

/// Issued when a fetch starts; its completion is applied only while it is current.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub generation: u64,
    pub snapshot: FilterState,
}

#[derive(Debug, Default)]
pub struct FetchOrchestrator {
    status: FetchStatus,
    result: QueryResult,
    generation: u64,
    error_message: Option<String>,
}

impl FetchOrchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> FetchStatus {
        self.status
    }

    /// Last rendered page; kept while a newer fetch is loading.
    pub fn result(&self) -> &QueryResult {
        &self.result
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn begin(&mut self, snapshot: FilterState) -> FetchTicket {
        self.generation += 1;
        self.status = FetchStatus::Loading;
        self.error_message = None;
        FetchTicket { generation: self.generation, snapshot }
    }

    /// Applies `outcome` if `ticket` is the latest one and still matches
    /// `current`. Returns whether it was applied.
    pub fn complete(&mut self, ticket: &FetchTicket, current: &FilterState, outcome: FetchOutcome) -> bool {
        if ticket.generation != self.generation || &ticket.snapshot != current {
            tracing::warn!(
                "fetch_orchestrator: discarding stale result of generation {} (latest {})",
                ticket.generation,
                self.generation
            );
            return false;
        }
        match outcome {
            FetchOutcome::Success(result) => {
                self.status = FetchStatus::Success;
                self.result = result;
            }
            FetchOutcome::AccessDenied(result) => {
                tracing::warn!("fetch_orchestrator: access denied, showing {} preview items", result.items.len());
                self.status = FetchStatus::AccessDenied;
                self.result = result;
            }
            FetchOutcome::Failed(e) => {
                tracing::error!("fetch_orchestrator: fetch failed: {:#?}", e);
                self.status = FetchStatus::Error;
                self.result = QueryResult {
                    page: ticket.snapshot.page,
                    page_size: ticket.snapshot.page_size,
                    ..QueryResult::default()
                };
                self.error_message = Some(GENERIC_ERROR_MESSAGE.to_string());
            }
        }
        true
    }
}
