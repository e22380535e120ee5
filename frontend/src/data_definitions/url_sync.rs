//! Keeps the address bar's query string in step with the filter state.

use common::filter_state::FilterState;
use common::url_codec::encode;

/// The piece of browser history the session talks to.
pub trait Navigator: Send {
    /// Current query string, without the leading `?`.
    fn current_query(&self) -> String;

    /// Rewrites the current history entry in place.
    fn replace_query(&mut self, query: &str);
}

/// Rewrites the URL only when the canonical encoding differs from it.
/// Returns whether a rewrite happened.
pub fn sync_url(navigator: &mut dyn Navigator, state: &FilterState) -> bool {
    let encoded = encode(state);
    let current = navigator.current_query();
    if current.strip_prefix('?').unwrap_or(&current) == encoded {
        return false;
    }
    tracing::debug!("url_sync: {current:?} -> {encoded:?}");
    navigator.replace_query(&encoded);
    true
}

/// In-process history stack, used by the CLI and in tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryNavigator {
    entries: Vec<String>,
    index: usize,
    replacements: usize,
}

impl MemoryNavigator {
    pub fn new(query: &str) -> Self {
        Self { entries: vec![query.to_string()], index: 0, replacements: 0 }
    }

    /// Simulates following a link: drops forward entries and appends one.
    pub fn push_query(&mut self, query: &str) {
        self.entries.truncate(self.index + 1);
        self.entries.push(query.to_string());
        self.index = self.entries.len() - 1;
    }

    pub fn back(&mut self) -> Option<String> {
        self.index = self.index.checked_sub(1)?;
        Some(self.entries[self.index].clone())
    }

    pub fn forward(&mut self) -> Option<String> {
        let next = self.entries.get(self.index + 1)?.clone();
        self.index += 1;
        Some(next)
    }

    pub fn history_len(&self) -> usize {
        self.entries.len()
    }

    pub fn replacements(&self) -> usize {
        self.replacements
    }
}

impl Navigator for MemoryNavigator {
    fn current_query(&self) -> String {
        self.entries[self.index].clone()
    }

    fn replace_query(&mut self, query: &str) {
        self.entries[self.index] = query.to_string();
        self.replacements += 1;
    }
}
