use super::{ArtifactCatalog, ArtifactType, CatalogQuery, ItemDescriptor, MATCH_ALL_SEARCH_TERM};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// An empty filter searches for everything; any other text, whitespace
/// included, is sent as typed.
pub fn search_term_for_filter(filter: &str) -> String {
    if filter.is_empty() {
        MATCH_ALL_SEARCH_TERM.to_string()
    } else {
        filter.to_string()
    }
}

/// Completion of a background catalog fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogEvent {
    SearchResults {
        search_term: String,
        result: Result<Vec<ItemDescriptor>, String>,
    },
    HydrationResults {
        names: Vec<String>,
        result: Result<Vec<ItemDescriptor>, String>,
    },
}

/// Runs every catalog fetch on its own worker thread and reports results
/// over a channel. Fetches are never cancelled or sequenced; callers apply
/// events in the order they arrive.
pub struct CatalogDispatcher {
    catalog: Arc<dyn ArtifactCatalog>,
    sender: Sender<CatalogEvent>,
    receiver: Receiver<CatalogEvent>,
    in_flight: usize,
}

impl CatalogDispatcher {
    pub fn new(catalog: Arc<dyn ArtifactCatalog>) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            catalog,
            sender,
            receiver,
            in_flight: 0,
        }
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn dispatch(&mut self, query: CatalogQuery) {
        let catalog = Arc::clone(&self.catalog);
        let sender = self.sender.clone();
        self.in_flight += 1;
        thread::spawn(move || {
            let result = catalog
                .get_artifacts(&query)
                .map_err(|err| err.to_string());
            let event = match query {
                CatalogQuery::Search { search_term, .. } => {
                    CatalogEvent::SearchResults {
                        search_term,
                        result,
                    }
                }
                CatalogQuery::Names(names) => CatalogEvent::HydrationResults { names, result },
            };
            let _ = sender.send(event);
        });
    }

    pub fn try_next(&mut self) -> Option<CatalogEvent> {
        let event = self.receiver.try_recv().ok()?;
        self.in_flight = self.in_flight.saturating_sub(1);
        Some(event)
    }

    pub fn wait_next(&mut self, timeout: Duration) -> Option<CatalogEvent> {
        if self.in_flight == 0 {
            return None;
        }
        match self.receiver.recv_timeout(timeout) {
            Ok(event) => {
                self.in_flight = self.in_flight.saturating_sub(1);
                Some(event)
            }
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }
}

/// State behind the artifact search table on the select step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPane {
    pub filter: String,
    pub matching: Vec<ItemDescriptor>,
    pub loading: bool,
    pub focused: usize,
    pub described: Option<ItemDescriptor>,
}

impl SearchPane {
    /// Records the new filter, marks the pane loading and returns the query
    /// to issue.
    pub fn on_filter_change(&mut self, artifact_type: ArtifactType, filter: &str) -> CatalogQuery {
        self.filter = filter.to_string();
        self.loading = true;
        CatalogQuery::Search {
            artifact_type,
            search_term: search_term_for_filter(filter),
        }
    }

    pub fn apply_response(&mut self, items: Vec<ItemDescriptor>) {
        self.matching = items;
        self.loading = false;
        self.focused = clamp_focus(self.focused, self.matching.len());
    }

    pub fn focused_item(&self) -> Option<&ItemDescriptor> {
        self.matching.get(self.focused)
    }

    pub fn move_focus_up(&mut self) {
        self.focused = self.focused.saturating_sub(1);
    }

    pub fn move_focus_down(&mut self) {
        self.focused = clamp_focus(self.focused + 1, self.matching.len());
    }
}

pub(crate) fn clamp_focus(focused: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    focused.min(len - 1)
}
