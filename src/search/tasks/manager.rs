use std::{
    sync::{
        atomic::AtomicBool,
        mpsc,
        Arc,
    },
    thread,
};

use tokio::runtime::Runtime;
use tracing::debug;

use super::{
    handle::SearchTicket,
    types::CompletedSearch,
};
use crate::{
    core::models::SearchField,
    repository::Repository,
    search::engine::SearchEngine,
};

/// Runs searches off the UI thread and hands results back through a channel
/// the host polls. Submitting a new key cancels whatever is still running;
/// only the newest request's result is ever delivered, keyed by submission
/// order, not completion order.
pub struct SearchManager<R: Repository + 'static> {
    engine: Arc<SearchEngine<R>>,
    runtime: Arc<Runtime>,
    receiver: mpsc::Receiver<CompletedSearch>,
    sender: mpsc::Sender<CompletedSearch>,
    submitted: u64,
    delivered: u64,
    current: Option<SearchTicket>,
}

impl<R: Repository + 'static> SearchManager<R> {
    pub fn new(engine: Arc<SearchEngine<R>>) -> Self {
        let runtime = Arc::new(Runtime::new().expect("Failed to create SearchManager runtime"));

        let (sender, receiver) = mpsc::channel();

        Self { engine, runtime, receiver, sender, submitted: 0, delivered: 0, current: None }
    }

    /// Start a search for `field`, superseding any search still in flight.
    /// Returns the request id.
    pub fn submit(&mut self, field: SearchField) -> u64 {
        if let Some(ticket) = &self.current {
            ticket.cancel();
        }

        self.submitted += 1;
        let id = self.submitted;

        let cancel_token = Arc::new(AtomicBool::new(false));
        let token = cancel_token.clone();
        let sender = self.sender.clone();
        let runtime = self.runtime.clone();
        let engine = self.engine.clone();

        let join_handle = thread::spawn(move || {
            let outcome = runtime.block_on(async {
                engine.search_cancellable(&field, Some(&token)).map_err(|e| e.to_string())
            });

            let _ = sender.send(CompletedSearch { request_id: id, field, outcome });
        });

        self.current = Some(SearchTicket::new(id, cancel_token, join_handle));
        id
    }

    /// Drain the results channel. Anything older than the newest submission
    /// is an expected race outcome and is dropped, not surfaced.
    pub fn poll_results(&mut self) -> Option<CompletedSearch> {
        let mut newest = None;

        while let Ok(completed) = self.receiver.try_recv() {
            if completed.request_id < self.submitted {
                debug!(request_id = completed.request_id, "discarding stale search result");
                continue;
            }
            newest = Some(completed);
        }

        if let Some(completed) = &newest {
            self.delivered = completed.request_id;
        }
        newest
    }

    /// True while the newest submission has not been delivered. The host
    /// must keep "confirm selection" disabled while this holds.
    pub fn is_pending(&self) -> bool {
        self.delivered < self.submitted
    }

    pub fn cancel_pending(&mut self) {
        if let Some(ticket) = &self.current {
            ticket.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::{
        Duration,
        Instant,
    };

    use super::*;
    use crate::{
        core::models::SearchFieldId,
        repository::memory::MemoryRepository,
        search::engine::MatchPolicy,
    };

    fn manager() -> (SearchManager<MemoryRepository>, u32) {
        let mut repo = MemoryRepository::new();
        let en = repo.add_writing_system("en", "English", false);
        let seh = repo.add_writing_system("seh", "Sena", true);

        for (form, gloss) in [("nyama", "cat"), ("cithu", "category"), ("pera", "pear")] {
            let entry = repo.add_entry(form, seh);
            repo.add_gloss(entry, gloss, en);
        }

        let engine = Arc::new(SearchEngine::new(
            Arc::new(repo),
            MatchPolicy::FullText,
            &[SearchFieldId::Glosses],
        ));
        (SearchManager::new(engine), en)
    }

    fn wait_for_result(
        manager: &mut SearchManager<MemoryRepository>,
    ) -> Option<CompletedSearch> {
        let deadline = Instant::now() + Duration::from_secs(10);
        while Instant::now() < deadline {
            if let Some(completed) = manager.poll_results() {
                return Some(completed);
            }
            thread::sleep(Duration::from_millis(5));
        }
        None
    }

    #[test]
    fn delivers_the_search_result() {
        let (mut manager, en) = manager();

        let id = manager.submit(SearchField::new(SearchFieldId::Glosses, en, "cat"));
        assert!(manager.is_pending());

        let completed = wait_for_result(&mut manager).expect("search never completed");
        assert_eq!(completed.request_id, id);
        assert_eq!(completed.outcome.as_ref().map(|c| c.len()), Ok(2));
        assert!(!manager.is_pending());
    }

    #[test]
    fn newer_submission_wins() {
        let (mut manager, en) = manager();

        manager.submit(SearchField::new(SearchFieldId::Glosses, en, "cat"));
        let second = manager.submit(SearchField::new(SearchFieldId::Glosses, en, "pear"));

        let completed = wait_for_result(&mut manager).expect("search never completed");
        assert_eq!(completed.request_id, second);
        assert_eq!(completed.field.query, "pear");

        // Nothing older ever surfaces afterwards.
        thread::sleep(Duration::from_millis(50));
        assert!(manager.poll_results().is_none());
        assert!(!manager.is_pending());
    }

    #[test]
    fn unknown_field_surfaces_through_the_channel() {
        let (mut manager, en) = manager();

        manager.submit(SearchField::new(SearchFieldId::CitationForm, en, "x"));
        let completed = wait_for_result(&mut manager).expect("search never completed");
        let err = completed.outcome.unwrap_err();
        assert!(err.contains("Unrecognized search field"), "got: {err}");
    }
}
