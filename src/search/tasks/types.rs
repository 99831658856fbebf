use crate::core::models::{
    SearchCandidate,
    SearchField,
};

// Errors are stringified on their way across the results channel.
pub type SearchOutcome = Result<Vec<SearchCandidate>, String>;

#[derive(Debug, Clone)]
pub struct CompletedSearch {
    pub request_id: u64,
    pub field: SearchField,
    pub outcome: SearchOutcome,
}
