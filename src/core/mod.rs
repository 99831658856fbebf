pub mod errors;
pub mod homograph;
pub mod models;
pub mod morph;

pub use errors::LexineError;
pub use models::{ Possibility, SearchCandidate, SearchField, SearchFieldId, WritingSystem };
