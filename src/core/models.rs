/// Opaque identifier of an object in the external lexical database.
pub type Handle = i64;

/// Resolved writing system identifier.
pub type WsHandle = u32;

// Reserved popup handles. Real objects always have positive handles.
pub const EMPTY_HANDLE: Handle = 0; // "no selection / not applicable"
pub const SEPARATOR_HANDLE: Handle = -1;
pub const MORE_HANDLE: Handle = -2; // launches the external chooser dialog

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchFieldId {
    LexemeForm,
    CitationForm,
    Allomorphs,
    Glosses,
    Definitions,
}

#[derive(Debug, Clone)]
pub struct SearchField {
    pub field: SearchFieldId,   // Which attribute to look at
    pub ws: WsHandle,           // Writing system the key was typed in
    pub query: String,          // The search key as typed
}

impl SearchField {
    pub fn new(field: SearchFieldId, ws: WsHandle, query: impl Into<String>) -> Self {
        SearchField { field, ws, query: query.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCandidate {
    pub handle: Handle,
    pub matches: Vec<String>,   // The attribute strings that matched, for highlighting
}

/// One node of an externally owned possibility list (controlled vocabulary).
/// The source is a tree, so children never cycle back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Possibility {
    pub handle: Handle,
    pub name: String,
    pub abbreviation: String,
    pub children: Vec<Possibility>,
}

impl Possibility {
    pub fn new(handle: Handle, name: impl Into<String>, abbreviation: impl Into<String>) -> Self {
        Possibility {
            handle,
            name: name.into(),
            abbreviation: abbreviation.into(),
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<Possibility>) -> Self {
        self.children = children;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WritingSystem {
    pub handle: WsHandle,
    pub tag: String,            // e.g. "en", "seh"
    pub name: String,           // Display name
}
