use serde::{
    Deserialize,
    Serialize,
};

use crate::core::LexineError;

/// Where the content of one SFM field marker lands in the lexicon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkerDestination {
    LexemeForm,
    CitationForm,
    Gloss,
    Definition,
    PartOfSpeech,
    SemanticDomain,
    Note,
    Ignored,
}

/// One marker mapping as handed over by the external import pipeline, which
/// owns the mapping table; this component only stages edits to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerMapping {
    pub marker: String,             // e.g. "\\lx"
    pub destination: MarkerDestination,
    pub ws_tag: String,             // Writing system the marker's data is in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub converter: Option<String>,  // Optional encoding converter name
}

impl MarkerMapping {
    pub fn new(marker: &str, destination: MarkerDestination, ws_tag: &str) -> Self {
        MarkerMapping {
            marker: marker.to_string(),
            destination,
            ws_tag: ws_tag.to_string(),
            converter: None,
        }
    }
}

pub fn to_json(mappings: &[MarkerMapping]) -> Result<String, LexineError> {
    Ok(serde_json::to_string_pretty(mappings)?)
}

pub fn from_json(json: &str) -> Result<Vec<MarkerMapping>, LexineError> {
    Ok(serde_json::from_str(json)?)
}

/// Edit session over a mapping table. Edits stay on a working copy; the
/// caller's table only ever changes through what confirm() returns, and
/// cancel() throws the staged edits away.
#[derive(Default, Clone)]
pub struct MappingEditor {
    open: bool,
    working: Vec<MarkerMapping>,
    original: Vec<MarkerMapping>,
}

impl MappingEditor {
    pub fn new() -> Self {
        MappingEditor::default()
    }

    pub fn open(&mut self, mappings: Vec<MarkerMapping>) {
        self.original = mappings.clone();
        self.working = mappings;
        self.open = true;
    }

    pub const fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_dirty(&self) -> bool {
        self.working != self.original
    }

    pub fn working(&self) -> &[MarkerMapping] {
        &self.working
    }

    pub fn set_destination(&mut self, marker: &str, destination: MarkerDestination) -> bool {
        self.update(marker, |mapping| mapping.destination = destination)
    }

    pub fn set_writing_system(&mut self, marker: &str, ws_tag: &str) -> bool {
        self.update(marker, |mapping| mapping.ws_tag = ws_tag.to_string())
    }

    pub fn set_converter(&mut self, marker: &str, converter: Option<String>) -> bool {
        self.update(marker, |mapping| mapping.converter = converter)
    }

    fn update(&mut self, marker: &str, apply: impl FnOnce(&mut MarkerMapping)) -> bool {
        match self.working.iter_mut().find(|mapping| mapping.marker == marker) {
            Some(mapping) => {
                apply(mapping);
                true
            }
            None => false,
        }
    }

    /// Close the session and hand the edited table back to the caller.
    pub fn confirm(&mut self) -> Vec<MarkerMapping> {
        self.open = false;
        self.original = self.working.clone();
        self.working.clone()
    }

    /// Close the session and discard every staged edit.
    pub fn cancel(&mut self) {
        self.open = false;
        self.working = self.original.clone();
    }
}
