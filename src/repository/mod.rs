pub mod memory;

use crate::core::{
    models::{
        Handle,
        WritingSystem,
        WsHandle,
    },
    morph::MorphType,
    LexineError,
};

/// Attribute identifiers of the external lexical database, as far as this
/// crate needs to address them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attr {
    EntryLexemeForm,
    EntryCitationForm,
    EntryAllomorphs,
    EntrySenses,
    AllomorphForm,
    SenseGloss,
    SenseDefinition,
}

/// Read-only view of the external lexical database. Injected into every
/// component; there is no global cache.
pub trait Repository: Send + Sync {
    fn all_entries(&self) -> Vec<Handle>;

    /// String alternative of a per-writing-system attribute, if any.
    fn string_alt(&self, obj: Handle, attr: Attr, ws: WsHandle) -> Option<String>;

    /// Ordered owned sub-objects of a sequence attribute.
    fn owned_seq(&self, obj: Handle, attr: Attr) -> Vec<Handle>;
}

pub trait WritingSystems {
    fn vernacular(&self) -> Vec<WritingSystem>;
    fn analysis(&self) -> Vec<WritingSystem>;
    fn resolve(&self, tag: &str) -> Option<WsHandle>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WsScope {
    Vernacular,
    Analysis,
    Both,
}

/// Writing systems offered for a given scope, vernacular first for `Both`,
/// deduplicated by handle with order preserved.
pub fn writing_systems_in(registry: &dyn WritingSystems, scope: WsScope) -> Vec<WritingSystem> {
    let mut combined = match scope {
        WsScope::Vernacular => registry.vernacular(),
        WsScope::Analysis => registry.analysis(),
        WsScope::Both => {
            let mut all = registry.vernacular();
            all.extend(registry.analysis());
            all
        }
    };

    let mut seen = std::collections::HashSet::new();
    combined.retain(|ws| seen.insert(ws.handle));
    combined
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEntry {
    pub lexeme_form: String,    // Bare form, markers already stripped
    pub ws: WsHandle,
    pub morph_type: MorphType,
    pub homograph: u32,
}

/// The narrow mutation surface: entry creation, wrapped by the caller in a
/// snapshot/restore pair so a failed create leaves the repository unchanged.
pub trait EntryWriter {
    type Snapshot;

    fn create_entry(&mut self, entry: &NewEntry) -> Result<Handle, LexineError>;
    fn snapshot(&self) -> Self::Snapshot;
    fn restore(&mut self, snapshot: Self::Snapshot);
}

/// Fire-and-forget request that the host application switch to another
/// tool/view, showing `target`.
pub trait Navigator {
    fn jump_to(&self, tool: &str, target: Handle);
}
