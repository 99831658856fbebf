use std::{
    collections::HashMap,
    sync::Mutex,
};

use super::{
    Attr,
    EntryWriter,
    Navigator,
    NewEntry,
    Repository,
    WritingSystems,
};
use crate::core::{
    homograph,
    models::{
        Handle,
        WritingSystem,
        WsHandle,
    },
    LexineError,
};

#[derive(Debug, Clone, Default)]
pub struct MemoryState {
    entries: Vec<Handle>,
    strings: HashMap<(Handle, Attr, WsHandle), String>,
    seqs: HashMap<(Handle, Attr), Vec<Handle>>,
    homographs: HashMap<Handle, u32>,
    next_handle: Handle,
}

/// In-memory stand-in for the external lexical database. The crate's tests
/// run against it; hosts can use it as a fixture too.
#[derive(Debug)]
pub struct MemoryRepository {
    state: MemoryState,
    vernacular: Vec<WritingSystem>,
    analysis: Vec<WritingSystem>,
    next_ws: WsHandle,
    fail_creates: bool,
}

impl MemoryRepository {
    pub fn new() -> Self {
        MemoryRepository {
            state: MemoryState { next_handle: 1, ..MemoryState::default() },
            vernacular: Vec::new(),
            analysis: Vec::new(),
            next_ws: 1,
            fail_creates: false,
        }
    }

    fn alloc(&mut self) -> Handle {
        let handle = self.state.next_handle;
        self.state.next_handle += 1;
        handle
    }

    pub fn add_writing_system(
        &mut self,
        tag: &str,
        name: &str,
        vernacular: bool,
    ) -> WsHandle {
        let handle = self.next_ws;
        self.next_ws += 1;

        let ws = WritingSystem { handle, tag: tag.to_string(), name: name.to_string() };
        if vernacular {
            self.vernacular.push(ws);
        } else {
            self.analysis.push(ws);
        }
        handle
    }

    pub fn add_entry(&mut self, lexeme_form: &str, ws: WsHandle) -> Handle {
        let handle = self.alloc();
        self.state.entries.push(handle);
        self.state.strings.insert((handle, Attr::EntryLexemeForm, ws), lexeme_form.to_string());
        handle
    }

    pub fn set_string(&mut self, obj: Handle, attr: Attr, ws: WsHandle, value: &str) {
        self.state.strings.insert((obj, attr, ws), value.to_string());
    }

    pub fn add_allomorph(&mut self, entry: Handle, form: &str, ws: WsHandle) -> Handle {
        let handle = self.alloc();
        self.state.seqs.entry((entry, Attr::EntryAllomorphs)).or_default().push(handle);
        self.state.strings.insert((handle, Attr::AllomorphForm, ws), form.to_string());
        handle
    }

    pub fn add_sense(&mut self, entry: Handle) -> Handle {
        let handle = self.alloc();
        self.state.seqs.entry((entry, Attr::EntrySenses)).or_default().push(handle);
        handle
    }

    pub fn add_gloss(&mut self, entry: Handle, gloss: &str, ws: WsHandle) -> Handle {
        let sense = self.add_sense(entry);
        self.state.strings.insert((sense, Attr::SenseGloss, ws), gloss.to_string());
        sense
    }

    pub fn homograph(&self, entry: Handle) -> u32 {
        self.state.homographs.get(&entry).copied().unwrap_or(0)
    }

    /// Make the next create_entry calls fail, for exercising rollback.
    pub fn set_fail_creates(&mut self, fail: bool) {
        self.fail_creates = fail;
    }

    fn entries_with_form(&self, form: &str, ws: WsHandle) -> Vec<Handle> {
        self.state
            .entries
            .iter()
            .copied()
            .filter(|&e| {
                self.state.strings.get(&(e, Attr::EntryLexemeForm, ws)).map(String::as_str)
                    == Some(form)
            })
            .collect()
    }
}

impl Repository for MemoryRepository {
    fn all_entries(&self) -> Vec<Handle> {
        self.state.entries.clone()
    }

    fn string_alt(&self, obj: Handle, attr: Attr, ws: WsHandle) -> Option<String> {
        self.state.strings.get(&(obj, attr, ws)).cloned()
    }

    fn owned_seq(&self, obj: Handle, attr: Attr) -> Vec<Handle> {
        self.state.seqs.get(&(obj, attr)).cloned().unwrap_or_default()
    }
}

impl WritingSystems for MemoryRepository {
    fn vernacular(&self) -> Vec<WritingSystem> {
        self.vernacular.clone()
    }

    fn analysis(&self) -> Vec<WritingSystem> {
        self.analysis.clone()
    }

    fn resolve(&self, tag: &str) -> Option<WsHandle> {
        self.vernacular
            .iter()
            .chain(self.analysis.iter())
            .find(|ws| ws.tag == tag)
            .map(|ws| ws.handle)
    }
}

impl EntryWriter for MemoryRepository {
    type Snapshot = MemoryState;

    fn create_entry(&mut self, entry: &NewEntry) -> Result<Handle, LexineError> {
        if self.fail_creates {
            return Err(LexineError::Custom("create_entry failed".to_string()));
        }

        let handle = self.add_entry(&entry.lexeme_form, entry.ws);

        // Keep homograph numbers consistent across everything sharing the form.
        let shared = self.entries_with_form(&entry.lexeme_form, entry.ws);
        for (e, number) in shared.iter().zip(homograph::renumber(shared.len())) {
            self.state.homographs.insert(*e, number);
        }

        Ok(handle)
    }

    fn snapshot(&self) -> MemoryState {
        self.state.clone()
    }

    fn restore(&mut self, snapshot: MemoryState) {
        self.state = snapshot;
    }
}

/// Navigator that records jump requests, for tests and headless hosts.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    jumps: Mutex<Vec<(String, Handle)>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        RecordingNavigator::default()
    }

    pub fn jumps(&self) -> Vec<(String, Handle)> {
        self.jumps.lock().expect("navigator lock poisoned").clone()
    }
}

impl Navigator for RecordingNavigator {
    fn jump_to(&self, tool: &str, target: Handle) {
        self.jumps.lock().expect("navigator lock poisoned").push((tool.to_string(), target));
    }
}
