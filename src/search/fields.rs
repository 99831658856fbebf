use crate::{
    core::models::{
        Handle,
        SearchFieldId,
        WsHandle,
    },
    repository::{
        Attr,
        Repository,
    },
};

/// Candidate strings of one entry for one field, in the entry's own order.
/// Finite and restartable; blanks are filtered out by the engine.
pub type Extractor = fn(&dyn Repository, Handle, WsHandle) -> Vec<String>;

/// One row of the field dispatch table: how to pull candidate strings out
/// of an entry, whether the attribute varies per writing system, and which
/// attributes the external index must watch to know when to rebuild.
pub struct FieldRule {
    pub field: SearchFieldId,
    pub extract: Extractor,
    pub multi_valued: bool,
    pub dependencies: &'static [Attr],
}

pub fn rule_for(field: SearchFieldId) -> FieldRule {
    match field {
        SearchFieldId::LexemeForm => FieldRule {
            field,
            extract: lexeme_form,
            multi_valued: true,
            dependencies: &[Attr::EntryLexemeForm],
        },
        SearchFieldId::CitationForm => FieldRule {
            field,
            extract: citation_form,
            multi_valued: true,
            dependencies: &[Attr::EntryCitationForm],
        },
        SearchFieldId::Allomorphs => FieldRule {
            field,
            extract: allomorph_forms,
            multi_valued: true,
            dependencies: &[Attr::EntryAllomorphs, Attr::AllomorphForm],
        },
        SearchFieldId::Glosses => FieldRule {
            field,
            extract: glosses,
            multi_valued: true,
            dependencies: &[Attr::EntrySenses, Attr::SenseGloss],
        },
        SearchFieldId::Definitions => FieldRule {
            field,
            extract: definitions,
            multi_valued: true,
            dependencies: &[Attr::EntrySenses, Attr::SenseDefinition],
        },
    }
}

fn lexeme_form(repo: &dyn Repository, entry: Handle, ws: WsHandle) -> Vec<String> {
    repo.string_alt(entry, Attr::EntryLexemeForm, ws).into_iter().collect()
}

// Citation form is optional on an entry; absent just means no candidates.
fn citation_form(repo: &dyn Repository, entry: Handle, ws: WsHandle) -> Vec<String> {
    repo.string_alt(entry, Attr::EntryCitationForm, ws).into_iter().collect()
}

fn allomorph_forms(repo: &dyn Repository, entry: Handle, ws: WsHandle) -> Vec<String> {
    repo.owned_seq(entry, Attr::EntryAllomorphs)
        .into_iter()
        .filter_map(|allomorph| repo.string_alt(allomorph, Attr::AllomorphForm, ws))
        .collect()
}

fn glosses(repo: &dyn Repository, entry: Handle, ws: WsHandle) -> Vec<String> {
    sense_strings(repo, entry, Attr::SenseGloss, ws)
}

fn definitions(repo: &dyn Repository, entry: Handle, ws: WsHandle) -> Vec<String> {
    sense_strings(repo, entry, Attr::SenseDefinition, ws)
}

fn sense_strings(repo: &dyn Repository, entry: Handle, attr: Attr, ws: WsHandle) -> Vec<String> {
    repo.owned_seq(entry, Attr::EntrySenses)
        .into_iter()
        .filter_map(|sense| repo.string_alt(sense, attr, ws))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::memory::MemoryRepository;

    #[test]
    fn extraction_follows_owned_sequences() {
        let mut repo = MemoryRepository::new();
        let seh = repo.add_writing_system("seh", "Sena", true);
        let en = repo.add_writing_system("en", "English", false);

        let entry = repo.add_entry("nyumba", seh);
        repo.add_allomorph(entry, "numba", seh);
        repo.add_allomorph(entry, "nyumb", seh);
        repo.add_gloss(entry, "house", en);
        repo.add_gloss(entry, "building", en);

        let rule = rule_for(SearchFieldId::Allomorphs);
        assert_eq!((rule.extract)(&repo, entry, seh), vec!["numba", "nyumb"]);

        let rule = rule_for(SearchFieldId::Glosses);
        assert_eq!((rule.extract)(&repo, entry, en), vec!["house", "building"]);

        // Nothing in the other writing system.
        assert_eq!((rule.extract)(&repo, entry, seh), Vec::<String>::new());
    }

    #[test]
    fn optional_citation_form_yields_nothing_when_absent() {
        let mut repo = MemoryRepository::new();
        let seh = repo.add_writing_system("seh", "Sena", true);
        let entry = repo.add_entry("nyumba", seh);

        let rule = rule_for(SearchFieldId::CitationForm);
        assert_eq!((rule.extract)(&repo, entry, seh), Vec::<String>::new());

        repo.set_string(entry, Attr::EntryCitationForm, seh, "nyumba");
        assert_eq!((rule.extract)(&repo, entry, seh), vec!["nyumba"]);
    }

    #[test]
    fn dependency_sets_cover_the_path_to_the_strings() {
        let rule = rule_for(SearchFieldId::Glosses);
        assert!(rule.dependencies.contains(&Attr::EntrySenses));
        assert!(rule.dependencies.contains(&Attr::SenseGloss));
        assert!(!rule.dependencies.contains(&Attr::EntryLexemeForm));
    }
}
