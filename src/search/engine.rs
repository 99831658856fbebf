use std::sync::{
    atomic::{
        AtomicBool,
        Ordering,
    },
    Arc,
};

use rayon::iter::{
    IntoParallelRefIterator,
    ParallelIterator,
};

use super::fields::{
    rule_for,
    FieldRule,
};
use crate::{
    core::{
        models::{
            Handle,
            SearchCandidate,
            SearchField,
            SearchFieldId,
            EMPTY_HANDLE,
        },
        LexineError,
    },
    repository::{
        Attr,
        Repository,
    },
};

/// How a typed search key has to relate to an attribute value. The insert
/// dialog filters by prefix while the go dialogs filter by occurrence; the
/// two stay separate policies on purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPolicy {
    FullText,
    Prefix,
}

impl MatchPolicy {
    pub fn matches(&self, value: &str, query: &str) -> bool {
        let value = value.to_lowercase();
        let query = query.to_lowercase();
        match self {
            MatchPolicy::FullText => value.contains(&query),
            MatchPolicy::Prefix => value.starts_with(&query),
        }
    }
}

/// Maps a search key typed into one field, in one writing system, to the
/// entries whose attribute strings match. Stateless and side-effect free;
/// the scan fans out across entries with rayon.
pub struct SearchEngine<R: Repository> {
    repo: Arc<R>,
    policy: MatchPolicy,
    rules: Vec<FieldRule>,
}

impl<R: Repository> SearchEngine<R> {
    /// `fields` is the set this dialog searches; asking about anything else
    /// is an UnrecognizedField error, never a silent default.
    pub fn new(repo: Arc<R>, policy: MatchPolicy, fields: &[SearchFieldId]) -> Self {
        let rules = fields.iter().map(|&field| rule_for(field)).collect();
        SearchEngine { repo, policy, rules }
    }

    pub fn policy(&self) -> MatchPolicy {
        self.policy
    }

    fn rule(&self, field: SearchFieldId) -> Result<&FieldRule, LexineError> {
        self.rules
            .iter()
            .find(|rule| rule.field == field)
            .ok_or(LexineError::UnrecognizedField(field))
    }

    pub fn search(&self, field: &SearchField) -> Result<Vec<SearchCandidate>, LexineError> {
        self.search_cancellable(field, None)
    }

    pub fn search_cancellable(
        &self,
        field: &SearchField,
        cancel: Option<&AtomicBool>,
    ) -> Result<Vec<SearchCandidate>, LexineError> {
        let rule = self.rule(field.field)?;

        if field.query.trim().is_empty() {
            return Ok(Vec::new());
        }

        let entries = self.repo.all_entries();
        let candidates: Vec<SearchCandidate> = entries
            .par_iter()
            .filter_map(|&entry| {
                if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                    return None;
                }

                let matches: Vec<String> = (rule.extract)(self.repo.as_ref(), entry, field.ws)
                    .into_iter()
                    .filter(|value| !value.trim().is_empty())
                    .filter(|value| self.policy.matches(value, &field.query))
                    .collect();

                (!matches.is_empty()).then(|| SearchCandidate { handle: entry, matches })
            })
            .collect();

        if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
            return Err(LexineError::Custom("Search cancelled".to_string()));
        }

        Ok(candidates)
    }

    /// Whether the field's attribute varies per writing system, for the
    /// external index layer. Same UnrecognizedField contract as search.
    pub fn is_multi_valued(&self, field: SearchFieldId) -> Result<bool, LexineError> {
        Ok(self.rule(field)?.multi_valued)
    }

    /// True when a change to `attr` on `obj` invalidates the external
    /// index. Pure predicate over the enabled fields' dependency sets;
    /// reserved handles never require an invalidation.
    pub fn is_index_dependency(&self, obj: Handle, attr: Attr) -> bool {
        obj > EMPTY_HANDLE && self.rules.iter().any(|rule| rule.dependencies.contains(&attr))
    }

    /// Candidate universe for initial index construction.
    pub fn universe(&self) -> Vec<Handle> {
        self.repo.all_entries()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::models::WsHandle,
        repository::memory::MemoryRepository,
    };

    fn gloss_repo() -> (Arc<MemoryRepository>, WsHandle, Handle, Handle) {
        let mut repo = MemoryRepository::new();
        let seh = repo.add_writing_system("seh", "Sena", true);
        let en = repo.add_writing_system("en", "English", false);

        let a = repo.add_entry("nyama", seh);
        repo.add_gloss(a, "cat", en);

        let b = repo.add_entry("cithu", seh);
        repo.add_gloss(b, "category", en);

        (Arc::new(repo), en, a, b)
    }

    fn handles(candidates: &[SearchCandidate]) -> Vec<Handle> {
        candidates.iter().map(|c| c.handle).collect()
    }

    #[test]
    fn full_text_matches_substrings() {
        let (repo, en, a, b) = gloss_repo();
        let engine =
            SearchEngine::new(repo, MatchPolicy::FullText, &[SearchFieldId::Glosses]);

        let found = engine
            .search(&SearchField::new(SearchFieldId::Glosses, en, "cat"))
            .unwrap();
        assert_eq!(handles(&found), vec![a, b]);

        // "ego" occurs inside "category" but is not a prefix of anything.
        let found = engine
            .search(&SearchField::new(SearchFieldId::Glosses, en, "ego"))
            .unwrap();
        assert_eq!(handles(&found), vec![b]);
    }

    #[test]
    fn prefix_matches_only_starts() {
        let (repo, en, a, b) = gloss_repo();
        let engine = SearchEngine::new(repo, MatchPolicy::Prefix, &[SearchFieldId::Glosses]);

        let found = engine
            .search(&SearchField::new(SearchFieldId::Glosses, en, "cat"))
            .unwrap();
        assert_eq!(handles(&found), vec![a, b]);

        let found = engine
            .search(&SearchField::new(SearchFieldId::Glosses, en, "ego"))
            .unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn matching_is_case_insensitive() {
        let (repo, en, a, _) = gloss_repo();
        let engine = SearchEngine::new(repo, MatchPolicy::Prefix, &[SearchFieldId::Glosses]);

        let found = engine
            .search(&SearchField::new(SearchFieldId::Glosses, en, "CAT"))
            .unwrap();
        assert!(handles(&found).contains(&a));
    }

    #[test]
    fn unknown_field_is_surfaced() {
        let (repo, en, _, _) = gloss_repo();
        let engine = SearchEngine::new(repo, MatchPolicy::FullText, &[SearchFieldId::Glosses]);

        let result = engine.search(&SearchField::new(SearchFieldId::LexemeForm, en, "ny"));
        assert!(matches!(
            result,
            Err(LexineError::UnrecognizedField(SearchFieldId::LexemeForm))
        ));

        assert!(matches!(
            engine.is_multi_valued(SearchFieldId::CitationForm),
            Err(LexineError::UnrecognizedField(SearchFieldId::CitationForm))
        ));
        assert_eq!(engine.is_multi_valued(SearchFieldId::Glosses).unwrap(), true);
    }

    #[test]
    fn absent_and_blank_values_never_match() {
        let mut repo = MemoryRepository::new();
        let seh = repo.add_writing_system("seh", "Sena", true);
        let en = repo.add_writing_system("en", "English", false);

        let no_gloss = repo.add_entry("a", seh);
        let blank_gloss = repo.add_entry("b", seh);
        repo.add_gloss(blank_gloss, "   ", en);
        let real = repo.add_entry("c", seh);
        repo.add_gloss(real, "cat", en);

        let engine =
            SearchEngine::new(Arc::new(repo), MatchPolicy::FullText, &[SearchFieldId::Glosses]);

        let found = engine
            .search(&SearchField::new(SearchFieldId::Glosses, en, "cat"))
            .unwrap();
        assert_eq!(handles(&found), vec![real]);
        assert!(!handles(&found).contains(&no_gloss));
        assert!(!handles(&found).contains(&blank_gloss));
    }

    #[test]
    fn empty_query_returns_no_candidates() {
        let (repo, en, _, _) = gloss_repo();
        let engine = SearchEngine::new(repo, MatchPolicy::FullText, &[SearchFieldId::Glosses]);

        let found = engine
            .search(&SearchField::new(SearchFieldId::Glosses, en, ""))
            .unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn candidates_carry_the_matched_strings() {
        let mut repo = MemoryRepository::new();
        let seh = repo.add_writing_system("seh", "Sena", true);
        let entry = repo.add_entry("pera", seh);
        repo.add_allomorph(entry, "per", seh);
        repo.add_allomorph(entry, "pira", seh);

        let engine = SearchEngine::new(
            Arc::new(repo),
            MatchPolicy::Prefix,
            &[SearchFieldId::Allomorphs],
        );

        let found = engine
            .search(&SearchField::new(SearchFieldId::Allomorphs, seh, "pe"))
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].matches, vec!["per"]);
    }

    #[test]
    fn index_dependencies_follow_enabled_fields() {
        let (repo, _, a, _) = gloss_repo();
        let engine = SearchEngine::new(
            repo,
            MatchPolicy::FullText,
            &[SearchFieldId::Glosses, SearchFieldId::Allomorphs],
        );

        assert!(engine.is_index_dependency(a, Attr::SenseGloss));
        assert!(engine.is_index_dependency(a, Attr::EntryAllomorphs));
        assert!(engine.is_index_dependency(a, Attr::AllomorphForm));
        assert!(!engine.is_index_dependency(a, Attr::EntryLexemeForm));
        assert!(!engine.is_index_dependency(a, Attr::SenseDefinition));

        // Reserved handles never invalidate anything.
        assert!(!engine.is_index_dependency(EMPTY_HANDLE, Attr::SenseGloss));
    }

    #[test]
    fn universe_is_every_entry() {
        let (repo, _, a, b) = gloss_repo();
        let engine = SearchEngine::new(repo, MatchPolicy::FullText, &[SearchFieldId::Glosses]);
        assert_eq!(engine.universe(), vec![a, b]);
    }
}
