#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MorphType {
    Stem,
    BoundStem,
    Prefix,
    Suffix,
    Infix,
    Proclitic,
    Enclitic,
}

/// Deduce a morph type from the affix markers on a typed form and strip them:
/// "un-" prefix, "-s" suffix, "-in-" infix, "mo=" proclitic, "=ya" enclitic,
/// "*du" bound stem, anything else a stem.
///
/// A form that is nothing but markers stays a stem with the raw text kept;
/// the stripped form is never empty.
pub fn split_markers(form: &str) -> (MorphType, String) {
    let trimmed = form.trim();

    let stripped = trimmed.trim_matches(['-', '=', '*']);
    if stripped.is_empty() {
        return (MorphType::Stem, trimmed.to_string());
    }

    if trimmed.starts_with('-') && trimmed.ends_with('-') {
        return (MorphType::Infix, trimmed.trim_matches('-').to_string());
    }
    if let Some(rest) = trimmed.strip_suffix('-') {
        return (MorphType::Prefix, rest.to_string());
    }
    if let Some(rest) = trimmed.strip_prefix('-') {
        return (MorphType::Suffix, rest.to_string());
    }
    if let Some(rest) = trimmed.strip_suffix('=') {
        return (MorphType::Proclitic, rest.to_string());
    }
    if let Some(rest) = trimmed.strip_prefix('=') {
        return (MorphType::Enclitic, rest.to_string());
    }
    if let Some(rest) = trimmed.strip_prefix('*') {
        return (MorphType::BoundStem, rest.to_string());
    }

    (MorphType::Stem, trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_form_is_stem() {
        assert_eq!(split_markers("cat"), (MorphType::Stem, "cat".to_string()));
        assert_eq!(split_markers("  cat "), (MorphType::Stem, "cat".to_string()));
    }

    #[test]
    fn hyphen_markers() {
        assert_eq!(split_markers("un-"), (MorphType::Prefix, "un".to_string()));
        assert_eq!(split_markers("-s"), (MorphType::Suffix, "s".to_string()));
        assert_eq!(split_markers("-in-"), (MorphType::Infix, "in".to_string()));
    }

    #[test]
    fn clitic_and_bound_markers() {
        assert_eq!(split_markers("mo="), (MorphType::Proclitic, "mo".to_string()));
        assert_eq!(split_markers("=ya"), (MorphType::Enclitic, "ya".to_string()));
        assert_eq!(split_markers("*du"), (MorphType::BoundStem, "du".to_string()));
    }

    #[test]
    fn marker_only_form_falls_back_to_stem() {
        assert_eq!(split_markers("-"), (MorphType::Stem, "-".to_string()));
        assert_eq!(split_markers("--"), (MorphType::Stem, "--".to_string()));
        assert_eq!(split_markers("="), (MorphType::Stem, "=".to_string()));
    }
}
