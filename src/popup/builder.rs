use crate::core::models::{
    Handle,
    Possibility,
    EMPTY_HANDLE,
    MORE_HANDLE,
    SEPARATOR_HANDLE,
};

pub const SEPARATOR_LABEL: &str = "---";
pub const MORE_LABEL: &str = "More...";
pub const ANY_LABEL: &str = "Any";
pub const NOT_SURE_LABEL: &str = "Not Sure";

/// Which of the two label fields a selector instance shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelSource {
    Name,
    Abbreviation,
}

/// Wording of the no-selection sentinel. The two are mutually exclusive;
/// a selector is built with one or the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingVariant {
    Any,
    NotSure,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupNode {
    pub label: String,
    pub handle: Handle,
    pub depth: usize,   // Indentation level in the flattened list
}

impl PopupNode {
    pub fn is_sentinel(&self) -> bool {
        self.handle <= EMPTY_HANDLE
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupList {
    pub nodes: Vec<PopupNode>,
    pub matched: Option<usize>, // Index of the node to pre-select
}

impl PopupList {
    pub fn matched_node(&self) -> Option<&PopupNode> {
        self.matched.and_then(|idx| self.nodes.get(idx))
    }
}

/// Flattens a possibility tree into a selectable popup list, decorated with
/// the separator, no-selection, and "More..." sentinels.
pub struct PopupBuilder {
    pub label_source: LabelSource,
    pub missing: MissingVariant,
}

impl PopupBuilder {
    pub fn new(label_source: LabelSource, missing: MissingVariant) -> Self {
        PopupBuilder { label_source, missing }
    }

    /// Depth-first flatten in the given sibling order; `sort_alphabetically`
    /// reorders each sibling level by resolved label instead. The node whose
    /// handle equals `target` comes back as the matched node, except that a
    /// target of EMPTY_HANDLE always matches the no-selection sentinel. An
    /// empty tree still yields the sentinels so the host can always offer
    /// "More..." to create the first item.
    pub fn build(
        &self,
        roots: &[Possibility],
        target: Handle,
        sort_alphabetically: bool,
    ) -> PopupList {
        let mut nodes = Vec::new();
        let mut matched = None;
        self.visit(roots, 0, target, sort_alphabetically, &mut nodes, &mut matched);

        nodes.push(PopupNode {
            label: SEPARATOR_LABEL.to_string(),
            handle: SEPARATOR_HANDLE,
            depth: 0,
        });

        let missing_index = nodes.len();
        let missing_label = match self.missing {
            MissingVariant::Any => ANY_LABEL,
            MissingVariant::NotSure => NOT_SURE_LABEL,
        };
        nodes.push(PopupNode {
            label: missing_label.to_string(),
            handle: EMPTY_HANDLE,
            depth: 0,
        });

        nodes.push(PopupNode { label: MORE_LABEL.to_string(), handle: MORE_HANDLE, depth: 0 });

        if target == EMPTY_HANDLE {
            matched = Some(missing_index);
        }

        PopupList { nodes, matched }
    }

    fn visit(
        &self,
        siblings: &[Possibility],
        depth: usize,
        target: Handle,
        sort: bool,
        nodes: &mut Vec<PopupNode>,
        matched: &mut Option<usize>,
    ) {
        let mut order: Vec<&Possibility> = siblings.iter().collect();
        if sort {
            order.sort_by(|a, b| self.label(a).cmp(self.label(b)));
        }

        for possibility in order {
            if possibility.handle == target {
                *matched = Some(nodes.len());
            }
            nodes.push(PopupNode {
                label: self.label(possibility).to_string(),
                handle: possibility.handle,
                depth,
            });
            self.visit(&possibility.children, depth + 1, target, sort, nodes, matched);
        }
    }

    // Abbreviations are optional on some lists; fall back to the name.
    fn label<'a>(&self, possibility: &'a Possibility) -> &'a str {
        match self.label_source {
            LabelSource::Name => &possibility.name,
            LabelSource::Abbreviation => {
                if possibility.abbreviation.is_empty() {
                    &possibility.name
                } else {
                    &possibility.abbreviation
                }
            }
        }
    }
}
