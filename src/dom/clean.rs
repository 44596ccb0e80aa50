// src/dom/clean.rs

// --- Imports ---
use crate::dom::tree::Document;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// What cleaning does with an element, keyed by its tag name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagAction {
    /// Drop the element together with its subtree and text.
    Remove,
    /// Replace the element by its children in place.
    Unwrap,
    Keep,
}

// --- Cleaning Policy (Lazy Static) ---
static TAG_ACTIONS: Lazy<HashMap<&'static str, TagAction>> = Lazy::new(|| {
    let mut actions = HashMap::new();
    for tag in ["script", "style"] {
        actions.insert(tag, TagAction::Remove);
    }
    for tag in ["font", "a", "b", "i", "u"] {
        actions.insert(tag, TagAction::Unwrap);
    }
    actions
});

/// Decorative attributes deleted from every surviving element.
pub const STRIPPED_ATTRIBUTES: [&str; 6] =
    ["class", "id", "name", "style", "cellpadding", "cellspacing"];

pub fn tag_action(tag: &str) -> TagAction {
    TAG_ACTIONS
        .get(tag.to_ascii_lowercase().as_str())
        .copied()
        .unwrap_or(TagAction::Keep)
}

/// Counters reported after a cleaning pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CleanStats {
    pub removed: usize,
    pub unwrapped: usize,
    pub attributes_stripped: usize,
}

/// Applies the cleaning policy to every element of `document`, in place.
///
/// The element set is snapshot in document order before anything is mutated,
/// then removals, unwraps and attribute stripping are applied to the snapshot.
/// Nodes inside a removed subtree may still be visited; touching them has no
/// visible effect since they are no longer reachable.
pub fn clean_document(document: &mut Document) -> CleanStats {
    let targets: Vec<_> = document
        .document_order()
        .into_iter()
        .filter_map(|id| document.tag(id).map(|tag| (id, tag_action(tag))))
        .collect();

    let mut stats = CleanStats::default();
    for (id, action) in targets {
        match action {
            TagAction::Remove => {
                document.detach(id);
                stats.removed += 1;
            }
            TagAction::Unwrap => {
                document.unwrap(id);
                stats.unwrapped += 1;
            }
            TagAction::Keep => {}
        }
        stats.attributes_stripped += document.remove_attrs(id, &STRIPPED_ATTRIBUTES);
    }

    tracing::debug!(
        "Cleaned document: {} removed, {} unwrapped, {} attributes stripped",
        stats.removed,
        stats.unwrapped,
        stats.attributes_stripped
    );
    stats
}

/// Parses raw markup and returns the cleaned tree.
pub fn clean_html(html: &str) -> Document {
    let mut document = Document::parse(html);
    clean_document(&mut document);
    document
}
