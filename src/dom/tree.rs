// src/dom/tree.rs

// --- Imports ---
pub use ego_tree::NodeId;
use scraper::{node::Node, Html};

/// Parsed HTML document that cleaning edits in place.
///
/// Wraps the html5ever tree built by `scraper`; malformed markup still yields a
/// best-effort tree. Detached nodes stay in the arena but are no longer
/// reachable from the root, so neither traversal nor serialization sees them.
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses an HTML document. Never fails; parser errors are only logged.
    pub fn parse(source: &str) -> Self {
        let html = Html::parse_document(source);
        if !html.errors.is_empty() {
            tracing::trace!("HTML parser recovered from {} errors", html.errors.len());
        }
        Self { html }
    }

    pub fn root(&self) -> NodeId {
        self.html.tree.root().id()
    }

    /// Lower-cased tag name, or `None` for non-element nodes.
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.html.tree.get(id)?.value().as_element().map(|el| el.name())
    }

    pub fn is_element_in(&self, id: NodeId, tags: &[&str]) -> bool {
        self.tag(id).map_or(false, |tag| tags.contains(&tag))
    }

    /// All nodes reachable from the root, in document (pre-)order, root first.
    pub fn document_order(&self) -> Vec<NodeId> {
        self.html.tree.root().descendants().map(|node| node.id()).collect()
    }

    /// Concatenated text of all descendant text nodes, without separators.
    pub fn text(&self, id: NodeId) -> String {
        let Some(node) = self.html.tree.get(id) else {
            return String::new();
        };
        node.descendants()
            .filter_map(|n| n.value().as_text())
            .map(|text| &**text)
            .collect()
    }

    /// Removes `id` and its subtree from the tree.
    pub fn detach(&mut self, id: NodeId) {
        if let Some(mut node) = self.html.tree.get_mut(id) {
            node.detach();
        }
    }

    /// Replaces `id` by its children at the same position, keeping their order.
    /// A node without a parent is left untouched.
    pub fn unwrap(&mut self, id: NodeId) {
        let Some(node) = self.html.tree.get(id) else {
            return;
        };
        if node.parent().is_none() {
            return;
        }
        let children: Vec<NodeId> = node.children().map(|child| child.id()).collect();

        if let Some(mut node) = self.html.tree.get_mut(id) {
            for child in children {
                node.insert_id_before(child);
            }
            node.detach();
        }
    }

    /// Removes the named attributes from an element. Returns how many were present.
    pub fn remove_attrs(&mut self, id: NodeId, names: &[&str]) -> usize {
        let Some(mut node) = self.html.tree.get_mut(id) else {
            return 0;
        };
        match node.value() {
            Node::Element(element) => {
                let before = element.attrs.len();
                element.attrs.retain(|name, _| !names.contains(&&*name.local));
                before - element.attrs.len()
            }
            _ => 0,
        }
    }

    /// Serializes the reachable tree back to HTML.
    pub fn to_html(&self) -> String {
        self.html.html()
    }

    #[cfg(test)]
    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.html.tree.get(id)?.value().as_element()?.attr(name)
    }

    #[cfg(test)]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.html.tree.get(id)?.parent().map(|p| p.id())
    }

    #[cfg(test)]
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.html
            .tree
            .get(id)
            .map(|node| node.children().map(|c| c.id()).collect())
            .unwrap_or_default()
    }
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    fn first_element(doc: &Document, tag: &str) -> NodeId {
        doc.document_order()
            .into_iter()
            .find(|&id| doc.tag(id) == Some(tag))
            .unwrap()
    }

    #[test]
    fn test_parse_builds_html_skeleton() {
        let doc = Document::parse("<p>Hello</p>");
        let tags: Vec<_> = doc
            .document_order()
            .into_iter()
            .filter_map(|id| doc.tag(id))
            .collect();
        assert_eq!(tags, vec!["html", "head", "body", "p"]);
    }

    #[test]
    fn test_text_concatenates_descendants_without_separators() {
        let doc = Document::parse("<div>Item<span>1A</span><p>Risk</p></div>");
        let div = first_element(&doc, "div");
        assert_eq!(doc.text(div), "Item1ARisk");
    }

    #[test]
    fn test_comments_do_not_contribute_text() {
        let doc = Document::parse("<div>Item <!-- hidden --> 1A</div>");
        let div = first_element(&doc, "div");
        assert_eq!(doc.text(div), "Item  1A");
    }

    #[test]
    fn test_malformed_markup_is_tolerated() {
        let doc = Document::parse("<div><p>unclosed <table><tr><td>cell</div>");
        let div = first_element(&doc, "div");
        assert!(doc.text(div).contains("unclosed"));
        assert!(doc.text(doc.root()).contains("cell"));
    }

    #[test]
    fn test_attributes_are_preserved() {
        let doc = Document::parse(r#"<table width="100%" class="x"><tr><td>v</td></tr></table>"#);
        let table = first_element(&doc, "table");
        assert_eq!(doc.attr(table, "width"), Some("100%"));
        assert_eq!(doc.attr(table, "class"), Some("x"));
        assert_eq!(doc.attr(table, "id"), None);
    }

    #[test]
    fn test_detach_removes_subtree_from_document_order() {
        let mut doc = Document::parse("<div><p>keep</p><p>drop <span>me</span></p></div>");
        let paragraphs: Vec<_> = doc
            .document_order()
            .into_iter()
            .filter(|&id| doc.tag(id) == Some("p"))
            .collect();
        doc.detach(paragraphs[1]);

        assert_eq!(doc.text(doc.root()), "keep");
        assert!(doc.document_order().iter().all(|&id| doc.tag(id) != Some("span")));
        assert_eq!(doc.parent(paragraphs[1]), None);
        assert!(!doc.to_html().contains("drop"));
    }

    #[test]
    fn test_unwrap_splices_children_in_place() {
        let mut doc = Document::parse(
            "<div><p>one</p><section><p>two</p><p>three</p></section><p>four</p></div>",
        );
        let section = first_element(&doc, "section");
        let div = first_element(&doc, "div");
        doc.unwrap(section);

        let children = doc.children(div);
        let child_texts: Vec<_> = children.iter().map(|&c| doc.text(c)).collect();
        assert_eq!(child_texts, vec!["one", "two", "three", "four"]);
        assert!(children.iter().all(|&c| doc.parent(c) == Some(div)));
        assert!(doc.to_html().contains("<div><p>one</p><p>two</p><p>three</p><p>four</p></div>"));
    }

    #[test]
    fn test_unwrap_of_detached_node_is_noop() {
        let mut doc = Document::parse("<div><b>bold</b></div>");
        let b = first_element(&doc, "b");
        doc.detach(b);
        doc.unwrap(b);
        assert_eq!(doc.parent(b), None);
        assert_eq!(doc.text(doc.root()), "");
    }

    #[test]
    fn test_remove_attrs_counts_removed() {
        let mut doc = Document::parse(r#"<p id="a" class="b" align="left">x</p>"#);
        let p = first_element(&doc, "p");
        assert_eq!(doc.remove_attrs(p, &["id", "class", "style"]), 2);
        assert_eq!(doc.attr(p, "align"), Some("left"));
        assert_eq!(doc.attr(p, "id"), None);
        assert!(doc.to_html().contains(r#"<p align="left">x</p>"#));
    }

    #[test]
    fn test_to_html_escapes_text_and_attributes() {
        let doc = Document::parse(r#"<p title="a &quot;b&quot;">x &amp; y &lt; z</p><br>"#);
        let html = doc.to_html();
        assert!(html.contains(r#"<p title="a &quot;b&quot;">x &amp; y &lt; z</p>"#));
        assert!(html.contains("<br>"));
        assert!(!html.contains("</br>"));
    }

    #[test]
    fn test_to_html_keeps_raw_text_containers_intact() {
        let src = "<body><noscript><b>x</b> &amp; y</noscript><iframe><p>a</p></iframe></body>";
        let doc = Document::parse(src);
        assert_eq!(doc.to_html(), Html::parse_document(src).html());
        assert!(doc.to_html().contains("<iframe><p>a</p></iframe>"));
    }
}
