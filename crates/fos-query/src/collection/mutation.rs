//! Structural mutation: removal, cloning and content insertion
//!
//! Insertions resolve their argument once per call, then visit targets in
//! index order. Nodes parsed from markup are single-use, so every target
//! after the first receives a deep clone; a live node argument is moved.

use fos_dom::{DomResult, DomTree, NodeId};

use super::NodeCollection;
use crate::selector::{resolve, Selector};

/// Where an insertion puts the resolved nodes relative to a target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    Prepend,
    Append,
    Before,
    After,
    Replace,
}

impl NodeCollection {
    /// Detach every held node from its parent and drop all entries
    pub fn remove(&mut self) -> &mut Self {
        {
            let mut doc = self.doc.borrow_mut();
            for node in self.iter() {
                if let Some(parent) = doc.tree.parent(node) {
                    if let Err(err) = doc.tree.remove_child(parent, node) {
                        tracing::warn!("remove() skipped {:?}: {}", node, err);
                    }
                }
            }
        }
        self.entries.clear();
        self
    }

    /// Remove the children of every held node
    pub fn empty(&mut self) -> &mut Self {
        {
            let mut doc = self.doc.borrow_mut();
            for node in self.iter() {
                doc.tree.remove_children(node);
            }
        }
        self
    }

    /// Detached copies of every held node
    pub fn clone_nodes(&self, deep: bool) -> NodeCollection {
        let copies = {
            let mut doc = self.doc.borrow_mut();
            self.iter()
                .filter_map(|node| match doc.tree.clone_node(node, deep) {
                    Ok(copy) => Some(copy),
                    Err(err) => {
                        tracing::warn!("clone skipped {:?}: {}", node, err);
                        None
                    }
                })
                .collect()
        };
        self.derive(copies)
    }

    /// Insert the first resolved node as the first child of every target
    pub fn prepend<'a>(&mut self, selector: impl Into<Selector<'a>>) -> &mut Self {
        self.insert_each(&selector.into(), Placement::Prepend);
        self
    }

    /// Append every resolved node to every target. Text arguments are
    /// cloned per target, live nodes are moved.
    pub fn append<'a>(&mut self, selector: impl Into<Selector<'a>>) -> &mut Self {
        self.insert_each(&selector.into(), Placement::Append);
        self
    }

    /// Insert the first resolved node before every target
    pub fn before<'a>(&mut self, selector: impl Into<Selector<'a>>) -> &mut Self {
        self.insert_each(&selector.into(), Placement::Before);
        self
    }

    /// Insert the first resolved node after every target
    pub fn after<'a>(&mut self, selector: impl Into<Selector<'a>>) -> &mut Self {
        self.insert_each(&selector.into(), Placement::After);
        self
    }

    /// Replace every target with the first resolved node. Returns the
    /// inserted nodes; the receiver keeps the replaced ones.
    pub fn replace_with<'a>(&mut self, selector: impl Into<Selector<'a>>) -> NodeCollection {
        let inserted = self.insert_each(&selector.into(), Placement::Replace);
        self.derive(inserted)
    }

    fn insert_each(&self, selector: &Selector<'_>, placement: Placement) -> Vec<NodeId> {
        let mut doc = self.doc.borrow_mut();
        let resolved = resolve(&mut doc, selector, self.root);
        let tree = &mut doc.tree;

        let mut inserted = Vec::new();
        for (index, target) in self.iter().enumerate() {
            let result = if placement == Placement::Append {
                append_all(tree, target, &resolved, selector.is_text())
            } else {
                let Some(&first) = resolved.first() else {
                    break;
                };
                let node = if selector.is_markup() && index > 0 {
                    match tree.clone_node(first, true) {
                        Ok(copy) => copy,
                        Err(err) => {
                            tracing::warn!("{:?} skipped {:?}: {}", placement, target, err);
                            continue;
                        }
                    }
                } else {
                    first
                };
                insert_one(tree, target, node, placement).map(|placed| {
                    if placed {
                        inserted.push(node);
                    }
                })
            };

            if let Err(err) = result {
                tracing::warn!("{:?} skipped {:?}: {}", placement, target, err);
            }
        }

        tracing::trace!("{:?} into {} targets", placement, self.len());
        inserted
    }
}

fn append_all(tree: &mut DomTree, target: NodeId, nodes: &[NodeId], clone: bool) -> DomResult<()> {
    for &node in nodes {
        let child = if clone { tree.clone_node(node, true)? } else { node };
        tree.append_child(target, child)?;
    }
    Ok(())
}

/// Place `node` relative to `target`. `false` when the target has no parent
/// to insert into.
fn insert_one(tree: &mut DomTree, target: NodeId, node: NodeId, placement: Placement) -> DomResult<bool> {
    if placement == Placement::Prepend {
        let first = tree.first_child(target);
        tree.insert_before(target, node, first)?;
        return Ok(true);
    }

    let Some(parent) = tree.parent(target) else {
        tracing::warn!("{:?} target {:?} has no parent", placement, target);
        return Ok(false);
    };
    match placement {
        Placement::Before => tree.insert_before(parent, node, Some(target))?,
        Placement::After => {
            let next = tree.next_sibling(target);
            tree.insert_before(parent, node, next)?
        }
        _ => tree.replace_child(parent, node, target)?,
    };
    Ok(true)
}

#[cfg(test)]
mod tests {
    use crate::build;
    use fos_dom::DocumentRef;
    use fos_html::{get_inner_html, HtmlParser};

    fn document() -> DocumentRef {
        DocumentRef::new(HtmlParser::new().parse(concat!(
            r#"<div class="t" id="one"><i>1</i></div>"#,
            r#"<div class="t" id="two"><i>2</i></div>"#,
            r#"<span id="live">live</span>"#
        )))
    }

    fn html(doc: &DocumentRef, selector: &str) -> String {
        build(doc, selector, None).html()
    }

    fn body(doc: &DocumentRef) -> String {
        let doc = doc.borrow();
        doc.body()
            .map(|body| get_inner_html(&doc.tree, body))
            .unwrap_or_default()
    }

    #[test]
    fn test_append_markup_clones_per_target() {
        let doc = document();
        build(&doc, ".t", None).append("<b>x</b>");
        assert_eq!(html(&doc, "#one"), "<i>1</i><b>x</b>");
        assert_eq!(html(&doc, "#two"), "<i>2</i><b>x</b>");

        // Independent subtrees
        build(&doc, "#one b", None).set_text("changed");
        assert_eq!(html(&doc, "#two"), "<i>2</i><b>x</b>");
    }

    #[test]
    fn test_append_live_node_moves_to_last_target() {
        let doc = document();
        let live = build(&doc, "#live", None);
        build(&doc, ".t", None).append(&live);

        assert_eq!(html(&doc, "#one"), "<i>1</i>");
        assert_eq!(html(&doc, "#two"), r#"<i>2</i><span id="live">live</span>"#);
        assert_eq!(build(&doc, "#live", None).len(), 1);
    }

    #[test]
    fn test_append_css_text_clones() {
        let doc = document();
        build(&doc, "#two", None).append("#live");
        assert_eq!(build(&doc, "span", None).len(), 2);
        assert_eq!(html(&doc, "#two"), r#"<i>2</i><span id="live">live</span>"#);
    }

    #[test]
    fn test_prepend() {
        let doc = document();
        build(&doc, ".t", None).prepend("<u>p</u>");
        assert_eq!(html(&doc, "#one"), "<u>p</u><i>1</i>");
        assert_eq!(html(&doc, "#two"), "<u>p</u><i>2</i>");

        let mut empty = build(&doc, "#live", None);
        empty.empty().prepend("<u>e</u>");
        assert_eq!(html(&doc, "#live"), "<u>e</u>");
    }

    #[test]
    fn test_before_and_after() {
        let doc = document();
        let live = build(&doc, "#live", None);
        build(&doc, "#one", None).before("<hr>").after(&live);

        assert_eq!(
            body(&doc),
            concat!(
                "<hr>",
                r#"<div class="t" id="one"><i>1</i></div>"#,
                r#"<span id="live">live</span>"#,
                r#"<div class="t" id="two"><i>2</i></div>"#
            )
        );
    }

    #[test]
    fn test_after_last_child() {
        let doc = document();
        build(&doc, "#live", None).after("<em>end</em>");
        assert!(body(&doc).ends_with(r#"<span id="live">live</span><em>end</em>"#));
    }

    #[test]
    fn test_insert_without_parent_is_skipped() {
        let doc = document();
        let mut detached = build(&doc, "#live", None).clone_nodes(true);
        detached.before("<b>x</b>").after("<b>y</b>");
        assert_eq!(build(&doc, "b", None).len(), 0);
    }

    #[test]
    fn test_replace_with() {
        let doc = document();
        let mut targets = build(&doc, ".t", None);
        let inserted = targets.replace_with("<p>new</p>");

        assert_eq!(inserted.len(), 2);
        assert_ne!(inserted[0], inserted[1]);
        assert_eq!(build(&doc, "p", None).len(), 2);
        assert_eq!(build(&doc, ".t", None).len(), 0);
        assert_eq!(targets.len(), 2);
    }

    #[test]
    fn test_remove_detaches_and_clears() {
        let doc = document();
        let mut divs = build(&doc, ".t", None);
        divs.remove();

        assert!(divs.is_empty());
        assert_eq!(build(&doc, ".t", None).len(), 0);
        assert_eq!(body(&doc), r#"<span id="live">live</span>"#);
    }

    #[test]
    fn test_empty_keeps_nodes() {
        let doc = document();
        build(&doc, ".t", None).empty();
        assert_eq!(build(&doc, ".t", None).len(), 2);
        assert_eq!(html(&doc, "#one"), "");
    }

    #[test]
    fn test_clone_nodes() {
        let doc = document();
        let divs = build(&doc, ".t", None);
        let deep = divs.clone_nodes(true);
        let shallow = divs.clone_nodes(false);

        assert_eq!(deep.len(), 2);
        assert_eq!(deep.html(), "<i>1</i>");
        assert_eq!(shallow.html(), "");
        assert_eq!(shallow.attr("id").as_deref(), Some("one"));
        assert!(deep.parent().is_none());
    }
}
