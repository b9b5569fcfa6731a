//! Depth-first traversal over a bounded slice of a parsed document.
//!
//! Walks the sibling chain of a root node, descending each sibling's
//! subtree with an explicit stack and feeding every text fragment that
//! should count toward word frequency to a sink. Visited nodes are tracked
//! in a per-call set keyed by node id, so the document tree itself is
//! never mutated and a walk can safely be re-run.

use std::collections::HashSet;

use ego_tree::{NodeId, NodeRef};
use scraper::node::Node;

use crate::error::{CrawlError, Result};

/// Walk `root` and its following siblings, stopping before a sibling
/// element whose name equals `end_name` or when the sibling chain runs
/// out.
pub fn walk_section<F>(root: NodeRef<'_, Node>, end_name: &str, sink: &mut F) -> Result<()>
where
    F: FnMut(&str),
{
    let mut visited: HashSet<NodeId> = HashSet::new();
    let mut cursor = Some(root);
    while let Some(node) = cursor {
        walk_subtree(node, &mut visited, sink)?;
        cursor = node
            .next_sibling()
            .filter(|next| !is_end_marker(next, end_name));
    }
    Ok(())
}

fn is_end_marker(node: &NodeRef<'_, Node>, end_name: &str) -> bool {
    node.value()
        .as_element()
        .is_some_and(|element| element.name() == end_name)
}

/// Depth-first descent of one subtree.
fn walk_subtree<F>(
    start: NodeRef<'_, Node>,
    visited: &mut HashSet<NodeId>,
    sink: &mut F,
) -> Result<()>
where
    F: FnMut(&str),
{
    let mut stack = vec![start];

    while let Some(node) = stack.pop() {
        if let Node::Text(text) = node.value() {
            let fragment: &str = text;
            sink(fragment);
            continue;
        }

        if !is_crawlable(node.value()) {
            continue;
        }

        visited.insert(node.id());
        for child in node.children() {
            match child.value() {
                Node::Comment(_) => continue,
                Node::Document | Node::Fragment => {
                    return Err(CrawlError::InvalidNode(
                        "document node cannot be a child of another node".to_string(),
                    ));
                }
                Node::Text(text) => {
                    let fragment: &str = text;
                    sink(fragment);
                }
                Node::Element(_) => {
                    if !visited.contains(&child.id()) && is_crawlable(child.value()) {
                        stack.push(child);
                    }
                }
                // doctypes and processing instructions carry no text
                _ => continue,
            }
        }
    }

    Ok(())
}

/// Skip rules: comments, `sup` elements and floated thumbnail containers
/// contribute nothing, including their children.
fn is_crawlable(node: &Node) -> bool {
    match node {
        Node::Comment(_) => false,
        Node::Element(element) => {
            if element.name() == "sup" {
                return false;
            }
            if element.name() == "div" {
                let class = element.attr("class").unwrap_or("");
                if class == "thumb tleft" || class == "thumb tright" {
                    return false;
                }
            }
            true
        }
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn find_by_id<'a>(document: &'a Html, id: &str) -> NodeRef<'a, Node> {
        document
            .tree
            .root()
            .descendants()
            .find(|node| {
                node.value()
                    .as_element()
                    .is_some_and(|element| element.id() == Some(id))
            })
            .expect("fixture contains the id")
    }

    fn collect(document: &Html, id: &str, end_name: &str) -> Vec<String> {
        let mut fragments = Vec::new();
        walk_section(find_by_id(document, id), end_name, &mut |text| {
            fragments.push(text.to_string())
        })
        .expect("walk succeeds");
        fragments
    }

    #[test]
    fn test_comment_contributes_no_text() {
        let document =
            Html::parse_document(r#"<div id="r"><!-- hidden words -->shown</div>"#);
        let text = collect(&document, "r", "h2").join(" ");
        assert!(text.contains("shown"));
        assert!(!text.contains("hidden"));
    }

    #[test]
    fn test_sup_subtree_is_skipped() {
        let document = Html::parse_document(
            r#"<div id="r">keep<sup>cite<span>nested</span></sup></div>"#,
        );
        let text = collect(&document, "r", "h2").join(" ");
        assert!(text.contains("keep"));
        assert!(!text.contains("cite"));
        assert!(!text.contains("nested"));
    }

    #[test]
    fn test_thumbnail_divs_are_skipped() {
        let document = Html::parse_document(
            r#"<div id="r">
                <div class="thumb tleft">left caption</div>
                <div class="thumb tright">right caption</div>
                <div class="thumb">plain thumb</div>
                body text
            </div>"#,
        );
        let text = collect(&document, "r", "h2").join(" ");
        assert!(text.contains("body text"));
        assert!(text.contains("plain thumb"));
        assert!(!text.contains("left caption"));
        assert!(!text.contains("right caption"));
    }

    #[test]
    fn test_stops_at_end_marker_sibling() {
        let document = Html::parse_document(
            r#"<div><p id="r">first</p><p>second</p><h2>Next</h2><p>after</p></div>"#,
        );
        let text = collect(&document, "r", "h2").join(" ");
        assert!(text.contains("first"));
        assert!(text.contains("second"));
        assert!(!text.contains("Next"));
        assert!(!text.contains("after"));
    }

    #[test]
    fn test_sibling_chain_runs_to_exhaustion_without_marker() {
        let document =
            Html::parse_document(r#"<div><p id="r">first</p><p>last</p></div>"#);
        let text = collect(&document, "r", "h2").join(" ");
        assert!(text.contains("first"));
        assert!(text.contains("last"));
    }

    #[test]
    fn test_visited_element_is_not_descended_twice() {
        let document = Html::parse_document(r#"<div id="r"><p>inner</p></div>"#);
        let root = find_by_id(&document, "r");

        let mut visited = HashSet::new();
        let mut fragments: Vec<String> = Vec::new();
        let mut sink = |text: &str| fragments.push(text.to_string());
        walk_subtree(root, &mut visited, &mut sink).expect("first walk");
        walk_subtree(root, &mut visited, &mut sink).expect("second walk");

        assert_eq!(fragments, vec!["inner".to_string()]);
    }

    #[test]
    fn test_text_root_feeds_sink_directly() {
        let document = Html::parse_document(r#"<div id="r">only text</div>"#);
        let text_node = find_by_id(&document, "r")
            .children()
            .next()
            .expect("div has a text child");

        let mut fragments = Vec::new();
        walk_section(text_node, "h2", &mut |text| {
            fragments.push(text.to_string())
        })
        .expect("walk succeeds");
        assert_eq!(fragments, vec!["only text".to_string()]);
    }

    #[test]
    fn test_document_as_child_is_fatal() {
        let mut document = Html::parse_document(r#"<div id="r">hi</div>"#);
        let root_id = find_by_id(&document, "r").id();
        document
            .tree
            .get_mut(root_id)
            .expect("node exists")
            .append(Node::Document);

        let root = document.tree.get(root_id).expect("node exists");
        let mut sink = |_: &str| {};
        let err = walk_section(root, "h2", &mut sink).unwrap_err();
        assert!(matches!(err, CrawlError::InvalidNode(_)));
    }
}
