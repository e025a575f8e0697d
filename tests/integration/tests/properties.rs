//! Property tests for the traversal engine
//!
//! Random input trees are generated as owned values, allocated into an
//! arena, and sanitized. The output is compared against a direct model of
//! the whitelist semantics.

use std::collections::HashSet;

use proptest::prelude::*;
use sanitree_ast::{DomArena, DomNode, NodeId, SafeTree};
use sanitree_core::test_utils::{EventLog, Phase, RecordingVisitor};
use sanitree_core::visitor::{ElementVisitor, NodeVisitor, VoidElementVisitor};
use sanitree_core::{DomVisitor, SanitizeError, TraversalLimits};

const TAGS: &[&str] = &["p", "div", "span", "br", "rp", "script", "B"];

#[derive(Debug, Clone)]
enum Node {
    Element(&'static str, Vec<Node>),
    Text(String),
    Comment(String),
}

#[derive(Debug, PartialEq)]
enum Out {
    Element(String, Vec<Out>),
    Text(String),
}

fn node() -> impl Strategy<Value = Node> {
    let leaf = prop_oneof![
        "[a-z]{1,4}".prop_map(Node::Text),
        "[0-9]{1,3}".prop_map(|c| Node::Comment(format!("#{}", c))),
    ];
    leaf.prop_recursive(4, 32, 4, |inner| {
        (
            prop::sample::select(TAGS),
            prop::collection::vec(inner, 0..4),
        )
            .prop_map(|(tag, children)| Node::Element(tag, children))
    })
}

fn document() -> impl Strategy<Value = Node> {
    (
        prop::sample::select(TAGS),
        prop::collection::vec(node(), 0..5),
    )
        .prop_map(|(tag, children)| Node::Element(tag, children))
}

fn build<'a>(arena: &'a DomArena, node: &Node) -> DomNode<'a> {
    match node {
        Node::Element(tag, children) => {
            let children: Vec<DomNode<'a>> =
                children.iter().map(|child| build(arena, child)).collect();
            arena.element(tag, &children)
        }
        Node::Text(value) => arena.text(value),
        Node::Comment(value) => arena.comment(value),
    }
}

/// Output expected from whitelisting `allowed` and the void elements in `voids`.
fn expected(node: &Node, allowed: &HashSet<String>, voids: &HashSet<String>, out: &mut Vec<Out>) {
    match node {
        Node::Element(tag, children) => {
            let tag = tag.to_ascii_lowercase();
            if allowed.contains(&tag) {
                let mut inner = Vec::new();
                for child in children {
                    expected(child, allowed, voids, &mut inner);
                }
                out.push(Out::Element(tag, inner));
            } else {
                if voids.contains(&tag) {
                    out.push(Out::Element(tag, Vec::new()));
                }
                for child in children {
                    expected(child, allowed, voids, out);
                }
            }
        }
        Node::Text(value) => out.push(Out::Text(value.clone())),
        Node::Comment(_) => {}
    }
}

fn actual(tree: &SafeTree, id: NodeId) -> Vec<Out> {
    tree.children(id)
        .iter()
        .map(|&child| {
            let node = tree.get(child);
            match node.tag() {
                Some(tag) => Out::Element(tag.to_string(), actual(tree, child)),
                None => Out::Text(node.text_content().unwrap_or_default().to_string()),
            }
        })
        .collect()
}

fn input_texts(node: &Node, out: &mut Vec<String>) {
    match node {
        Node::Element(_, children) => children.iter().for_each(|child| input_texts(child, out)),
        Node::Text(value) => out.push(value.clone()),
        Node::Comment(_) => {}
    }
}

fn element_count(node: &Node) -> usize {
    match node {
        Node::Element(_, children) => 1 + children.iter().map(element_count).sum::<usize>(),
        _ => 0,
    }
}

fn visited_count(node: &Node) -> usize {
    match node {
        Node::Element(_, children) => 1 + children.iter().map(visited_count).sum::<usize>(),
        Node::Text(_) => 1,
        Node::Comment(_) => 0,
    }
}

fn max_depth(node: &Node) -> usize {
    match node {
        Node::Element(_, children) => children
            .iter()
            .filter(|child| matches!(child, Node::Element(..)))
            .map(|child| 1 + max_depth(child))
            .max()
            .unwrap_or(0),
        _ => 0,
    }
}

fn whitelist_engine(allowed: &[&str], with_br: bool) -> DomVisitor {
    let mut visitors: Vec<Box<dyn NodeVisitor>> = allowed
        .iter()
        .map(|tag| Box::new(ElementVisitor::new(tag)) as Box<dyn NodeVisitor>)
        .collect();
    if with_br {
        visitors.push(Box::new(VoidElementVisitor::new("br")));
    }
    DomVisitor::new(visitors)
}

proptest! {
    #[test]
    fn test_output_matches_whitelist_model(
        doc in document(),
        allowed in prop::sample::subsequence(vec!["p", "div", "span", "rp", "b"], 0..=5),
        with_br in any::<bool>(),
    ) {
        let arena = DomArena::new();
        let root = build(&arena, &doc);
        let tree = whitelist_engine(&allowed, with_br).visit(&root).unwrap();

        let allowed_set: HashSet<String> = allowed.iter().map(|tag| tag.to_string()).collect();
        let mut voids = HashSet::new();
        if with_br {
            voids.insert("br".to_string());
        }
        let mut model = Vec::new();
        expected(&doc, &allowed_set, &voids, &mut model);

        prop_assert_eq!(actual(&tree, tree.root()), model);
    }

    #[test]
    fn test_no_visitors_flattens_to_text(doc in document()) {
        let arena = DomArena::new();
        let root = build(&arena, &doc);
        let tree = DomVisitor::default().visit(&root).unwrap();

        let mut texts = Vec::new();
        input_texts(&doc, &mut texts);

        prop_assert_eq!(tree.element_count(), 0);
        prop_assert_eq!(tree.children(tree.root()).len(), texts.len());
        prop_assert_eq!(tree.texts(), texts);
    }

    #[test]
    fn test_comments_never_reach_output(doc in document()) {
        let arena = DomArena::new();
        let root = build(&arena, &doc);
        let log = EventLog::default();
        let engine = DomVisitor::new(vec![Box::new(RecordingVisitor::wrapping("w", log.clone()))]);

        let tree = engine.visit(&root).unwrap();

        prop_assert!(tree.texts().iter().all(|text| !text.starts_with('#')));
        prop_assert!(log.events().iter().all(|event| !event.node.starts_with('#')));
    }

    #[test]
    fn test_enter_order_and_reverse_leave_order(doc in document(), count in 1usize..5) {
        let arena = DomArena::new();
        let root = build(&arena, &doc);
        let log = EventLog::default();
        let labels: Vec<String> = (1..=count).map(|i| format!("v{}", i)).collect();
        let visitors: Vec<Box<dyn NodeVisitor>> = labels
            .iter()
            .map(|label| {
                Box::new(RecordingVisitor::new(label, log.clone())) as Box<dyn NodeVisitor>
            })
            .collect();

        DomVisitor::new(visitors).visit(&root).unwrap();

        let events = log.events();
        prop_assert_eq!(events.len(), 2 * count * element_count(&doc));

        let mut open: Vec<String> = Vec::new();
        for chunk in events.chunks(count) {
            let phase = chunk[0].phase;
            let node = &chunk[0].node;
            prop_assert!(chunk.iter().all(|event| event.phase == phase && &event.node == node));

            let visitors: Vec<&str> = chunk.iter().map(|event| event.visitor.as_str()).collect();
            let mut order: Vec<&str> = labels.iter().map(String::as_str).collect();
            match phase {
                Phase::Enter => open.push(node.clone()),
                Phase::Leave => {
                    order.reverse();
                    let entered = open.pop();
                    prop_assert_eq!(entered.as_ref(), Some(node));
                }
            }
            prop_assert_eq!(visitors, order);
        }
        prop_assert!(open.is_empty());
    }

    #[test]
    fn test_wrapping_visitors_keep_cursor_balanced(doc in document(), count in 1usize..4) {
        let arena = DomArena::new();
        let root = build(&arena, &doc);
        let log = EventLog::default();
        let visitors: Vec<Box<dyn NodeVisitor>> = (0..count)
            .map(|i| {
                Box::new(RecordingVisitor::wrapping(&format!("w{}", i), log.clone()))
                    as Box<dyn NodeVisitor>
            })
            .collect();

        let tree = DomVisitor::new(visitors).visit(&root).unwrap();

        let mut texts = Vec::new();
        input_texts(&doc, &mut texts);
        prop_assert_eq!(tree.element_count(), count * element_count(&doc));
        prop_assert_eq!(tree.texts(), texts);
    }

    #[test]
    fn test_depth_limit_is_exact(doc in document(), limit in 0usize..6) {
        let arena = DomArena::new();
        let root = build(&arena, &doc);
        let engine = DomVisitor::default()
            .with_limits(TraversalLimits::unbounded().with_max_depth(limit));

        let result = engine.visit(&root);

        if max_depth(&doc) <= limit {
            prop_assert!(result.is_ok());
        } else {
            prop_assert!(
                matches!(result, Err(SanitizeError::DepthExceeded { max }) if max == limit),
                "expected depth error"
            );
        }
    }

    #[test]
    fn test_size_limit_is_exact(doc in document(), limit in 1usize..40) {
        let arena = DomArena::new();
        let root = build(&arena, &doc);
        let engine = DomVisitor::default()
            .with_limits(TraversalLimits::unbounded().with_max_nodes(limit));

        let result = engine.visit(&root);

        if visited_count(&doc) <= limit {
            prop_assert!(result.is_ok());
        } else {
            prop_assert!(
                matches!(result, Err(SanitizeError::SizeExceeded { max }) if max == limit),
                "expected size error"
            );
        }
    }
}
