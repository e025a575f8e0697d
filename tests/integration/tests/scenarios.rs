//! End-to-end scenarios: configuration, engine and output together.

use pretty_assertions::assert_eq;
use sanitree_ast::DomArena;
use sanitree_core::{DomVisitor, SanitizeError, SanitizerConfig};

fn engine(config_json: &str) -> DomVisitor {
    let config = SanitizerConfig::from_json(config_json).unwrap();
    DomVisitor::from_config(&config).unwrap()
}

#[test]
fn ruby_annotation_with_extra_extension() {
    let arena = DomArena::new();
    let input = arena.element(
        "body",
        &[
            arena.element(
                "ruby",
                &[
                    arena.text("漢"),
                    arena.element("rp", &[arena.text("(")]),
                    arena.element_with_attributes("rt", &[("style", "x")], &[arena.text("kan")]),
                    arena.element("rp", &[arena.text(")")]),
                ],
            ),
            arena.element("script", &[arena.text("alert(1)")]),
            arena.comment("tracking"),
        ],
    );

    let tree = engine(r#"{ "extensions": ["extra"] }"#).visit(&input).unwrap();

    insta::assert_snapshot!(tree.to_string().trim_end(), @r#"
    Document
      Element(ruby)
        Text("漢")
        Element(rp)
          Text("(")
        Element(rt)
          Text("kan")
        Element(rp)
          Text(")")
      Text("alert(1)")
    "#);
}

#[test]
fn basic_extension_keeps_structure_and_line_breaks() {
    let arena = DomArena::new();
    let input = arena.element(
        "DIV",
        &[
            arena.element("P", &[arena.text("one"), arena.element("br", &[]), arena.text("two")]),
            arena.element("iframe", &[arena.element("b", &[arena.text("bold")])]),
        ],
    );

    let tree = engine(r#"{ "extensions": ["basic"] }"#).visit(&input).unwrap();

    insta::assert_snapshot!(tree.to_string().trim_end(), @r#"
    Document
      Element(div)
        Element(p)
          Text("one")
          Element(br)
          Text("two")
        Element(b)
          Text("bold")
    "#);
}

#[test]
fn attributes_are_never_copied() {
    let arena = DomArena::new();
    let input = arena.element_with_attributes(
        "span",
        &[("onmouseover", "steal()"), ("class", "x")],
        &[arena.text("t")],
    );

    let tree = engine(r#"{ "elements": ["span"] }"#).visit(&input).unwrap();
    let json = serde_json::to_value(&tree).unwrap();

    assert_eq!(json["children"][0]["attributes"], serde_json::json!({}));
}

#[test]
fn pruned_wrappers_disappear_but_keep_promoted_text() {
    let arena = DomArena::new();
    let input = arena.element(
        "body",
        &[
            arena.element("p", &[arena.element("img", &[])]),
            arena.element("p", &[arena.element("object", &[arena.text("fallback")])]),
        ],
    );

    let tree = engine(r#"{ "elements": ["p"], "prune_empty": ["p"] }"#)
        .visit(&input)
        .unwrap();

    insta::assert_snapshot!(tree.to_string().trim_end(), @r#"
    Document
      Element(p)
        Text("fallback")
    "#);
}

#[test]
fn configured_limits_abort_the_traversal() {
    let arena = DomArena::new();
    let mut input = arena.element("div", &[]);
    for _ in 0..5 {
        input = arena.element("div", &[input]);
    }

    let err = engine(r#"{ "limits": { "max_depth": 3 } }"#)
        .visit(&input)
        .unwrap_err();

    assert!(matches!(err, SanitizeError::DepthExceeded { max: 3 }));
    assert_eq!(err.to_string(), "Maximum nesting depth of 3 exceeded");
}

#[test]
fn default_limits_reject_absurd_nesting() {
    let arena = DomArena::new();
    let mut input = arena.element("div", &[]);
    for _ in 0..sanitree_core::DEFAULT_MAX_DEPTH {
        input = arena.element("div", &[input]);
    }

    assert!(DomVisitor::default().visit(&input).is_ok());

    let deeper = arena.element("div", &[input]);
    assert!(matches!(
        DomVisitor::default().visit(&deeper),
        Err(SanitizeError::DepthExceeded { .. })
    ));
}
