use super::{escape_aggressive, escape_minimal, render_markdown};
use crate::{Config, Pipeline};

fn fence_pipeline() -> Pipeline {
    Pipeline::new(Config {
        markdown_fences: true,
        ..Config::default()
    })
}

#[test]
fn round_trip_simple_block() {
    let mut pipeline = fence_pipeline();
    let captured = pipeline.capture_markdown("```mermaid\ngraph TD\n    A --> B\n```");
    let html = render_markdown(&captured, escape_minimal);
    let restored = pipeline.restore(&html);

    assert!(restored.contains("<div class=\"mermaid\">graph TD\n    A --> B</div>"));
    assert!(!restored.contains("<pre>"));
}

#[test]
fn special_characters_survive_exactly() {
    let source = r#"graph LR
    A["User & Admin"] --> B["<data>"]"#;
    let mut pipeline = fence_pipeline();
    let captured = pipeline.capture_markdown(&format!("```mermaid\n{source}\n```"));
    let html = render_markdown(&captured, escape_minimal);
    let restored = pipeline.restore(&html);

    assert!(restored.contains(r#"A["User & Admin"] --> B["<data>"]"#));
    assert!(!restored.contains("&amp;"));
    assert!(!restored.contains("&lt;"));
    assert!(!restored.contains("&gt;"));
}

#[test]
fn round_trip_under_aggressive_entity_escaping() {
    // The transcoded body contains `/`, `+` and `=`, all of which the
    // renderer may entity-encode. The source itself exercises the full
    // escapable set.
    let source = "graph TD\n    A[\"x=1\"] -->|a/b+c| B[\"'quote' & <tag>\"]";
    let mut pipeline = fence_pipeline();
    let captured = pipeline.capture_markdown(&format!("```mermaid\n{source}\n```"));
    let html = render_markdown(&captured, escape_aggressive);
    let restored = pipeline.restore(&html);

    assert!(restored.contains(&format!("<div class=\"mermaid\">{source}</div>")));
}

#[test]
fn corrupted_body_fails_closed() {
    let mut pipeline = fence_pipeline();
    let captured = pipeline.capture_markdown("```mermaid\ngraph TD\n    A --> B\n```");
    let encoded = pipeline.store().get("MERMAID_B64_0").unwrap().payload.clone();

    let html = render_markdown(&captured, escape_minimal);
    let corrupted = html.replacen(&encoded[..10], "CORRUPTED!", 1);
    let restored = pipeline.restore(&corrupted);

    assert!(!restored.contains("<div class=\"mermaid\">"));
    assert!(restored.contains("<pre><code"));
}

#[test]
fn blocks_recover_independently() {
    let mut pipeline = fence_pipeline();
    let captured =
        pipeline.capture_markdown("```mermaid\ngraph A\n```\n\nText\n\n```mermaid\ngraph B\n```");
    let first = pipeline.store().get("MERMAID_B64_0").unwrap().payload.clone();

    let html = render_markdown(&captured, escape_minimal);
    let corrupted = html.replacen(&first, "not base64 at all", 1);
    let restored = pipeline.restore(&corrupted);

    // The corrupted block stays a code block; the intact one still decodes.
    assert!(restored.contains("<pre><code"));
    assert!(restored.contains("<div class=\"mermaid\">graph B</div>"));
    assert_eq!(restored.matches("<div class=\"mermaid\">").count(), 1);
}

#[test]
fn empty_block_is_never_recovered() {
    let mut pipeline = fence_pipeline();
    let captured = pipeline.capture_markdown("```mermaid\n\n```");
    assert!(captured.contains("MERMAID_B64_0"));

    let html = render_markdown(&captured, escape_minimal);
    let restored = pipeline.restore(&html);

    assert!(!restored.contains("<div class=\"mermaid\">"));
    assert!(restored.contains("<pre><code"));
}

#[test]
fn each_id_allocated_once_and_consumed_once() {
    let mut pipeline = fence_pipeline();
    let captured = pipeline.capture_markdown(
        "```mermaid\ngraph A\n```\n```mermaid\ngraph B\n```\n```mermaid\ngraph C\n```",
    );

    for id in ["MERMAID_B64_0", "MERMAID_B64_1", "MERMAID_B64_2"] {
        assert_eq!(captured.matches(id).count(), 1);
    }
    assert_eq!(pipeline.store().len(), 3);

    let restored = pipeline.restore(&render_markdown(&captured, escape_minimal));
    assert_eq!(restored.matches("<div class=\"mermaid\">").count(), 3);
    assert!(!restored.contains("MERMAID_B64_"));
}

#[test]
fn frontmatter_inside_block_survives() {
    let source = "---\ntitle: Deployment Flow\n---\nflowchart TD\n    Dev --> Prod";
    let mut pipeline = fence_pipeline();
    let captured = pipeline.capture_markdown(&format!("```mermaid\n{source}\n```"));
    let restored = pipeline.restore(&render_markdown(&captured, escape_minimal));

    assert!(restored.contains("title: Deployment Flow"));
    assert!(restored.contains("flowchart TD"));
}

#[test]
fn capture_is_identity_without_fence_mode() {
    let mut pipeline = Pipeline::new(Config::default());
    let input = "```mermaid\ngraph TD\n    A --> B\n```";
    assert_eq!(pipeline.capture_markdown(input), input);
    assert!(pipeline.store().is_empty());
}

#[test]
fn clear_starts_a_fresh_run_with_fresh_ids() {
    let mut pipeline = fence_pipeline();
    pipeline.capture_markdown("```mermaid\ngraph A\n```");
    pipeline.clear();
    assert!(pipeline.store().is_empty());

    let captured = pipeline.capture_markdown("```mermaid\ngraph B\n```");
    // Counters survive the boundary: the id from the first run is not reused.
    assert!(captured.contains("MERMAID_B64_1"));
    assert!(!captured.contains("MERMAID_B64_0"));
}
