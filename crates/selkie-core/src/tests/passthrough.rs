use crate::recover::restore_inline_fences;
use crate::{Config, Pipeline, RenderMode};

#[test]
fn inline_fence_becomes_host_element() {
    let html = "<pre><code class=\"language-mermaid\">graph TD\n    A --&gt; B\n</code></pre>";
    let restored = restore_inline_fences(html, false);
    assert_eq!(restored, "<div class=\"mermaid\">graph TD\n    A --> B</div>");
}

#[test]
fn entity_escaping_is_reversed() {
    let html = concat!(
        "<pre><code class=\"language-mermaid\">",
        "A[&quot;User &amp; Admin&quot;] --&gt; B[&quot;&lt;data&gt;&quot;]",
        "</code></pre>"
    );
    let restored = restore_inline_fences(html, false);
    assert!(restored.contains(r#"A["User & Admin"] --> B["<data>"]"#));
}

#[test]
fn highlighter_wrappers_are_stripped() {
    let html = concat!(
        "<pre><code class=\"language-mermaid hljs\">",
        "<span class=\"hljs-keyword\">graph</span> TD\n",
        "    A --&gt; B",
        "</code></pre>"
    );
    let restored = restore_inline_fences(html, false);
    assert_eq!(restored, "<div class=\"mermaid\">graph TD\n    A --> B</div>");
}

#[test]
fn other_languages_are_untouched() {
    let html = "<pre><code class=\"language-rust\">fn main() {}</code></pre>";
    assert_eq!(restore_inline_fences(html, false), html);
}

#[test]
fn prefixed_language_names_do_not_match() {
    let html = "<pre><code class=\"language-mermaidjs\">not a diagram</code></pre>";
    assert_eq!(restore_inline_fences(html, false), html);
}

#[test]
fn live_pipeline_restores_uncaptured_fences() {
    let pipeline = Pipeline::new(Config {
        render_mode: RenderMode::Live,
        ..Config::default()
    });
    let html = "<pre><code class=\"language-mermaid\">graph TD\n    A --&gt; B\n</code></pre>";
    let restored = pipeline.restore(html);
    assert!(restored.contains("<div class=\"mermaid\">graph TD\n    A --> B</div>"));
}

#[test]
fn static_pipeline_leaves_uncaptured_fences_alone() {
    // Without a client-side engine on the page there is nothing to render a
    // host element, so static mode keeps the code block.
    let pipeline = Pipeline::new(Config::default());
    let html = "<pre><code class=\"language-mermaid\">graph TD\n    A --&gt; B\n</code></pre>";
    assert_eq!(pipeline.restore(html), html);
}
