use crate::store::{PlaceholderStore, PlaceholderVariant};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use regex::Regex;
use std::sync::OnceLock;

fn mermaid_fence_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)```mermaid\b(.*?)```").expect("valid regex"))
}

/// Replaces every ```` ```mermaid ```` fence in a Markdown document with a
/// transcoded fence that survives a full prose-rendering pass.
///
/// The replacement fence uses a freshly allocated id as its info string and
/// the base64-transcoded (trimmed) source as its body. The transcoded text is
/// what gets stored: recovery compares in transcoded space and only decodes
/// after the comparison holds. The diagram source itself is never inspected.
pub fn capture_fences(store: &mut PlaceholderStore, markdown: &str, debug: bool) -> String {
    if !markdown.contains("```mermaid") {
        return markdown.to_string();
    }

    mermaid_fence_regex()
        .replace_all(markdown, |caps: &regex::Captures| {
            let source = caps.get(1).map(|m| m.as_str()).unwrap_or_default().trim();
            let encoded = BASE64.encode(source);
            let id = store.insert(PlaceholderVariant::TranscodedFence, encoded.clone());
            if debug {
                tracing::debug!(
                    %id,
                    source_chars = source.chars().count(),
                    encoded_chars = encoded.len(),
                    "encoded mermaid fence"
                );
            }
            format!("```{id}\n{encoded}\n```")
        })
        .into_owned()
}

/// Registers one raw diagram block and returns the opaque marker that stands
/// in for it until recovery.
///
/// The marker is an HTML comment, which the external renderer passes through
/// untouched, so the final output can be a literal diagram-host element no
/// matter where in the document structure the block sits.
pub fn capture_block(store: &mut PlaceholderStore, source: &str, debug: bool) -> String {
    let id = store.insert(PlaceholderVariant::Opaque, source.to_string());
    if debug {
        tracing::debug!(%id, source_chars = source.chars().count(), "captured diagram block");
    }
    format!("<!-- {id} -->")
}
