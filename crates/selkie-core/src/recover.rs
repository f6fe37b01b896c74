use crate::entities::{decode_renderer_entities, strip_highlight_markup};
use crate::store::{FENCE_ID_PREFIX, PlaceholderStore, PlaceholderVariant};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use regex::Regex;
use std::sync::OnceLock;

fn marker_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<!--\s*(mermaid-block-\d+)\s*-->").expect("valid regex"))
}

fn fence_block_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r#"(?s)<pre[^>]*><code[^>]*class="[^"]*language-(MERMAID_B64_\d+)[^"]*"[^>]*>(.*?)</code></pre>"#,
        )
        .expect("valid regex")
    })
}

fn inline_fence_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r#"(?s)<pre[^>]*><code[^>]*class="[^"]*language-mermaid(?:\s[^"]*)?"[^>]*>(.*?)</code></pre>"#,
        )
        .expect("valid regex")
    })
}

fn host_element(source: &str) -> String {
    format!(r#"<div class="mermaid">{source}</div>"#)
}

/// Comparison ignores whitespace: renderers are free to reflow fenced bodies,
/// and the transcoded alphabet itself never contains whitespace.
fn normalize_ws(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Substitutes diagram-host elements for every registered opaque marker.
///
/// A marker whose id is not in the store is left exactly as rendered: markers
/// can outlive their run (stale caches), and an unregistered one must degrade
/// silently rather than take the pipeline down.
pub fn restore_markers(store: &PlaceholderStore, html: &str, debug: bool) -> String {
    if !html.contains("<!--") {
        return html.to_string();
    }

    marker_regex()
        .replace_all(html, |caps: &regex::Captures| {
            let id = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
            match store.get(id) {
                Some(record) if record.variant == PlaceholderVariant::Opaque => {
                    if debug {
                        tracing::debug!(%id, "restored diagram block");
                    }
                    host_element(&record.payload)
                }
                _ => {
                    if debug {
                        tracing::debug!(%id, "unregistered marker left untouched");
                    }
                    caps.get(0).map(|m| m.as_str()).unwrap_or_default().to_string()
                }
            }
        })
        .into_owned()
}

/// Substitutes diagram-host elements for rendered transcoded fences whose
/// recovered body verifies against the store.
///
/// For each `<pre><code class="language-<id>">` block matching the generated
/// id pattern: strip highlighter wrappers, reverse the renderer's entity
/// escaping, and compare whitespace-normalized against the stored transcoded
/// value. Only an exact match is decoded and substituted. Everything else
/// (unknown id, empty payload, altered body, undecodable base64) leaves the
/// rendered block untouched. Failure is always silent and always visible as
/// the renderer's own code-block fallback.
pub fn restore_fences(store: &PlaceholderStore, html: &str, debug: bool) -> String {
    if !html.contains(FENCE_ID_PREFIX) {
        return html.to_string();
    }

    fence_block_regex()
        .replace_all(html, |caps: &regex::Captures| {
            let rendered = caps.get(0).map(|m| m.as_str()).unwrap_or_default();
            let id = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
            let body = caps.get(2).map(|m| m.as_str()).unwrap_or_default();

            let Some(record) = store.get(id) else {
                if debug {
                    tracing::debug!(%id, "unregistered fence left untouched");
                }
                return rendered.to_string();
            };
            if record.payload.is_empty() {
                return rendered.to_string();
            }

            let cleaned = strip_highlight_markup(body);
            let recovered = decode_renderer_entities(&cleaned);
            if normalize_ws(&recovered) != record.payload {
                if debug {
                    tracing::debug!(%id, "fence integrity mismatch, left untouched");
                }
                return rendered.to_string();
            }

            let Ok(bytes) = BASE64.decode(&record.payload) else {
                return rendered.to_string();
            };
            let Ok(source) = String::from_utf8(bytes) else {
                return rendered.to_string();
            };
            if debug {
                tracing::debug!(
                    %id,
                    encoded_chars = record.payload.len(),
                    source_chars = source.chars().count(),
                    "decoded mermaid fence"
                );
            }
            host_element(&source)
        })
        .into_owned()
}

/// Store-less recovery for documents whose ```` ```mermaid ```` fences went
/// through the renderer uncaptured.
///
/// The rendered `language-mermaid` block's content is used directly: strip
/// highlighter wrappers, reverse the entity escaping, and wrap the result in
/// a diagram-host element. This relies on the renderer's escaping being
/// reversible and lossless for this language subset; there is no stored
/// original to verify against.
pub fn restore_inline_fences(html: &str, debug: bool) -> String {
    if !html.contains("language-mermaid") {
        return html.to_string();
    }

    inline_fence_regex()
        .replace_all(html, |caps: &regex::Captures| {
            let body = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
            let cleaned = strip_highlight_markup(body);
            let source = decode_renderer_entities(&cleaned);
            if debug {
                tracing::debug!(source_chars = source.chars().count(), "restored inline fence");
            }
            host_element(source.trim())
        })
        .into_owned()
}
