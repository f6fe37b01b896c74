//! Pipeline-scope tests: capture → simulated external render → recovery.

use regex::Regex;

mod fences;
mod passthrough;

/// Standard HTML-entity escaping every renderer applies to fenced bodies.
pub(crate) fn escape_minimal(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Escaping as aggressive as the contract allows: the renderer may also
/// entity-encode `=`, `/`, `+`, spaces and newlines inside fenced bodies.
pub(crate) fn escape_aggressive(s: &str) -> String {
    escape_minimal(s)
        .replace('=', "&#x3D;")
        .replace('/', "&#x2F;")
        .replace('+', "&#x2B;")
        .replace(' ', "&#x20;")
        .replace('\n', "&#x0A;")
}

/// Stand-in for the external renderer's fenced-code contract:
/// ```` ```tag ```` blocks become `<pre><code class="language-tag">` with the
/// given escaping applied to the body. Everything else passes through,
/// including HTML comments, which the contract guarantees survive untouched.
pub(crate) fn render_markdown(markdown: &str, escape: fn(&str) -> String) -> String {
    let fence = Regex::new(r"(?s)```([^\n]+)\n(.*?)```").unwrap();
    fence
        .replace_all(markdown, |caps: &regex::Captures| {
            let tag = &caps[1];
            let body = escape(&caps[2]);
            format!(r#"<pre><code class="language-{tag}">{body}</code></pre>"#)
        })
        .into_owned()
}
