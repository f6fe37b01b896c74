use regex::Regex;
use std::borrow::Cow;
use std::sync::OnceLock;

fn highlight_span_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)</?span[^>]*>").expect("valid regex"))
}

/// Removes syntax-highlighter wrapper elements from a rendered code body.
///
/// Markdown renderers commonly run fenced code through a highlighter that
/// wraps tokens in `<span class="...">` elements. Those wrappers carry no
/// payload bytes and must go before entity reversal: after unescaping, a
/// literal `&lt;span&gt;` in the diagram source would be indistinguishable
/// from an injected wrapper.
pub fn strip_highlight_markup(input: &str) -> Cow<'_, str> {
    if !input.contains("<span") && !input.contains("</span") {
        return Cow::Borrowed(input);
    }
    Cow::Owned(highlight_span_regex().replace_all(input, "").into_owned())
}

/// Reverses the HTML-entity escaping an external renderer applies to fenced
/// code bodies.
///
/// The contract covers standard escaping of `< > & " '` plus the
/// renderer-specific numeric escapes for `=`, `/`, `+`, space and newline
/// (`&#x3D;`, `&#x2F;`, `&#x2B;`, `&#x20;`, `&#x0A;`). `/` and `+` are part
/// of the base64 alphabet, so restoring them is what makes transcoded-fence
/// comparison possible at all. A standards-based decoder handles all of these
/// forms, named and numeric, in one pass.
pub fn decode_renderer_entities(input: &str) -> Cow<'_, str> {
    // Fast path: nothing to decode.
    if !input.contains('&') {
        return Cow::Borrowed(input);
    }
    Cow::Owned(htmlize::unescape(input).into_owned())
}
