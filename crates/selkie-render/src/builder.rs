//! Offline artifact builds: one isolated headless-Chrome round trip per
//! diagram block.
//!
//! Each build launches its own browser context, so concurrent builds share no
//! mutable rendering state and each one can fail (or be dropped) without
//! affecting the others. A failed build is terminal for that diagram; retry
//! policy belongs to the caller.

use crate::script::{ControllerOptions, ControllerScope, controller_script, enabled_buttons};
use crate::style::stylesheet;
use crate::{Error, Result};
use headless_chrome::{Browser, LaunchOptions};
use selkie_core::Config;
use std::ffi::OsStr;

pub struct StaticArtifactBuilder<'a> {
    config: &'a Config,
}

impl<'a> StaticArtifactBuilder<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Renders one diagram block into a self-contained HTML fragment: the SVG
    /// artifact wrapped with controls and a controller script, or the bare
    /// artifact when controls are disabled.
    pub fn build(&self, source: &str) -> Result<String> {
        let svg = self.render_svg(source)?;
        Ok(wrap_with_controls(&svg, self.config))
    }

    /// One blocking round trip into an isolated rendering context.
    fn render_svg(&self, source: &str) -> Result<String> {
        let args: Vec<&OsStr> = self.config.browser_args.iter().map(OsStr::new).collect();
        let viewport = self.config.default_viewport;
        let launch = LaunchOptions::default_builder()
            .args(args)
            .window_size(Some((viewport.width, viewport.height)))
            .build()
            .map_err(|e| Error::Launch {
                message: e.to_string(),
            })?;
        let browser = Browser::new(launch).map_err(|e| Error::Launch {
            message: e.to_string(),
        })?;
        let tab = browser.new_tab().map_err(|e| Error::Launch {
            message: e.to_string(),
        })?;

        let page = self.host_page();
        tab.navigate_to(&format!("data:text/html;charset=utf-8,{page}"))
            .map_err(|e| Error::Navigation {
                message: e.to_string(),
            })?;
        tab.wait_until_navigated().map_err(|e| Error::Navigation {
            message: e.to_string(),
        })?;

        let background = js_string(&self.config.background_color);
        tab.evaluate(
            &format!("document.body.style.background = {background}"),
            false,
        )
        .map_err(|e| Error::Engine {
            message: e.to_string(),
        })?;

        if self.config.debug {
            tracing::debug!(source_chars = source.chars().count(), "rendering static artifact");
        }

        let expression = render_expression(source, &self.config.theme);
        let result = tab.evaluate(&expression, false).map_err(|e| Error::Engine {
            message: e.to_string(),
        })?;

        match result.value {
            Some(serde_json::Value::String(svg)) if !svg.trim().is_empty() => Ok(svg),
            _ => Err(Error::EmptyArtifact),
        }
    }

    /// Minimal page hosting the engine script and a render container. The
    /// diagram source itself travels through `evaluate`, never the URL.
    fn host_page(&self) -> String {
        format!(
            "<!DOCTYPE html><html><head><meta charset=\"utf-8\">\
             <script src=\"{url}\"></script></head>\
             <body><div id=\"container\"></div></body></html>",
            url = self.config.engine_script_url,
        )
    }
}

/// Wraps a rendered SVG artifact with stylesheet, controls overlay and a
/// wrapper-scoped controller script. Returns the bare artifact when controls
/// are disabled.
pub fn wrap_with_controls(svg: &str, config: &Config) -> String {
    if !config.controls.enable {
        return svg.to_string();
    }

    let options = ControllerOptions {
        controls: config.controls.clone(),
        diagram_draggable: config.diagram_draggable,
        debug: config.debug,
    };

    let mut html = String::with_capacity(svg.len() + 4096);
    html.push_str(&stylesheet(config.display_width(), &options));
    html.push_str("<div class=\"mermaid-wrapper\">");
    html.push_str(svg);
    html.push_str("<div class=\"mermaid-controls\">");
    for button in enabled_buttons(&options.controls) {
        html.push_str(&format!(
            "<button data-action=\"{action}\" title=\"{title}\">{glyph}</button>",
            action = button.action,
            title = button.title,
            glyph = button.glyph,
        ));
    }
    html.push_str("</div><script>");
    html.push_str(&controller_script(ControllerScope::Wrapper, &options));
    html.push_str("</script></div>");
    html
}

/// JS string literal for arbitrary text (quoting handled by JSON encoding).
fn js_string(text: &str) -> String {
    serde_json::Value::String(text.to_string()).to_string()
}

fn render_expression(source: &str, theme: &str) -> String {
    let source = js_string(source);
    let init = serde_json::json!({ "startOnLoad": false, "theme": theme });
    format!(
        "(function () {{\
         var container = document.getElementById('container');\
         container.innerHTML = {source};\
         window.mermaid.initialize({init});\
         window.mermaid.init(undefined, container);\
         return container.innerHTML;\
         }})()"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use selkie_core::ControlsConfig;

    const SVG: &str = "<svg viewBox=\"0 0 10 10\"><rect/></svg>";

    #[test]
    fn fragment_wraps_artifact_with_controls_and_script() {
        let html = wrap_with_controls(SVG, &Config::default());
        assert!(html.contains(SVG));
        assert!(html.contains("<div class=\"mermaid-wrapper\">"));
        assert!(html.contains("<div class=\"mermaid-controls\">"));
        assert!(html.contains("document.currentScript.parentElement"));
        assert!(html.contains("<style>"));
        // The script sits inside the wrapper so currentScript resolves to it.
        assert!(html.ends_with("</script></div>"));
    }

    #[test]
    fn disabled_controls_yield_bare_artifact() {
        let config = Config::from_value(&serde_json::json!({
            "controls": { "enable": false }
        }));
        assert_eq!(wrap_with_controls(SVG, &config), SVG);
    }

    #[test]
    fn only_enabled_buttons_are_emitted() {
        let config = Config {
            controls: ControlsConfig {
                zoom_in: true,
                zoom_out: false,
                reset: true,
                download: false,
                ..ControlsConfig::default()
            },
            ..Config::default()
        };
        let html = wrap_with_controls(SVG, &config);
        assert!(html.contains("data-action=\"zoom-in\""));
        assert!(html.contains("data-action=\"reset\""));
        assert!(!html.contains("data-action=\"zoom-out\""));
        assert!(!html.contains("data-action=\"download\""));
    }

    #[test]
    fn host_page_carries_engine_script() {
        let config = Config::default();
        let builder = StaticArtifactBuilder::new(&config);
        let page = builder.host_page();
        assert!(page.contains(&config.engine_script_url));
        assert!(page.contains("id=\"container\""));
    }

    #[test]
    fn render_expression_quotes_hostile_source() {
        let expr = render_expression("graph TD\n    A[\"it's <b>\"] --> B", "forest");
        assert!(expr.contains("window.mermaid.init(undefined, container)"));
        assert!(expr.contains("\"theme\":\"forest\""));
        // The source is a JSON string literal: quotes and newlines escaped.
        assert!(expr.contains(r#"graph TD\n"#));
        assert!(expr.contains(r#"A[\"it's <b>\"]"#));
    }
}
