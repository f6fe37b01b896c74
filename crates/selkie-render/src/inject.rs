//! Once-per-page asset injection for live mode.
//!
//! Live-rendered pages need four things exactly once: the external engine
//! script, its initialize call, the controls stylesheet and the live-scope
//! controller. They go in immediately before `</head>`, and only on pages
//! whose body actually carries a diagram host.

use crate::script::{ControllerOptions, ControllerScope, controller_script};
use crate::style::stylesheet;
use selkie_core::Config;

/// Attribute marking an already-injected page; injection is idempotent.
const ASSETS_MARKER: &str = "data-mermaid-assets";

fn controller_options(config: &Config) -> ControllerOptions {
    ControllerOptions {
        controls: config.controls.clone(),
        diagram_draggable: config.diagram_draggable,
        debug: config.debug,
    }
}

/// The page-level asset block: engine script + init + stylesheet + live
/// controller.
pub fn page_assets(config: &Config) -> String {
    let init = serde_json::json!({
        "startOnLoad": true,
        "theme": config.theme,
    });
    let style = stylesheet(config.display_width(), &controller_options(config));
    let controller = controller_script(ControllerScope::Live, &controller_options(config));
    format!(
        "<script src=\"{url}\" {ASSETS_MARKER}></script>\n\
         <script>mermaid.initialize({init});</script>\n\
         {style}\n\
         <script>{controller}</script>\n",
        url = config.engine_script_url,
    )
}

/// Injects [`page_assets`] before `</head>` when the page contains at least
/// one diagram host and has not already received the assets. Pages without
/// diagrams, already-injected pages and pages with no head are returned
/// unchanged.
pub fn inject_page_assets(html: &str, config: &Config) -> String {
    if !html.contains("class=\"mermaid\"") {
        return html.to_string();
    }
    if html.contains(ASSETS_MARKER) {
        return html.to_string();
    }
    let Some(idx) = html.find("</head>") else {
        return html.to_string();
    };

    let mut out = String::with_capacity(html.len() + 4096);
    out.push_str(&html[..idx]);
    out.push_str(&page_assets(config));
    out.push_str(&html[idx..]);
    out
}
