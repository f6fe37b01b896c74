//! Stylesheet generation for the diagram wrapper and controls overlay.
//!
//! Generated from the same options the script generator consumes, so markup,
//! style and behavior can never disagree about class names or placement.

use crate::script::ControllerOptions;

/// Generates the `<style>` block for diagram wrappers and their controls.
pub fn stylesheet(width: &str, options: &ControllerOptions) -> String {
    let offsets = options.controls.position.css_offsets();
    let cursor = if options.controls.draggable {
        "move"
    } else {
        "default"
    };
    format!(
        "<style>\
.mermaid-wrapper{{position:relative;width:{width};overflow:hidden;user-select:none}}\
.mermaid-wrapper.fullscreen{{position:fixed;top:0;left:0;width:100vw;height:100vh;z-index:9999;background:#fff}}\
.mermaid-wrapper.fullscreen .mermaid-controls{{margin-right:20px}}\
.mermaid-controls{{position:absolute;{offsets};display:flex;gap:4px;z-index:10;cursor:{cursor}}}\
.mermaid-controls button{{width:32px;height:32px;border:none;background:rgba(255,255,255,0.9);border-radius:4px;cursor:pointer;font-size:16px;box-shadow:0 2px 4px rgba(0,0,0,0.2)}}\
.mermaid-controls button:hover{{background:#fff}}\
</style>"
    )
}
