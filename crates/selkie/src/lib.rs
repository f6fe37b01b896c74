#![forbid(unsafe_code)]

//! `selkie` carries Mermaid diagram source through an uncontrolled
//! Markdown/HTML rendering pass unharmed and attaches an interactive
//! pan/zoom/reset/fullscreen/export viewport to every rendered diagram.
//!
//! Two delivery modes:
//! - **static**: an offline headless-browser pass bakes each diagram into an
//!   SVG artifact wrapped with controls (`render` feature)
//! - **live**: diagrams stay as `<div class="mermaid">` hosts and the
//!   reader's browser renders them; one injected script drives them all
//!
//! # Features
//!
//! - `render`: enable the viewport/script generators and the headless
//!   static-artifact builder (`selkie::render`)

pub use selkie_core::*;

#[cfg(feature = "render")]
pub mod render {
    pub use selkie_render::{
        ControllerOptions, ControllerScope, Error, LAYOUT_SETTLE_DELAY_MS, Result,
        StaticArtifactBuilder, ViewportState, ZOOM_STEP, controller_script, inject_page_assets,
        page_assets, stylesheet, wrap_with_controls,
    };

    /// Renders one diagram block into a self-contained static HTML fragment.
    ///
    /// Convenience wrapper around [`StaticArtifactBuilder`] for callers that
    /// process one block at a time. Each call uses its own isolated browser
    /// context; a failure is terminal for this block only.
    pub fn build_static_fragment(
        source: &str,
        config: &selkie_core::Config,
    ) -> Result<String> {
        StaticArtifactBuilder::new(config).build(source)
    }
}
