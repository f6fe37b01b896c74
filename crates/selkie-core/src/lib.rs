#![forbid(unsafe_code)]

//! Diagram-source preservation for document pipelines.
//!
//! A generic Markdown/HTML renderer sits between diagram authors and the
//! final page, escaping and reformatting everything it touches. `selkie-core`
//! captures diagram blocks before that pass, substitutes placeholders the
//! renderer is known to preserve, and recovers the source byte-for-byte
//! afterwards behind a fail-closed integrity check. Diagram text is an opaque
//! payload throughout: nothing here parses, validates or lays out diagrams.
//!
//! Design goals:
//! - recovery is verify-then-substitute; a mismatch leaves the renderer's own
//!   code-block output untouched (degraded, visible, never corrupted)
//! - capture and recovery are phase-separated around the external render
//! - deterministic, testable string transforms (no I/O, no executor)

pub mod capture;
pub mod config;
pub mod entities;
pub mod recover;
pub mod store;

pub use config::{Config, ControlsConfig, ControlsPosition, RenderMode, ViewportSize};
pub use store::{DiagramRecord, PlaceholderStore, PlaceholderVariant};

/// Capture + recovery around one external document-rendering pass.
///
/// Capture methods take `&mut self` and recovery takes `&self`, so the
/// borrow checker enforces the phase split: all captures for a run complete
/// before recovery scans begin, and recovery over independent documents can
/// proceed concurrently from a shared reference.
#[derive(Debug, Default)]
pub struct Pipeline {
    store: PlaceholderStore,
    config: Config,
}

impl Pipeline {
    pub fn new(config: Config) -> Self {
        Self {
            store: PlaceholderStore::new(),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &PlaceholderStore {
        &self.store
    }

    /// Registers one raw diagram block (block-tag input) and returns the
    /// opaque marker to embed in its place.
    pub fn capture_block(&mut self, source: &str) -> String {
        capture::capture_block(&mut self.store, source, self.config.debug)
    }

    /// Rewrites ```` ```mermaid ```` fences into transcoded fences. A no-op
    /// unless markdown-fence mode is enabled.
    pub fn capture_markdown(&mut self, markdown: &str) -> String {
        if !self.config.markdown_fences {
            return markdown.to_string();
        }
        capture::capture_fences(&mut self.store, markdown, self.config.debug)
    }

    /// Restores every verified placeholder in externally rendered HTML.
    /// Unverified placeholders degrade to the renderer's own output.
    ///
    /// In live mode with fence capture disabled, rendered `language-mermaid`
    /// code blocks are additionally restored in place (passthrough mode);
    /// there is no stored original in that path, only the renderer's
    /// reversible escaping.
    pub fn restore(&self, html: &str) -> String {
        let restored = recover::restore_markers(&self.store, html, self.config.debug);
        if self.config.markdown_fences {
            recover::restore_fences(&self.store, &restored, self.config.debug)
        } else if self.config.render_mode == RenderMode::Live {
            recover::restore_inline_fences(&restored, self.config.debug)
        } else {
            restored
        }
    }

    /// Store boundary between generation runs. Ids stay unique across runs.
    pub fn clear(&mut self) {
        self.store.clear();
    }
}

#[cfg(test)]
mod tests;
