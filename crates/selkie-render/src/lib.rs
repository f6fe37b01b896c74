#![forbid(unsafe_code)]

//! Presentation layer for selkie: the viewport controller shared by both
//! rendering paths, the script/style generators that emit it, the offline
//! static-artifact builder, and once-per-page asset injection for live mode.

pub mod builder;
pub mod inject;
pub mod script;
pub mod style;
pub mod viewport;

pub use builder::{StaticArtifactBuilder, wrap_with_controls};
pub use inject::{inject_page_assets, page_assets};
pub use script::{
    ControllerOptions, ControllerScope, LAYOUT_SETTLE_DELAY_MS, controller_script,
};
pub use style::stylesheet;
pub use viewport::{ViewportState, ZOOM_STEP};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to launch headless browser: {message}")]
    Launch { message: String },
    #[error("host page navigation failed: {message}")]
    Navigation { message: String },
    #[error("diagram engine evaluation failed: {message}")]
    Engine { message: String },
    #[error("diagram engine produced no artifact")]
    EmptyArtifact,
}

pub type Result<T> = std::result::Result<T, Error>;
