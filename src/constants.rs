//! Configuration constants for dep-wheel
//!
//! This module contains the tunable values used throughout the application:
//! progress animation, registry timeouts, default paths and image layout.

use std::time::Duration;

/// Progress bar configuration
pub mod progress {
    use super::*;

    /// Duration between progress bar updates
    pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

    /// Spinner frames for the wheel animation
    pub const SPINNER_FRAMES: &[&str] = &[
        "🎡 ", // Standard ferris wheel
        "🎡⊙", // With center dot
        "🎡◐", // Quarter filled
        "🎡◓", // Half filled
        "🎡◑", // Three quarters
        "🎡◒", // Another quarter
        "🎡○", // Empty circle
        "🎡●", // Full circle
    ];
}

/// Output format configuration
pub mod output {
    /// Default report format when not specified
    pub const DEFAULT_FORMAT: &str = "human";
}

/// Registry client configuration
pub mod registry {
    use super::*;

    /// Timeout for JSON requests (service index, registration pages)
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

    /// Timeout for downloading a package archive
    pub const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(20);

    pub const USER_AGENT: &str = concat!("dep-wheel/", env!("CARGO_PKG_VERSION"));
}

/// Default file locations
pub mod paths {
    /// Configuration file read when `--config` is not given
    pub const DEFAULT_CONFIG: &str = "config.toml";

    /// Image written when no output path is configured
    pub const DEFAULT_IMAGE: &str = "graph.svg";
}

/// SVG layout geometry, in pixels
pub mod layout {
    /// Distance between node centers on the same level
    pub const HORIZONTAL_PITCH: f64 = 180.0;

    /// Distance between two levels
    pub const VERTICAL_PITCH: f64 = 110.0;

    pub const NODE_RADIUS: f64 = 26.0;

    /// Padding between the canvas border and the outermost node centers
    pub const MARGIN: f64 = 60.0;

    pub const FONT_SIZE: u32 = 12;
}
