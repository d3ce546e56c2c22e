//! # KlipperKit
//!
//! A post-processor for sliced 3D-printing G-code that hands startup
//! sequencing to a controller-side start print macro. The sliced stream is
//! scanned for the tools and temperatures the slicer already decided on,
//! and a single macro invocation carrying those values is spliced in ahead
//! of the slicer's own startup instructions.
//!
//! ## Architecture
//!
//! KlipperKit is organized as a workspace with multiple crates:
//!
//! 1. **klipperkit-core** - G-code stream chunks, line classification, errors
//! 2. **klipperkit-settings** - Script settings and machine profile store
//! 3. **klipperkit-postprocess** - Scanner, macro assembly, stream splicing
//! 4. **klipperkit** - Main binary that integrates all crates

pub use klipperkit_core::{classify, GcodeStream, LineKind};
pub use klipperkit_postprocess::{
    find_used_tools, parse_startup_temps, StartPrintProcessor, StartupTemps,
};
pub use klipperkit_settings::{
    lookup_value, ExtruderQuery, MachineProfile, SettingsError, StartPrintSettings,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output on stderr
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into());

    // Diagnostics go to stderr so stdout stays clean for piped G-code
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    Ok(())
}
