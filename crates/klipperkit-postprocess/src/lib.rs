//! # KlipperKit Postprocess
//!
//! Start-print macro injection for sliced G-code.
//!
//! This crate holds the actual transform: scanning the sliced stream for
//! used tools and startup temperatures, assembling the macro argument list,
//! and splicing the invocation into the stream right after the slicer's
//! generated-by banner. The host hands in an owned stream and gets it back
//! mutated; nothing here ever returns an error to the caller.

pub mod macro_args;
pub mod processor;
pub mod scan;
pub mod splice;

pub use macro_args::{AuditLog, MacroArgs, LOG_PREFIX};
pub use processor::StartPrintProcessor;
pub use scan::{find_used_tools, parse_startup_temps, StartupTemps};
pub use splice::{find_banner_chunk, splice_log, splice_macro, BANNER_MARKER, EXTRUSION_MODE_MARKER};
