//! # KlipperKit Core
//!
//! Core types and utilities for KlipperKit.
//! Provides the fundamental abstractions for sliced G-code streams,
//! line classification, and numeric rendering.

pub mod error;
pub mod fmt;
pub mod line;
pub mod stream;

pub use error::{Error, Result};
pub use fmt::{format_float, format_temp};
pub use line::{classify, strip_inline_comment, LineKind};
pub use stream::GcodeStream;
