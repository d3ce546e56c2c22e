//! Macro-line insertion and preamble stripping
//!
//! The macro invocation has to execute before any of the slicer's own
//! startup instructions, so it is spliced in immediately after the
//! generated-by banner comment. In full-control mode the slicer's native
//! heating preamble between the banner and the extrusion-mode switch is
//! dropped on the way through; the macro is expected to handle heating.

use crate::macro_args::AuditLog;
use klipperkit_core::GcodeStream;

/// Marker identifying the slicer's generated-by banner comment.
pub const BANNER_MARKER: &str = "Generated with";

/// Marker on the line that ends the slicer's heating preamble.
pub const EXTRUSION_MODE_MARKER: &str = "extrusion mode";

/// Index of the first chunk containing the generated-by banner line.
pub fn find_banner_chunk(stream: &GcodeStream) -> Option<usize> {
    stream
        .chunks()
        .iter()
        .position(|chunk| chunk.lines().any(|line| line.contains(BANNER_MARKER)))
}

/// Splice the macro invocation and the audit log into the banner chunk.
///
/// The rebuilt chunk reads: banner line, macro line, audit block, remainder.
/// With `full_control` the remainder omits every line up to the
/// extrusion-mode marker; the marker line and everything after it are kept
/// verbatim. Without a banner the stream is left untouched; that is a
/// tolerated no-op, not an error.
pub fn splice_macro(
    stream: &mut GcodeStream,
    macro_line: &str,
    log: &AuditLog,
    full_control: bool,
) -> bool {
    let Some(index) = find_banner_chunk(stream) else {
        tracing::debug!("no generated-by banner found, macro not inserted");
        return false;
    };

    let rebuilt = {
        let chunk = stream.chunk(index).unwrap_or_default();
        let mut lines: Vec<&str> = Vec::new();
        let mut inserted = false;
        let mut stripping = false;

        for line in chunk.lines() {
            if stripping {
                if line.contains(EXTRUSION_MODE_MARKER) {
                    stripping = false;
                    lines.push(line);
                }
                continue;
            }

            lines.push(line);

            if !inserted && line.contains(BANNER_MARKER) {
                lines.push(macro_line);
                lines.push(";");
                for entry in log.entries() {
                    lines.push(entry);
                }
                lines.push(";");
                inserted = true;
                stripping = full_control;
            }
        }

        lines.join("\n") + "\n"
    };

    stream.set_chunk(index, rebuilt);
    true
}

/// Splice only the audit log after the banner line.
///
/// Used by the early-exit paths, where no macro line exists but the log
/// still documents why nothing happened. An empty log or a missing banner
/// leaves the stream untouched.
pub fn splice_log(stream: &mut GcodeStream, log: &AuditLog) -> bool {
    if log.is_empty() {
        return false;
    }
    let Some(index) = find_banner_chunk(stream) else {
        return false;
    };

    let rebuilt = {
        let chunk = stream.chunk(index).unwrap_or_default();
        let mut lines: Vec<&str> = Vec::new();
        let mut inserted = false;

        for line in chunk.lines() {
            lines.push(line);
            if !inserted && line.contains(BANNER_MARKER) {
                lines.push(";");
                for entry in log.entries() {
                    lines.push(entry);
                }
                lines.push(";");
                inserted = true;
            }
        }

        lines.join("\n") + "\n"
    };

    stream.set_chunk(index, rebuilt);
    true
}
