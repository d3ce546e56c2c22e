//! G-code line classification
//!
//! A small regex-based classifier for the handful of instruction shapes the
//! start-print transform cares about. Everything else is `Other`; this is
//! deliberately not a general G-code parser.

use regex::Regex;
use std::sync::OnceLock;

/// Classified shape of a single G-code line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineKind {
    /// Nothing but whitespace
    Blank,
    /// Full-line comment (leading `;`)
    Comment,
    /// Tool selection, e.g. `T0`. Carries the selected tool index.
    ToolSelect(u8),
    /// Bed temperature target, e.g. `M140 S60`
    SetBedTemp(f64),
    /// Hotend temperature target, e.g. `M104 S200` or `M104 T1 S210`.
    /// The tool index is present only when the line carries an explicit
    /// `T` token; otherwise the target applies to the active tool.
    SetHotendTemp {
        /// Explicit tool index, if the line carried one.
        tool: Option<u8>,
        /// Target temperature in degrees C.
        temp: f64,
    },
    /// First instruction past the slicer's heating preamble (any `M8x`,
    /// in practice the `M82`/`M83` extrusion mode switch)
    StartupEnd,
    /// Any other instruction
    Other,
}

/// Strip a trailing `;` comment from a line, leaving the executable part.
///
/// Lines that are comments from the first character are the caller's
/// concern; this only cuts inline trailers like `M82 ;absolute extrusion mode`.
pub fn strip_inline_comment(line: &str) -> &str {
    match line.find(';') {
        Some(pos) => line[..pos].trim_end(),
        None => line.trim_end(),
    }
}

fn tool_select_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^T(\d)").expect("invalid regex pattern"))
}

fn bed_temp_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^M140\b.*?S(\d+(?:\.\d+)?)").expect("invalid regex pattern"))
}

fn hotend_temp_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^M104\b(?:\s+T(\d))?\s+S(\d+(?:\.\d+)?)").expect("invalid regex pattern")
    })
}

/// Classify a single G-code line.
///
/// Inline comments are stripped before inspection, so `M140 S60 ;heat` and
/// `M140 S60` classify identically. A temperature instruction the classifier
/// cannot extract a value from is reported at debug level and classified as
/// `Other` rather than failing the transform.
pub fn classify(line: &str) -> LineKind {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return LineKind::Blank;
    }
    if trimmed.starts_with(';') {
        return LineKind::Comment;
    }

    let code = strip_inline_comment(trimmed);
    if code.is_empty() {
        return LineKind::Blank;
    }

    if let Some(caps) = tool_select_re().captures(code) {
        // The capture is a single ASCII digit, so the parse cannot fail.
        let tool = caps[1].parse::<u8>().unwrap_or(0);
        return LineKind::ToolSelect(tool);
    }

    if code.starts_with("M8") {
        return LineKind::StartupEnd;
    }

    if code.starts_with("M140") {
        return match bed_temp_re().captures(code) {
            Some(caps) => match caps[1].parse::<f64>() {
                Ok(temp) => LineKind::SetBedTemp(temp),
                Err(_) => LineKind::Other,
            },
            None => {
                tracing::debug!(line = code, "M140 without a parseable S value, skipping");
                LineKind::Other
            }
        };
    }

    if code.starts_with("M104") {
        return match hotend_temp_re().captures(code) {
            Some(caps) => {
                let tool = caps.get(1).and_then(|t| t.as_str().parse::<u8>().ok());
                match caps[2].parse::<f64>() {
                    Ok(temp) => LineKind::SetHotendTemp { tool, temp },
                    Err(_) => LineKind::Other,
                }
            }
            None => {
                tracing::debug!(line = code, "M104 without a parseable S value, skipping");
                LineKind::Other
            }
        };
    }

    LineKind::Other
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_and_comment() {
        assert_eq!(classify(""), LineKind::Blank);
        assert_eq!(classify("   \t"), LineKind::Blank);
        assert_eq!(classify(";TIME:1234"), LineKind::Comment);
        assert_eq!(classify("  ;Generated with Cura"), LineKind::Comment);
    }

    #[test]
    fn test_tool_select() {
        assert_eq!(classify("T0"), LineKind::ToolSelect(0));
        assert_eq!(classify("T1 ;second extruder"), LineKind::ToolSelect(1));
        // Commented-out selections are comments, not selections
        assert_eq!(classify(";T1"), LineKind::Comment);
        // Only the first digit names the tool
        assert_eq!(classify("T25"), LineKind::ToolSelect(2));
    }

    #[test]
    fn test_bed_temp() {
        assert_eq!(classify("M140 S60"), LineKind::SetBedTemp(60.0));
        assert_eq!(classify("M140 S62.5 ;heat"), LineKind::SetBedTemp(62.5));
        // No S value: skipped, not fatal
        assert_eq!(classify("M140"), LineKind::Other);
    }

    #[test]
    fn test_hotend_temp() {
        assert_eq!(
            classify("M104 S200"),
            LineKind::SetHotendTemp {
                tool: None,
                temp: 200.0
            }
        );
        assert_eq!(
            classify("M104 T1 S210"),
            LineKind::SetHotendTemp {
                tool: Some(1),
                temp: 210.0
            }
        );
        assert_eq!(classify("M104"), LineKind::Other);
    }

    #[test]
    fn test_startup_end() {
        assert_eq!(classify("M82"), LineKind::StartupEnd);
        assert_eq!(classify("M83 ;relative extrusion mode"), LineKind::StartupEnd);
        assert_eq!(classify("M84"), LineKind::StartupEnd);
    }

    #[test]
    fn test_other() {
        assert_eq!(classify("G28 ;Home"), LineKind::Other);
        assert_eq!(classify("M105"), LineKind::Other);
        assert_eq!(classify("M190 S60"), LineKind::Other);
        assert_eq!(classify("G1 F1500 E-6.5"), LineKind::Other);
    }

    #[test]
    fn test_strip_inline_comment() {
        assert_eq!(strip_inline_comment("M82 ;absolute extrusion mode"), "M82");
        assert_eq!(strip_inline_comment("G28"), "G28");
        assert_eq!(strip_inline_comment("G28  "), "G28");
    }
}
