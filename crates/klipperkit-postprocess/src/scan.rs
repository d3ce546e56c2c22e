//! Startup-block scanning
//!
//! Two read-only passes over the sliced stream: one discovers which tools
//! the job actually selects, the other recovers the temperatures the slicer
//! wrote into its own startup block. Neither pass models motion or the wider
//! instruction grammar, only the startup-sequence shapes classified by
//! [`klipperkit_core::line`].

use klipperkit_core::{classify, GcodeStream, LineKind};
use serde::Serialize;
use std::collections::BTreeMap;

/// Temperatures recovered from the slicer's startup block.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StartupTemps {
    /// Layer-0 bed target. `None` means the startup block was never found
    /// and the transform must stop for this job.
    pub bed: Option<f64>,
    /// Per-tool hotend targets, keyed by tool index.
    pub tools: BTreeMap<u8, f64>,
    /// The tool selected when the startup block ran. Consumed once by the
    /// caller via `Option::take`, after which only `tools` remains.
    pub initial: Option<u8>,
}

impl StartupTemps {
    /// Whether the scan found a usable startup block.
    pub fn has_data(&self) -> bool {
        self.bed.is_some()
    }
}

/// Discover every tool index the job selects, in discovery order.
///
/// The first entry is the primary tool for default purposes. Comment lines
/// do not count: a commented-out `;T1` is not a selection.
pub fn find_used_tools(stream: &GcodeStream) -> Vec<u8> {
    let mut tools = Vec::new();
    for chunk in stream.chunks() {
        for line in chunk.lines() {
            if let LineKind::ToolSelect(tool) = classify(line) {
                if !tools.contains(&tool) {
                    tools.push(tool);
                }
            }
        }
    }
    tools
}

/// Parse the slicer's startup block for temperatures and the initial tool.
///
/// Scanning stops at the first instruction past the heating preamble (the
/// `M8x` extrusion-mode switch) and returns whatever accumulated. Reaching
/// the end of the stream instead means there was no startup block to parse
/// (the job carries custom start G-code), and the result is empty with
/// `bed: None` so callers treat it as a hard stop, not a zero temperature.
pub fn parse_startup_temps(stream: &GcodeStream) -> StartupTemps {
    let mut temps = StartupTemps::default();
    let mut current_tool: u8 = 0;

    for chunk in stream.chunks() {
        for line in chunk.lines() {
            match classify(line) {
                LineKind::ToolSelect(tool) => {
                    current_tool = tool;
                    temps.initial = Some(tool);
                }
                LineKind::StartupEnd => return temps,
                LineKind::SetBedTemp(temp) => {
                    temps.bed = Some(temp);
                }
                LineKind::SetHotendTemp { tool, temp } => {
                    temps.tools.insert(tool.unwrap_or(current_tool), temp);
                }
                LineKind::Blank | LineKind::Comment | LineKind::Other => {}
            }
        }
    }

    tracing::debug!("stream exhausted without a startup block");
    StartupTemps::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stream(chunks: &[&str]) -> GcodeStream {
        GcodeStream::from_chunks(chunks.iter().map(|c| c.to_string()).collect())
    }

    #[test]
    fn test_used_tools_skips_comments() {
        let stream = stream(&["T0\n;T1\nT2\n"]);
        assert_eq!(find_used_tools(&stream), vec![0, 2]);
    }

    #[test]
    fn test_used_tools_deduplicates_in_discovery_order() {
        let stream = stream(&["T1\nG1 X0\n", "T0\nT1\n"]);
        assert_eq!(find_used_tools(&stream), vec![1, 0]);
    }

    #[test]
    fn test_parse_startup_block() {
        let stream = stream(&[
            ";Generated with Cura_SteamEngine 5.2.1\nT0\nM140 S60\nM104 S200\nM82 ;absolute extrusion mode\nG28\n",
        ]);
        let temps = parse_startup_temps(&stream);
        assert_eq!(temps.bed, Some(60.0));
        assert_eq!(temps.tools.get(&0), Some(&200.0));
        assert_eq!(temps.initial, Some(0));
        assert!(temps.has_data());
    }

    #[test]
    fn test_explicit_tool_index_wins_over_context() {
        let stream = stream(&["T0\nM104 T1 S210\nM104 S200\nM140 S55\nM82\n"]);
        let temps = parse_startup_temps(&stream);
        assert_eq!(temps.tools.get(&1), Some(&210.0));
        assert_eq!(temps.tools.get(&0), Some(&200.0));
        assert_eq!(temps.bed, Some(55.0));
    }

    #[test]
    fn test_stops_at_sentinel() {
        let stream = stream(&["M140 S60\nM82\nM104 S999\n"]);
        let temps = parse_startup_temps(&stream);
        assert_eq!(temps.bed, Some(60.0));
        assert!(temps.tools.is_empty());
    }

    #[test]
    fn test_exhaustion_returns_empty() {
        let stream = stream(&[";custom start gcode\nG28\nG1 Z5\n"]);
        let temps = parse_startup_temps(&stream);
        assert!(!temps.has_data());
        assert!(temps.tools.is_empty());
        assert_eq!(temps.initial, None);
    }

    #[test]
    fn test_sentinel_without_bed_is_no_data() {
        let stream = stream(&["M104 S200\nM82\n"]);
        let temps = parse_startup_temps(&stream);
        assert!(!temps.has_data());
    }

    #[test]
    fn test_inline_comments_stripped() {
        let stream = stream(&["M140 S60 ;heat the bed\nM82\n"]);
        assert_eq!(parse_startup_temps(&stream).bed, Some(60.0));
    }
}
