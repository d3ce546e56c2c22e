//! The start-print post-processing transform
//!
//! Ties the scanner, argument assembly, and splicer together into the single
//! pass a slicing pipeline runs per job. The transform mutates the stream it
//! is given and never fails: configuration problems and missing startup data
//! degrade to an audit comment in the output instead of an error.

use crate::macro_args::{AuditLog, MacroArgs};
use crate::scan::{find_used_tools, parse_startup_temps};
use crate::splice::{splice_log, splice_macro};
use klipperkit_core::{format_temp, GcodeStream};
use klipperkit_settings::{lookup_value, ExtruderQuery, StartPrintSettings};

/// Property key for the profile layer height.
const LAYER_HEIGHT_KEY: &str = "layer_height";
/// Property key for the nozzle diameter.
const NOZZLE_KEY: &str = "machine_nozzle_size";
/// Property key for the standby temperature.
const STANDBY_KEY: &str = "material_standby_temperature";
/// Material metadata key for the material type name.
const MATERIAL_META_KEY: &str = "material";

/// Injects a start-print macro invocation derived from the sliced stream
/// and the machine profile.
pub struct StartPrintProcessor<'a> {
    settings: &'a StartPrintSettings,
    query: &'a dyn ExtruderQuery,
}

impl<'a> StartPrintProcessor<'a> {
    /// Create a processor over the given settings and extruder query.
    pub fn new(settings: &'a StartPrintSettings, query: &'a dyn ExtruderQuery) -> Self {
        Self { settings, query }
    }

    /// Run the transform over the stream in place.
    ///
    /// A disabled script or blank macro name passes the stream through with
    /// only the audit block added. A stream without a recognisable startup
    /// block gets a diagnostic comment and is otherwise returned unchanged.
    pub fn execute(&self, stream: &mut GcodeStream) {
        let mut log = AuditLog::new();

        if !self.settings.is_active() {
            splice_log(stream, &log);
            return;
        }

        let mut used_tools = find_used_tools(stream);
        let mut temps = parse_startup_temps(stream);

        if !temps.has_data() {
            log.push("No startup temperatures found, exiting.");
            splice_log(stream, &log);
            return;
        }

        let initial_tool = temps.initial.take().unwrap_or(0);
        if used_tools.is_empty() {
            used_tools.push(0);
        }
        tracing::debug!(
            tools = ?used_tools,
            initial = initial_tool,
            "assembling start print macro"
        );

        let full_control = self.settings.full_control;
        let mut args = MacroArgs::new(&self.settings.macro_name);

        args.add(format!("INITIAL=T{}", used_tools[0]), &mut log);

        if self.settings.hotend || full_control {
            for (tool, temp) in &temps.tools {
                args.add(format!("T{}_TEMP={}", tool, format_temp(*temp)), &mut log);
            }
        }

        if self.settings.bed || full_control {
            if let Some(bed) = temps.bed {
                args.add(format!("BED_TEMP={}", format_temp(bed)), &mut log);
            }
        }

        for stack in 0..self.query.stack_count() {
            // Layer height is the same for every extruder, so it is emitted
            // once, unprefixed, on the initially selected stack.
            if stack == initial_tool as usize && self.settings.layer {
                if let Some(value) = lookup_value(self.query, stack, LAYER_HEIGHT_KEY) {
                    args.add(format!("LAYER_HEIGHT={}", value), &mut log);
                }
            }

            if self.settings.material {
                let name = self
                    .query
                    .material(stack, MATERIAL_META_KEY)
                    .unwrap_or_default();
                args.add(format!("T{}_MATERIAL=\"{}\"", stack, name), &mut log);
            }

            if self.settings.nozzle {
                if let Some(value) = lookup_value(self.query, stack, NOZZLE_KEY) {
                    args.add(format!("T{}_NOZZLE={}", stack, value), &mut log);
                }
            }

            if self.settings.standby {
                if let Some(value) = lookup_value(self.query, stack, STANDBY_KEY) {
                    args.add(format!("T{}_STANDBY_TEMP={}", stack, value), &mut log);
                }
            }
        }

        splice_macro(stream, &args.to_line(), &log, full_control);
    }
}
