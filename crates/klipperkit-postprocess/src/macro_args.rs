//! Macro argument assembly and audit logging
//!
//! The macro invocation is a flat, space-joined list of `KEY=VALUE` tokens.
//! Argument order is meaningful (the macro name always comes first) and
//! duplicates are suppressed. Every token that makes it into the list is
//! mirrored into an audit log that ends up as comments in the output stream,
//! so a user can see from the file itself what the transform did.

/// Prefix for audit comment lines embedded in the output stream.
pub const LOG_PREFIX: &str = ";klipperkit: ";

/// Audit trail of a single transform run, rendered as G-code comments.
#[derive(Debug, Clone)]
pub struct AuditLog {
    entries: Vec<String>,
}

impl AuditLog {
    /// Start a fresh log. Every run begins with a ready marker so the log
    /// block is recognisable even when nothing else happened.
    pub fn new() -> Self {
        Self {
            entries: vec![format!("{}Ready", LOG_PREFIX)],
        }
    }

    /// Record a message.
    pub fn push(&mut self, message: impl AsRef<str>) {
        self.entries.push(format!("{}{}", LOG_PREFIX, message.as_ref()));
    }

    /// The recorded comment lines, ready marker included.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Whether nothing was ever recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for AuditLog {
    fn default() -> Self {
        Self::new()
    }
}

/// Ordered, de-duplicated list of macro argument tokens.
///
/// The first token is always the macro name. Appends check membership before
/// inserting; a linear scan is fine at the handful of tokens a job produces.
#[derive(Debug)]
pub struct MacroArgs {
    tokens: Vec<String>,
}

impl MacroArgs {
    /// Start a new argument list for the given macro.
    pub fn new(macro_name: impl Into<String>) -> Self {
        Self {
            tokens: vec![macro_name.into()],
        }
    }

    /// Append a `KEY=VALUE` token unless an identical one is already
    /// present. Successful appends are recorded in the audit log.
    pub fn add(&mut self, token: impl Into<String>, log: &mut AuditLog) {
        let token = token.into();
        if !self.tokens.contains(&token) {
            log.push(&token);
            self.tokens.push(token);
        }
    }

    /// The tokens collected so far, macro name first.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Join the tokens into the final macro invocation line.
    pub fn to_line(&self) -> String {
        self.tokens.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_macro_name_is_first_token() {
        let args = MacroArgs::new("START_PRINT");
        assert_eq!(args.tokens(), ["START_PRINT"]);
        assert_eq!(args.to_line(), "START_PRINT");
    }

    #[test]
    fn test_duplicates_are_suppressed() {
        let mut log = AuditLog::new();
        let mut args = MacroArgs::new("START_PRINT");
        args.add("BED_TEMP=60.0", &mut log);
        args.add("BED_TEMP=60.0", &mut log);
        args.add("T0_TEMP=200.0", &mut log);
        assert_eq!(
            args.to_line(),
            "START_PRINT BED_TEMP=60.0 T0_TEMP=200.0"
        );
        // One log line per accepted token, plus the ready marker
        assert_eq!(log.entries().len(), 3);
    }

    #[test]
    fn test_log_starts_with_ready_and_mirrors_adds() {
        let mut log = AuditLog::new();
        let mut args = MacroArgs::new("START_PRINT");
        args.add("INITIAL=T0", &mut log);
        assert_eq!(log.entries()[0], ";klipperkit: Ready");
        assert_eq!(log.entries()[1], ";klipperkit: INITIAL=T0");
    }
}
