//! Output layer for the tmdr CLI.
//!
//! Centralizes stdout/stderr separation and human vs JSON output modes.
//! - stdout: data (the "answer" - acronyms, JSON)
//! - stderr: diagnostics (progress, verbose scores, human-mode errors)

use colored::Colorize;
use serde::Serialize;

use crate::acronym::Entry;

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputMode {
    Human,
    Json,
}

/// Output helper that centralizes all CLI output
#[derive(Debug, Clone)]
pub struct Output {
    pub mode: OutputMode,
    pub quiet: bool,
    pub verbose: bool,
}

impl Output {
    pub fn new(json: bool, quiet: bool, verbose: bool) -> Self {
        Self {
            mode: if json {
                OutputMode::Json
            } else {
                OutputMode::Human
            },
            quiet,
            verbose,
        }
    }

    /// Write data to stdout (the command's "answer")
    pub fn data(&self, message: &str) {
        println!("{}", message);
    }

    /// Write JSON data to stdout
    /// Returns error if serialization fails (should be propagated to become JSON error)
    pub fn json<T: Serialize>(&self, data: &T) -> Result<(), serde_json::Error> {
        let json = serde_json::to_string_pretty(data)?;
        println!("{}", json);
        Ok(())
    }

    /// Write a diagnostic/progress message to stderr
    /// Suppressed in JSON mode and when --quiet is set
    pub fn info(&self, message: &str) {
        if self.mode == OutputMode::Json || self.quiet {
            return;
        }
        eprintln!("{}", message);
    }

    /// Write a verbose diagnostic message to stderr
    /// Only shown with --verbose in human mode
    pub fn verbose(&self, message: &str) {
        if self.mode == OutputMode::Json || self.quiet || !self.verbose {
            return;
        }
        eprintln!("{}", message);
    }

    /// Write a warning to stderr
    /// Shown in human mode unless --quiet, suppressed in JSON mode
    pub fn warn(&self, message: &str) {
        if self.mode == OutputMode::Json || self.quiet {
            return;
        }
        eprintln!("{}", message);
    }

    /// Check if we're in JSON mode
    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }

    /// Check if we're in quiet mode
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// Print an entry: `CODE → Expansion`, then the description if present
    pub fn entry(&self, entry: &Entry) {
        self.data(&format_heading(entry));
        if entry.has_description() {
            self.data(&entry.description);
        }
    }
}

/// `CODE → Expansion`, with the code bolded when colors are enabled
pub fn format_heading(entry: &Entry) -> String {
    format!("{} → {}", entry.code.bold(), entry.expansion)
}

/// Indented suggestion line used under "Did you mean:"
pub fn format_suggestion(entry: &Entry) -> String {
    format!("  {} → {}", entry.code.yellow(), entry.expansion)
}

// =============================================================================
// JSON Response Types
// =============================================================================

/// Schema version for JSON outputs.
/// Follows semver: breaking=major, additive=minor, bugfix=patch.
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Tool version from Cargo.toml.
pub const TOOL_VERSION: &str = env!("CARGO_PKG_VERSION");

/// How the results of a lookup were produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    Exact,
    Fuzzy,
    Random,
    List,
    Search,
}

/// JSON response for every command that returns acronyms.
/// `ok` is false for fuzzy suggestions (the query itself was not found) and
/// for empty result sets.
#[derive(Debug, Serialize)]
pub struct LookupResponse<'a> {
    pub ok: bool,
    pub schema_version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<&'a str>,
    #[serde(rename = "match")]
    pub kind: MatchKind,
    pub count: usize,
    pub results: Vec<&'a Entry>,
}

impl<'a> LookupResponse<'a> {
    pub fn new(kind: MatchKind, query: Option<&'a str>, results: Vec<&'a Entry>) -> Self {
        Self {
            ok: kind != MatchKind::Fuzzy && !results.is_empty(),
            schema_version: SCHEMA_VERSION,
            query,
            kind,
            count: results.len(),
            results,
        }
    }
}

/// JSON error response using envelope structure (written to stdout with non-zero exit).
#[derive(Debug, Serialize)]
pub struct JsonError {
    pub ok: bool,
    pub schema_id: &'static str,
    pub schema_version: &'static str,
    pub tool_version: &'static str,
    pub generated_at: String,
    pub severity: &'static str,
    pub errors: Vec<JsonErrorInfo>,
    /// Always null for error responses
    pub data: Option<()>,
}

#[derive(Debug, Serialize)]
pub struct JsonErrorInfo {
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl JsonError {
    pub const SCHEMA_ID: &'static str = "tmdr.error";

    pub fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self::build(code, message.into(), None)
    }

    pub fn with_details(
        code: &'static str,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self::build(code, message.into(), Some(details.into()))
    }

    fn build(code: &'static str, message: String, details: Option<String>) -> Self {
        Self {
            ok: false,
            schema_id: Self::SCHEMA_ID,
            schema_version: SCHEMA_VERSION,
            tool_version: TOOL_VERSION,
            generated_at: chrono::Utc::now().to_rfc3339(),
            severity: "error",
            errors: vec![JsonErrorInfo {
                code,
                message,
                details,
            }],
            data: None,
        }
    }

    /// Print this error as JSON to stdout
    /// Panics if serialization fails (should never happen for JsonError)
    pub fn print(&self) {
        let json =
            serde_json::to_string_pretty(self).expect("JsonError serialization should never fail");
        println!("{}", json);
    }
}

// =============================================================================
// Meta UX JSON Response Types (--help, --version)
// =============================================================================

/// JSON response for --help flag
#[derive(Debug, Serialize)]
pub struct HelpResponse {
    pub ok: bool,
    pub help: String,
}

impl HelpResponse {
    pub fn new(help_text: String) -> Self {
        Self {
            ok: true,
            help: help_text,
        }
    }

    pub fn print(&self) {
        let json = serde_json::to_string_pretty(self)
            .expect("HelpResponse serialization should never fail");
        println!("{}", json);
    }
}

/// JSON response for --version flag
#[derive(Debug, Serialize)]
pub struct VersionResponse {
    pub ok: bool,
    pub version: String,
}

impl VersionResponse {
    pub fn new(version: String) -> Self {
        Self { ok: true, version }
    }

    pub fn print(&self) {
        let json = serde_json::to_string_pretty(self)
            .expect("VersionResponse serialization should never fail");
        println!("{}", json);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_error_basic() {
        let err = JsonError::new("not_found", "acronym 'XYZ' not found");
        assert!(!err.ok);
        assert_eq!(err.schema_id, "tmdr.error");
        assert_eq!(err.severity, "error");
        assert_eq!(err.errors.len(), 1);
        assert_eq!(err.errors[0].code, "not_found");
        assert!(err.errors[0].details.is_none());
    }

    #[test]
    fn test_json_error_details_omitted_when_absent() {
        let err = JsonError::new("internal_error", "boom");
        let value = serde_json::to_value(&err).unwrap();
        assert!(value["errors"][0].get("details").is_none());
        assert!(value["data"].is_null());

        let err = JsonError::with_details("load_error", "Failed", "file missing");
        let value = serde_json::to_value(&err).unwrap();
        assert_eq!(value["errors"][0]["details"], "file missing");
    }

    #[test]
    fn test_lookup_response_exact() {
        let entry = Entry::new("ABG", "Arterial Blood Gas", "");
        let response = LookupResponse::new(MatchKind::Exact, Some("abg"), vec![&entry]);
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["ok"], true);
        assert_eq!(value["match"], "exact");
        assert_eq!(value["query"], "abg");
        assert_eq!(value["count"], 1);
        assert_eq!(value["results"][0]["code"], "ABG");
    }

    #[test]
    fn test_lookup_response_fuzzy_not_ok() {
        let entry = Entry::new("ABG", "Arterial Blood Gas", "");
        let response = LookupResponse::new(MatchKind::Fuzzy, Some("abc"), vec![&entry]);
        assert!(!response.ok);
    }

    #[test]
    fn test_lookup_response_list_omits_query() {
        let response = LookupResponse::new(MatchKind::List, None, vec![]);
        let value = serde_json::to_value(&response).unwrap();
        assert!(value.get("query").is_none());
        assert_eq!(value["match"], "list");
        assert_eq!(value["ok"], false);
    }

    #[test]
    fn test_format_heading_plain() {
        colored::control::set_override(false);
        let entry = Entry::new("CT", "Computed Tomography", "");
        assert_eq!(format_heading(&entry), "CT → Computed Tomography");
        assert_eq!(format_suggestion(&entry), "  CT → Computed Tomography");
    }

    #[test]
    fn test_output_modes() {
        let output = Output::new(true, false, false);
        assert!(output.is_json());
        let output = Output::new(false, true, false);
        assert!(!output.is_json());
        assert!(output.is_quiet());
    }
}
