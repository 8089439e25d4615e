//! Output formatting for command results.

use serde::Serialize;


/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Pretty,
    Json,
    Yaml,
}

impl From<&str> for OutputFormat {
    fn from(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "json" => Self::Json,
            "yaml" => Self::Yaml,
            _ => Self::Pretty,
        }
    }
}

/// Serializes a value for machine-readable output. `Pretty` callers
/// render their own layout and only fall back here for completeness.
pub fn format_output<T: Serialize>(value: &T, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Json | OutputFormat::Pretty => {
            serde_json::to_string_pretty(value).map_err(|e| e.to_string())
        }
        OutputFormat::Yaml => serde_yaml::to_string(value)
            .map(|s| s.trim_end().to_string())
            .map_err(|e| e.to_string()),
    }
}
