//! # Configuration
//!
//! Options recognized at the serializer's external boundary (spec §6). None
//! of these are consulted by the core engine itself (classifier, extractor,
//! scope graph builder, planner) — only the emitter reads them, the same way
//! the teacher's `GeneratorConfig` is consumed solely by `generator::printer`
//! rather than by `analyzer` or `transformer`.

use serde::{Deserialize, Serialize};

/// Top-level configuration for a serialization run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SerializerConfig {
    /// Collapse whitespace in the canonical token stream.
    pub minify: bool,
    /// Shorten identifiers aggressively; when off, prefer human-meaningful
    /// names with numeric suffixes on clash.
    pub mangle: bool,
    /// Produce a single expression rather than multiple statements.
    pub inline: bool,
    /// Wrapper format around the core expression.
    pub format: OutputFormat,
    /// Declare the output as strict-mode code.
    pub strict_env: bool,
}

impl Default for SerializerConfig {
    fn default() -> Self {
        Self {
            minify: false,
            mangle: false,
            inline: true,
            format: OutputFormat::Script,
            strict_env: true,
        }
    }
}

/// Wrapper format around the emitted core expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// No module wrapper; a bare script-level expression.
    Script,
    /// Wrapped as an ES module default export.
    Esm,
    /// Wrapped as a CommonJS `module.exports` assignment.
    Cjs,
}

impl SerializerConfig {
    /// Builds a configuration from CLI-style strings, falling back to
    /// defaults for unrecognized values — mirrors the teacher's
    /// `GeneratorConfig::from_cli_args`.
    pub fn from_cli_args(format: &str, minify: bool, mangle: bool, inline: bool, strict_env: bool) -> Self {
        let format = match format {
            "esm" => OutputFormat::Esm,
            "cjs" => OutputFormat::Cjs,
            "script" | _ => OutputFormat::Script,
        };

        Self { minify, mangle, inline, format, strict_env }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_inlines_strict_script() {
        let config = SerializerConfig::default();
        assert!(config.inline);
        assert!(config.strict_env);
        assert_eq!(config.format, OutputFormat::Script);
        assert!(!config.minify);
        assert!(!config.mangle);
    }

    #[test]
    fn from_cli_args_unrecognized_format_falls_back_to_script() {
        let config = SerializerConfig::from_cli_args("weird", false, false, true, false);
        assert_eq!(config.format, OutputFormat::Script);
    }

    #[test]
    fn from_cli_args_recognizes_esm_and_cjs() {
        assert_eq!(SerializerConfig::from_cli_args("esm", false, false, true, true).format, OutputFormat::Esm);
        assert_eq!(SerializerConfig::from_cli_args("cjs", false, false, true, true).format, OutputFormat::Cjs);
    }
}
