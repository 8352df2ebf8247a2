//! Minimal CLI: JSON → model definitions (cjs | esm)
use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser};
use serde_json::Value;
use tracing::{debug, info};

use crate::codegen::ModuleConvention;
use crate::config::{GeneratorConfig, DEFAULT_ROOT_NAME};
use crate::error::{ensure_object, Error, Result};
use crate::format::{FormatOptions, IndentStyle};
use crate::generator::Generator;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// infer nested models from a JSON object and emit `JsonModel.define` source
#[derive(Parser, Debug)]
#[command(name = "jsonmodel-gen", version)]
pub struct CommandLineInterface {
    #[command(flatten)]
    input_settings: InputSettings,

    #[command(flatten)]
    output_settings: OutputSettings,

    /// JSON settings file; explicit flags override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// debugging: print the resolved settings and exit
    #[arg(long)]
    no_op: bool,
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// JSON file to read, or '-' for stdin (stdin if omitted)
    #[arg(long, short)]
    input: Option<PathBuf>,

    /// JSON Pointer selecting the root object (e.g. /data/items/0)
    #[arg(long)]
    json_pointer: Option<String>,

    /// jq filter selecting the root object; its first output is used
    #[arg(long = "jq")]
    jq_expr: Option<String>,
}

#[derive(Args, Debug, Clone)]
struct OutputSettings {
    /// module convention of the emitted source [default: esm]
    #[arg(long, value_enum)]
    module: Option<ModuleConvention>,

    /// name of the root model [default: jsonModel]
    #[arg(long)]
    root_name: Option<String>,

    /// indentation [default: tabs]
    #[arg(long, value_enum)]
    indent: Option<IndentStyle>,

    /// skip the formatter and print the assembled text as-is
    #[arg(long)]
    raw: bool,

    /// omit the copyright/timestamp header comment
    #[arg(long)]
    no_header: bool,

    /// omit the JsonModel import statement
    #[arg(long)]
    no_import: bool,

    /// output file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

/// Flags, config file and defaults folded together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub module: ModuleConvention,
    pub root_name: String,
    pub format: Option<FormatOptions>,
    pub header: bool,
    pub import: bool,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn read_source(&self) -> Result<String> {
        match self.input.as_ref().filter(|p| p.as_os_str() != "-") {
            Some(path) => std::fs::read_to_string(path).map_err(|source| Error::Io {
                path: path.to_string_lossy().to_string(),
                source,
            }),
            None => {
                let mut buf = String::new();
                std::io::stdin().read_to_string(&mut buf).map_err(|source| Error::Io {
                    path: "<stdin>".to_string(),
                    source,
                })?;
                Ok(buf)
            }
        }
    }

    /// Parse, then narrow with the pointer and/or jq filter (in that order).
    fn select(&self, source: &str) -> Result<Value> {
        let mut value = serde_json::from_str::<Value>(source)?;
        if let Some(pointer) = self.json_pointer.as_ref() {
            value = value
                .pointer(pointer)
                .cloned()
                .ok_or_else(|| Error::JsonPointer { pointer: pointer.clone() })?;
        }
        if let Some(jq_expr) = self.jq_expr.as_ref() {
            value = crate::jq_exec::select_first(jq_expr, &value)?;
        }
        Ok(value)
    }
}

impl Settings {
    fn resolve(output: &OutputSettings, config: GeneratorConfig) -> Self {
        let indent = output.indent.or(config.indent).unwrap_or_default();
        let raw = output.raw || config.raw.unwrap_or(false);
        Self {
            module: output.module.or(config.module).unwrap_or_default(),
            root_name: output
                .root_name
                .clone()
                .or(config.root_name)
                .unwrap_or_else(|| DEFAULT_ROOT_NAME.to_string()),
            format: if raw { None } else { Some(indent.into()) },
            header: !output.no_header && config.header.unwrap_or(true),
            import: !output.no_import && config.import.unwrap_or(true),
        }
    }

    pub fn generator(&self) -> Generator {
        let mut generator = Generator::new(self.module);
        if self.header {
            generator = generator.header();
        }
        if self.import {
            generator = generator.import();
        }
        match self.format {
            Some(options) => generator.format(options),
            None => generator.raw(),
        }
    }

    /// Generate for an already-selected document. Non-object roots are refused.
    pub fn render(&self, value: &Value) -> Result<String> {
        ensure_object(value)?;
        Ok(self.generator().define(&self.root_name, value).execute())
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn settings(&self) -> Result<Settings> {
        let config = match self.config.as_ref() {
            Some(path) => GeneratorConfig::load(path)?,
            None => GeneratorConfig::default(),
        };
        Ok(Settings::resolve(&self.output_settings, config))
    }

    pub fn run(&self) -> anyhow::Result<()> {
        let settings = self.settings()?;

        // debug path
        if self.no_op {
            eprintln!("{self:#?}\n{settings:#?}");
            return Ok(());
        }

        let source = self.input_settings.read_source()?;
        let value = self.input_settings.select(&source)?;
        let output = settings.render(&value)?;
        debug!(bytes = output.len(), "generated");

        if let Some(out) = self.output_settings.out.as_ref() {
            if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            std::fs::write(out, format!("{output}\n"))
                .with_context(|| format!("failed to write {}", out.display()))?;
            info!(path = %out.display(), "wrote models");
        } else {
            println!("{output}");
        }
        Ok(())
    }
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn parse(args: &[&str]) -> CommandLineInterface {
        CommandLineInterface::try_parse_from(std::iter::once("jsonmodel-gen").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults_without_flags_or_config() {
        let settings = parse(&[]).settings().unwrap();
        assert_eq!(settings, Settings {
            module: ModuleConvention::Esm,
            root_name: "jsonModel".into(),
            format: Some(FormatOptions { tab_indent: true, width: 4 }),
            header: true,
            import: true,
        });
    }

    #[test]
    fn flags_are_parsed() {
        let cli = parse(&["--module", "cjs", "--root-name", "User", "--indent", "2", "--no-header", "-i", "in.json"]);
        let settings = cli.settings().unwrap();
        assert_eq!(settings.module, ModuleConvention::Cjs);
        assert_eq!(settings.root_name, "User");
        assert_eq!(settings.format, Some(FormatOptions { tab_indent: false, width: 2 }));
        assert!(!settings.header);
        assert!(settings.import);
        assert_eq!(cli.input_settings.input, Some(PathBuf::from("in.json")));
    }

    #[test]
    fn unknown_module_is_rejected() {
        let args = ["jsonmodel-gen", "--module", "amd"];
        assert!(CommandLineInterface::try_parse_from(args).is_err());
    }

    #[test]
    fn flags_override_config() {
        let config = GeneratorConfig {
            module: Some(ModuleConvention::Cjs),
            root_name: Some("FromConfig".into()),
            indent: Some(IndentStyle::FourSpaces),
            header: Some(false),
            import: None,
            raw: None,
        };
        let cli = parse(&["--root-name", "FromFlag"]);
        let settings = Settings::resolve(&cli.output_settings, config);
        assert_eq!(settings.module, ModuleConvention::Cjs);
        assert_eq!(settings.root_name, "FromFlag");
        assert_eq!(settings.format, Some(FormatOptions { tab_indent: false, width: 4 }));
        assert!(!settings.header);
        assert!(settings.import);
    }

    #[test]
    fn raw_from_config_or_flag_disables_formatting() {
        let cfg = GeneratorConfig { raw: Some(true), ..GeneratorConfig::default() };
        assert_eq!(Settings::resolve(&parse(&[]).output_settings, cfg).format, None);
        assert_eq!(Settings::resolve(&parse(&["--raw"]).output_settings, GeneratorConfig::default()).format, None);
    }

    #[test]
    fn pointer_then_jq_select_the_root() {
        let cli = parse(&["--json-pointer", "/data", "--jq", ".items[0]"]);
        let value = cli.input_settings.select(r#"{"data": {"items": [{"id": 7}]}}"#).unwrap();
        assert_eq!(value, json!({"id": 7}));
    }

    #[test]
    fn missing_pointer_target_is_an_error() {
        let cli = parse(&["--json-pointer", "/nope"]);
        let err = cli.input_settings.select("{}").unwrap_err();
        assert!(matches!(err, Error::JsonPointer { .. }));
    }

    #[test]
    fn invalid_json_is_rejected_before_generation() {
        let err = parse(&[]).input_settings.select("{not json").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn render_refuses_non_object_roots() {
        let settings = parse(&["--no-header"]).settings().unwrap();
        assert!(matches!(settings.render(&json!([1, 2])), Err(Error::RootNotObject { .. })));
    }

    #[test]
    fn render_end_to_end() {
        let settings = parse(&["--no-header", "--module", "cjs", "--root-name", "M", "--indent", "4"]).settings().unwrap();
        let out = settings.render(&json!({"x": 1})).unwrap();
        assert_eq!(
            out,
            "const JsonModel = require('jsonmodel-js/cjs');\n\n\
             const M = new JsonModel.define({\n    x: {\n        type: 'Number'\n    }\n});\n\n\
             module.exports = M;"
        );
    }
}
