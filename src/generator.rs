//! Fluent front API: header → import → define → format → execute.

use chrono::{Local, NaiveDateTime};
use serde_json::Value;
use tracing::debug_span;

use crate::codegen::{Codegen, ModuleConvention};
use crate::format::{Beautifier, FormatOptions, Formatter};
use crate::registry::Registry;

#[derive(Debug, Clone)]
pub struct Generator {
    convention: ModuleConvention,
    header: Option<NaiveDateTime>,
    import: bool,
    registry: Registry,
    format: Option<FormatOptions>,
}

impl Generator {
    pub fn new(convention: ModuleConvention) -> Self {
        Self {
            convention,
            header: None,
            import: false,
            registry: Registry::new(),
            format: Some(FormatOptions::default()),
        }
    }

    /// Header comment stamped with the local clock.
    pub fn header(self) -> Self {
        self.header_at(Local::now().naive_local())
    }

    pub fn header_at(mut self, stamp: NaiveDateTime) -> Self {
        self.header = Some(stamp);
        self
    }

    pub fn import(mut self) -> Self {
        self.import = true;
        self
    }

    /// Infer models for `json` under `root_name`. Replaces any previous definition.
    pub fn define(mut self, root_name: &str, json: &Value) -> Self {
        self.registry = Registry::from_root(root_name, json);
        self
    }

    pub fn format(mut self, options: FormatOptions) -> Self {
        self.format = Some(options);
        self
    }

    /// Skip the formatter; `execute` returns the assembled text as-is.
    pub fn raw(mut self) -> Self {
        self.format = None;
        self
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn execute(&self) -> String {
        self.execute_with(&Beautifier)
    }

    pub fn execute_with(&self, formatter: &dyn Formatter) -> String {
        let _span = debug_span!(
            "generate",
            convention = ?self.convention,
            models = self.registry.len()
        )
        .entered();

        let mut cg = Codegen::new(self.convention);
        if let Some(stamp) = self.header {
            cg = cg.with_header(stamp);
        }
        if self.import {
            cg = cg.with_import();
        }
        cg.emit(&self.registry);
        let text = cg.into_string();

        match &self.format {
            Some(options) => formatter.format(&text, options),
            None => text,
        }
    }
}

/// Header, import, every model for `json`, and the export statement, formatted
/// with `format_options` (4 spaces when `None`).
pub fn generate(
    convention: ModuleConvention,
    root_name: &str,
    json: &Value,
    format_options: Option<FormatOptions>,
) -> String {
    Generator::new(convention)
        .header()
        .import()
        .define(root_name, json)
        .format(format_options.unwrap_or_default())
        .execute()
}

// ------------------------------- Tests ------------------------------------ //
