//! Model-definition source emission.
//!
//! One template per declaration shape; the emitter only stitches header,
//! import, declarations and the export statement together. Whitespace is
//! left to the formatter.

use chrono::{Datelike, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::ir::{Field, Ty};
use crate::registry::Registry;

pub const MODEL_FACTORY: &str = "JsonModel";
pub const RUNTIME_PACKAGE: &str = "jsonmodel-js";
const AUTHOR: &str = "jsonmodel-gen";
const PART_SEPARATOR: &str = " \n\n ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ModuleConvention {
    /// CommonJS: `require` / `module.exports`
    Cjs,
    /// ES modules: `import` / `export`
    #[default]
    Esm,
}

impl ModuleConvention {
    pub fn import_statement(self) -> String {
        match self {
            ModuleConvention::Cjs => format!("const {MODEL_FACTORY} = require('{RUNTIME_PACKAGE}/cjs');"),
            ModuleConvention::Esm => format!("import {MODEL_FACTORY} from '{RUNTIME_PACKAGE}/esm';"),
        }
    }

    pub fn export_statement(self, root: Option<&str>) -> String {
        let target = root.unwrap_or("{}");
        match self {
            ModuleConvention::Cjs => format!("module.exports = {target};"),
            ModuleConvention::Esm => format!("export default {target};"),
        }
    }

    /// Wording for a non-root declaration.
    fn nested_declaration(self, rendered: &str) -> String {
        match self {
            ModuleConvention::Cjs => rendered.to_string(),
            ModuleConvention::Esm => format!("export {rendered}"),
        }
    }
}

// ------------------------------ Templates -------------------------------- //

/// `const <name> = new JsonModel.define({ <fields> });`
pub fn render_declaration(model_name: &str, fields: &[Field]) -> String {
    let body = fields.iter().map(render_field).collect::<Vec<_>>().join(",");
    format!("const {model_name} = new {MODEL_FACTORY}.define({{ {body} }});")
}

pub fn render_field(field: &Field) -> String {
    format!(" {}: {{ type: {} }} ", field.key, render_type(&field.ty))
}

fn render_type(ty: &Ty) -> String {
    match ty {
        Ty::Primitive(p) => format!("'{p}'"),
        Ty::ArrayOf(item) => format!("[{}]", render_element(item.innermost())),
        other => render_element(other),
    }
}

// Array elements and references render bare: `[Number]`, `[aModel]`, `[null]`.
fn render_element(ty: &Ty) -> String {
    match ty {
        Ty::Primitive(p) => p.name().to_string(),
        Ty::Reference(name) => name.clone(),
        Ty::ArrayOf(item) => render_element(item.innermost()),
        Ty::Object => "Object".to_string(),
        Ty::Untyped => "null".to_string(),
    }
}

pub fn render_header(stamp: NaiveDateTime) -> String {
    format!(
        "\n/**\n  * Copyright {year} {RUNTIME_PACKAGE}\n  * Auto-generated: {generated} \n  *\n  * @author {AUTHOR}\n  */",
        year = stamp.year(),
        generated = stamp.format("%Y/%m/%d %H:%M:%S"),
    )
}

// ------------------------------- Emitter --------------------------------- //

#[derive(Debug, Clone)]
pub struct Codegen {
    convention: ModuleConvention,
    header: Option<NaiveDateTime>,
    import: bool,
    parts: Vec<String>,
}

impl Codegen {
    pub fn new(convention: ModuleConvention) -> Self {
        Self { convention, header: None, import: false, parts: Vec::new() }
    }

    pub fn with_header(mut self, stamp: NaiveDateTime) -> Self {
        self.header = Some(stamp);
        self
    }

    pub fn with_import(mut self) -> Self {
        self.import = true;
        self
    }

    /// Append everything for `registry`. The last declaration is the root:
    /// it is never prefixed and is the target of the final export.
    pub fn emit(&mut self, registry: &Registry) {
        if let Some(stamp) = self.header {
            self.parts.push(render_header(stamp));
        }
        if self.import {
            self.parts.push(self.convention.import_statement());
        }

        let models = registry.models();
        if let Some((root, nested)) = models.split_last() {
            for decl in nested {
                self.parts.push(self.convention.nested_declaration(&decl.rendered));
            }
            self.parts.push(root.rendered.clone());
        }

        let root_name = registry.root().map(|m| m.model_name.as_str());
        self.parts.push(self.convention.export_statement(root_name));
    }

    pub fn into_string(self) -> String {
        format!("{}\n", self.parts.join(PART_SEPARATOR))
    }
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::Primitive;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn emit(convention: ModuleConvention, registry: &Registry) -> String {
        let mut cg = Codegen::new(convention);
        cg.emit(registry);
        cg.into_string()
    }

    #[test]
    fn declaration_template() {
        let fields = vec![
            Field { key: "x".into(), ty: Ty::Primitive(Primitive::Number) },
            Field { key: "when".into(), ty: Ty::Primitive(Primitive::DateString) },
        ];
        assert_eq!(
            render_declaration("M", &fields),
            "const M = new JsonModel.define({  x: { type: 'Number' } , when: { type: 'DateString' }  });"
        );
        assert_eq!(render_declaration("Empty", &[]), "const Empty = new JsonModel.define({  });");
    }

    #[test]
    fn array_and_reference_fields_render_bare() {
        let cases = [
            (Ty::array_of(Ty::Primitive(Primitive::Number)), " a: { type: [Number] } "),
            (Ty::array_of(Ty::Untyped), " a: { type: [null] } "),
            (Ty::array_of(Ty::Reference("aModel".into())), " a: { type: [aModel] } "),
            (Ty::array_of(Ty::array_of(Ty::Primitive(Primitive::String))), " a: { type: [String] } "),
            (Ty::Reference("aModel".into()), " a: { type: aModel } "),
        ];
        for (ty, expected) in cases {
            assert_eq!(render_field(&Field { key: "a".into(), ty }), expected);
        }
    }

    #[test]
    fn cjs_root_only() {
        let registry = Registry::from_root("M", &json!({"x": 1}));
        assert_eq!(
            emit(ModuleConvention::Cjs, &registry),
            "const M = new JsonModel.define({  x: { type: 'Number' }  }); \n\n module.exports = M;\n"
        );
    }

    #[test]
    fn esm_root_is_unprefixed_and_default_exported() {
        let registry = Registry::from_root("M", &json!({"x": 1}));
        let out = emit(ModuleConvention::Esm, &registry);
        assert!(out.starts_with("const M = "));
        assert!(out.ends_with(" \n\n export default M;\n"));
    }

    #[test]
    fn esm_exports_nested_models_by_name() {
        let registry = Registry::from_root("Outer", &json!({"inner": {"y": "s"}}));
        let out = emit(ModuleConvention::Esm, &registry);
        assert_eq!(
            out,
            "export const innerModel = new JsonModel.define({  y: { type: 'String' }  }); \n\n \
             const Outer = new JsonModel.define({  inner: { type: innerModel }  }); \n\n \
             export default Outer;\n"
        );
    }

    #[test]
    fn cjs_nested_models_are_not_prefixed() {
        let registry = Registry::from_root("Outer", &json!({"inner": {"y": "s"}}));
        let out = emit(ModuleConvention::Cjs, &registry);
        assert!(!out.contains("export "));
        assert!(out.contains("const innerModel = "));
        assert!(out.ends_with("module.exports = Outer;\n"));
    }

    #[test]
    fn empty_registry_exports_empty_object() {
        let registry = Registry::from_root("M", &json!([1]));
        assert_eq!(emit(ModuleConvention::Cjs, &registry), "module.exports = {};\n");
        assert_eq!(emit(ModuleConvention::Esm, &registry), "export default {};\n");
    }

    #[test]
    fn header_and_import_lead_the_output() {
        let stamp = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap().and_hms_opt(8, 5, 0).unwrap();
        let registry = Registry::from_root("M", &json!({}));
        let mut cg = Codegen::new(ModuleConvention::Cjs).with_header(stamp).with_import();
        cg.emit(&registry);
        let out = cg.into_string();

        let parts: Vec<&str> = out.split(PART_SEPARATOR).collect();
        assert_eq!(parts.len(), 4);
        assert!(parts[0].contains("Copyright 2024 jsonmodel-js"));
        assert!(parts[0].contains("Auto-generated: 2024/03/09 08:05:00"));
        assert_eq!(parts[1], "const JsonModel = require('jsonmodel-js/cjs');");
        assert_eq!(parts[3], "module.exports = M;\n");
    }

    #[test]
    fn import_statement_per_convention() {
        assert_eq!(ModuleConvention::Esm.import_statement(), "import JsonModel from 'jsonmodel-js/esm';");
        assert_eq!(ModuleConvention::Cjs.import_statement(), "const JsonModel = require('jsonmodel-js/cjs');");
    }
}
