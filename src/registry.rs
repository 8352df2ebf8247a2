//! Recursive descent from a JSON object to an ordered list of model declarations.
//!
//! Declarations are appended post-order: every nested model lands in the
//! registry before the model that references it, so the root is always last.
//! Nested names are `<key>Model` and are not deduplicated; two branches
//! sharing a key produce two declarations with the same name.

use serde_json::Value;
use tracing::{debug, trace};

use crate::codegen::render_declaration;
use crate::inference::{infer_type, innermost_first};
use crate::ir::{Field, ModelDecl, Ty};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// Append-only, ordered accumulator for one generation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    models: Vec<ModelDecl>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh registry populated from `value` under `root_name`.
    /// Non-object values leave it empty.
    pub fn from_root(root_name: &str, value: &Value) -> Self {
        let mut registry = Self::new();
        build_model(root_name, value, &mut registry);
        registry
    }

    pub fn push(&mut self, decl: ModelDecl) {
        self.models.push(decl);
    }

    pub fn models(&self) -> &[ModelDecl] {
        &self.models
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ModelDecl> {
        self.models.iter()
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// The last declaration appended, which is the model of the initial call.
    pub fn root(&self) -> Option<&ModelDecl> {
        self.models.last()
    }
}

impl<'a> IntoIterator for &'a Registry {
    type Item = &'a ModelDecl;
    type IntoIter = std::slice::Iter<'a, ModelDecl>;

    fn into_iter(self) -> Self::IntoIter {
        self.models.iter()
    }
}

pub fn sub_model_name(key: &str) -> String {
    format!("{key}Model")
}

/// Build `model_name` from `value` and everything nested under it into `registry`.
///
/// Returns the same registry for chaining. A non-object `value` is a no-op.
pub fn build_model<'r>(model_name: &str, value: &Value, registry: &'r mut Registry) -> &'r mut Registry {
    let Value::Object(map) = value else {
        return registry;
    };

    let mut fields: Vec<Field> = Vec::with_capacity(map.len());
    for (key, v) in map {
        let ty = infer_type(v);
        match ty {
            Ty::Untyped => {
                trace!(model = model_name, key = key.as_str(), "dropping untyped field");
            }
            Ty::Object => {
                let sub = sub_model_name(key);
                build_model(&sub, v, registry);
                fields.push(Field { key: key.clone(), ty: Ty::Reference(sub) });
            }
            Ty::ArrayOf(_) if matches!(ty.innermost(), Ty::Object) => {
                let sub = sub_model_name(key);
                if let Some(first) = innermost_first(v) {
                    build_model(&sub, first, registry);
                }
                fields.push(Field { key: key.clone(), ty: ty.resolve_object(&sub) });
            }
            Ty::ArrayOf(_) | Ty::Primitive(_) | Ty::Reference(_) => {
                fields.push(Field { key: key.clone(), ty });
            }
        }
    }

    let rendered = render_declaration(model_name, &fields);
    registry.push(ModelDecl {
        model_name: model_name.to_string(),
        fields,
        rendered,
    });
    debug!(
        model = model_name,
        fields = registry.root().map(|m| m.fields.len()).unwrap_or_default(),
        registry_len = registry.len(),
        "model declaration appended"
    );
    registry
}

// ------------------------------- Tests ------------------------------------ //
