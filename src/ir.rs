// Strongly-typed IR for codegen. No serde_json::Value here.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    String,
    Number,
    Boolean,
    DateString,              // `YYYY-MM-DD HH:MM:SS`
}

impl Primitive {
    pub fn name(self) -> &'static str {
        match self {
            Primitive::String => "String",
            Primitive::Number => "Number",
            Primitive::Boolean => "Boolean",
            Primitive::DateString => "DateString",
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ty {
    Primitive(Primitive),
    Object,                  // plain object seen by inference; becomes a Reference once named
    Reference(String),       // nested model, by synthesized name
    ArrayOf(Box<Ty>),        // element type taken from the first element only
    Untyped,                 // null & friends: dropped at field level, `null` inside arrays
}

impl Ty {
    pub fn array_of(item: Ty) -> Self {
        Ty::ArrayOf(Box::new(item))
    }

    pub fn is_untyped(&self) -> bool {
        matches!(self, Ty::Untyped)
    }

    /// Innermost element type of (possibly nested) arrays; `self` for non-arrays.
    pub fn innermost(&self) -> &Ty {
        match self {
            Ty::ArrayOf(item) => item.innermost(),
            other => other,
        }
    }

    /// Replace the innermost `Object` marker with a named reference.
    pub fn resolve_object(self, model_name: &str) -> Ty {
        match self {
            Ty::Object => Ty::Reference(model_name.to_string()),
            Ty::ArrayOf(item) => Ty::ArrayOf(Box::new(item.resolve_object(model_name))),
            other => other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub key: String,
    pub ty: Ty,              // never `Untyped` or bare `Object`
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelDecl {
    pub model_name: String,
    pub fields: Vec<Field>,  // source key order
    pub rendered: String,    // one-line `const ... = new JsonModel.define({ ... });`
}
