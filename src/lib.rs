//! Infer nested model declarations from a JSON document and emit them as
//! `JsonModel.define` source in CommonJS or ES-module form.
//!
//! ```
//! use jsonmodel_gen::{Generator, ModuleConvention};
//! use serde_json::json;
//!
//! let src = Generator::new(ModuleConvention::Cjs)
//!     .define("User", &json!({"name": "Ada", "address": {"city": "London"}}))
//!     .execute();
//!
//! assert!(src.starts_with("const addressModel = new JsonModel.define({"));
//! assert!(src.ends_with("module.exports = User;"));
//! ```

pub mod inference;
pub mod ir;
pub mod registry;
pub mod codegen;
pub mod format;
pub mod generator;
pub mod error;
pub mod config;
pub mod path_de;
pub mod jq_exec;
pub mod cli;

pub use codegen::{Codegen, ModuleConvention};
pub use error::{Error, Result};
pub use format::{Beautifier, FormatOptions, Formatter, IndentStyle};
pub use generator::{generate, Generator};
pub use inference::infer_type;
pub use ir::{Field, ModelDecl, Primitive, Ty};
pub use registry::{build_model, Registry};
