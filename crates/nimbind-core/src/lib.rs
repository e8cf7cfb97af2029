//! Core model, extraction, and type mapping for the nimbind generator.
//!
//! nimbind turns exported Nim procs into bridge code for three runtime
//! environments: a native-call C header (iOS), a managed Kotlin wrapper with
//! its JNI thunk (Android), and a TypeScript interface declaration.
//!
//! ## Modules
//!
//! - [`model`] — the function model, the canonical record per exported proc
//! - [`extract`] — scanner producing function models from Nim source text
//! - [`typemap`] — per-target type mapping tables with total fallbacks
//! - [`overrides`] — config-driven post-extraction pass (aliases, boolean coercion)
//! - [`config`] — `nimbind.toml` parsing and validation

pub mod config;
pub mod error;
pub mod extract;
pub mod model;
pub mod overrides;
pub mod typemap;

// Re-export key types for convenience
pub use config::{GeneratorConfig, InterfaceGroup, Overrides, TargetSet};
pub use error::CoreError;
pub use extract::{extract_functions, Discovery};
pub use model::{FunctionModel, NimType, Ownership, Param};
pub use typemap::{TargetSystem, TypeMap};
