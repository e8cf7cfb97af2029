//! Target renderers for the nimbind bridge generator.
//!
//! Each renderer is a pure function from the extracted function sequence and
//! the generator configuration to one complete source-text artifact. Type
//! decisions always go through the per-target mapping tables; ownership
//! handling for textual returns is encoded per target's release protocol.
//!
//! ## Modules
//!
//! - [`artifact`] — artifact identifiers and the [`Renderer`] contract
//! - [`header`] — native-call C header (iOS)
//! - [`objc`] — Objective-C module header and Objective-C++ bridge (iOS)
//! - [`kotlin`] — Kotlin wrapper module and package registration (Android)
//! - [`jni`] — JNI C++ thunk (Android)
//! - [`cmake`] — CMake build file for the JNI library (Android)
//! - [`typescript`] — TypeScript interface declaration
//! - [`pipeline`] — renderer selection and per-artifact isolation
//! - [`format`] — naming transform and banner helpers shared by renderers

pub mod artifact;
pub mod cmake;
pub mod error;
pub mod format;
pub mod header;
pub mod jni;
pub mod kotlin;
pub mod objc;
pub mod pipeline;
pub mod typescript;

// Re-export key types for convenience
pub use artifact::{ArtifactKind, Renderer};
pub use error::EmitError;
pub use format::{capitalize_first, dispatch_name};
pub use pipeline::{render_all, ArtifactResult};
