//! Artifact identifiers and the renderer contract.
//!
//! Renderers are pure: function sequence + configuration in, one complete
//! source text out. They never touch the filesystem; artifacts carry a
//! logical identifier and the caller decides where each one lands.

use nimbind_core::{FunctionModel, GeneratorConfig};

use crate::error::{EmitError, Result};

/// Logical identifier of one generated artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    /// C header declaring the Nim entry points (iOS).
    LibraryHeader,
    /// Objective-C module header (iOS).
    ModuleHeader,
    /// Objective-C++ bridge implementation (iOS).
    ObjcBridge,
    /// Kotlin TurboModule wrapper (Android).
    KotlinModule,
    /// Kotlin package registration (Android).
    KotlinPackage,
    /// JNI C++ thunk (Android).
    JniBridge,
    /// CMake build file for the JNI library (Android).
    CmakeLists,
    /// TypeScript TurboModule spec (interface declaration).
    TypeScriptSpec,
}

impl ArtifactKind {
    /// Display name for this artifact.
    pub fn name(&self) -> &'static str {
        match self {
            ArtifactKind::LibraryHeader => "library header",
            ArtifactKind::ModuleHeader => "module header",
            ArtifactKind::ObjcBridge => "Objective-C++ bridge",
            ArtifactKind::KotlinModule => "Kotlin module",
            ArtifactKind::KotlinPackage => "Kotlin package",
            ArtifactKind::JniBridge => "JNI bridge",
            ArtifactKind::CmakeLists => "CMake configuration",
            ArtifactKind::TypeScriptSpec => "TypeScript spec",
        }
    }
}

/// One renderer per artifact, a single-pass stateless transform.
pub trait Renderer {
    /// The artifact this renderer produces.
    fn kind(&self) -> ArtifactKind;

    /// Render the complete artifact text. Pure: no I/O, inputs untouched,
    /// byte-identical output for identical inputs.
    fn render(&self, functions: &[FunctionModel], config: &GeneratorConfig) -> Result<String>;
}

/// Reject any model that violates the textual-return ownership invariant.
///
/// Every renderer calls this before emitting anything; a missing tag is a
/// programming defect upstream, not a recoverable condition.
pub(crate) fn ensure_ownership_tags(functions: &[FunctionModel]) -> Result<()> {
    for func in functions {
        if func.return_type.is_textual() && func.ownership.is_none() {
            return Err(EmitError::MissingOwnership {
                function: func.name.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nimbind_core::{NimType, Ownership};

    #[test]
    fn ownership_invariant_enforced() {
        let bad = FunctionModel {
            name: "greet".to_string(),
            return_type: NimType::CString,
            params: vec![],
            ownership: None,
            alias: None,
        };
        let err = ensure_ownership_tags(&[bad]).unwrap_err();
        assert!(err.to_string().contains("greet"));
    }

    #[test]
    fn tagged_textual_return_accepted() {
        let good = FunctionModel {
            name: "greet".to_string(),
            return_type: NimType::CString,
            params: vec![],
            ownership: Some(Ownership::Allocated),
            alias: None,
        };
        assert!(ensure_ownership_tags(&[good]).is_ok());
    }

    #[test]
    fn non_textual_needs_no_tag() {
        let good = FunctionModel {
            name: "fib".to_string(),
            return_type: NimType::Int,
            params: vec![],
            ownership: None,
            alias: None,
        };
        assert!(ensure_ownership_tags(&[good]).is_ok());
    }
}
