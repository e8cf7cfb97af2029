//! Renderer selection and per-artifact isolation.
//!
//! Selects one renderer per artifact from the enabled-target set, in a fixed
//! order, and renders each independently: one artifact failing never
//! suppresses the others. Rendering only starts once extraction has
//! produced the complete function sequence; every renderer sees the same
//! read-only view.

use nimbind_core::{FunctionModel, GeneratorConfig};

use crate::artifact::{ArtifactKind, Renderer};
use crate::cmake::CmakeListsRenderer;
use crate::error::EmitError;
use crate::header::LibraryHeaderRenderer;
use crate::jni::JniBridgeRenderer;
use crate::kotlin::{KotlinModuleRenderer, KotlinPackageRenderer};
use crate::objc::{ModuleHeaderRenderer, ObjcBridgeRenderer};
use crate::typescript::TypeScriptSpecRenderer;

/// The outcome of rendering one artifact.
#[derive(Debug)]
pub struct ArtifactResult {
    /// Which artifact was attempted.
    pub kind: ArtifactKind,
    /// The rendered text, or the failure for this artifact alone.
    pub outcome: Result<String, EmitError>,
}

/// Render every artifact of every enabled target.
pub fn render_all(functions: &[FunctionModel], config: &GeneratorConfig) -> Vec<ArtifactResult> {
    let mut renderers: Vec<Box<dyn Renderer>> = Vec::new();
    if config.targets.ios {
        renderers.push(Box::new(LibraryHeaderRenderer));
        renderers.push(Box::new(ModuleHeaderRenderer));
        renderers.push(Box::new(ObjcBridgeRenderer));
    }
    if config.targets.android {
        renderers.push(Box::new(KotlinModuleRenderer));
        renderers.push(Box::new(KotlinPackageRenderer));
        renderers.push(Box::new(JniBridgeRenderer));
        renderers.push(Box::new(CmakeListsRenderer));
    }
    if config.targets.typescript {
        renderers.push(Box::new(TypeScriptSpecRenderer));
    }

    renderers
        .iter()
        .map(|renderer| ArtifactResult {
            kind: renderer.kind(),
            outcome: renderer.render(functions, config),
        })
        .collect()
}
