//! Post-extraction model overrides.
//!
//! Kept as a pass distinct from the extractor so that parsing and policy
//! stay independently testable. Two overrides exist: forcing a boolean
//! return convention onto functions whose native side returns a 0/1
//! integer, and renaming the externally-visible surface.

use crate::config::Overrides;
use crate::model::{FunctionModel, NimType};

/// Apply configured overrides to the extracted functions.
///
/// The native entry point name is never rewritten; only the alias changes.
/// When a boolean coercion replaces a textual return type, the ownership
/// tag is cleared so the model invariant (ownership present exactly for
/// textual returns) keeps holding.
pub fn apply(mut functions: Vec<FunctionModel>, overrides: &Overrides) -> Vec<FunctionModel> {
    for func in &mut functions {
        if let Some(alias) = overrides.function_name_mappings.get(&func.name) {
            func.alias = Some(alias.clone());
        }
        if overrides.boolean_returns.iter().any(|n| n == &func.name) {
            func.return_type = NimType::Bool;
            func.ownership = None;
        }
    }
    functions
}
