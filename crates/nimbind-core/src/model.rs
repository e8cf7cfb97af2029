//! The function model: the canonical representation of one exported Nim proc.
//!
//! Instances are created by the extractor ([`crate::extract`]), optionally
//! rewritten once by the override pass ([`crate::overrides`]), and are
//! read-only for every renderer afterwards.

/// A Nim type tag as it appears in an exported signature.
///
/// The vocabulary is fixed to the types the bridge knows how to marshal;
/// anything else is carried through unchanged as [`NimType::Other`] and left
/// to the per-target mapping tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NimType {
    /// `cstring` — a NUL-terminated native string.
    CString,
    /// `string` — a Nim string, marshalled as a C string at the boundary.
    String,
    /// `bool`, marshalled as a 0/1 integer across the boundary.
    Bool,
    /// `int`.
    Int,
    /// `cint`.
    CInt,
    /// `int64`.
    Int64,
    /// Unrecognized tag, passed through verbatim.
    Other(String),
}

impl NimType {
    /// Parse a type tag from its source spelling.
    pub fn parse(tag: &str) -> Self {
        match tag {
            "cstring" => NimType::CString,
            "string" => NimType::String,
            "bool" => NimType::Bool,
            "int" => NimType::Int,
            "cint" => NimType::CInt,
            "int64" => NimType::Int64,
            other => NimType::Other(other.to_string()),
        }
    }

    /// The source spelling of this tag, used as the mapping-table key.
    pub fn tag(&self) -> &str {
        match self {
            NimType::CString => "cstring",
            NimType::String => "string",
            NimType::Bool => "bool",
            NimType::Int => "int",
            NimType::CInt => "cint",
            NimType::Int64 => "int64",
            NimType::Other(tag) => tag,
        }
    }

    /// Whether this type denotes textual data (subject to ownership rules).
    pub fn is_textual(&self) -> bool {
        matches!(self, NimType::CString | NimType::String)
    }
}

impl std::fmt::Display for NimType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// Who owns a textual value returned across the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ownership {
    /// The callee retains ownership; the caller must never free the result.
    Literal,
    /// Ownership transfers to the caller, who must release the result
    /// exactly once via `freeString`.
    Allocated,
}

/// A single function parameter. Order within the parameter list is call
/// order and is preserved by every renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    /// Parameter name as declared.
    pub name: String,
    /// Parameter type tag.
    pub ty: NimType,
}

/// One exported Nim function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionModel {
    /// Native entry point name. Never renamed; only [`FunctionModel::alias`]
    /// varies by target.
    pub name: String,
    /// Return type tag.
    pub return_type: NimType,
    /// Ordered parameters.
    pub params: Vec<Param>,
    /// Memory ownership of the returned value. `Some(_)` exactly when
    /// [`FunctionModel::return_type`] is textual; extraction always resolves
    /// it, falling back to a body scan when no annotation is present.
    pub ownership: Option<Ownership>,
    /// Externally-visible rename, applied only at the managed-runtime and
    /// interface layers.
    pub alias: Option<String>,
}

impl FunctionModel {
    /// The name the external layers expose: the alias when one is set,
    /// otherwise the native name.
    pub fn external_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}
