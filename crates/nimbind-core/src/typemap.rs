//! Per-target type mapping tables.
//!
//! A two-level lookup: target system → (Nim type tag → target type name).
//! The tables come from configuration; misses fall back to a per-target
//! default rather than an error, so resolution is total.

use std::collections::BTreeMap;

use crate::model::NimType;

/// A downstream type system that consumes a mapping table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetSystem {
    /// C/C++ declarations (native-call header, JNI import block).
    Cpp,
    /// Objective-C method surfaces.
    ObjC,
    /// TypeScript interface declarations.
    TypeScript,
    /// Kotlin wrapper surfaces.
    Kotlin,
}

impl TargetSystem {
    /// The key this target uses in the `[type-mappings.<key>]` config table.
    pub fn key(&self) -> &'static str {
        match self {
            TargetSystem::Cpp => "cpp",
            TargetSystem::ObjC => "objc",
            TargetSystem::TypeScript => "typescript",
            TargetSystem::Kotlin => "kotlin",
        }
    }
}

/// Mapping tables for all target systems, read-only for the duration of a
/// generation run.
#[derive(Debug, Clone, Copy)]
pub struct TypeMap<'a> {
    tables: &'a BTreeMap<String, BTreeMap<String, String>>,
}

impl<'a> TypeMap<'a> {
    /// Wrap configured mapping tables.
    pub fn new(tables: &'a BTreeMap<String, BTreeMap<String, String>>) -> Self {
        TypeMap { tables }
    }

    /// Resolve a Nim type tag to the target system's type name.
    ///
    /// A miss never fails: each target defines a catch-all default. C/C++
    /// passes the tag through unchanged (its type system is structurally
    /// closest to Nim's), Objective-C falls back to `id`, TypeScript to
    /// `any`, and Kotlin to `String`.
    pub fn resolve(&self, target: TargetSystem, ty: &'a NimType) -> &'a str {
        if let Some(name) = self
            .tables
            .get(target.key())
            .and_then(|table| table.get(ty.tag()))
        {
            return name;
        }
        match target {
            TargetSystem::Cpp => ty.tag(),
            TargetSystem::ObjC => "id",
            TargetSystem::TypeScript => "any",
            TargetSystem::Kotlin => "String",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tables() -> BTreeMap<String, BTreeMap<String, String>> {
        let mut cpp = BTreeMap::new();
        cpp.insert("cstring".to_string(), "NCSTRING".to_string());
        cpp.insert("int".to_string(), "int".to_string());
        let mut ts = BTreeMap::new();
        ts.insert("cstring".to_string(), "string".to_string());
        ts.insert("bool".to_string(), "boolean".to_string());
        let mut all = BTreeMap::new();
        all.insert("cpp".to_string(), cpp);
        all.insert("typescript".to_string(), ts);
        all
    }

    #[test]
    fn configured_mapping_wins() {
        let tables = tables();
        let map = TypeMap::new(&tables);
        assert_eq!(map.resolve(TargetSystem::Cpp, &NimType::CString), "NCSTRING");
        assert_eq!(map.resolve(TargetSystem::TypeScript, &NimType::Bool), "boolean");
    }

    #[test]
    fn cpp_miss_passes_tag_through() {
        let tables = tables();
        let map = TypeMap::new(&tables);
        let ty = NimType::Other("float64".to_string());
        assert_eq!(map.resolve(TargetSystem::Cpp, &ty), "float64");
    }

    #[test]
    fn dynamic_targets_fall_back_to_catch_all() {
        let tables = tables();
        let map = TypeMap::new(&tables);
        let ty = NimType::Other("seq".to_string());
        assert_eq!(map.resolve(TargetSystem::TypeScript, &ty), "any");
        assert_eq!(map.resolve(TargetSystem::ObjC, &ty), "id");
        assert_eq!(map.resolve(TargetSystem::Kotlin, &ty), "String");
    }

    #[test]
    fn missing_table_is_not_an_error() {
        let empty = BTreeMap::new();
        let map = TypeMap::new(&empty);
        assert_eq!(map.resolve(TargetSystem::TypeScript, &NimType::Int), "any");
        assert_eq!(map.resolve(TargetSystem::Cpp, &NimType::Int), "int");
    }
}
