//! Generator configuration (`nimbind.toml`) parsing.
//!
//! The config names the Nim source directory, the output layout identifiers
//! (module, package, native library), the enabled target set, the per-target
//! type mapping tables, and the post-extraction overrides.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::typemap::TypeMap;

/// A complete generator configuration parsed from a `nimbind.toml` file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Project identifiers and directories.
    pub project: ProjectConfig,
    /// Which targets to generate.
    #[serde(default)]
    pub targets: TargetSet,
    /// Per-target type mapping tables: target key → (Nim tag → type name).
    #[serde(default, rename = "type-mappings")]
    pub type_mappings: BTreeMap<String, BTreeMap<String, String>>,
    /// Post-extraction model overrides.
    #[serde(default)]
    pub overrides: Overrides,
    /// Grouping of the interface declaration by semantic category.
    #[serde(default, rename = "interface-groups")]
    pub interface_groups: Vec<InterfaceGroup>,
}

/// Project identifiers and directories.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Directory scanned for `*.nim` sources, relative to the config file.
    #[serde(default = "default_nim_dir", rename = "nim-dir")]
    pub nim_dir: String,
    /// Root directory for generated artifacts, relative to the config file.
    #[serde(default = "default_output_dir", rename = "output-dir")]
    pub output_dir: String,
    /// Externally-visible module name (e.g., "NimBridge").
    #[serde(rename = "module-name")]
    pub module_name: String,
    /// JVM package for the managed wrapper (e.g., "com.nimbridge").
    #[serde(default, rename = "package-name")]
    pub package_name: String,
    /// Native library name, used verbatim in load-time diagnostics.
    #[serde(rename = "library-name")]
    pub library_name: String,
}

fn default_nim_dir() -> String {
    "nim".to_string()
}

fn default_output_dir() -> String {
    "generated".to_string()
}

/// The enabled target set. All targets default to enabled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetSet {
    /// Native-call header target (iOS: C header + Objective-C++ bridge).
    #[serde(default = "default_true")]
    pub ios: bool,
    /// Managed-runtime wrapper target (Android: Kotlin + JNI thunk).
    #[serde(default = "default_true")]
    pub android: bool,
    /// Static interface declaration target (TypeScript spec).
    #[serde(default = "default_true")]
    pub typescript: bool,
}

fn default_true() -> bool {
    true
}

impl Default for TargetSet {
    fn default() -> Self {
        TargetSet {
            ios: true,
            android: true,
            typescript: true,
        }
    }
}

/// Configuration-driven post-processing over the extracted model.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Overrides {
    /// Functions whose return type is forced to `bool` (the native side
    /// returns a 0/1 integer).
    #[serde(default, rename = "boolean-returns")]
    pub boolean_returns: Vec<String>,
    /// Native name → externally-visible alias.
    #[serde(default, rename = "function-name-mappings")]
    pub function_name_mappings: BTreeMap<String, String>,
}

/// One comment-headed group in the interface declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterfaceGroup {
    /// Heading emitted above the group.
    pub title: String,
    /// Externally-visible names belonging to the group.
    pub functions: Vec<String>,
}

impl GeneratorConfig {
    /// Parse a generator configuration from a TOML string.
    pub fn parse(input: &str) -> Result<Self> {
        let config: GeneratorConfig = toml::from_str(input).map_err(CoreError::Toml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a generator configuration from a file path.
    pub fn load(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// The type mapping tables as a resolvable view.
    pub fn type_map(&self) -> TypeMap<'_> {
        TypeMap::new(&self.type_mappings)
    }

    fn validate(&self) -> Result<()> {
        if self.project.module_name.is_empty() {
            return Err(CoreError::InvalidConfig {
                detail: "project.module-name is required".to_string(),
            });
        }
        if self.project.library_name.is_empty() {
            return Err(CoreError::InvalidConfig {
                detail: "project.library-name is required".to_string(),
            });
        }
        if self.targets.android && self.project.package_name.is_empty() {
            return Err(CoreError::InvalidConfig {
                detail: "project.package-name is required when the android target is enabled"
                    .to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_config() {
        let toml = r#"
[project]
nim-dir = "nim"
output-dir = "generated"
module-name = "NimBridge"
package-name = "com.nimbridge"
library-name = "nim_functions"

[targets]
ios = true
android = true
typescript = false

[type-mappings.cpp]
cstring = "NCSTRING"
int = "int"

[type-mappings.typescript]
cstring = "string"
bool = "boolean"

[overrides]
boolean-returns = ["mobileIsPrime"]

[overrides.function-name-mappings]
mobileFibonacci = "fibonacci"

[[interface-groups]]
title = "Math operations"
functions = ["fibonacci", "isPrime"]
"#;
        let config = GeneratorConfig::parse(toml).unwrap();
        assert_eq!(config.project.module_name, "NimBridge");
        assert_eq!(config.project.library_name, "nim_functions");
        assert!(config.targets.ios);
        assert!(!config.targets.typescript);
        assert_eq!(
            config.type_mappings["cpp"]["cstring"],
            "NCSTRING".to_string()
        );
        assert_eq!(config.overrides.boolean_returns, vec!["mobileIsPrime"]);
        assert_eq!(
            config.overrides.function_name_mappings["mobileFibonacci"],
            "fibonacci"
        );
        assert_eq!(config.interface_groups[0].title, "Math operations");
    }

    #[test]
    fn minimal_config_uses_defaults() {
        let toml = r#"
[project]
module-name = "NimBridge"
package-name = "com.nimbridge"
library-name = "nim_functions"
"#;
        let config = GeneratorConfig::parse(toml).unwrap();
        assert_eq!(config.project.nim_dir, "nim");
        assert_eq!(config.project.output_dir, "generated");
        assert!(config.targets.ios && config.targets.android && config.targets.typescript);
        assert!(config.type_mappings.is_empty());
        assert!(config.overrides.boolean_returns.is_empty());
    }

    #[test]
    fn missing_module_name_rejected() {
        let toml = r#"
[project]
module-name = ""
library-name = "nim_functions"

[targets]
android = false
"#;
        assert!(GeneratorConfig::parse(toml).is_err());
    }

    #[test]
    fn android_requires_package_name() {
        let toml = r#"
[project]
module-name = "NimBridge"
library-name = "nim_functions"
"#;
        let err = GeneratorConfig::parse(toml).unwrap_err();
        assert!(err.to_string().contains("package-name"));

        let toml_no_android = r#"
[project]
module-name = "NimBridge"
library-name = "nim_functions"

[targets]
android = false
"#;
        assert!(GeneratorConfig::parse(toml_no_android).is_ok());
    }
}
