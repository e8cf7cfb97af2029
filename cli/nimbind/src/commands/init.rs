//! `nimbind init` — starter configuration scaffolding.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};

/// A starter config with the full default mapping tables.
const CONFIG_TEMPLATE: &str = r#"# nimbind generator configuration

[project]
# Directory scanned for *.nim sources, relative to this file.
nim-dir = "nim"
# Root directory for generated artifacts, relative to this file.
output-dir = "generated"
# Externally-visible module name.
module-name = "NimBridge"
# JVM package for the Android wrapper.
package-name = "com.nimbridge"
# Native library name, used in load-time diagnostics.
library-name = "nim_functions"

[targets]
ios = true
android = true
typescript = true

[type-mappings.cpp]
cstring = "NCSTRING"
string = "NCSTRING"
bool = "int"
int = "int"
cint = "int"
int64 = "long long"

[type-mappings.objc]
cstring = "NSString *"
string = "NSString *"
bool = "NSNumber *"
int = "NSNumber *"
cint = "NSNumber *"
int64 = "NSNumber *"

[type-mappings.typescript]
cstring = "string"
string = "string"
bool = "boolean"
int = "number"
cint = "number"
int64 = "number"

[type-mappings.kotlin]
cstring = "String"
string = "String"
bool = "Boolean"
int = "Double"
cint = "Double"
int64 = "Double"

# Functions whose native 0/1 integer return should surface as a boolean.
[overrides]
boolean-returns = []

# Native entry point name -> externally-visible alias.
[overrides.function-name-mappings]

# Comment-headed groups in the TypeScript interface; functions are matched
# by their externally-visible name. Ungrouped functions come first.
#
# [[interface-groups]]
# title = "Math operations"
# functions = ["fibonacci", "isPrime"]
"#;

/// Write a starter `nimbind.toml` (and the Nim source directory) into `dir`.
pub fn run(dir: &Path) -> Result<()> {
    let config_path = dir.join("nimbind.toml");
    if config_path.exists() {
        bail!("{} already exists", config_path.display());
    }

    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    fs::write(&config_path, CONFIG_TEMPLATE)
        .with_context(|| format!("writing {}", config_path.display()))?;
    fs::create_dir_all(dir.join("nim")).context("creating nim/ directory")?;

    println!("Created {}", config_path.display());
    println!("  put exported Nim sources under nim/ and run `nimbind generate`");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nimbind_core::GeneratorConfig;

    #[test]
    fn init_writes_parseable_config() {
        let dir = tempfile::tempdir().unwrap();
        run(dir.path()).unwrap();

        let config_path = dir.path().join("nimbind.toml");
        assert!(config_path.is_file());
        assert!(dir.path().join("nim").is_dir());

        let config = GeneratorConfig::load(&config_path).unwrap();
        assert_eq!(config.project.module_name, "NimBridge");
        assert_eq!(config.type_mappings["cpp"]["cstring"], "NCSTRING");
        assert!(config.targets.ios && config.targets.android && config.targets.typescript);
    }

    #[test]
    fn init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        run(dir.path()).unwrap();
        assert!(run(dir.path()).is_err());
    }
}
