//! TypeScript interface declaration renderer.
//!
//! A contract surface, not an implementation: one `readonly` member per
//! function using only TypeScript-mapped types, optionally grouped under
//! comment headings by configured semantic category. Ungrouped functions
//! come first, without a heading.

use nimbind_core::{FunctionModel, GeneratorConfig, TargetSystem};

use crate::artifact::{ensure_ownership_tags, ArtifactKind, Renderer};
use crate::error::Result;
use crate::format::banner;

pub struct TypeScriptSpecRenderer;

impl Renderer for TypeScriptSpecRenderer {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::TypeScriptSpec
    }

    fn render(&self, functions: &[FunctionModel], config: &GeneratorConfig) -> Result<String> {
        ensure_ownership_tags(functions)?;
        let module = &config.project.module_name;

        let mut out = banner("TypeScript TurboModule spec");
        out.push_str("import type { TurboModule } from 'react-native';\n");
        out.push_str("import { TurboModuleRegistry } from 'react-native';\n\n");
        out.push_str("export interface Spec extends TurboModule {\n");

        // Partition by configured group, preserving function order within
        // each section. A function belongs to the first group naming its
        // external name; the rest are ungrouped.
        let group_of = |func: &FunctionModel| -> Option<usize> {
            config
                .interface_groups
                .iter()
                .position(|g| g.functions.iter().any(|n| n == func.external_name()))
        };

        let mut sections: Vec<(Option<&str>, Vec<&FunctionModel>)> = Vec::new();
        sections.push((None, Vec::new()));
        for group in &config.interface_groups {
            sections.push((Some(group.title.as_str()), Vec::new()));
        }
        for func in functions {
            let idx = group_of(func).map(|i| i + 1).unwrap_or(0);
            sections[idx].1.push(func);
        }

        let mut first = true;
        for (title, members) in &sections {
            if members.is_empty() {
                continue;
            }
            if !first {
                out.push('\n');
            }
            first = false;
            if let Some(title) = title {
                out.push_str(&format!("  // {title}\n"));
            }
            for func in members {
                out.push_str(&render_member(func, config));
            }
        }

        out.push_str("}\n\n");
        out.push_str(&format!(
            "export default TurboModuleRegistry.getEnforcing<Spec>('{module}');\n"
        ));
        Ok(out)
    }
}

fn render_member(func: &FunctionModel, config: &GeneratorConfig) -> String {
    let map = config.type_map();
    let params = func
        .params
        .iter()
        .map(|p| format!("{}: {}", p.name, map.resolve(TargetSystem::TypeScript, &p.ty)))
        .collect::<Vec<_>>()
        .join(", ");
    let ret = map.resolve(TargetSystem::TypeScript, &func.return_type);
    format!(
        "  readonly {}: ({params}) => {ret};\n",
        func.external_name()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{sample_config, sample_functions};

    #[test]
    fn members_use_typescript_types_and_aliases() {
        let config = sample_config();
        let out = TypeScriptSpecRenderer
            .render(&sample_functions(), &config)
            .unwrap();
        assert!(out.contains("readonly helloWorld: () => string;"));
        assert!(out.contains("readonly addNumbers: (a: number, b: number) => number;"));
        assert!(out.contains("readonly greet: (name: string) => string;"));
        assert!(out.contains("readonly isPrime: (n: number) => boolean;"));
        assert!(out.contains("readonly fibonacci: (n: number) => number;"));
    }

    #[test]
    fn groups_share_one_heading() {
        // Scenario: isPrime and fibonacci share the "Math operations"
        // category and land under a single comment heading, each keeping
        // its own signature.
        let config = sample_config();
        let out = TypeScriptSpecRenderer
            .render(&sample_functions(), &config)
            .unwrap();
        assert_eq!(out.matches("// Math operations").count(), 1);
        let heading = out.find("// Math operations").unwrap();
        assert!(out[heading..].contains("readonly isPrime:"));
        assert!(out[heading..].contains("readonly fibonacci:"));
    }

    #[test]
    fn ungrouped_functions_come_first_without_heading() {
        let config = sample_config();
        let out = TypeScriptSpecRenderer
            .render(&sample_functions(), &config)
            .unwrap();
        let hello = out.find("readonly helloWorld:").unwrap();
        let heading = out.find("// Math operations").unwrap();
        assert!(hello < heading);
    }

    #[test]
    fn registry_lookup_names_the_module() {
        let config = sample_config();
        let out = TypeScriptSpecRenderer
            .render(&sample_functions(), &config)
            .unwrap();
        assert!(out.ends_with("export default TurboModuleRegistry.getEnforcing<Spec>('NimBridge');\n"));
    }
}
