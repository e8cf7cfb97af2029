//! Native-call header renderer.
//!
//! Emits the C header forward-declaring every Nim entry point for the iOS
//! side. Textual types stay raw `NCSTRING` (a mutable `char*`) here because
//! ownership is still native-side at this layer; the release primitive is
//! declared alongside the functions.

use nimbind_core::{FunctionModel, GeneratorConfig, TargetSystem};

use crate::artifact::{ensure_ownership_tags, ArtifactKind, Renderer};
use crate::error::Result;
use crate::format::banner;

pub struct LibraryHeaderRenderer;

impl Renderer for LibraryHeaderRenderer {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::LibraryHeader
    }

    fn render(&self, functions: &[FunctionModel], config: &GeneratorConfig) -> Result<String> {
        ensure_ownership_tags(functions)?;
        let map = config.type_map();
        let guard = include_guard(&config.project.library_name);

        let mut out = banner("C declarations for the exported Nim functions");
        out.push_str(&format!("#ifndef {guard}\n#define {guard}\n\n"));
        out.push_str("#ifdef __cplusplus\nextern \"C\" {\n#endif\n\n");
        out.push_str("typedef char* NCSTRING;\n\n");
        out.push_str("// Nim runtime\n");
        out.push_str("void NimMain(void);\n");
        out.push_str("void mobileNimInit(void);\n");
        out.push_str("void mobileNimShutdown(void);\n\n");

        out.push_str("// Exported functions\n");
        for func in functions {
            let ret = map.resolve(TargetSystem::Cpp, &func.return_type);
            let params = if func.params.is_empty() {
                "void".to_string()
            } else {
                func.params
                    .iter()
                    .map(|p| format!("{} {}", map.resolve(TargetSystem::Cpp, &p.ty), p.name))
                    .collect::<Vec<_>>()
                    .join(", ")
            };
            out.push_str(&format!("{ret} {}({params});\n", func.name));
        }

        out.push_str("\n// Memory management\n");
        out.push_str("void freeString(NCSTRING s);\n\n");
        out.push_str("#ifdef __cplusplus\n}\n#endif\n\n");
        out.push_str(&format!("#endif // {guard}\n"));
        Ok(out)
    }
}

/// Derive an include guard from the library name.
fn include_guard(library_name: &str) -> String {
    let sanitized: String = library_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect();
    format!("{sanitized}_H")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{sample_config, sample_functions};

    #[test]
    fn header_declares_every_function_in_order() {
        let config = sample_config();
        let out = LibraryHeaderRenderer
            .render(&sample_functions(), &config)
            .unwrap();
        let hello = out.find("NCSTRING helloWorld(void);").unwrap();
        let add = out.find("int addNumbers(int a, int b);").unwrap();
        let greet = out.find("NCSTRING greet(NCSTRING name);").unwrap();
        assert!(hello < add && add < greet);
    }

    #[test]
    fn header_carries_runtime_and_release_decls() {
        let config = sample_config();
        let out = LibraryHeaderRenderer
            .render(&sample_functions(), &config)
            .unwrap();
        assert!(out.contains("void NimMain(void);"));
        assert!(out.contains("void freeString(NCSTRING s);"));
        assert!(out.contains("typedef char* NCSTRING;"));
        assert!(out.starts_with("// C declarations"));
    }

    #[test]
    fn include_guard_sanitizes_name() {
        assert_eq!(include_guard("nim_functions"), "NIM_FUNCTIONS_H");
        assert_eq!(include_guard("my-lib.2"), "MY_LIB_2_H");
    }

    #[test]
    fn rendering_is_idempotent() {
        let config = sample_config();
        let funcs = sample_functions();
        let a = LibraryHeaderRenderer.render(&funcs, &config).unwrap();
        let b = LibraryHeaderRenderer.render(&funcs, &config).unwrap();
        assert_eq!(a, b);
    }
}
