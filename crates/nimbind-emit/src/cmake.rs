//! CMake build file renderer for the JNI library.

use nimbind_core::{FunctionModel, GeneratorConfig};

use crate::artifact::{ensure_ownership_tags, ArtifactKind, Renderer};
use crate::error::Result;
use crate::format::banner_with;

pub struct CmakeListsRenderer;

impl Renderer for CmakeListsRenderer {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::CmakeLists
    }

    fn render(&self, functions: &[FunctionModel], config: &GeneratorConfig) -> Result<String> {
        ensure_ownership_tags(functions)?;
        let module = &config.project.module_name;
        let library = &config.project.library_name;

        let mut out = banner_with("CMake build for the JNI bridge library", "#");
        out.push_str("cmake_minimum_required(VERSION 3.13)\n");
        out.push_str(&format!("project({library})\n\n"));
        out.push_str(&format!("add_library(\n    {library}\n    SHARED\n    {module}.cpp\n)\n\n"));
        out.push_str("find_library(log-lib log)\n\n");
        out.push_str(&format!(
            "target_link_libraries(\n    {library}\n    ${{log-lib}}\n)\n"
        ));
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{sample_config, sample_functions};

    #[test]
    fn cmake_builds_the_configured_library() {
        let config = sample_config();
        let out = CmakeListsRenderer
            .render(&sample_functions(), &config)
            .unwrap();
        assert!(out.starts_with("# CMake build"));
        assert!(out.contains("project(nim_functions)"));
        assert!(out.contains("NimBridge.cpp"));
        assert!(out.contains("${log-lib}"));
    }
}
