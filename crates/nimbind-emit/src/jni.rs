//! JNI C++ thunk renderer for the Android managed wrapper.
//!
//! The import block declares the Nim entry points through the same C/C++
//! mapping table as the native-call header, so both artifacts agree on
//! native-side types. Each exported JNI method converts `jstring`
//! parameters, calls the entry point, copies a textual result into a Java
//! string (releasing allocated results immediately after the copy), and
//! releases parameter strings before returning.

use nimbind_core::{FunctionModel, GeneratorConfig, NimType, Ownership, TargetSystem};

use crate::artifact::{ensure_ownership_tags, ArtifactKind, Renderer};
use crate::error::Result;
use crate::format::{banner, dispatch_name};

pub struct JniBridgeRenderer;

impl Renderer for JniBridgeRenderer {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::JniBridge
    }

    fn render(&self, functions: &[FunctionModel], config: &GeneratorConfig) -> Result<String> {
        ensure_ownership_tags(functions)?;
        let map = config.type_map();

        let mut out = banner("JNI C++ thunk for the Android managed wrapper");
        out.push_str("#include <jni.h>\n#include <string>\n\n");
        out.push_str("// Import the Nim entry points\n");
        out.push_str("extern \"C\" {\n");
        out.push_str("    typedef char* NCSTRING;\n\n");

        for func in functions {
            let ret = map.resolve(TargetSystem::Cpp, &func.return_type);
            let params = func
                .params
                .iter()
                .map(|p| format!("{} {}", map.resolve(TargetSystem::Cpp, &p.ty), p.name))
                .collect::<Vec<_>>()
                .join(", ");
            out.push_str(&format!("    {ret} {}({params});\n", func.name));
        }

        out.push_str("\n    void mobileNimInit();\n");
        out.push_str("    void mobileNimShutdown();\n");
        out.push_str("    void freeString(NCSTRING s);\n");
        out.push_str("}\n\n");
        out.push_str("// Initialize the Nim runtime once, on first use\n");
        out.push_str("static bool nimInitialized = false;\n\n");
        out.push_str("static void initializeNim() {\n");
        out.push_str("    if (!nimInitialized) {\n");
        out.push_str("        mobileNimInit();\n");
        out.push_str("        nimInitialized = true;\n");
        out.push_str("    }\n");
        out.push_str("}\n\n");

        for func in functions {
            out.push_str(&render_jni_method(func, config));
        }

        Ok(out)
    }
}

/// Render one `Java_<package>_<Module>Module_native<Name>` export.
fn render_jni_method(func: &FunctionModel, config: &GeneratorConfig) -> String {
    let map = config.type_map();
    let package_path = config.project.package_name.replace('.', "_");
    let class_name = format!("{package_path}_{}Module", config.project.module_name);
    let method = dispatch_name(&func.name);
    let jni_ret = jni_type(&func.return_type);

    let mut jni_params = vec!["JNIEnv *env".to_string(), "jclass clazz".to_string()];
    for p in &func.params {
        jni_params.push(format!("{} {}", jni_type(&p.ty), p.name));
    }

    let mut out = format!("extern \"C\" JNIEXPORT {jni_ret} JNICALL\n");
    out.push_str(&format!(
        "Java_{class_name}_{method}({}) {{\n",
        jni_params.join(", ")
    ));
    out.push_str("    initializeNim();\n");

    // Pull UTF-8 views of string parameters before the call.
    for p in &func.params {
        if p.ty.is_textual() {
            out.push_str(&format!(
                "    const char* {0}Str = env->GetStringUTFChars({0}, 0);\n",
                p.name
            ));
        }
    }

    let args = func
        .params
        .iter()
        .map(|p| {
            if p.ty.is_textual() {
                format!("({}){}Str", map.resolve(TargetSystem::Cpp, &p.ty), p.name)
            } else {
                p.name.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(", ");

    let release_params = |out: &mut String| {
        for p in &func.params {
            if p.ty.is_textual() {
                out.push_str(&format!(
                    "    env->ReleaseStringUTFChars({0}, {0}Str);\n",
                    p.name
                ));
            }
        }
    };

    let cpp_ret = map.resolve(TargetSystem::Cpp, &func.return_type);
    if func.return_type.is_textual() {
        out.push_str(&format!("    {cpp_ret} result = {}({args});\n", func.name));
        out.push_str("    jstring javaString = env->NewStringUTF(result);\n");
        if func.ownership == Some(Ownership::Allocated) {
            out.push_str("    if (result) freeString(result);\n");
        }
        release_params(&mut out);
        out.push_str("    return javaString;\n");
    } else if func.return_type == NimType::Int64 {
        out.push_str(&format!("    {cpp_ret} result = {}({args});\n", func.name));
        release_params(&mut out);
        out.push_str("    return (jlong)result;\n");
    } else {
        out.push_str(&format!("    {cpp_ret} result = {}({args});\n", func.name));
        release_params(&mut out);
        out.push_str("    return (jint)result;\n");
    }

    out.push_str("}\n\n");
    out
}

fn jni_type(ty: &NimType) -> &'static str {
    match ty {
        NimType::CString | NimType::String => "jstring",
        NimType::Int64 => "jlong",
        _ => "jint",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::LibraryHeaderRenderer;
    use crate::testutil::{sample_config, sample_functions};

    #[test]
    fn jni_method_names_follow_package_and_dispatch_convention() {
        let config = sample_config();
        let out = JniBridgeRenderer
            .render(&sample_functions(), &config)
            .unwrap();
        assert!(out.contains("Java_com_nimbridge_NimBridgeModule_nativeHelloWorld(JNIEnv *env, jclass clazz)"));
        assert!(out.contains("Java_com_nimbridge_NimBridgeModule_nativeGreet(JNIEnv *env, jclass clazz, jstring name)"));
    }

    #[test]
    fn allocated_result_freed_after_java_copy() {
        let config = sample_config();
        let out = JniBridgeRenderer
            .render(&sample_functions(), &config)
            .unwrap();
        let method = out.find("nativeGreet").unwrap();
        let tail = &out[method..];
        let copy = tail.find("NewStringUTF(result)").unwrap();
        let free = tail.find("freeString(result)").unwrap();
        let release = tail.find("ReleaseStringUTFChars").unwrap();
        let ret = tail.find("return javaString;").unwrap();
        assert!(copy < free && free < release && release < ret);
    }

    #[test]
    fn literal_result_not_freed() {
        let config = sample_config();
        let out = JniBridgeRenderer
            .render(&sample_functions(), &config)
            .unwrap();
        let method = out.find("nativeHelloWorld").unwrap();
        let end = out[method..].find("}\n\n").unwrap() + method;
        assert!(!out[method..end].contains("freeString"));
    }

    #[test]
    fn import_block_types_agree_with_library_header() {
        // Cross-renderer consistency: the native declarations in the JNI
        // thunk resolve through the same C/C++ table as the header.
        let config = sample_config();
        let funcs = sample_functions();
        let header = LibraryHeaderRenderer.render(&funcs, &config).unwrap();
        let jni = JniBridgeRenderer.render(&funcs, &config).unwrap();
        assert!(header.contains("NCSTRING greet(NCSTRING name);"));
        assert!(jni.contains("NCSTRING greet(NCSTRING name);"));
        assert!(header.contains("int addNumbers(int a, int b);"));
        assert!(jni.contains("int addNumbers(int a, int b);"));
    }

    #[test]
    fn string_params_released_before_return() {
        let config = sample_config();
        let out = JniBridgeRenderer
            .render(&sample_functions(), &config)
            .unwrap();
        let method = out.find("nativeGreet").unwrap();
        let tail = &out[method..];
        let release = tail.find("env->ReleaseStringUTFChars(name, nameStr);").unwrap();
        let ret = tail.find("return javaString;").unwrap();
        assert!(release < ret);
    }
}
