//! Kotlin renderers for the Android managed wrapper.
//!
//! The module renderer emits, per function, an external-linkage declaration
//! of the native entry point using marshal-safe types (bool as 0/1 Int,
//! int64 widened to Long, textual as String) and a public wrapper that
//! narrows managed parameters, invokes the native method, converts the raw
//! result back, and swallows native faults into type-appropriate sentinels.

use nimbind_core::{FunctionModel, GeneratorConfig, NimType, TargetSystem};

use crate::artifact::{ensure_ownership_tags, ArtifactKind, Renderer};
use crate::error::Result;
use crate::format::{banner, dispatch_name};

pub struct KotlinModuleRenderer;

impl Renderer for KotlinModuleRenderer {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::KotlinModule
    }

    fn render(&self, functions: &[FunctionModel], config: &GeneratorConfig) -> Result<String> {
        ensure_ownership_tags(functions)?;
        let module = &config.project.module_name;
        let package = &config.project.package_name;
        let library = &config.project.library_name;

        let mut out = banner("Kotlin module for the managed wrapper");
        out.push_str(&format!("package {package}\n\n"));
        out.push_str("import com.facebook.react.bridge.ReactApplicationContext\n");
        out.push_str("import com.facebook.react.module.annotations.ReactModule\n");
        out.push_str(&format!("import {package}.Native{module}Spec\n\n"));
        out.push_str(&format!("@ReactModule(name = {module}Module.NAME)\n"));
        out.push_str(&format!(
            "class {module}Module(reactContext: ReactApplicationContext) : Native{module}Spec(reactContext) {{\n\n"
        ));
        out.push_str("    companion object {\n");
        out.push_str(&format!("        const val NAME = \"{module}\"\n\n"));
        out.push_str("        init {\n");
        out.push_str("            try {\n");
        out.push_str(&format!("                System.loadLibrary(\"{library}\")\n"));
        out.push_str(&format!(
            "                android.util.Log.d(\"{module}\", \"Native library {library} loaded successfully\")\n"
        ));
        out.push_str("            } catch (e: Exception) {\n");
        out.push_str(&format!(
            "                android.util.Log.e(\"{module}\", \"Failed to load native library {library}: ${{e.message}}\")\n"
        ));
        out.push_str("                e.printStackTrace()\n");
        out.push_str("            }\n");
        out.push_str("        }\n\n");

        for func in functions {
            out.push_str(&render_native_declaration(func));
        }

        out.push_str("    }\n\n");
        out.push_str("    override fun getName(): String = NAME\n");

        for func in functions {
            out.push_str(&render_wrapper_method(func, config));
        }

        out.push_str("}\n");
        Ok(out)
    }
}

/// The `external fun` declaration for one native entry point, in the
/// marshal-safe type set.
fn render_native_declaration(func: &FunctionModel) -> String {
    let params = func
        .params
        .iter()
        .map(|p| format!("{}: {}", p.name, native_param_type(&p.ty)))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "        @JvmStatic\n        private external fun {}({params}): {}\n",
        dispatch_name(&func.name),
        native_return_type(&func.return_type)
    )
}

/// The public wrapper method: narrow, call, widen, and never let a native
/// fault escape into managed code.
fn render_wrapper_method(func: &FunctionModel, config: &GeneratorConfig) -> String {
    let map = config.type_map();
    let external = func.external_name();
    let params = func
        .params
        .iter()
        .map(|p| format!("{}: {}", p.name, map.resolve(TargetSystem::Kotlin, &p.ty)))
        .collect::<Vec<_>>()
        .join(", ");
    let ret = map.resolve(TargetSystem::Kotlin, &func.return_type);

    let args = func
        .params
        .iter()
        .map(|p| match p.ty {
            NimType::CString | NimType::String => p.name.clone(),
            NimType::Int64 => format!("{}.toLong()", p.name),
            NimType::Bool => format!("if ({}) 1 else 0", p.name),
            _ => format!("{}.toInt()", p.name),
        })
        .collect::<Vec<_>>()
        .join(", ");

    let call = format!("{}({args})", dispatch_name(&func.name));
    let (converted, sentinel) = match func.return_type {
        NimType::Bool => (format!("{call} != 0"), "false".to_string()),
        NimType::CString | NimType::String => (call, "\"Error: ${e.message}\"".to_string()),
        _ => (format!("{call}.toDouble()"), "0.0".to_string()),
    };

    let mut out = format!("\n    override fun {external}({params}): {ret} {{\n");
    out.push_str("        return try {\n");
    out.push_str(&format!("            {converted}\n"));
    out.push_str("        } catch (e: Exception) {\n");
    out.push_str(&format!("            {sentinel}\n"));
    out.push_str("        }\n");
    out.push_str("    }\n");
    out
}

fn native_param_type(ty: &NimType) -> &'static str {
    match ty {
        NimType::CString | NimType::String => "String",
        NimType::Int64 => "Long",
        _ => "Int",
    }
}

fn native_return_type(ty: &NimType) -> &'static str {
    match ty {
        NimType::CString | NimType::String => "String",
        NimType::Int64 => "Long",
        _ => "Int",
    }
}

pub struct KotlinPackageRenderer;

impl Renderer for KotlinPackageRenderer {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::KotlinPackage
    }

    fn render(&self, functions: &[FunctionModel], config: &GeneratorConfig) -> Result<String> {
        ensure_ownership_tags(functions)?;
        let module = &config.project.module_name;
        let package = &config.project.package_name;

        let mut out = banner("Kotlin package registration for the managed wrapper");
        out.push_str(&format!("package {package}\n\n"));
        out.push_str("import com.facebook.react.TurboReactPackage\n");
        out.push_str("import com.facebook.react.bridge.NativeModule\n");
        out.push_str("import com.facebook.react.bridge.ReactApplicationContext\n");
        out.push_str("import com.facebook.react.module.model.ReactModuleInfo\n");
        out.push_str("import com.facebook.react.module.model.ReactModuleInfoProvider\n\n");
        out.push_str(&format!("class {module}Package : TurboReactPackage() {{\n\n"));
        out.push_str(
            "    override fun getModule(name: String, reactContext: ReactApplicationContext): NativeModule? {\n",
        );
        out.push_str(&format!(
            "        return if (name == {module}Module.NAME) {{\n"
        ));
        out.push_str(&format!("            {module}Module(reactContext)\n"));
        out.push_str("        } else {\n");
        out.push_str("            null\n");
        out.push_str("        }\n");
        out.push_str("    }\n\n");
        out.push_str("    override fun getReactModuleInfoProvider(): ReactModuleInfoProvider {\n");
        out.push_str("        return ReactModuleInfoProvider {\n");
        out.push_str("            mapOf(\n");
        out.push_str(&format!("                {module}Module.NAME to ReactModuleInfo(\n"));
        out.push_str(&format!("                    {module}Module.NAME,\n"));
        out.push_str(&format!(
            "                    {module}Module::class.java.name,\n"
        ));
        out.push_str("                    false, // canOverrideExistingModule\n");
        out.push_str("                    false, // needsEagerInit\n");
        out.push_str("                    true,  // isCxxModule\n");
        out.push_str("                    true   // isTurboModule\n");
        out.push_str("                )\n");
        out.push_str("            )\n");
        out.push_str("        }\n");
        out.push_str("    }\n");
        out.push_str("}\n");
        Ok(out)
    }
}
