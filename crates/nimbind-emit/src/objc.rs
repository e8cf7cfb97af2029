//! Objective-C renderers for the iOS side of the bridge.
//!
//! Two artifacts: the module header declaring the React bridge interface,
//! and the Objective-C++ implementation that initializes the Nim runtime
//! and exports one synchronous method per function.

use nimbind_core::{FunctionModel, GeneratorConfig, NimType, Ownership, TargetSystem};

use crate::artifact::{ensure_ownership_tags, ArtifactKind, Renderer};
use crate::error::Result;
use crate::format::{banner, capitalize_first};

pub struct ModuleHeaderRenderer;

impl Renderer for ModuleHeaderRenderer {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::ModuleHeader
    }

    fn render(&self, functions: &[FunctionModel], config: &GeneratorConfig) -> Result<String> {
        ensure_ownership_tags(functions)?;
        let module = &config.project.module_name;
        let mut out = banner("Objective-C bridge module header");
        out.push_str("#import <React/RCTBridgeModule.h>\n\n");
        out.push_str(&format!("@interface {module} : NSObject <RCTBridgeModule>\n\n"));
        out.push_str("@end\n");
        Ok(out)
    }
}

pub struct ObjcBridgeRenderer;

impl Renderer for ObjcBridgeRenderer {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::ObjcBridge
    }

    fn render(&self, functions: &[FunctionModel], config: &GeneratorConfig) -> Result<String> {
        ensure_ownership_tags(functions)?;
        let module = &config.project.module_name;
        let library = &config.project.library_name;

        let mut out = banner("Objective-C++ bridge implementation");
        out.push_str(&format!("#import \"{module}.h\"\n"));
        out.push_str(&format!("#include \"{library}.h\"\n\n"));
        out.push_str(&format!("@implementation {module}\n\n"));
        out.push_str("RCT_EXPORT_MODULE()\n\n");
        out.push_str("+ (BOOL)requiresMainQueueSetup\n{\n    return NO;\n}\n\n");
        out.push_str("- (instancetype)init\n{\n");
        out.push_str("    self = [super init];\n");
        out.push_str("    if (self) {\n");
        out.push_str("        NimMain();\n");
        out.push_str("        mobileNimInit();\n");
        out.push_str("    }\n");
        out.push_str("    return self;\n}\n\n");
        out.push_str("- (void)dealloc\n{\n    mobileNimShutdown();\n}\n\n");
        out.push_str("// Exported methods\n");

        for func in functions {
            out.push_str(&render_method(func, config));
        }

        out.push_str("@end\n");
        Ok(out)
    }
}

/// Render one `RCT_EXPORT_SYNCHRONOUS_TYPED_METHOD` block.
fn render_method(func: &FunctionModel, config: &GeneratorConfig) -> String {
    let map = config.type_map();
    let ret = map.resolve(TargetSystem::ObjC, &func.return_type);

    // Selector: first segment carries the function name, later segments the
    // `with<Param>` convention.
    let selector = if func.params.is_empty() {
        func.name.clone()
    } else {
        func.params
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let objc_ty = map.resolve(TargetSystem::ObjC, &p.ty);
                if i == 0 {
                    format!("{}:(nonnull {objc_ty}){}", func.name, p.name)
                } else {
                    format!("with{}:(nonnull {objc_ty}){}", capitalize_first(&p.name), p.name)
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    };

    let mut out = format!("RCT_EXPORT_SYNCHRONOUS_TYPED_METHOD({ret}, {selector})\n{{\n");
    out.push_str(&render_method_body(func));
    out.push_str("}\n\n");
    out
}

fn render_method_body(func: &FunctionModel) -> String {
    let args = func
        .params
        .iter()
        .map(|p| match p.ty {
            NimType::CString | NimType::String => format!("(NCSTRING)[{} UTF8String]", p.name),
            NimType::Int | NimType::CInt => format!("[{} intValue]", p.name),
            _ => p.name.clone(),
        })
        .collect::<Vec<_>>()
        .join(", ");

    let mut body = String::new();
    if func.return_type.is_textual() {
        body.push_str(&format!("    NCSTRING result = {}({args});\n", func.name));
        if func.ownership == Some(Ownership::Allocated) {
            // Copy first, release immediately after; never the other way.
            body.push_str(
                "    NSString *value = result ? [NSString stringWithUTF8String:result] : @\"\";\n",
            );
            body.push_str("    if (result) freeString(result);\n");
            body.push_str("    return value;\n");
        } else {
            body.push_str(
                "    return result ? [NSString stringWithUTF8String:result] : @\"\";\n",
            );
        }
    } else if func.return_type == NimType::Int64 {
        body.push_str(&format!("    long long result = {}({args});\n", func.name));
        body.push_str("    return @(result);\n");
    } else {
        body.push_str(&format!("    int result = {}({args});\n", func.name));
        body.push_str("    return @(result);\n");
    }
    body
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{sample_config, sample_functions};

    #[test]
    fn module_header_declares_bridge_interface() {
        let config = sample_config();
        let out = ModuleHeaderRenderer
            .render(&sample_functions(), &config)
            .unwrap();
        assert!(out.contains("@interface NimBridge : NSObject <RCTBridgeModule>"));
    }

    #[test]
    fn allocated_result_released_after_copy() {
        let config = sample_config();
        let out = ObjcBridgeRenderer
            .render(&sample_functions(), &config)
            .unwrap();
        // Scenario: `greet` is allocated — the free must come after the
        // NSString copy, never before.
        let method_start = out.find("greet:").unwrap();
        let tail = &out[method_start..];
        let copy = tail.find("stringWithUTF8String:result").unwrap();
        let free = tail.find("freeString(result)").unwrap();
        assert!(copy < free);
    }

    #[test]
    fn literal_result_never_freed() {
        let config = sample_config();
        let out = ObjcBridgeRenderer
            .render(&sample_functions(), &config)
            .unwrap();
        let method_start = out.find("RCT_EXPORT_SYNCHRONOUS_TYPED_METHOD(NSString *, helloWorld)").unwrap();
        let method_end = out[method_start..].find("}\n\n").unwrap() + method_start;
        assert!(!out[method_start..method_end].contains("freeString"));
    }

    #[test]
    fn multi_param_selector_uses_with_convention() {
        let config = sample_config();
        let out = ObjcBridgeRenderer
            .render(&sample_functions(), &config)
            .unwrap();
        assert!(out.contains("addNumbers:(nonnull NSNumber *)a withB:(nonnull NSNumber *)b"));
    }

    #[test]
    fn runtime_initialized_in_init() {
        let config = sample_config();
        let out = ObjcBridgeRenderer
            .render(&sample_functions(), &config)
            .unwrap();
        assert!(out.contains("NimMain();"));
        assert!(out.contains("mobileNimInit();"));
        assert!(out.contains("mobileNimShutdown();"));
    }
}
