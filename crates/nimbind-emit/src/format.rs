//! Shared formatting helpers reused across renderers.

/// The generated-file banner, with `//` comments.
///
/// Every artifact starts with this so nobody edits bridge code by hand.
pub fn banner(description: &str) -> String {
    banner_with(description, "//")
}

/// The generated-file banner with a custom comment leader (`#` for CMake).
pub fn banner_with(description: &str, comment: &str) -> String {
    format!(
        "{comment} {description}\n\
         {comment} AUTO-GENERATED by nimbind. Do not edit; regenerate with `nimbind generate`.\n\n"
    )
}

/// Capitalize the first character of an identifier. Total: the empty string
/// maps to itself and single-character names are handled.
pub fn capitalize_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Derive the dispatch-layer method name from a public function name:
/// capitalize the first character and prefix the fixed `native` marker.
/// Both the Kotlin wrapper and the JNI thunk derive the same name from the
/// same input.
pub fn dispatch_name(name: &str) -> String {
    format!("native{}", capitalize_first(name))
}
