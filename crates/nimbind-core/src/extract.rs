//! Hand-written scanner for exported Nim procs.
//!
//! Recognizes declarations of the form
//! `proc name*(a: int, b: string): cstring {.exportc.}` and produces one
//! [`FunctionModel`] per match. Extraction is best-effort: text that does not
//! match the pattern is ignored without error, so partial or malformed
//! sources never abort a run.
//!
//! Memory ownership of textual returns is resolved in two steps: an explicit
//! `@literal` / `@allocated` marker in the doc comment lines immediately
//! above the declaration wins; otherwise the function body is scanned for an
//! `allocCString` call as a last-resort fallback. The fallback is total —
//! a textual return is never left untagged.

use crate::model::{FunctionModel, NimType, Ownership, Param};

/// How many lines above a declaration are searched for an ownership marker.
const ANNOTATION_LOOKBACK: usize = 4;

/// Accumulates extracted functions across source files, preserving
/// file-then-in-file order.
#[derive(Debug, Default)]
pub struct Discovery {
    functions: Vec<FunctionModel>,
}

impl Discovery {
    pub fn new() -> Self {
        Discovery::default()
    }

    /// Extract one source text and append its functions. Returns how many
    /// functions this source contributed.
    pub fn add_source(&mut self, content: &str) -> usize {
        let found = extract_functions(content);
        let count = found.len();
        self.functions.extend(found);
        count
    }

    /// Whether any exported function was found across all sources. `false`
    /// is the terminal "nothing to generate" outcome.
    pub fn found_any(&self) -> bool {
        !self.functions.is_empty()
    }

    /// The accumulated functions, in discovery order.
    pub fn functions(&self) -> &[FunctionModel] {
        &self.functions
    }

    /// Consume the discovery, yielding the accumulated functions.
    pub fn into_functions(self) -> Vec<FunctionModel> {
        self.functions
    }
}

/// Extract all exported procs from a single Nim source text.
pub fn extract_functions(content: &str) -> Vec<FunctionModel> {
    let mut functions = Vec::new();
    let mut pos = 0;

    while let Some(rel) = content[pos..].find("proc ") {
        let start = pos + rel;
        pos = start + "proc ".len();

        // Reject matches inside a longer identifier (e.g. "reproc ").
        if let Some(prev) = content[..start].chars().next_back() {
            if prev.is_alphanumeric() || prev == '_' {
                continue;
            }
        }

        if let Some((func, decl_end)) = match_declaration(content, start) {
            functions.push(func);
            pos = decl_end;
        }
    }

    functions
}

/// Try to match one exported declaration starting at the `proc` keyword.
///
/// Returns the extracted model and the offset just past the pragma block,
/// or `None` when the text does not fit the pattern.
fn match_declaration(content: &str, start: usize) -> Option<(FunctionModel, usize)> {
    let mut cur = skip_ws(content, start + "proc ".len());

    // Function name, followed by the `*` export marker.
    let name_end = ident_end(content, cur);
    if name_end == cur {
        return None;
    }
    let name = &content[cur..name_end];
    cur = name_end;
    if !content[cur..].starts_with('*') {
        return None;
    }
    cur = skip_ws(content, cur + 1);

    // Parenthesized parameter list.
    if !content[cur..].starts_with('(') {
        return None;
    }
    let params_close = matching_paren(content, cur)?;
    let raw_params = &content[cur + 1..params_close];
    cur = skip_ws(content, params_close + 1);

    // Declared return type.
    if !content[cur..].starts_with(':') {
        return None;
    }
    cur = skip_ws(content, cur + 1);
    let ret_end = ident_end(content, cur);
    if ret_end == cur {
        return None;
    }
    let return_type = NimType::parse(&content[cur..ret_end]);
    cur = skip_ws(content, ret_end);

    // Pragma block; it must carry the exportc marker. Pragmas do not nest,
    // so the first `}` closes the block.
    if !content[cur..].starts_with('{') {
        return None;
    }
    let pragma_end = cur + content[cur..].find('}')?;
    if !content[cur..=pragma_end].contains("exportc") {
        return None;
    }
    let decl_end = pragma_end + 1;

    let ownership = if return_type.is_textual() {
        Some(infer_ownership(content, start, decl_end))
    } else {
        None
    };

    let func = FunctionModel {
        name: name.to_string(),
        return_type,
        params: parse_params(raw_params),
        ownership,
        alias: None,
    };
    Some((func, decl_end))
}

/// Resolve the memory ownership of a textual return.
///
/// Primary: an explicit `@literal` / `@allocated` marker in the doc comment
/// lines directly above the declaration, searching upward through at most
/// [`ANNOTATION_LOOKBACK`] lines and stopping at the first non-blank line
/// that is not a `##` comment. Fallback: scan the body (declaration end to
/// the next `proc` at start of line, or end of source) for an
/// `allocCString` call.
fn infer_ownership(content: &str, decl_start: usize, decl_end: usize) -> Ownership {
    for line in content[..decl_start].lines().rev().take(ANNOTATION_LOOKBACK) {
        let line = line.trim();
        if line.contains("@literal") {
            return Ownership::Literal;
        }
        if line.contains("@allocated") {
            return Ownership::Allocated;
        }
        if !line.is_empty() && !line.starts_with("##") {
            break;
        }
    }

    let body = match content[decl_end..].find("\nproc ") {
        Some(next) => &content[decl_end..decl_end + next],
        None => &content[decl_end..],
    };
    if body.contains("allocCString") {
        Ownership::Allocated
    } else {
        Ownership::Literal
    }
}

/// Parse a raw parameter list into ordered (name, type) pairs.
///
/// Entries split at top-level commas; each entry splits at its first colon.
/// Entries without a colon are dropped. Empty text yields an empty list.
fn parse_params(raw: &str) -> Vec<Param> {
    let mut params = Vec::new();
    for entry in split_top_level(raw) {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }
        if let Some((name, ty)) = entry.split_once(':') {
            params.push(Param {
                name: name.trim().to_string(),
                ty: NimType::parse(ty.trim()),
            });
        }
    }
    params
}

/// Split on commas that sit outside any bracket nesting.
fn split_top_level(s: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in s.char_indices() {
        match c {
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&s[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&s[start..]);
    parts
}

/// Index of the `)` matching the `(` at `open`, honoring nesting.
fn matching_paren(s: &str, open: usize) -> Option<usize> {
    let bytes = s.as_bytes();
    let mut depth = 0usize;
    let mut i = open;
    while i < bytes.len() {
        match bytes[i] {
            b'(' | b'[' => depth += 1,
            b')' | b']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

fn skip_ws(s: &str, mut i: usize) -> usize {
    let bytes = s.as_bytes();
    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    i
}

fn ident_end(s: &str, mut i: usize) -> usize {
    let bytes = s.as_bytes();
    while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_') {
        i += 1;
    }
    i
}
