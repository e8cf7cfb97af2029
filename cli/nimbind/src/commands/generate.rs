//! `nimbind generate` — the full discovery → override → render → write run.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use nimbind_core::{overrides, Discovery, GeneratorConfig};
use nimbind_emit::{render_all, ArtifactKind, ArtifactResult};

/// Run the generation workflow described by the config at `config_path`.
///
/// Discovery scans `*.nim` files under the configured source directory in
/// sorted order; an unreadable file is reported and skipped. Zero exported
/// functions across all files halts the run before any rendering. Each
/// artifact renders and writes independently: one failure never blocks the
/// others.
pub fn run(config_path: &Path, report_format: Option<&str>) -> Result<()> {
    let config = GeneratorConfig::load(config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;
    let base_dir = config_path.parent().unwrap_or_else(|| Path::new("."));
    let nim_dir = base_dir.join(&config.project.nim_dir);
    let output_dir = base_dir.join(&config.project.output_dir);

    // Deterministic discovery order: sorted file list, then in-file order.
    let nim_files = collect_nim_files(&nim_dir)
        .with_context(|| format!("scanning {}", nim_dir.display()))?;
    if nim_files.is_empty() {
        println!("No Nim files found in {}", nim_dir.display());
        return Ok(());
    }

    let mut discovery = Discovery::new();
    let mut per_file: Vec<(String, usize)> = Vec::new();
    for path in &nim_files {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("<unnamed>")
            .to_string();
        match fs::read_to_string(path) {
            Ok(content) => {
                let count = discovery.add_source(&content);
                if count > 0 {
                    println!("Found {count} exported functions in {file_name}");
                }
                per_file.push((file_name, count));
            }
            Err(e) => {
                eprintln!("warning: skipping unreadable {}: {e}", path.display());
            }
        }
    }

    if !discovery.found_any() {
        println!("No exported functions found — nothing to generate.");
        return Ok(());
    }

    let functions = overrides::apply(discovery.into_functions(), &config.overrides);
    let results = render_all(&functions, &config);

    let mut failures = 0usize;
    let mut artifact_reports = Vec::new();
    for result in &results {
        let path = output_dir.join(artifact_path(result.kind, &config));
        match write_artifact(result, &path) {
            Ok(()) => {
                println!("Generated {}", path.display());
                artifact_reports.push((result.kind, path, None));
            }
            Err(e) => {
                eprintln!("Error generating {}: {e:#}", result.kind.name());
                failures += 1;
                artifact_reports.push((result.kind, path, Some(format!("{e:#}"))));
            }
        }
    }

    match report_format {
        Some("json") => print_json_report(functions.len(), &per_file, &artifact_reports)?,
        _ => print_summary(functions.len(), &artifact_reports),
    }

    if failures > 0 {
        anyhow::bail!("{failures} of {} artifacts failed", results.len());
    }
    Ok(())
}

/// All `*.nim` files directly under `nim_dir`, sorted by path.
fn collect_nim_files(nim_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(nim_dir)? {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) == Some("nim") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn write_artifact(result: &ArtifactResult, path: &Path) -> Result<()> {
    let text = result
        .outcome
        .as_ref()
        .map_err(|e| anyhow::anyhow!("{e}"))?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// Map a logical artifact identifier to its output path. Path layout is a
/// CLI concern; renderers never see it.
fn artifact_path(kind: ArtifactKind, config: &GeneratorConfig) -> PathBuf {
    let module = &config.project.module_name;
    let library = &config.project.library_name;
    let package_path = config.project.package_name.replace('.', "/");
    let kotlin_dir = Path::new("android/src/main/java").join(&package_path);
    let cpp_dir = Path::new("android/src/main/cpp");
    match kind {
        ArtifactKind::LibraryHeader => PathBuf::from("ios").join(format!("{library}.h")),
        ArtifactKind::ModuleHeader => PathBuf::from("ios").join(format!("{module}.h")),
        ArtifactKind::ObjcBridge => PathBuf::from("ios").join(format!("{module}.mm")),
        ArtifactKind::KotlinModule => kotlin_dir.join(format!("{module}Module.kt")),
        ArtifactKind::KotlinPackage => kotlin_dir.join(format!("{module}Package.kt")),
        ArtifactKind::JniBridge => cpp_dir.join(format!("{module}.cpp")),
        ArtifactKind::CmakeLists => cpp_dir.join("CMakeLists.txt"),
        ArtifactKind::TypeScriptSpec => PathBuf::from("src").join(format!("Native{module}.ts")),
    }
}

fn print_summary(
    function_count: usize,
    artifacts: &[(ArtifactKind, PathBuf, Option<String>)],
) {
    let written = artifacts.iter().filter(|(_, _, err)| err.is_none()).count();
    println!("\nGenerated bindings for {function_count} functions ({written} of {} artifacts)", artifacts.len());
    for (kind, _, err) in artifacts {
        if let Some(err) = err {
            println!("  failed: {} ({err})", kind.name());
        }
    }
}

fn print_json_report(
    function_count: usize,
    per_file: &[(String, usize)],
    artifacts: &[(ArtifactKind, PathBuf, Option<String>)],
) -> Result<()> {
    let json = serde_json::json!({
        "functions": function_count,
        "files": per_file
            .iter()
            .map(|(file, count)| serde_json::json!({ "file": file, "functions": count }))
            .collect::<Vec<_>>(),
        "artifacts": artifacts
            .iter()
            .map(|(kind, path, err)| {
                serde_json::json!({
                    "artifact": kind.name(),
                    "path": path.display().to_string(),
                    "status": if err.is_none() { "ok" } else { "error" },
                    "error": err,
                })
            })
            .collect::<Vec<_>>(),
    });
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
