use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::ffi::OsString;
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

#[derive(Serialize)]
struct Callsite {
    file: &'static str,
    line: u32,
}

/// Contents of `<stem>.provenance.json`.
#[derive(Serialize)]
struct Sidecar<'a> {
    code_rev: String,
    version: &'static str,
    callsite: Callsite,
    params: &'a Value,
    outputs: Vec<String>,
}

/// Write `<stem>.provenance.json` next to `artifact` recording the code
/// revision, the calling site, `params` and the artifact path.
#[track_caller]
pub fn write_sidecar<P: AsRef<Path>>(artifact: P, params: &Value) -> Result<PathBuf> {
    let artifact = artifact.as_ref();
    let path = sidecar_path(artifact);
    let caller = Location::caller();
    let doc = Sidecar {
        code_rev: current_git_rev(),
        version: polytopes::VERSION,
        callsite: Callsite {
            file: caller.file(),
            line: caller.line(),
        },
        params,
        outputs: vec![artifact.to_string_lossy().into_owned()],
    };
    fs::write(&path, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

fn sidecar_path(artifact: &Path) -> PathBuf {
    let mut name = artifact
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| OsString::from("artifact"));
    name.push(".provenance.json");
    artifact.with_file_name(name)
}

/// Commit hash from `GIT_COMMIT` (build time, then run time) or `git`.
pub fn current_git_rev() -> String {
    if let Some(rev) = option_env!("GIT_COMMIT").filter(|s| !s.is_empty()) {
        return rev.to_string();
    }
    if let Ok(rev) = std::env::var("GIT_COMMIT") {
        if !rev.is_empty() {
            return rev;
        }
    }
    Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|out| out.status.success())
        .and_then(|out| String::from_utf8(out.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn sidecar_replaces_the_extension() {
        assert_eq!(
            sidecar_path(Path::new("/tmp/out/cube.txt")),
            Path::new("/tmp/out/cube.provenance.json")
        );
        assert_eq!(sidecar_path(Path::new("hull")), Path::new("hull.provenance.json"));
    }

    #[test]
    fn sidecar_records_params_and_outputs() {
        let dir = tempdir().unwrap();
        let artifact = dir.path().join("cube.txt");
        fs::write(&artifact, "PDim: 3\n").unwrap();
        let path = write_sidecar(&artifact, &json!({"eps": 1e-8})).unwrap();
        assert!(path.exists());
        let parsed: Value = serde_json::from_slice(&fs::read(path).unwrap()).unwrap();
        assert_eq!(parsed["outputs"][0], artifact.to_string_lossy().as_ref());
        assert_eq!(parsed["params"]["eps"], 1e-8);
        assert!(parsed["callsite"]["file"].as_str().unwrap().ends_with("provenance.rs"));
    }
}
