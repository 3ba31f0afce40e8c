use std::fs;
use std::path::{Path, PathBuf};

/// Embed a short commit id in `ledger --version`.
///
/// `LEDGER_BUILD_SHA` in the build environment wins (release tarballs have no
/// `.git`); otherwise HEAD is resolved straight from the git directory.
fn main() {
    println!("cargo:rerun-if-env-changed=LEDGER_BUILD_SHA");

    let git_dir = PathBuf::from(env_or("CARGO_MANIFEST_DIR", ".")).join("../.git");
    let head = git_dir.join("HEAD");
    if head.exists() {
        println!("cargo:rerun-if-changed={}", head.display());
    }

    let sha = std::env::var("LEDGER_BUILD_SHA")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .or_else(|| head_commit(&git_dir))
        .map(|s| s.trim().chars().take(7).collect::<String>())
        .unwrap_or_else(|| "unknown".to_string());

    println!("cargo:rustc-env=LEDGER_BUILD_SHA={sha}");
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// HEAD is either a bare commit id (detached) or `ref: refs/heads/<branch>`,
/// the latter stored loose or in `packed-refs`.
fn head_commit(git_dir: &Path) -> Option<String> {
    let head = fs::read_to_string(git_dir.join("HEAD")).ok()?;
    let Some(reference) = head.trim().strip_prefix("ref: ") else {
        return Some(head.trim().to_string());
    };
    if let Ok(loose) = fs::read_to_string(git_dir.join(reference)) {
        return Some(loose.trim().to_string());
    }
    let packed = fs::read_to_string(git_dir.join("packed-refs")).ok()?;
    packed.lines().find_map(|line| {
        let (sha, name) = line.split_once(' ')?;
        (name == reference).then(|| sha.to_string())
    })
}
