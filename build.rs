use std::env;
use std::fs;
use std::path::Path;
use std::process::Command;

fn main() {
    let out_dir = env::var("OUT_DIR").unwrap();
    let dest_path = Path::new(&out_dir).join("version.rs");

    let git_version = get_git_version();
    let git_hash = get_git_hash();
    let build_time = chrono::Utc::now()
        .format("%Y-%m-%d %H:%M:%S UTC")
        .to_string();

    let version_code = format!(
        r#"
/// Version string generated at compile time
pub const VERSION: &str = "{}";

/// Git commit hash (short)
pub const GIT_HASH: &str = "{}";

/// Build timestamp
pub const BUILD_TIME: &str = "{}";
"#,
        git_version, git_hash, build_time
    );

    fs::write(&dest_path, version_code).unwrap();

    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/index");
}

/// Run git and return trimmed stdout, `None` if git is missing or fails
fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8(output.stdout).ok()?;
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

fn cargo_version() -> String {
    env::var("CARGO_PKG_VERSION").unwrap_or_else(|_| "0.1.0".to_string())
}

fn get_git_version() -> String {
    match git(&["describe", "--tags", "--dirty", "--always"]) {
        // A tag description such as v0.2.0-3-gabc1234 is used as-is
        Some(described) if described.starts_with('v') || described.contains('-') => described,
        // A bare commit hash means there is no tag yet
        Some(hash) => format!("{}-g{}", cargo_version(), &hash[..hash.len().min(7)]),
        None => match git(&["rev-parse", "--short", "HEAD"]) {
            Some(hash) => format!("{}-g{}", cargo_version(), hash),
            None => cargo_version(),
        },
    }
}

fn get_git_hash() -> String {
    git(&["rev-parse", "--short", "HEAD"]).unwrap_or_else(|| "unknown".to_string())
}
