use std::process::Command;

fn main() {
    let commit = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .unwrap_or_else(|| "unknown".into());
    println!("cargo:rustc-env=HERALD_GIT_COMMIT={}", commit.trim());

    let built_at = chrono::Utc::now().to_rfc3339();
    println!("cargo:rustc-env=HERALD_BUILD_TIME={built_at}");
    println!("cargo:rerun-if-changed=.git/HEAD");
}
