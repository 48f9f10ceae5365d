use std::path::{Path, PathBuf};
use std::process::Command;

/// Locates the JDK core asset (`lib/modules` or `rt.jar`).
pub fn find_jdk_asset() -> Option<PathBuf> {
    // 1. Try JAVA_HOME environment variable
    if let Ok(home) = std::env::var("JAVA_HOME") {
        if let Some(asset) = check_jdk_home(Path::new(&home)) {
            return Some(asset);
        }
    }

    // 2. Try macOS specific java_home utility
    #[cfg(target_os = "macos")]
    {
        if let Ok(output) = Command::new("/usr/libexec/java_home").output() {
            if output.status.success() {
                let path_str = String::from_utf8_lossy(&output.stdout).trim().to_string();
                if !path_str.is_empty() {
                    if let Some(asset) = check_jdk_home(Path::new(&path_str)) {
                        return Some(asset);
                    }
                }
            }
        }
    }

    // 3. Ask the java launcher for its home (printed on stderr)
    let output = Command::new("java")
        .arg("-XshowSettings:properties")
        .arg("-version")
        .output()
        .ok()?;
    let stderr = String::from_utf8_lossy(&output.stderr);
    stderr
        .lines()
        .filter_map(|line| line.trim().strip_prefix("java.home = "))
        .find_map(|home| check_jdk_home(Path::new(home.trim())))
}

/// Returns the core asset below a JDK/JRE home directory, if any.
pub fn check_jdk_home(home: &Path) -> Option<PathBuf> {
    [
        // JImage (Java 9+)
        home.join("lib").join("modules"),
        // rt.jar (Java 8)
        home.join("lib").join("rt.jar"),
        // Some JRE layouts
        home.join("jre").join("lib").join("rt.jar"),
    ]
    .into_iter()
    .find(|candidate| candidate.exists())
}
