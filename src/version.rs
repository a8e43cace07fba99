// Include the generated version information
include!(concat!(env!("OUT_DIR"), "/version.rs"));

/// Application version string for display
pub fn get_version() -> &'static str {
    VERSION
}

pub fn get_git_hash() -> &'static str {
    GIT_HASH
}

pub fn get_build_time() -> &'static str {
    BUILD_TIME
}

/// Build metadata as printed by the `version-info` subcommand
pub fn build_info_lines() -> Vec<String> {
    vec![
        format!("Data Structure Visualizer v{}", get_version()),
        format!("Built: {} | Git: {}", get_build_time(), get_git_hash()),
    ]
}

pub fn print_build_info() {
    for line in build_info_lines() {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_info_mentions_version() {
        let lines = build_info_lines();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains(get_version()));
        assert!(lines[1].contains(get_git_hash()));
    }
}
