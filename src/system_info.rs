use git_version::git_version;

// include -modified if the working tree has uncommitted changes
const COMMIT: &str = git_version!(
    args = ["--abbrev=10", "--always", "--dirty=-modified"],
    fallback = "unknown"
);

/// Version, commit, build profile and the generation model in use.
pub fn get_system_info(model: &str) -> String {
    let profile = if cfg!(debug_assertions) {
        "Dev"
    } else {
        "Release"
    };

    format!(
        "{} {}\nCommit: {}\nModel: {}\n{} build",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        COMMIT,
        model,
        profile
    )
}
