//! Version information with embedded git metadata.

/// Package version from Cargo.toml.
pub const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Git commit SHA (short) at build time, or "unknown" if unavailable.
pub const GIT_SHA: &str = match option_env!("VERGEN_GIT_SHA") {
    Some(sha) => sha,
    None => "unknown",
};

/// Whether the working tree was dirty at build time.
pub fn git_dirty() -> bool {
    option_env!("VERGEN_GIT_DIRTY") == Some("true")
}

/// Full version string: `{version}+{sha}` or `{version}+{sha}.dirty`.
pub fn version_string() -> String {
    let dirty_suffix = if git_dirty() { ".dirty" } else { "" };
    format!(
        "{PKG_VERSION}+{}{dirty_suffix}",
        &GIT_SHA[..7.min(GIT_SHA.len())]
    )
}

/// `User-Agent` header value sent by [`HttpTransport`](crate::transport::HttpTransport).
pub fn user_agent() -> String {
    format!("portfolio-api/{}", version_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_string_contains_pkg_version() {
        let version = version_string();
        assert!(
            version.starts_with(PKG_VERSION),
            "version should start with pkg version"
        );
    }

    #[test]
    fn user_agent_names_the_crate() {
        let ua = user_agent();
        assert!(ua.starts_with("portfolio-api/"));
        assert!(ua.contains(PKG_VERSION));
    }

    #[test]
    fn sha_is_truncated() {
        let version = version_string();
        let sha_part = version.split('+').nth(1).unwrap_or_default();
        assert!(sha_part.trim_end_matches(".dirty").len() <= 7);
    }
}
