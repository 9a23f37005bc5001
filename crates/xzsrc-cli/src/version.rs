//! XZ Utils release selection.
//!
//! Priority: the `XZ_VERSION` environment override, then `xz-version.json`,
//! then a built-in fallback. Tags are normalized to carry a leading `v`.

use std::fmt;
use std::path::Path;
use std::path::PathBuf;

use anyhow::Result;
use anyhow::bail;
use serde::Deserialize;
use serde::Serialize;
use tracing::info;
use tracing::warn;

/// Environment variable holding a version override.
pub const VERSION_ENV: &str = "XZ_VERSION";

/// Release used when neither the environment nor the config names one.
pub const FALLBACK_VERSION: &str = "v5.4.0";

const TARBALL_URL_BASE: &str = "https://api.github.com/repos/tukaani-project/xz/tarball";

/// Contents of `xz-version.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct VersionConfig {
    pub version: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default = "default_allow_override")]
    pub allow_override: bool,
}

const fn default_allow_override() -> bool {
    true
}

impl VersionConfig {
    /// Reads the config file, returning `None` when it does not exist.
    ///
    /// An unreadable or malformed file is reported and treated as absent.
    pub fn load(path: &Path) -> Option<Self> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "could not read version config");
                return None;
            }
        };

        match serde_json::from_str::<Self>(&contents) {
            Ok(config) => {
                info!(
                    version = config.version.as_deref().unwrap_or("unknown"),
                    comment = config.comment.as_deref().unwrap_or("no comment"),
                    allow_override = config.allow_override,
                    "loaded version config"
                );
                Some(config)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "could not parse version config");
                None
            }
        }
    }
}

/// Where the resolved version came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "path")]
pub enum VersionSource {
    Environment,
    ConfigFile(PathBuf),
    Fallback,
}

impl fmt::Display for VersionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Environment => write!(f, "{VERSION_ENV} environment variable"),
            Self::ConfigFile(path) => write!(f, "{}", path.display()),
            Self::Fallback => f.write_str("built-in fallback"),
        }
    }
}

/// A release tag and its provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedVersion {
    pub tag: String,
    pub source: VersionSource,
}

impl ResolvedVersion {
    /// GitHub tarball URL for this release.
    pub fn tarball_url(&self) -> String {
        format!("{TARBALL_URL_BASE}/{}", self.tag)
    }
}

/// Picks the release to fetch.
///
/// `env_override` is the value of [`VERSION_ENV`], read once by the caller.
/// A non-blank override always wins over the config file.
///
/// # Errors
///
/// Returns an error for the `latest` alias, which needs the remote release
/// API.
pub fn resolve_version(env_override: Option<&str>, config_path: &Path) -> Result<ResolvedVersion> {
    if let Some(requested) = env_override.map(str::trim).filter(|v| !v.is_empty()) {
        if requested.eq_ignore_ascii_case("latest") {
            bail!(
                "{VERSION_ENV}=latest requires querying the GitHub release API\n\
                 HINT: Set {VERSION_ENV} to an explicit tag such as v5.8.1."
            );
        }
        return Ok(ResolvedVersion {
            tag: normalize_tag(requested),
            source: VersionSource::Environment,
        });
    }

    if let Some(version) = VersionConfig::load(config_path)
        .and_then(|c| c.version)
        .filter(|v| !v.trim().is_empty())
    {
        return Ok(ResolvedVersion {
            tag: normalize_tag(version.trim()),
            source: VersionSource::ConfigFile(config_path.to_path_buf()),
        });
    }

    Ok(ResolvedVersion {
        tag: FALLBACK_VERSION.to_string(),
        source: VersionSource::Fallback,
    })
}

/// Ensures a release tag starts with `v`.
///
/// ```text
/// 5.4.0  -> v5.4.0
/// v5.8.1 -> v5.8.1
/// ```
pub fn normalize_tag(version: &str) -> String {
    if version.starts_with('v') {
        version.to_string()
    } else {
        format!("v{version}")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config_file(temp: &TempDir, contents: &str) -> PathBuf {
        let path = temp.path().join("xz-version.json");
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_normalize_tag() {
        assert_eq!(normalize_tag("5.4.0"), "v5.4.0");
        assert_eq!(normalize_tag("v5.8.1"), "v5.8.1");
    }

    #[test]
    fn test_env_override_wins() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let path = config_file(&temp, r#"{"version": "v5.6.2"}"#);

        let resolved = resolve_version(Some("5.8.1"), &path).unwrap();
        assert_eq!(resolved.tag, "v5.8.1");
        assert_eq!(resolved.source, VersionSource::Environment);
    }

    #[test]
    fn test_config_file_used_without_override() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let path = config_file(
            &temp,
            r#"{"version": "5.6.2", "comment": "pinned for CI", "allow_override": true}"#,
        );

        let resolved = resolve_version(Some("   "), &path).unwrap();
        assert_eq!(resolved.tag, "v5.6.2");
        assert_eq!(resolved.source, VersionSource::ConfigFile(path));
    }

    #[test]
    fn test_env_override_ignores_allow_override_flag() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let path = config_file(&temp, r#"{"version": "v5.6.2", "allow_override": false}"#);

        let resolved = resolve_version(Some("v5.8.1"), &path).unwrap();
        assert_eq!(resolved.tag, "v5.8.1");
        assert_eq!(resolved.source, VersionSource::Environment);
    }

    #[test]
    fn test_fallback_when_config_missing_or_broken() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let missing = temp.path().join("absent.json");
        let resolved = resolve_version(None, &missing).unwrap();
        assert_eq!(resolved.tag, FALLBACK_VERSION);
        assert_eq!(resolved.source, VersionSource::Fallback);

        let broken = config_file(&temp, "{ not json");
        assert_eq!(resolve_version(None, &broken).unwrap().tag, FALLBACK_VERSION);
    }

    #[test]
    fn test_latest_is_rejected() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let err = resolve_version(Some("LATEST"), &temp.path().join("absent.json")).unwrap_err();
        assert!(err.to_string().contains("HINT"));
    }

    #[test]
    fn test_tarball_url() {
        let resolved = ResolvedVersion {
            tag: "v5.4.0".into(),
            source: VersionSource::Fallback,
        };
        assert_eq!(
            resolved.tarball_url(),
            "https://api.github.com/repos/tukaani-project/xz/tarball/v5.4.0"
        );
    }
}
