//! Structural gate deciding whether a directory is a template, and for which platform.
//!
//! Only file existence is checked; no contents are read.

use std::path::Path;

use crate::model::Platform;

pub const MANIFEST_FILE: &str = "package.json";
pub const PROMPTS_DIR: &str = "prompts";
pub const SELECTION_PROMPT: &str = "selection.md";
pub const USAGE_PROMPT: &str = "usage.md";

/// Either file marks a Cloudflare Workers template.
pub const WORKERS_CONFIG_FILES: [&str; 2] = ["wrangler.jsonc", "wrangler.toml"];

/// Both files are required to mark a GCP template.
pub const GCP_MARKER_FILES: [&str; 2] = ["app.yaml", ".gcloudignore"];

/// Classifies `dir`, returning `None` when it is not a template.
///
/// The manifest, `prompts/` and both prompt files are required first. A
/// Workers config wins over GCP markers when both are present.
pub fn detect_platform(dir: &Path) -> Option<Platform> {
    let prompts = dir.join(PROMPTS_DIR);
    let scaffolded = dir.join(MANIFEST_FILE).exists()
        && prompts.is_dir()
        && prompts.join(SELECTION_PROMPT).exists()
        && prompts.join(USAGE_PROMPT).exists();
    if !scaffolded {
        return None;
    }

    if WORKERS_CONFIG_FILES.iter().any(|f| dir.join(f).exists()) {
        return Some(Platform::Cloudflare);
    }
    if GCP_MARKER_FILES.iter().all(|f| dir.join(f).exists()) {
        return Some(Platform::Gcp);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(dir: &Path, rel: &str) {
        let path = dir.join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, "").unwrap();
    }

    fn scaffold(dir: &Path) {
        touch(dir, MANIFEST_FILE);
        touch(dir, "prompts/selection.md");
        touch(dir, "prompts/usage.md");
    }

    #[test]
    fn test_workers_config_classifies_cloudflare() {
        for config in WORKERS_CONFIG_FILES {
            let tmp = TempDir::new().unwrap();
            scaffold(tmp.path());
            touch(tmp.path(), config);
            assert_eq!(detect_platform(tmp.path()), Some(Platform::Cloudflare));
        }
    }

    #[test]
    fn test_gcp_requires_both_markers() {
        let tmp = TempDir::new().unwrap();
        scaffold(tmp.path());
        touch(tmp.path(), "app.yaml");
        assert_eq!(detect_platform(tmp.path()), None);

        touch(tmp.path(), ".gcloudignore");
        assert_eq!(detect_platform(tmp.path()), Some(Platform::Gcp));
    }

    #[test]
    fn test_workers_config_takes_precedence_over_gcp() {
        let tmp = TempDir::new().unwrap();
        scaffold(tmp.path());
        touch(tmp.path(), "app.yaml");
        touch(tmp.path(), ".gcloudignore");
        touch(tmp.path(), "wrangler.toml");
        assert_eq!(detect_platform(tmp.path()), Some(Platform::Cloudflare));
    }

    #[test]
    fn test_scaffolding_without_platform_config_is_rejected() {
        let tmp = TempDir::new().unwrap();
        scaffold(tmp.path());
        assert_eq!(detect_platform(tmp.path()), None);
    }

    #[test]
    fn test_any_missing_scaffold_piece_rejects() {
        let required = [
            MANIFEST_FILE,
            "prompts/selection.md",
            "prompts/usage.md",
        ];
        for skip in required {
            let tmp = TempDir::new().unwrap();
            for rel in required.iter().filter(|r| **r != skip) {
                touch(tmp.path(), rel);
            }
            touch(tmp.path(), "wrangler.jsonc");
            touch(tmp.path(), "app.yaml");
            touch(tmp.path(), ".gcloudignore");
            assert_eq!(detect_platform(tmp.path()), None, "missing {}", skip);
        }
    }

    #[test]
    fn test_prompts_must_be_a_directory() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), MANIFEST_FILE);
        touch(tmp.path(), PROMPTS_DIR);
        touch(tmp.path(), "wrangler.jsonc");
        assert_eq!(detect_platform(tmp.path()), None);
    }
}
