//! Assembly of a single catalog record from an accepted template directory.

use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

use crate::catalog::content::read_prompt;
use crate::catalog::frameworks::Vocabulary;
use crate::catalog::metadata::{MetadataError, MetadataLoader};
use crate::catalog::pipeline::CatalogWarning;
use crate::catalog::platform::{MANIFEST_FILE, PROMPTS_DIR, SELECTION_PROMPT, USAGE_PROMPT};
use crate::model::{Platform, TemplateDescription, TemplateRecord, TEMPLATE_LANGUAGE};

/// A directory found under the scan root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateCandidate {
    /// Directory basename, also the key for its metadata document
    pub name: String,

    /// Absolute (or root-relative, if the root was) path to the directory
    pub path: PathBuf,
}

impl TemplateCandidate {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { name, path }
    }
}

/// Record plus the recoverable problems met while building it.
#[derive(Debug, Clone)]
pub struct ProcessedTemplate {
    pub record: TemplateRecord,
    pub warnings: Vec<CatalogWarning>,
}

/// Builds [`TemplateRecord`]s from accepted template directories.
#[derive(Debug, Clone, Copy)]
pub struct TemplateProcessor<'a> {
    metadata: &'a MetadataLoader,
    vocabulary: &'a Vocabulary,
}

impl<'a> TemplateProcessor<'a> {
    pub fn new(metadata: &'a MetadataLoader, vocabulary: &'a Vocabulary) -> Self {
        Self {
            metadata,
            vocabulary,
        }
    }

    /// Produces the catalog record for `candidate`, already classified as
    /// `platform`.
    ///
    /// Declared metadata is authoritative for the record. A detected platform
    /// missing from `supportedProviders` is reported as a warning only.
    ///
    /// # Errors
    ///
    /// Any [`MetadataError`] is returned unchanged; it is fatal for the run.
    #[instrument(skip(self, candidate), fields(template = %candidate.name))]
    pub fn process(
        &self,
        candidate: &TemplateCandidate,
        platform: Platform,
    ) -> Result<ProcessedTemplate, MetadataError> {
        info!("Processing template: {}", candidate.name);
        let mut warnings = Vec::new();

        let manifest = candidate.path.join(MANIFEST_FILE);
        let frameworks = match self.vocabulary.extract_frameworks(&manifest) {
            Ok(frameworks) => frameworks,
            Err(e) => {
                warn!("{}", e);
                warnings.push(CatalogWarning::ManifestUnreadable {
                    template: candidate.name.clone(),
                    path: manifest,
                    reason: e.to_string(),
                });
                Vec::new()
            }
        };

        let prompts = candidate.path.join(PROMPTS_DIR);
        let selection =
            self.prompt_text(candidate, &prompts.join(SELECTION_PROMPT), &mut warnings);
        let usage = self.prompt_text(candidate, &prompts.join(USAGE_PROMPT), &mut warnings);

        let metadata = self.metadata.load(&candidate.name)?;

        if !metadata.supported_providers.contains(&platform) {
            warn!(
                detected = %platform,
                declared = ?metadata.supported_providers,
                "Detected platform '{}' is not listed in metadata supportedProviders for template '{}'",
                platform,
                candidate.name
            );
            warnings.push(CatalogWarning::PlatformMismatch {
                template: candidate.name.clone(),
                detected: platform,
                declared: metadata.supported_providers.clone(),
            });
        }

        Ok(ProcessedTemplate {
            record: TemplateRecord {
                name: candidate.name.clone(),
                language: TEMPLATE_LANGUAGE.to_string(),
                frameworks,
                description: TemplateDescription { selection, usage },
                supported_providers: metadata.supported_providers,
                deployment_type: metadata.deployment_type,
            },
            warnings,
        })
    }

    fn prompt_text(
        &self,
        candidate: &TemplateCandidate,
        path: &Path,
        warnings: &mut Vec<CatalogWarning>,
    ) -> String {
        read_prompt(path).unwrap_or_else(|e| {
            warn!("Could not read {}: {}", path.display(), e);
            warnings.push(CatalogWarning::PromptUnreadable {
                template: candidate.name.clone(),
                path: path.to_path_buf(),
                reason: e.to_string(),
            });
            String::new()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DeploymentType;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    struct Fixture {
        _root: TempDir,
        defs: PathBuf,
        template: PathBuf,
    }

    fn fixture(name: &str, metadata: &str) -> Fixture {
        let root = TempDir::new().unwrap();
        let defs = root.path().join("definitions");
        let template = root.path().join("build").join(name);
        std::fs::create_dir_all(defs.join(name)).unwrap();
        std::fs::create_dir_all(template.join("prompts")).unwrap();
        std::fs::write(defs.join(name).join("metadata.json"), metadata).unwrap();
        std::fs::write(
            template.join("package.json"),
            r#"{"dependencies": {"hono": "4"}, "devDependencies": {"wrangler": "3"}}"#,
        )
        .unwrap();
        std::fs::write(template.join("prompts/selection.md"), "  Use for APIs.\r\n").unwrap();
        std::fs::write(template.join("prompts/usage.md"), "Run `bun dev`.").unwrap();
        Fixture {
            _root: root,
            defs,
            template,
        }
    }

    #[test]
    fn test_process_builds_record() {
        let fx = fixture(
            "api-runner",
            r#"{"supportedProviders": ["cloudflare"], "deploymentType": "full-stack"}"#,
        );
        let loader = MetadataLoader::new(&fx.defs);
        let vocab = Vocabulary::builtin();
        let processor = TemplateProcessor::new(&loader, &vocab);

        let processed = processor
            .process(&TemplateCandidate::new(&fx.template), Platform::Cloudflare)
            .unwrap();

        assert!(processed.warnings.is_empty());
        assert_eq!(
            processed.record,
            TemplateRecord {
                name: "api-runner".to_string(),
                language: "typescript".to_string(),
                frameworks: vec!["hono".to_string(), "wrangler".to_string()],
                description: TemplateDescription {
                    selection: "Use for APIs.".to_string(),
                    usage: "Run `bun dev`.".to_string(),
                },
                supported_providers: vec![Platform::Cloudflare],
                deployment_type: DeploymentType::FullStack,
            }
        );
    }

    #[test]
    fn test_platform_mismatch_is_a_warning() {
        let fx = fixture(
            "gcp-only",
            r#"{"supportedProviders": ["gcp"], "deploymentType": "platform-specific"}"#,
        );
        let loader = MetadataLoader::new(&fx.defs);
        let vocab = Vocabulary::builtin();

        let processed = TemplateProcessor::new(&loader, &vocab)
            .process(&TemplateCandidate::new(&fx.template), Platform::Cloudflare)
            .unwrap();

        assert_eq!(processed.record.supported_providers, vec![Platform::Gcp]);
        assert_eq!(
            processed.warnings,
            vec![CatalogWarning::PlatformMismatch {
                template: "gcp-only".to_string(),
                detected: Platform::Cloudflare,
                declared: vec![Platform::Gcp],
            }]
        );
    }

    #[test]
    fn test_broken_manifest_degrades_to_no_frameworks() {
        let fx = fixture(
            "broken-manifest",
            r#"{"supportedProviders": ["cloudflare"], "deploymentType": "client-only"}"#,
        );
        std::fs::write(fx.template.join("package.json"), "not json").unwrap();
        let loader = MetadataLoader::new(&fx.defs);
        let vocab = Vocabulary::builtin();

        let processed = TemplateProcessor::new(&loader, &vocab)
            .process(&TemplateCandidate::new(&fx.template), Platform::Cloudflare)
            .unwrap();

        assert!(processed.record.frameworks.is_empty());
        assert!(matches!(
            processed.warnings.as_slice(),
            [CatalogWarning::ManifestUnreadable { .. }]
        ));
    }

    #[test]
    fn test_unreadable_prompt_degrades_to_empty_text() {
        let fx = fixture(
            "odd-prompts",
            r#"{"supportedProviders": ["cloudflare"], "deploymentType": "client-only"}"#,
        );
        let usage = fx.template.join("prompts/usage.md");
        std::fs::remove_file(&usage).unwrap();
        std::fs::create_dir(&usage).unwrap();
        let loader = MetadataLoader::new(&fx.defs);
        let vocab = Vocabulary::builtin();

        let processed = TemplateProcessor::new(&loader, &vocab)
            .process(&TemplateCandidate::new(&fx.template), Platform::Cloudflare)
            .unwrap();

        assert_eq!(processed.record.description.usage, "");
        assert_eq!(processed.record.description.selection, "Use for APIs.");
        assert!(matches!(
            processed.warnings.as_slice(),
            [CatalogWarning::PromptUnreadable { .. }]
        ));
    }

    #[test]
    fn test_metadata_error_propagates() {
        let fx = fixture(
            "bad-meta",
            r#"{"supportedProviders": ["cloudflare"], "deploymentType": "serverless"}"#,
        );
        let loader = MetadataLoader::new(&fx.defs);
        let vocab = Vocabulary::builtin();

        let err = TemplateProcessor::new(&loader, &vocab)
            .process(&TemplateCandidate::new(&fx.template), Platform::Cloudflare)
            .unwrap_err();
        assert!(matches!(err, MetadataError::Invalid { .. }));
    }

    #[test]
    fn test_candidate_name_is_basename() {
        let candidate = TemplateCandidate::new("/srv/build/vite-cf-DO-runner");
        assert_eq!(candidate.name, "vite-cf-DO-runner");
    }
}
