//! Catalog pipeline.
//!
//! This module provides the [`CatalogPipeline`] coordinator that walks a scan
//! root and runs each candidate directory through the template stages
//! (Platform gate → Frameworks → Prompts → Metadata) with:
//! - Sequential, synchronous processing in directory enumeration order
//! - Structured logging via `tracing`
//! - Recoverable problems returned as [`CatalogWarning`] values
//! - Fail-fast on metadata errors, with no partial catalog

use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::catalog::frameworks::Vocabulary;
use crate::catalog::metadata::{MetadataError, MetadataLoader};
use crate::catalog::platform::detect_platform;
use crate::catalog::processor::{TemplateCandidate, TemplateProcessor};
use crate::model::{Platform, TemplateRecord};

/// Directory names never considered as templates.
pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &["node_modules"];

// ============================================================================
// Pipeline Types
// ============================================================================

/// Complete output of one catalog run.
#[derive(Debug, Clone)]
pub struct CatalogResult {
    /// Records in directory enumeration order
    pub templates: Vec<TemplateRecord>,

    /// Counts and timing
    pub stats: CatalogStats,

    /// Recoverable problems, in the order they occurred
    pub warnings: Vec<CatalogWarning>,
}

/// Statistics about a catalog run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CatalogStats {
    /// Directories accepted as templates
    pub accepted: usize,

    /// Directories that failed the structural gate
    pub rejected: usize,

    /// Total time spent building the catalog (milliseconds)
    pub duration_ms: u64,
}

/// A recoverable problem. Processing continues with a degraded value.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogWarning {
    /// `package.json` unreadable or not JSON; frameworks left empty
    #[error("{template}: manifest {} unusable ({reason})", .path.display())]
    ManifestUnreadable {
        template: String,
        path: PathBuf,
        reason: String,
    },

    /// A prompt file exists but could not be read; its text left empty
    #[error("{template}: prompt {} unreadable ({reason})", .path.display())]
    PromptUnreadable {
        template: String,
        path: PathBuf,
        reason: String,
    },

    /// Detected platform absent from the declared `supportedProviders`
    #[error(
        "{template}: detected platform '{detected}' not in supportedProviders [{}]",
        join_platforms(.declared)
    )]
    PlatformMismatch {
        template: String,
        detected: Platform,
        declared: Vec<Platform>,
    },
}

fn join_platforms(platforms: &[Platform]) -> String {
    platforms
        .iter()
        .map(Platform::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

// ============================================================================
// Pipeline Errors
// ============================================================================

/// Errors that abort a catalog run.
#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    /// The scan root could not be enumerated
    #[error("Failed to scan directory {}: {source}", .path.display())]
    Scan {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An accepted template has missing or invalid metadata
    #[error(transparent)]
    Metadata(#[from] MetadataError),
}

// ============================================================================
// Pipeline Executor
// ============================================================================

/// Scans a directory of built templates and assembles the catalog.
///
/// # Example
///
/// ```no_run
/// use template_catalog::catalog::CatalogPipeline;
/// use std::path::Path;
///
/// let pipeline = CatalogPipeline::new("definitions").with_excluded_dirs(["node_modules", "dist"]);
/// let result = pipeline.build(Path::new("build"))?;
/// println!("{} templates", result.templates.len());
/// # Ok::<(), template_catalog::catalog::PipelineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct CatalogPipeline {
    /// Metadata lookup by template name
    metadata: MetadataLoader,

    /// Framework patterns
    vocabulary: Vocabulary,

    /// Child directory names skipped during discovery
    excluded_dirs: Vec<String>,
}

impl CatalogPipeline {
    /// Creates a pipeline reading metadata from `definitions_dir`.
    ///
    /// Default configuration:
    /// - Vocabulary: [`Vocabulary::builtin`]
    /// - Excluded directories: [`DEFAULT_EXCLUDED_DIRS`]
    pub fn new(definitions_dir: impl Into<PathBuf>) -> Self {
        Self {
            metadata: MetadataLoader::new(definitions_dir),
            vocabulary: Vocabulary::builtin(),
            excluded_dirs: DEFAULT_EXCLUDED_DIRS.iter().map(|d| d.to_string()).collect(),
        }
    }

    /// Replaces the framework vocabulary.
    pub fn with_vocabulary(mut self, vocabulary: Vocabulary) -> Self {
        self.vocabulary = vocabulary;
        self
    }

    /// Replaces the list of excluded directory names.
    pub fn with_excluded_dirs<I, S>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_dirs = dirs.into_iter().map(Into::into).collect();
        self
    }

    /// Lists the immediate child directories of `root` eligible for the
    /// platform gate: hidden entries and excluded names are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Scan`] if `root` cannot be read.
    pub fn discover(&self, root: &Path) -> Result<Vec<TemplateCandidate>, PipelineError> {
        let scan_err = |source| PipelineError::Scan {
            path: root.to_path_buf(),
            source,
        };

        let mut candidates = Vec::new();
        for entry in std::fs::read_dir(root).map_err(scan_err)? {
            let path = entry.map_err(scan_err)?.path();
            if !path.is_dir() {
                continue;
            }
            let candidate = TemplateCandidate::new(path);
            if candidate.name.starts_with('.') || self.excluded_dirs.contains(&candidate.name) {
                debug!(name = %candidate.name, "Skipping excluded directory");
                continue;
            }
            candidates.push(candidate);
        }
        Ok(candidates)
    }

    /// Builds the catalog for every template under `root`.
    ///
    /// Directories failing the platform gate are counted as rejected and left
    /// out. The first metadata error aborts the run.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError`] if the root cannot be scanned or any accepted
    /// template has missing or invalid metadata.
    pub fn build(&self, root: &Path) -> Result<CatalogResult, PipelineError> {
        let start = Instant::now();
        let processor = TemplateProcessor::new(&self.metadata, &self.vocabulary);

        let mut templates = Vec::new();
        let mut warnings = Vec::new();
        let mut stats = CatalogStats::default();

        for candidate in self.discover(root)? {
            match detect_platform(&candidate.path) {
                Some(platform) => {
                    info!(%platform, "✓ Valid template found: {}", candidate.name);
                    let processed = processor.process(&candidate, platform)?;
                    templates.push(processed.record);
                    warnings.extend(processed.warnings);
                    stats.accepted += 1;
                }
                None => {
                    warn!("✗ Skipping invalid template: {}", candidate.name);
                    stats.rejected += 1;
                }
            }
        }

        stats.duration_ms = start.elapsed().as_millis() as u64;
        info!(
            accepted = stats.accepted,
            rejected = stats.rejected,
            warnings = warnings.len(),
            duration_ms = stats.duration_ms,
            "Catalog build completed"
        );

        Ok(CatalogResult {
            templates,
            stats,
            warnings,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
