//! Catalog module - template validation and extraction pipeline.
//!
//! This module provides the stages that turn a directory of built templates
//! into catalog records:
//! - **Platform**: structural gate and platform classification via [`detect_platform`]
//! - **Metadata**: declared providers and deployment type via [`MetadataLoader`]
//! - **Frameworks**: dependency-name matching via [`Vocabulary`]
//! - **Content**: sanitized prompt text via [`read_prompt`]
//! - **Processor**: one record per template via [`TemplateProcessor`]
//! - **Pipeline**: directory walk and assembly via [`CatalogPipeline`]

pub mod content;
pub mod frameworks;
pub mod metadata;
pub mod pipeline;
pub mod platform;
pub mod processor;

// Re-export commonly used types
pub use content::{read_prompt, sanitize};
pub use frameworks::{ManifestError, Vocabulary, VocabularyCategory, VocabularyError};
pub use metadata::{MetadataError, MetadataLoader};
pub use platform::detect_platform;

pub use pipeline::{
    CatalogPipeline, CatalogResult, CatalogStats, CatalogWarning, PipelineError,
    DEFAULT_EXCLUDED_DIRS,
};
pub use processor::{ProcessedTemplate, TemplateCandidate, TemplateProcessor};
