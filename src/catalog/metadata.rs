//! Loading and validation of per-template `metadata.json` documents.
//!
//! Metadata lives under `<definitions>/<template>/metadata.json`, keyed by the
//! template's directory name. Every failure here is fatal for the run.

use serde_json::Value;
use std::path::PathBuf;
use thiserror::Error;

use crate::model::{DeploymentType, Platform, TemplateMetadata};

/// File name of the metadata document inside a template definition.
pub const METADATA_FILE: &str = "metadata.json";

/// Errors raised while loading a template's metadata.
#[derive(Error, Debug)]
pub enum MetadataError {
    /// No metadata document at the expected location
    #[error("Metadata file missing for template '{template}'. Expected at: {}", .path.display())]
    Missing { template: String, path: PathBuf },

    /// Document exists but could not be read or parsed as JSON
    #[error("Unable to parse metadata for '{template}': {reason}")]
    Malformed { template: String, reason: String },

    /// Document parsed but a required field is absent or out of range
    #[error("Invalid metadata for template '{template}': {reason}")]
    Invalid { template: String, reason: String },
}

impl MetadataError {
    fn invalid(template: &str, reason: impl Into<String>) -> Self {
        MetadataError::Invalid {
            template: template.to_string(),
            reason: reason.into(),
        }
    }
}

/// Resolves and validates metadata documents from a definitions directory.
#[derive(Debug, Clone)]
pub struct MetadataLoader {
    definitions_dir: PathBuf,
}

impl MetadataLoader {
    pub fn new(definitions_dir: impl Into<PathBuf>) -> Self {
        Self {
            definitions_dir: definitions_dir.into(),
        }
    }

    /// Expected metadata location for `template`.
    pub fn metadata_path(&self, template: &str) -> PathBuf {
        self.definitions_dir.join(template).join(METADATA_FILE)
    }

    /// Loads and validates the metadata document for `template`.
    ///
    /// # Errors
    ///
    /// - [`MetadataError::Missing`] if the document does not exist
    /// - [`MetadataError::Malformed`] if it cannot be read or is not JSON
    /// - [`MetadataError::Invalid`] if `supportedProviders` or `deploymentType`
    ///   are absent or outside their fixed enumerations
    pub fn load(&self, template: &str) -> Result<TemplateMetadata, MetadataError> {
        let path = self.metadata_path(template);
        if !path.exists() {
            return Err(MetadataError::Missing {
                template: template.to_string(),
                path,
            });
        }

        let raw = std::fs::read_to_string(&path).map_err(|e| MetadataError::Malformed {
            template: template.to_string(),
            reason: e.to_string(),
        })?;
        let document: Value =
            serde_json::from_str(&raw).map_err(|e| MetadataError::Malformed {
                template: template.to_string(),
                reason: e.to_string(),
            })?;

        validate_metadata(template, &document)
    }
}

/// Validates an already-parsed metadata document.
///
/// Provider order is preserved as declared.
pub fn validate_metadata(
    template: &str,
    document: &Value,
) -> Result<TemplateMetadata, MetadataError> {
    let fields = document
        .as_object()
        .ok_or_else(|| MetadataError::invalid(template, "metadata must be a JSON object"))?;

    let providers = match fields.get("supportedProviders") {
        Some(Value::Array(items)) if !items.is_empty() => items,
        _ => {
            return Err(MetadataError::invalid(
                template,
                "'supportedProviders' must be a non-empty list",
            ))
        }
    };

    let mut supported_providers = Vec::with_capacity(providers.len());
    for provider in providers {
        let parsed = provider.as_str().and_then(|s| s.parse::<Platform>().ok());
        match parsed {
            Some(platform) => supported_providers.push(platform),
            None => {
                return Err(MetadataError::invalid(
                    template,
                    format!(
                        "invalid provider {}. Valid providers: {}",
                        provider,
                        valid_list(Platform::ALL.iter().map(Platform::as_str))
                    ),
                ))
            }
        }
    }

    let deployment_type = fields
        .get("deploymentType")
        .and_then(Value::as_str)
        .and_then(|s| s.parse::<DeploymentType>().ok())
        .ok_or_else(|| {
            let found = fields
                .get("deploymentType")
                .map(Value::to_string)
                .unwrap_or_else(|| "nothing".to_string());
            MetadataError::invalid(
                template,
                format!(
                    "'deploymentType' must be one of {}. Found: {}",
                    valid_list(DeploymentType::ALL.iter().map(DeploymentType::as_str)),
                    found
                ),
            )
        })?;

    Ok(TemplateMetadata {
        supported_providers,
        deployment_type,
    })
}

fn valid_list<'a>(values: impl Iterator<Item = &'a str>) -> String {
    let mut values: Vec<&str> = values.collect();
    values.sort_unstable();
    format!("[{}]", values.join(", "))
}
