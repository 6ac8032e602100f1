use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Language tag written on every catalog record.
pub const TEMPLATE_LANGUAGE: &str = "typescript";

/// A string that names no known [`Platform`] or [`DeploymentType`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownValue {
    pub kind: &'static str,
    pub value: String,
}

/// Deployment platform a template targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Cloudflare,
    Gcp,
}

impl Platform {
    pub const ALL: [Platform; 2] = [Platform::Cloudflare, Platform::Gcp];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Cloudflare => "cloudflare",
            Platform::Gcp => "gcp",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Platform::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| UnknownValue {
                kind: "platform",
                value: s.to_string(),
            })
    }
}

/// Declared architecture of a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeploymentType {
    ClientOnly,
    FullStack,
    PlatformSpecific,
}

impl DeploymentType {
    pub const ALL: [DeploymentType; 3] = [
        DeploymentType::ClientOnly,
        DeploymentType::FullStack,
        DeploymentType::PlatformSpecific,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DeploymentType::ClientOnly => "client-only",
            DeploymentType::FullStack => "full-stack",
            DeploymentType::PlatformSpecific => "platform-specific",
        }
    }
}

impl fmt::Display for DeploymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeploymentType {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DeploymentType::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| UnknownValue {
                kind: "deployment type",
                value: s.to_string(),
            })
    }
}

/// Validated contents of a template's `metadata.json`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateMetadata {
    pub supported_providers: Vec<Platform>, // declared order
    pub deployment_type: DeploymentType,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateDescription {
    pub selection: String,
    pub usage: String,
}

/// One entry of the emitted catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateRecord {
    pub name: String,
    pub language: String,
    pub frameworks: Vec<String>, // sorted, deduplicated
    pub description: TemplateDescription,
    pub supported_providers: Vec<Platform>,
    pub deployment_type: DeploymentType,
}
