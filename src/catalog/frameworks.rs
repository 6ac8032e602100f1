//! Framework detection from `package.json` dependency names.
//!
//! Every dependency name is lowercased and tested against an ordered
//! [`Vocabulary`] of patterns by substring containment. A dependency
//! contributes only the first pattern that matches it. The detected set is
//! returned sorted so the catalog diffs cleanly between runs.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

// ============================================================================
// Built-in Vocabulary
// ============================================================================

/// Built-in pattern table, in match order.
///
/// Routing sits ahead of the frontend frameworks so router packages report as
/// routers rather than as `react`.
const BUILTIN_CATEGORIES: &[(&str, &[&str])] = &[
    (
        "routing",
        &["react-router", "react-router-dom", "@reach/router", "next/router"],
    ),
    (
        "frontend",
        &[
            "react", "next", "vue", "angular", "svelte", "nuxt", "astro", "remix", "solid-js",
            "preact", "lit", "stencil",
        ],
    ),
    ("backend", &["express", "fastify", "koa", "hono"]),
    (
        "build",
        &["vite", "webpack", "rollup", "parcel", "swc", "critters"],
    ),
    (
        "cloudflare",
        &[
            "cloudflare",
            "workers",
            "wrangler",
            "durable-objects",
            "d1",
            "r2",
            "kv",
            "queues",
            "agents",
            "vectorize",
            "hyperdrive",
            "analytics",
            "@cloudflare/workers-types",
            "@cloudflare/vite-plugin",
            "@opennextjs/cloudflare",
        ],
    ),
    (
        "ui",
        &[
            "tailwind",
            "bootstrap",
            "material-ui",
            "@mui",
            "antd",
            "chakra-ui",
            "@radix-ui",
            "@headlessui",
            "shadcn",
            "@dnd-kit",
            "lucide-react",
        ],
    ),
    (
        "styling",
        &[
            "styled-components",
            "emotion",
            "sass",
            "less",
            "stylus",
            "framer-motion",
            "tailwind-merge",
            "tailwindcss-animate",
            "class-variance-authority",
            "tw-animate-css",
        ],
    ),
    (
        "state",
        &[
            "redux",
            "zustand",
            "mobx",
            "recoil",
            "jotai",
            "valtio",
            "immer",
            "@tanstack/react-query",
            "swr",
            "apollo",
            "relay",
        ],
    ),
    (
        "forms",
        &["formik", "react-hook-form", "@hookform/resolvers", "zod", "yup", "joi"],
    ),
    (
        "auth",
        &["next-auth", "auth0", "passport", "supabase", "firebase", "clerk"],
    ),
    (
        "data",
        &["prisma", "drizzle", "mongoose", "sequelize", "typeorm", "knex"],
    ),
    (
        "graphql",
        &["apollo", "graphql", "relay", "@apollo/client", "urql"],
    ),
    (
        "trpc",
        &["trpc", "@trpc/client", "@trpc/server", "@trpc/react-query"],
    ),
    (
        "ai",
        &[
            "openai",
            "langchain",
            "@ai-sdk",
            "vercel/ai",
            "anthropic",
            "cohere",
            "@modelcontextprotocol",
            "mcp-client",
            "mcp-remote",
            "agents",
        ],
    ),
    (
        "realtime",
        &["socket.io", "pusher", "ably", "supabase-realtime"],
    ),
    (
        "visualization",
        &[
            "d3",
            "chart.js",
            "recharts",
            "victory",
            "nivo",
            "plotly",
            "observable",
            "react-flow",
            "embla-carousel",
        ],
    ),
    ("maps", &["leaflet", "mapbox", "google-maps"]),
    (
        "utilities",
        &[
            "lodash",
            "ramda",
            "date-fns",
            "moment",
            "dayjs",
            "luxon",
            "clsx",
            "classnames",
            "axios",
            "fetch",
            "ky",
            "got",
            "node-fetch",
        ],
    ),
    (
        "devtools",
        &["typescript", "babel", "postcss", "autoprefixer"],
    ),
    (
        "testing",
        &[
            "jest",
            "vitest",
            "cypress",
            "playwright",
            "testing-library",
            "mocha",
            "jasmine",
        ],
    ),
    ("storybook", &["storybook", "@storybook"]),
    (
        "security",
        &["jsonwebtoken", "bcrypt", "helmet", "cors", "crypto-js"],
    ),
    ("email", &["nodemailer", "sendgrid", "mailgun", "resend"]),
    ("storage", &["multer", "sharp", "jimp", "canvas"]),
    (
        "deployment",
        &["docker", "kubernetes", "terraform", "serverless"],
    ),
    (
        "monitoring",
        &["sentry", "datadog", "newrelic", "mixpanel", "amplitude"],
    ),
    (
        "components",
        &[
            "react-select",
            "react-day-picker",
            "react-resizable-panels",
            "react-hotkeys-hook",
            "sonner",
            "vaul",
            "input-otp",
            "cmdk",
            "react-virtualized",
            "react-window",
        ],
    ),
    ("themes", &["next-themes", "@next/themes", "theme-ui"]),
    ("process", &["concurrently", "pm2", "nodemon"]),
];

// ============================================================================
// Errors
// ============================================================================

/// Errors reading a dependency manifest. Recoverable: callers degrade to an
/// empty framework list.
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("Could not read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors loading a vocabulary file.
#[derive(Error, Debug)]
pub enum VocabularyError {
    #[error("Failed to read vocabulary {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse vocabulary: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Vocabulary category '{0}' contains an empty pattern")]
    EmptyPattern(String),
}

// ============================================================================
// Vocabulary
// ============================================================================

/// A named group of patterns, the unit of a vocabulary file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyCategory {
    pub category: String,
    pub patterns: Vec<String>,
}

/// Ordered framework patterns used for first-match detection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    patterns: Vec<String>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Vocabulary {
    /// The table shipped with the crate.
    pub fn builtin() -> Self {
        Self::from_patterns(
            BUILTIN_CATEGORIES
                .iter()
                .flat_map(|(_, patterns)| patterns.iter().map(|p| p.to_string())),
        )
    }

    /// The built-in table in its category form. `--dump-vocabulary` prints it
    /// as the starting point for a custom vocabulary file.
    pub fn builtin_categories() -> Vec<VocabularyCategory> {
        BUILTIN_CATEGORIES
            .iter()
            .map(|(category, patterns)| VocabularyCategory {
                category: category.to_string(),
                patterns: patterns.iter().map(|p| p.to_string()).collect(),
            })
            .collect()
    }

    /// Builds a vocabulary from categories, flattened in order.
    pub fn from_categories(categories: Vec<VocabularyCategory>) -> Result<Self, VocabularyError> {
        for cat in &categories {
            if cat.patterns.iter().any(|p| p.is_empty()) {
                return Err(VocabularyError::EmptyPattern(cat.category.clone()));
            }
        }
        Ok(Self::from_patterns(
            categories.into_iter().flat_map(|c| c.patterns),
        ))
    }

    /// Parses a JSON vocabulary document (`[{"category", "patterns"}, ...]`).
    pub fn from_json(raw: &str) -> Result<Self, VocabularyError> {
        let categories: Vec<VocabularyCategory> = serde_json::from_str(raw)?;
        Self::from_categories(categories)
    }

    pub fn from_file(path: &Path) -> Result<Self, VocabularyError> {
        let raw = std::fs::read_to_string(path).map_err(|source| VocabularyError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    // Repeated patterns keep their first position; later copies could never win.
    fn from_patterns(patterns: impl Iterator<Item = String>) -> Self {
        let mut seen = BTreeSet::new();
        let patterns = patterns.filter(|p| seen.insert(p.clone())).collect();
        Self { patterns }
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// First pattern, in vocabulary order, contained in the lowercased `dependency`.
    pub fn match_dependency(&self, dependency: &str) -> Option<&str> {
        let name = dependency.to_lowercase();
        self.patterns
            .iter()
            .find(|p| name.contains(p.as_str()))
            .map(String::as_str)
    }

    /// Detected frameworks for a set of dependency names, sorted and deduplicated.
    pub fn detect<'a>(&self, dependencies: impl IntoIterator<Item = &'a str>) -> Vec<String> {
        dependencies
            .into_iter()
            .filter_map(|dep| self.match_dependency(dep))
            .map(str::to_string)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Reads `manifest` and detects frameworks from its runtime and dev
    /// dependencies.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError`] if the manifest is missing, unreadable or not
    /// JSON. Framework detection is advisory; callers are expected to degrade
    /// to an empty list.
    pub fn extract_frameworks(&self, manifest: &Path) -> Result<Vec<String>, ManifestError> {
        let dependencies = read_dependency_names(manifest)?;
        Ok(self.detect(dependencies.iter().map(String::as_str)))
    }
}

/// Union of the `dependencies` and `devDependencies` keys of a manifest.
///
/// Groups that are absent or not JSON objects contribute nothing.
pub fn read_dependency_names(manifest: &Path) -> Result<BTreeSet<String>, ManifestError> {
    let raw = std::fs::read_to_string(manifest).map_err(|source| ManifestError::Read {
        path: manifest.to_path_buf(),
        source,
    })?;
    let document: Value = serde_json::from_str(&raw).map_err(|source| ManifestError::Parse {
        path: manifest.to_path_buf(),
        source,
    })?;

    let names = ["dependencies", "devDependencies"]
        .iter()
        .filter_map(|group| document.get(*group).and_then(Value::as_object))
        .flat_map(|deps| deps.keys().cloned())
        .collect();
    Ok(names)
}
