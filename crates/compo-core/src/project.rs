//! Project Loading
//!
//! Locates the project configuration (`tsconfig.json`/`jsconfig.json`) and
//! enumerates the source files an analysis run will parse. A malformed
//! configuration aborts the run; a missing one falls back to scanning the
//! whole root with the default vendor-directory exclusions.

use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::parser::SupportedLanguage;

/// Directories never scanned, regardless of configuration.
const EXCLUDED_DIRS: &[&str] = &[
    "node_modules",
    "dist",
    "build",
    "coverage",
    ".next",
    ".nuxt",
    "out",
];

/// Errors during project loading.
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("Project root does not exist: {0}")]
    RootNotFound(PathBuf),

    #[error("Failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid include/exclude pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        source: globset::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ProjectError>;

/// The subset of `tsconfig.json` the loader understands.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TsConfig {
    #[serde(default)]
    include: Option<Vec<String>>,
    #[serde(default)]
    exclude: Option<Vec<String>>,
}

/// One source file scheduled for analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Absolute path on disk.
    pub path: PathBuf,
    /// Path relative to the analysis root, forward slashes.
    pub relative: String,
    /// Detected language.
    pub language: SupportedLanguage,
}

/// A loaded project: the file set one analysis run operates on.
#[derive(Debug, Clone)]
pub struct LoadedProject {
    pub root: PathBuf,
    pub files: Vec<SourceFile>,
}

/// Load the project at `root`.
///
/// Reads `tsconfig.json` (or `jsconfig.json`) when present and honors its
/// `include`/`exclude` globs; otherwise every supported file under the root
/// is taken. Files are returned sorted by relative path so repeated runs
/// over identical contents enumerate identically.
pub fn load_project(root: &Path) -> Result<LoadedProject> {
    let root = root
        .canonicalize()
        .map_err(|_| ProjectError::RootNotFound(root.to_path_buf()))?;

    let config = load_config(&root)?;
    let include = config
        .as_ref()
        .and_then(|c| c.include.as_deref())
        .map(|patterns| build_globset(patterns))
        .transpose()?;
    let exclude = config
        .as_ref()
        .and_then(|c| c.exclude.as_deref())
        .map(|patterns| build_globset(patterns))
        .transpose()?;

    let mut files = Vec::new();
    let walker = WalkBuilder::new(&root)
        .hidden(true)
        .git_ignore(true)
        .filter_entry(|entry| {
            if !entry.file_type().is_some_and(|t| t.is_dir()) {
                return true;
            }
            let name = entry.file_name().to_string_lossy();
            !EXCLUDED_DIRS.contains(&name.as_ref())
        })
        .build();

    for entry in walker.flatten() {
        let path = entry.path();
        if !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }
        let Some(language) = SupportedLanguage::from_path(path) else {
            continue;
        };

        let relative = path
            .strip_prefix(&root)
            .unwrap_or(path)
            .to_string_lossy()
            .replace('\\', "/");

        if let Some(ref include) = include {
            if !include.is_match(&relative) {
                continue;
            }
        }
        if let Some(ref exclude) = exclude {
            if exclude.is_match(&relative) {
                debug!("Excluded by config: {}", relative);
                continue;
            }
        }

        files.push(SourceFile {
            path: path.to_path_buf(),
            relative,
            language,
        });
    }

    files.sort_by(|a, b| a.relative.cmp(&b.relative));

    info!("Loaded {} source file(s) under {:?}", files.len(), root);

    Ok(LoadedProject { root, files })
}

/// Read the project config if one exists. Malformed JSON is fatal.
fn load_config(root: &Path) -> Result<Option<TsConfig>> {
    for name in ["tsconfig.json", "jsconfig.json"] {
        let path = root.join(name);
        if !path.exists() {
            continue;
        }
        let content = std::fs::read_to_string(&path).map_err(|source| ProjectError::ConfigRead {
            path: path.clone(),
            source,
        })?;
        let config: TsConfig =
            serde_json::from_str(&content).map_err(|source| ProjectError::ConfigParse {
                path: path.clone(),
                source,
            })?;
        debug!("Loaded project config from {:?}", path);
        return Ok(Some(config));
    }
    Ok(None)
}

/// Compile tsconfig-style include/exclude entries into a glob set.
///
/// Entries without glob metacharacters are treated as directory prefixes,
/// matching everything beneath them, which is how tsconfig resolves a bare
/// `"src"` entry.
fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let normalized = pattern.trim_end_matches('/');
        let expanded = if normalized.contains(['*', '?', '[']) {
            normalized.to_string()
        } else {
            format!("{}/**", normalized)
        };
        let glob = Glob::new(&expanded).map_err(|source| ProjectError::InvalidPattern {
            pattern: pattern.clone(),
            source,
        })?;
        builder.add(glob);
        // A bare file entry (e.g. "src/index.tsx") should also match itself
        if expanded.ends_with("/**") {
            let glob = Glob::new(normalized).map_err(|source| ProjectError::InvalidPattern {
                pattern: pattern.clone(),
                source,
            })?;
            builder.add(glob);
        }
    }
    builder.build().map_err(|source| ProjectError::InvalidPattern {
        pattern: patterns.join(","),
        source,
    })
}
