#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::multiple_crate_versions)]
//! Check stylesheets against the classes the Vitrine page controllers rely on.
//!
//! # Design
//! - Walks a directory for `*.css` files and checks their combined contents.
//! - Derives the required classes from `vitrine-ui` so the names never drift.
//! - A class counts as defined when `.name` appears and is not the prefix of a
//!   longer class name.
//!
//! Failure modes include a missing or non-directory root, a root without any
//! stylesheet, and unreadable files.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;
use vitrine_ui::core::alerts::{ALERT_CLASS, CLOSE_CLASS, Severity};
use vitrine_ui::core::selection::{ACTIVE_CLASS, OptionGroup};
use vitrine_ui::core::theme::ThemeRegistry;
use walkdir::WalkDir;

/// Errors returned by the contract checker.
#[derive(Debug, Error)]
pub enum CssContractError {
    /// The stylesheet root does not exist.
    #[error("required path is missing: {}", path.display())]
    MissingPath {
        /// Path that could not be found.
        path: PathBuf,
    },
    /// The stylesheet root is not a directory.
    #[error("expected directory but found non-directory: {}", path.display())]
    ExpectedDir {
        /// Path that was expected to be a directory.
        path: PathBuf,
    },
    /// No `*.css` file was found under the root.
    #[error("no stylesheets found under {}", path.display())]
    NoStylesheets {
        /// Root that was searched.
        path: PathBuf,
    },
    /// A stylesheet could not be read.
    #[error("io error at {}: {source}", path.display())]
    Io {
        /// Path involved in the failing read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
    /// Traversal of a directory failed.
    #[error("directory walk failed at {}: {message}", path.display())]
    WalkFailed {
        /// Directory path that could not be traversed.
        path: PathBuf,
        /// Error message from directory traversal.
        message: String,
    },
}

/// Result of checking a stylesheet directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractReport {
    /// Stylesheets that were inspected.
    pub stylesheets: Vec<PathBuf>,
    /// Classes that had to be defined.
    pub required: Vec<String>,
    /// Required classes no stylesheet defines.
    pub missing: Vec<String>,
}

impl ContractReport {
    /// Whether every required class is defined.
    #[must_use]
    pub fn is_satisfied(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Classes the controllers expect for the given theme names.
#[must_use]
pub fn required_classes(themes: &[String]) -> Vec<String> {
    let mut classes: Vec<String> = ThemeRegistry::new(themes).classes().collect();
    classes.push(ALERT_CLASS.to_string());
    classes.extend(Severity::ALL.iter().map(|severity| severity.css_class()));
    classes.push(CLOSE_CLASS.to_string());
    classes.extend(OptionGroup::ALL.iter().map(|group| group.class().to_string()));
    classes.push(ACTIVE_CLASS.to_string());
    classes
}

/// Whether `css` contains a selector for `class`.
#[must_use]
pub fn defines_class(css: &str, class: &str) -> bool {
    let needle = format!(".{class}");
    css.match_indices(&needle).any(|(start, _)| {
        css[start + needle.len()..]
            .chars()
            .next()
            .is_none_or(|next| !(next.is_ascii_alphanumeric() || next == '-' || next == '_'))
    })
}

/// Every `*.css` file under `root`, sorted by path.
///
/// # Errors
/// Returns an error if `root` is missing, is not a directory, cannot be walked,
/// or holds no stylesheet.
pub fn collect_stylesheets(root: &Path) -> Result<Vec<PathBuf>, CssContractError> {
    if !root.exists() {
        return Err(CssContractError::MissingPath {
            path: root.to_path_buf(),
        });
    }
    if !root.is_dir() {
        return Err(CssContractError::ExpectedDir {
            path: root.to_path_buf(),
        });
    }

    let mut sheets = Vec::new();
    for entry in WalkDir::new(root).min_depth(1) {
        let entry = entry.map_err(|err| CssContractError::WalkFailed {
            path: root.to_path_buf(),
            message: err.to_string(),
        })?;
        let is_css = entry
            .path()
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("css"));
        if entry.file_type().is_file() && is_css {
            sheets.push(entry.into_path());
        }
    }
    if sheets.is_empty() {
        return Err(CssContractError::NoStylesheets {
            path: root.to_path_buf(),
        });
    }
    sheets.sort();
    Ok(sheets)
}

/// Check the stylesheets under `root` against the classes needed for `themes`.
///
/// # Errors
/// Returns an error if the stylesheets cannot be collected or read.
pub fn check(root: &Path, themes: &[String]) -> Result<ContractReport, CssContractError> {
    let stylesheets = collect_stylesheets(root)?;
    let mut combined = String::new();
    for sheet in &stylesheets {
        let contents = fs::read_to_string(sheet).map_err(|source| CssContractError::Io {
            path: sheet.clone(),
            source,
        })?;
        debug!(path = %sheet.display(), bytes = contents.len(), "stylesheet loaded");
        combined.push_str(&contents);
        combined.push('\n');
    }

    let required = required_classes(themes);
    let missing = required
        .iter()
        .filter(|class| !defines_class(&combined, class))
        .cloned()
        .collect();
    Ok(ContractReport {
        stylesheets,
        required,
        missing,
    })
}
