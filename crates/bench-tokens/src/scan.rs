//! Response corpus scanning.
//!
//! The corpus root holds one subdirectory per toolkit, each containing one
//! JSON document per scenario:
//!
//! ```text
//! data/raw/
//! ├── arcade/01_list_companies.json
//! ├── composio/01_list_companies.json
//! └── schemas/          (reserved, never scanned)
//! ```

use crate::shape;
use crate::tokenizer::{DEFAULT_ENCODING, TokenCounter};
use mcp_bench_core::{Error, Result, ScenarioId, ToolkitName};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Subdirectory name excluded from toolkit discovery by default.
pub const RESERVED_DIR: &str = "schemas";

/// Extension of response documents.
const DOCUMENT_EXTENSION: &str = "json";

/// Measurements for one response document.
///
/// Field order matches the CSV column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioResult {
    /// Scenario identifier (file stem)
    pub scenario: ScenarioId,
    /// Toolkit that produced the response
    pub toolkit: ToolkitName,
    /// Token count under the configured encoding
    pub tokens: usize,
    /// UTF-8 byte length of the document
    pub bytes: usize,
    /// Inferred number of records
    pub records: usize,
    /// Inferred field count of the first record
    pub fields_per_record: usize,
    /// Path relative to the corpus root's parent
    pub file: String,
}

/// Options controlling a corpus scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOptions {
    /// Corpus root containing toolkit subdirectories
    pub root: PathBuf,
    /// Subdirectory name that is never treated as a toolkit
    pub reserved_dir: String,
    /// Tokenizer encoding name
    pub encoding: String,
}

impl ScanOptions {
    /// Options for `root` with the default reserved directory and encoding.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            reserved_dir: RESERVED_DIR.to_string(),
            encoding: DEFAULT_ENCODING.to_string(),
        }
    }

    /// Locates the corpus root under `base`.
    ///
    /// Tries `base/data/raw` first, then `base/raw`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ResourceNotFound`] listing both candidates when
    /// neither exists.
    pub fn discover(base: &Path) -> Result<Self> {
        let candidates = [base.join("data").join("raw"), base.join("raw")];
        candidates
            .iter()
            .find(|candidate| candidate.is_dir())
            .map(Self::new)
            .ok_or_else(|| Error::ResourceNotFound {
                resource: format!(
                    "no raw data directory (looked in {} and {})",
                    candidates[0].display(),
                    candidates[1].display()
                ),
            })
    }
}

/// Scans a corpus and measures every document.
///
/// Rows come back in toolkit order, then file-name order. Unreadable
/// documents are logged and skipped; malformed JSON still yields a row with
/// zero records.
///
/// # Errors
///
/// - [`Error::ResourceNotFound`] if the root is missing or not a directory
/// - [`Error::Io`] if the root or a toolkit directory cannot be listed
/// - [`Error::EmptyResultSet`] if no documents were found
pub fn scan(options: &ScanOptions, counter: &dyn TokenCounter) -> Result<Vec<ScenarioResult>> {
    let root = options.root.as_path();
    if !root.is_dir() {
        return Err(Error::ResourceNotFound {
            resource: root.display().to_string(),
        });
    }

    let base = root.parent().unwrap_or(root);
    let mut results = Vec::new();

    for toolkit_dir in toolkit_dirs(root, &options.reserved_dir)? {
        let toolkit = ToolkitName::new(file_name(&toolkit_dir));
        debug!(toolkit = %toolkit, "scanning toolkit");

        for document in documents(&toolkit_dir)? {
            match measure_document(&document, &toolkit, base, counter) {
                Ok(result) => results.push(result),
                Err(err) => warn!(path = %document.display(), error = %err, "skipping unreadable document"),
            }
        }
    }

    if results.is_empty() {
        return Err(Error::EmptyResultSet {
            root: root.to_path_buf(),
        });
    }

    info!(rows = results.len(), encoding = counter.name(), "scan complete");
    Ok(results)
}

/// Measures a single document.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read as UTF-8 text.
pub fn measure_document(
    path: &Path,
    toolkit: &ToolkitName,
    base: &Path,
    counter: &dyn TokenCounter,
) -> Result<ScenarioResult> {
    let content = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let stats = shape::measure(&content);

    Ok(ScenarioResult {
        scenario: ScenarioId::new(
            path.file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default(),
        ),
        toolkit: toolkit.clone(),
        tokens: counter.count(&content),
        bytes: content.len(),
        records: stats.records,
        fields_per_record: stats.fields_per_record,
        file: relative_display(path, base),
    })
}

/// Immediate subdirectories of `root`, sorted, without the reserved one.
fn toolkit_dirs(root: &Path, reserved: &str) -> Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    for entry in WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let Some(entry) = listed(root, entry)? else {
            continue;
        };
        if entry.file_type().is_dir() && entry.file_name() != reserved {
            dirs.push(entry.into_path());
        }
    }
    Ok(dirs)
}

/// `*.json` files directly inside `dir`, sorted by name.
fn documents(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let Some(entry) = listed(dir, entry)? else {
            continue;
        };
        let is_document = entry
            .path()
            .extension()
            .is_some_and(|ext| ext == DOCUMENT_EXTENSION);
        if entry.file_type().is_file() && is_document {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Symlinks are resolved, so an entry whose target is gone fails here. Such
/// entries are logged and skipped; failing to list `dir` itself is fatal.
fn listed(
    dir: &Path,
    entry: walkdir::Result<walkdir::DirEntry>,
) -> Result<Option<walkdir::DirEntry>> {
    match entry {
        Ok(entry) => Ok(Some(entry)),
        Err(err) if err.depth() > 0 => {
            warn!(path = ?err.path(), error = %err, "skipping unresolvable entry");
            Ok(None)
        }
        Err(err) => Err(walk_error(dir, err)),
    }
}

fn walk_error(path: &Path, err: walkdir::Error) -> Error {
    let source = err
        .into_io_error()
        .unwrap_or_else(|| std::io::Error::other("filesystem loop detected"));
    Error::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// `path` relative to `base`, with forward slashes.
fn relative_display(path: &Path, base: &Path) -> String {
    let relative = path.strip_prefix(base).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
