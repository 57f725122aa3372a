use crate::errors;
use crate::output::OutputWriter;
use crate::output_types::BatchOutput;
use anyhow::{Context, Result};
use photomap_core::formats::is_supported;
use photomap_core::ingest::{DropKind, IngestReport};
use photomap_core::models::PhotoSource;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A photo discovered while scanning the input paths
#[derive(Debug, Clone)]
pub struct DiscoveredFile {
    /// Path to the file
    pub path: PathBuf,

    /// File size in bytes
    pub size: u64,
}

/// Scan files and directories for supported photos
///
/// Files named explicitly are taken as-is when their extension is
/// supported. Directories are scanned one level deep unless `recursive`.
pub fn scan_paths(paths: &[PathBuf], recursive: bool) -> Result<Vec<DiscoveredFile>> {
    let mut discovered = Vec::new();

    for path in paths {
        if !path.exists() {
            return Err(errors::input_not_found(&path.display().to_string()).into());
        }

        if path.is_dir() {
            discovered.extend(scan_directory(path, recursive)?);
        } else if is_supported(path) {
            discovered.push(discover(path)?);
        } else {
            tracing::debug!(path = %path.display(), "Skipping unsupported file");
        }
    }

    Ok(discovered)
}

/// Scan a directory for supported photos, sorted by path
pub fn scan_directory(dir_path: &Path, recursive: bool) -> Result<Vec<DiscoveredFile>> {
    let max_depth = if recursive { usize::MAX } else { 1 };
    let mut discovered = Vec::new();

    for entry in WalkDir::new(dir_path).max_depth(max_depth).sort_by_file_name() {
        let entry = entry
            .with_context(|| format!("Failed to read directory: {}", dir_path.display()))?;

        if entry.file_type().is_file() && is_supported(entry.path()) {
            discovered.push(discover(entry.path())?);
        }
    }

    Ok(discovered)
}

fn discover(path: &Path) -> Result<DiscoveredFile> {
    let metadata = path
        .metadata()
        .with_context(|| format!("Failed to read file metadata: {}", path.display()))?;

    Ok(DiscoveredFile {
        path: path.to_path_buf(),
        size: metadata.len(),
    })
}

/// Pipeline sources for the discovered files
pub fn to_sources(files: &[DiscoveredFile]) -> Vec<PhotoSource> {
    files.iter().map(|f| PhotoSource::from_path(&f.path)).collect()
}

/// Summary of one ingest batch
#[derive(Debug, Clone)]
pub struct BatchSummary {
    report: IngestReport,
}

impl BatchSummary {
    pub fn new(report: IngestReport) -> Self {
        Self { report }
    }

    pub fn located(&self) -> usize {
        self.report.appended
    }

    pub fn skipped(&self) -> usize {
        self.report.dropped_count()
    }

    /// Skipped files counted per drop kind
    pub fn skipped_by_kind(&self) -> BTreeMap<DropKind, usize> {
        self.report.by_kind()
    }

    pub fn to_output(&self) -> BatchOutput {
        BatchOutput {
            submitted: self.report.submitted,
            located: self.located(),
            skipped: self.skipped(),
            skipped_by_kind: self
                .skipped_by_kind()
                .into_iter()
                .map(|(kind, count)| (kind.to_string(), count))
                .collect(),
            skipped_files: self.report.dropped.clone(),
        }
    }

    /// Display summary to output
    pub fn display(&self, output: &OutputWriter) {
        output.section("Batch Summary");
        output.kv("Photos", self.report.submitted);
        output.kv("Located", self.located());
        output.kv("Skipped", self.skipped());

        let by_kind = self.skipped_by_kind();
        if !by_kind.is_empty() {
            output.section("Skipped by Reason");
            for (kind, count) in &by_kind {
                output.kv(describe(*kind), count);
            }
        }

        if !self.report.dropped.is_empty() {
            output.section("Skipped Files");
            for dropped in &self.report.dropped {
                output.warning(format!("{} ({}) - {}", dropped.file_name, dropped.kind, dropped.reason));
            }
        }
    }
}

/// Human label for a drop kind
pub fn describe(kind: DropKind) -> &'static str {
    match kind {
        DropKind::FileRead => "Unreadable",
        DropKind::Decode => "Not an image",
        DropKind::MissingGeotag => "No GPS tags",
        DropKind::TimedOut => "Timed out",
        DropKind::Cancelled => "Cancelled",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use photomap_core::ingest::DroppedFile;
    use std::fs;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        fs::write(path, b"x").unwrap();
    }

    #[test]
    fn test_scan_directory_filters_extensions() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("a.jpg"));
        touch(&dir.path().join("b.PNG"));
        touch(&dir.path().join("notes.txt"));

        let files = scan_directory(dir.path(), false).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|f| f.path.file_name().unwrap().to_string_lossy().to_string())
            .collect();

        assert_eq!(names, vec!["a.jpg", "b.PNG"]);
        assert_eq!(files[0].size, 1);
    }

    #[test]
    fn test_recursive_scan() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("2024").join("june");
        fs::create_dir_all(&nested).unwrap();
        touch(&dir.path().join("top.jpg"));
        touch(&nested.join("deep.heic"));

        assert_eq!(scan_directory(dir.path(), false).unwrap().len(), 1);
        assert_eq!(scan_directory(dir.path(), true).unwrap().len(), 2);
    }

    #[test]
    fn test_missing_input_is_an_error() {
        let result = scan_paths(&[PathBuf::from("/nonexistent/photos")], false);
        assert!(result.is_err());
    }

    #[test]
    fn test_explicit_files() {
        let dir = TempDir::new().unwrap();
        let photo = dir.path().join("one.jpeg");
        let other = dir.path().join("readme.md");
        touch(&photo);
        touch(&other);

        let files = scan_paths(&[photo.clone(), other], false).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path, photo);
    }

    #[test]
    fn test_summary_output() {
        let mut report = IngestReport::new(3);
        report.appended = 1;
        for (name, kind) in [("a.jpg", DropKind::MissingGeotag), ("b.jpg", DropKind::MissingGeotag)] {
            report.dropped.push(DroppedFile {
                file_name: name.to_string(),
                kind,
                reason: "no GPS".to_string(),
            });
        }

        let output = BatchSummary::new(report).to_output();
        assert_eq!(output.located, 1);
        assert_eq!(output.skipped, 2);
        assert_eq!(output.skipped_by_kind.get("missing_geotag"), Some(&2));
    }
}
