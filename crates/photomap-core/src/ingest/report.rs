use serde::Serialize;
use std::collections::BTreeMap;

use super::DropKind;

/// A file that produced no record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DroppedFile {
    pub file_name: String,
    pub kind: DropKind,
    pub reason: String,
}

/// Outcome of one ingest batch
#[derive(Debug, Clone, Default, Serialize)]
pub struct IngestReport {
    /// Files handed to the pipeline
    pub submitted: usize,

    /// Records appended to the collection
    pub appended: usize,

    /// Files that produced no record
    pub dropped: Vec<DroppedFile>,
}

impl IngestReport {
    pub fn new(submitted: usize) -> Self {
        Self {
            submitted,
            ..Default::default()
        }
    }

    pub fn dropped_count(&self) -> usize {
        self.dropped.len()
    }

    /// Every submitted file produced a record
    pub fn all_located(&self) -> bool {
        self.dropped.is_empty() && self.appended == self.submitted
    }

    /// Dropped files grouped by kind
    pub fn by_kind(&self) -> BTreeMap<DropKind, usize> {
        let mut counts = BTreeMap::new();
        for dropped in &self.dropped {
            *counts.entry(dropped.kind).or_insert(0) += 1;
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dropped(name: &str, kind: DropKind) -> DroppedFile {
        DroppedFile {
            file_name: name.to_string(),
            kind,
            reason: String::new(),
        }
    }

    #[test]
    fn test_empty_report() {
        let report = IngestReport::new(0);
        assert!(report.all_located());
        assert!(report.by_kind().is_empty());
    }

    #[test]
    fn test_by_kind() {
        let mut report = IngestReport::new(4);
        report.appended = 1;
        report.dropped.push(dropped("a.jpg", DropKind::MissingGeotag));
        report.dropped.push(dropped("b.jpg", DropKind::MissingGeotag));
        report.dropped.push(dropped("c.jpg", DropKind::Decode));

        let counts = report.by_kind();
        assert_eq!(counts.get(&DropKind::MissingGeotag), Some(&2));
        assert_eq!(counts.get(&DropKind::Decode), Some(&1));
        assert_eq!(report.dropped_count(), 3);
        assert!(!report.all_located());
    }
}
