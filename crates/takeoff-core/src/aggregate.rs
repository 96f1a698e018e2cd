use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::TakeoffError;
use crate::model::{DocumentExtract, Item, Subitem};

/// Per-document counts reported after a document has been processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentReport {
    pub source: String,
    pub items: usize,
    pub subitems: usize,
    pub skipped_lines: usize,
    /// Set when text extraction failed; the document then counts as empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Accumulates items and subitems across all documents of a run.
#[derive(Debug, Default)]
pub struct Aggregator {
    items: Vec<Item>,
    subitems: Vec<Subitem>,
    documents: Vec<DocumentReport>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one document's extract and return its report.
    pub fn absorb(&mut self, extract: DocumentExtract) -> &DocumentReport {
        self.documents.push(DocumentReport {
            source: extract.source,
            items: extract.items.len(),
            subitems: extract.subitems.len(),
            skipped_lines: extract.skipped_lines,
            error: None,
        });
        self.items.extend(extract.items);
        self.subitems.extend(extract.subitems);
        &self.documents[self.documents.len() - 1]
    }

    /// Record a document whose text could not be extracted.
    pub fn record_failure(&mut self, source: &str, error: &TakeoffError) -> &DocumentReport {
        self.documents.push(DocumentReport {
            source: source.to_string(),
            items: 0,
            subitems: 0,
            skipped_lines: 0,
            error: Some(error.to_string()),
        });
        &self.documents[self.documents.len() - 1]
    }

    pub fn documents(&self) -> &[DocumentReport] {
        &self.documents
    }

    /// Close the run: deduplicate items, keep every subitem.
    pub fn finish(self) -> Takeoff {
        let total_items = self.items.len();
        Takeoff {
            items: dedup_items(self.items),
            subitems: self.subitems,
            documents: self.documents,
            total_items,
        }
    }
}

/// Final result of a run, ready to be written out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Takeoff {
    pub items: Vec<Item>,
    pub subitems: Vec<Subitem>,
    pub documents: Vec<DocumentReport>,
    /// Item count before deduplication.
    pub total_items: usize,
}

impl Takeoff {
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            documents: self.documents.clone(),
            failed_documents: self.documents.iter().filter(|d| d.error.is_some()).count(),
            total_items: self.total_items,
            unique_items: self.items.len(),
            subitems: self.subitems.len(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub documents: Vec<DocumentReport>,
    pub failed_documents: usize,
    pub total_items: usize,
    pub unique_items: usize,
    pub subitems: usize,
}

/// Drop exact duplicate items, keeping the first occurrence in order.
pub fn dedup_items(items: Vec<Item>) -> Vec<Item> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(group: &str, name: &str, source: &str) -> Item {
        Item {
            group: group.into(),
            name: name.into(),
            source: source.into(),
        }
    }

    fn subitem(item: &str, source: &str) -> Subitem {
        Subitem {
            item: item.into(),
            description: "Interior door install".into(),
            quantity: "2".into(),
            unit: "EACH".into(),
            unit_price: "450.00".into(),
            group: "G".into(),
            source: source.into(),
        }
    }

    #[test]
    fn test_dedup_keeps_first_occurrence_order() {
        let items = vec![
            item("G", "Doors", "a.pdf"),
            item("G", "Roof", "a.pdf"),
            item("G", "Doors", "a.pdf"),
            item("G", "Doors", "b.pdf"),
        ];
        let deduped = dedup_items(items);
        let names: Vec<(&str, &str)> = deduped
            .iter()
            .map(|i| (i.name.as_str(), i.source.as_str()))
            .collect();
        assert_eq!(names, vec![("Doors", "a.pdf"), ("Roof", "a.pdf"), ("Doors", "b.pdf")]);
    }

    #[test]
    fn test_subitem_duplicates_are_kept() {
        let mut agg = Aggregator::new();
        agg.absorb(DocumentExtract {
            source: "a.pdf".into(),
            group: "G".into(),
            items: vec![item("G", "Doors", "a.pdf"), item("G", "Doors", "a.pdf")],
            subitems: vec![subitem("Doors", "a.pdf"), subitem("Doors", "a.pdf")],
            skipped_lines: 3,
        });
        let takeoff = agg.finish();
        assert_eq!(takeoff.items.len(), 1);
        assert_eq!(takeoff.total_items, 2);
        assert_eq!(takeoff.subitems.len(), 2);
        assert_eq!(takeoff.documents[0].skipped_lines, 3);
    }

    #[test]
    fn test_failure_counts_as_empty_document() {
        let mut agg = Aggregator::new();
        let report = agg
            .record_failure("bad.pdf", &TakeoffError::Extraction("corrupt xref".into()))
            .clone();
        assert_eq!(report.items, 0);
        assert_eq!(report.subitems, 0);
        assert_eq!(report.error.as_deref(), Some("PDF extraction failed: corrupt xref"));

        agg.absorb(DocumentExtract {
            source: "good.pdf".into(),
            items: vec![item("G", "Roof", "good.pdf")],
            ..Default::default()
        });
        assert_eq!(agg.documents().len(), 2);

        let summary = agg.finish().summary();
        assert_eq!(summary.failed_documents, 1);
        assert_eq!(summary.unique_items, 1);
        assert_eq!(summary.subitems, 0);
    }
}
