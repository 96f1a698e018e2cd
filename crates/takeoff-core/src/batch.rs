use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{info, warn};

use crate::aggregate::{Aggregator, DocumentReport, Takeoff};
use crate::error::TakeoffError;
use crate::extraction::PdfExtractor;
use crate::model::DocumentExtract;

/// List the PDF files directly inside `dir`, sorted by path.
///
/// Matching is on the `.pdf` extension, case-insensitive. Hidden files
/// (names starting with `.`) and subdirectories are skipped.
pub fn discover_pdfs(dir: &Path) -> Result<Vec<PathBuf>, TakeoffError> {
    let mut pdfs = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && has_pdf_extension(&path) && !is_hidden(&path) {
            pdfs.push(path);
        }
    }
    pdfs.sort();
    Ok(pdfs)
}

fn has_pdf_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .map(|n| n.to_string_lossy().starts_with('.'))
        .unwrap_or(false)
}

/// The name a document is reported under: its file name.
pub fn source_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Read, extract and parse a single PDF file.
pub fn process_file(
    path: &Path,
    extractor: &dyn PdfExtractor,
) -> Result<DocumentExtract, TakeoffError> {
    let pdf_bytes = std::fs::read(path)?;
    crate::extract_pdf(&pdf_bytes, extractor, &source_name(path))
}

/// Progress notifications from `run_batch`, always in input order.
#[derive(Debug, Clone, Copy)]
pub enum BatchEvent<'a> {
    /// About to process the named document. In parallel mode this is sent
    /// when the worker's result is merged.
    Started(&'a str),
    Finished(&'a DocumentReport),
}

/// Process every file in `paths` and aggregate the results.
///
/// A document that fails is logged and counted as empty; the batch carries
/// on. With `parallel`, documents are processed on the rayon pool and merged
/// in input order afterwards, so the result is identical to a sequential run.
pub fn run_batch<F>(
    paths: &[PathBuf],
    extractor: &dyn PdfExtractor,
    parallel: bool,
    mut on_event: F,
) -> Takeoff
where
    F: FnMut(BatchEvent<'_>),
{
    let mut aggregator = Aggregator::new();

    if parallel {
        let results: Vec<_> = paths
            .par_iter()
            .map(|path| (source_name(path), process_file(path, extractor)))
            .collect();
        for (source, result) in results {
            on_event(BatchEvent::Started(&source));
            on_event(BatchEvent::Finished(merge(
                &mut aggregator,
                &source,
                result,
                extractor,
            )));
        }
    } else {
        for path in paths {
            let source = source_name(path);
            on_event(BatchEvent::Started(&source));
            let result = process_file(path, extractor);
            on_event(BatchEvent::Finished(merge(
                &mut aggregator,
                &source,
                result,
                extractor,
            )));
        }
    }

    aggregator.finish()
}

fn merge<'a>(
    aggregator: &'a mut Aggregator,
    source: &str,
    result: Result<DocumentExtract, TakeoffError>,
    extractor: &dyn PdfExtractor,
) -> &'a DocumentReport {
    match result {
        Ok(extract) => {
            info!(
                source,
                backend = extractor.backend_name(),
                items = extract.items.len(),
                subitems = extract.subitems.len(),
                skipped_lines = extract.skipped_lines,
                "processed document"
            );
            aggregator.absorb(extract)
        }
        Err(e) => {
            warn!(source, error = %e, "error reading PDF, counting it as empty");
            aggregator.record_failure(source, &e)
        }
    }
}
