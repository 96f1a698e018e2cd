pub mod aggregate;
pub mod batch;
pub mod error;
pub mod export;
pub mod extraction;
pub mod model;
pub mod parsing;

use error::TakeoffError;
use extraction::{join_pages, PdfExtractor};
use model::DocumentExtract;

/// Main API entry point: extract items and subitems from one estimate PDF.
///
/// `source` is the document name carried on every record (usually the file
/// name). A PDF with no extractable text yields an empty extract, not an
/// error.
pub fn extract_pdf(
    pdf_bytes: &[u8],
    extractor: &dyn PdfExtractor,
    source: &str,
) -> Result<DocumentExtract, TakeoffError> {
    let pages = extractor.extract_pages(pdf_bytes)?;
    let text = join_pages(&pages);
    Ok(parsing::parse_document(&text, source))
}
