use std::path::{Path, PathBuf};

use takeoff_core::batch::{discover_pdfs, run_batch, BatchEvent};
use takeoff_core::error::TakeoffError;
use takeoff_core::export::write_takeoff;
use takeoff_core::extraction::pdftotext::PdftotextExtractor;

use crate::output;

pub struct ExtractArgs {
    pub dir: PathBuf,
    pub out_dir: PathBuf,
    pub layout: bool,
    pub parallel: bool,
    pub output_format: String,
}

pub fn run(args: ExtractArgs) -> Result<(), TakeoffError> {
    let pdf_files = discover_pdfs(&args.dir)?;

    if pdf_files.is_empty() {
        println!("No PDF files found in {}.", describe_dir(&args.dir));
        return Ok(());
    }

    println!("Found {} PDF file(s) to process.", pdf_files.len());

    if !PdftotextExtractor::is_available() {
        tracing::warn!("pdftotext does not appear to be installed; every document will fail");
    }
    let extractor = PdftotextExtractor::with_layout(args.layout);
    tracing::debug!(
        dir = %args.dir.display(),
        parallel = args.parallel,
        layout = args.layout,
        "starting batch"
    );

    let takeoff = run_batch(&pdf_files, &extractor, args.parallel, |event| match event {
        BatchEvent::Started(source) => println!("Processing {source}..."),
        BatchEvent::Finished(report) => match &report.error {
            Some(e) => println!("  - Error reading PDF: {e}"),
            None => println!(
                "  - Found {} items with {} subitems",
                report.items, report.subitems
            ),
        },
    });

    let written = write_takeoff(&args.out_dir, &takeoff)?;

    match &written.items {
        Some(path) => println!(
            "\nSaved {} unique items to {}",
            takeoff.items.len(),
            path.display()
        ),
        None => println!("\nNo items found to save."),
    }
    match &written.subitems {
        Some(path) => println!(
            "Saved {} subitems to {}",
            takeoff.subitems.len(),
            path.display()
        ),
        None => println!("No subitems found to save."),
    }

    let summary = takeoff.summary();
    match args.output_format.as_str() {
        "json" => output::json::print(&summary)?,
        _ => output::table::print(&summary),
    }

    println!("\nProcessing complete!");
    Ok(())
}

fn describe_dir(dir: &Path) -> String {
    if dir == Path::new(".") {
        "the current directory".to_string()
    } else {
        dir.display().to_string()
    }
}
