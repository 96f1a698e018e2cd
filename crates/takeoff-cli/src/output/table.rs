use takeoff_core::aggregate::RunSummary;

pub fn print(summary: &RunSummary) {
    println!("\n=== Summary ===\n");

    let max_name = name_width(summary);

    println!(
        "  {:<width$}  {:>5}  {:>8}  {:>7}",
        "Document",
        "Items",
        "Subitems",
        "Skipped",
        width = max_name
    );
    for doc in &summary.documents {
        let failed_marker = if doc.error.is_some() { "  (failed)" } else { "" };
        println!(
            "  {:<width$}  {:>5}  {:>8}  {:>7}{}",
            doc.source,
            doc.items,
            doc.subitems,
            doc.skipped_lines,
            failed_marker,
            width = max_name
        );
    }
    println!();

    println!(
        "  Items: {} unique ({} found)",
        summary.unique_items, summary.total_items
    );
    println!("  Subitems: {}", summary.subitems);
    if summary.failed_documents > 0 {
        println!(
            "  Documents that could not be read: {}",
            summary.failed_documents
        );
    }
}

/// Width of the document column, in characters.
fn name_width(summary: &RunSummary) -> usize {
    summary
        .documents
        .iter()
        .map(|d| d.source.chars().count())
        .max()
        .unwrap_or(0)
        .max("Document".len())
}
