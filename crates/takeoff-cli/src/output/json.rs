use takeoff_core::aggregate::RunSummary;
use takeoff_core::error::TakeoffError;

pub fn print(summary: &RunSummary) -> Result<(), TakeoffError> {
    let json = serde_json::to_string_pretty(summary)?;
    println!("\n{json}");
    Ok(())
}
