use ampa_core::config::Configuration;
use ampa_core::error::AmpaResult;

/// Prints the configuration as the server resolved it. Secret-bearing fields
/// are skipped at the serializer level, so this is safe to paste into bug
/// reports.
pub fn get_config(config: Configuration) -> AmpaResult<()> {
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}
