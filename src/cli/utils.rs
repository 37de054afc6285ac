use serde::Serialize;

use crate::cli::OutputFormat;
use crate::database::Study;

/// Output a success message in the appropriate format
pub fn output_success<T: Serialize>(
    output_format: &OutputFormat,
    message: &str,
    data: &T,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(data)?),
        OutputFormat::Text => println!("✓ {}", message),
    }
    Ok(())
}

/// Output a list of studies as JSON or a simple table
pub fn output_studies(output_format: &OutputFormat, studies: &[Study]) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(studies)?),
        OutputFormat::Text => {
            if studies.is_empty() {
                println!("No studies found");
                return Ok(());
            }
            for line in format_study_rows(studies) {
                println!("{}", line);
            }
        }
    }
    Ok(())
}

fn format_study_rows(studies: &[Study]) -> Vec<String> {
    let mut lines = vec![format!("{:<8} {:<30} {}", "ID", "NAME", "DESCRIPTION")];
    lines.extend(studies.iter().map(|s| {
        format!(
            "{:<8} {:<30} {}",
            s.id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string()),
            s.name,
            s.description.as_deref().unwrap_or("")
        )
    }));
    lines
}
