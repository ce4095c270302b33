//! Print the generation payload for a saved answers file.

use std::path::Path;

use anyhow::{Context, Result};

use hollandbridge_core::prompt::build_insights_prompt;
use hollandbridge_types::answers::AnswerRecord;

/// Read an `AnswerRecord` saved as JSON.
///
/// Selection caps are re-checked on load, so an over-long list is an error.
pub async fn load_answers(path: &Path) -> Result<AnswerRecord> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read answers from {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse answers in {}", path.display()))
}

pub async fn print_prompt(path: &Path, json: bool) -> Result<()> {
    let answers = load_answers(path).await?;
    let prompt = build_insights_prompt(&answers);

    if json {
        let out = serde_json::json!({ "prompt": prompt });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        print!("{prompt}");
    }
    Ok(())
}
