//! Deterministic answer-to-prompt serializer.
//!
//! The backend is instructed to pattern-match on this exact shape, so every
//! section is always emitted, in a fixed order, even when its content is
//! empty. Unset answers render as empty text.

use hollandbridge_types::answers::{AdmiredLife, AnswerRecord};

/// Instruction preamble up to the contact block. Braces are literal.
const PREAMBLE: &str = "You are an AI career strategist. Based on the following user data, generate an HTML output strictly in this format:

<h1> The Holland Bridge – Aligned Megatrends and Industries </h1>
<br> This is a beta version of the Holland Bridge, an instrument we are developing as part of the Becoming You Method. Its intention is to help individuals better identify roles aligned with their areas of interest. Your feedback is invaluable to us as we continue refining and improving this tool, thank you!

";

/// Megatrend format instructions that follow the contact block.
const MEGATREND_FORMAT: &str = "Then give at least six megatrends. Each should be formatted like this:

<b> [Megatrend Name] </b>
<ul>
<li><strong>Why it fits:</strong> {description}</li>
<li><strong>Examples:</strong> {description of trends and industries}</li>
<li><strong>Industries:</strong> {list of industries}</li>
</ul>

Only use this exact format in your response.

Use the following data to guide your response:

";

/// Build the outbound prompt for a set of answers.
///
/// Pure: the same record always yields byte-identical output.
pub fn build_insights_prompt(answers: &AnswerRecord) -> String {
    let contact = answers.contact();

    let holland_codes = join(answers.holland_codes().iter().map(|c| c.label()));
    let core_values = join(answers.core_values().iter().map(|v| v.label()));

    let admired_lives: String = answers
        .admired_lives()
        .iter()
        .enumerate()
        .map(|(i, life)| format_admired_life(i + 1, life))
        .collect();

    let traits: String = answers
        .traits()
        .iter()
        .map(|(category, option)| {
            format!(
                "- {}: {}\n",
                category.prompt_label(),
                option.map(|o| o.label()).unwrap_or_default()
            )
        })
        .collect();

    let mut prompt = String::from(PREAMBLE);
    prompt.push_str(&format!(
        "<h2>\n1. First Name: {}<br>\n2. Email: {}\n</h2>\n\n",
        text(&contact.name),
        text(&contact.email)
    ));
    prompt.push_str(MEGATREND_FORMAT);
    prompt.push_str(&format!("### HOLLAND CODES:\n{holland_codes}\n\n"));
    prompt.push_str(&format!("### CORE VALUES:\n{core_values}\n\n"));
    prompt.push_str(&format!("### ADMIRED LIVES:\n{admired_lives}\n"));
    prompt.push_str(&format!("### YOUSCIENCE TRAITS:\n{traits}\n"));
    prompt.push_str(&format!(
        "### INDUSTRIES TO AVOID:\n{}\n",
        text(&contact.industries_to_avoid)
    ));
    prompt
}

fn format_admired_life(position: usize, life: &AdmiredLife) -> String {
    format!(
        "- Person {position}:\n  - Name: {}\n  - Admire: {}\n  - Reject: {}\n",
        text(&life.name),
        text(&life.admire),
        text(&life.reject)
    )
}

fn join<'a>(labels: impl Iterator<Item = &'a str>) -> String {
    labels.collect::<Vec<_>>().join(", ")
}

fn text(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or_default()
}
