//! Configuration and credential status command.

use anyhow::Result;
use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use console::style;
use serde::Serialize;

use hollandbridge_infra::filesystem::{config_path, secrets_path};
use hollandbridge_types::secret::OPENAI_API_KEY;

use crate::state::AppState;

/// Where the credential would come from. The value itself is never read out.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CredentialStatus {
    Found { source: String },
    Missing,
    Unreadable { error: String },
}

#[derive(Debug, Serialize)]
pub struct StatusReport {
    pub version: &'static str,
    pub data_dir: String,
    pub config_file: String,
    pub secrets_file: String,
    pub base_url: String,
    pub timeout_secs: u64,
    pub listen: String,
    pub credential: CredentialStatus,
}

impl StatusReport {
    pub async fn gather(state: &AppState) -> Self {
        let credential = match state.secret_service.locate(OPENAI_API_KEY).await {
            Ok(Some(source)) => CredentialStatus::Found {
                source: source.to_string(),
            },
            Ok(None) => CredentialStatus::Missing,
            Err(e) => CredentialStatus::Unreadable {
                error: e.to_string(),
            },
        };

        Self {
            version: env!("CARGO_PKG_VERSION"),
            data_dir: state.data_dir.display().to_string(),
            config_file: config_path(&state.data_dir).display().to_string(),
            secrets_file: secrets_path(&state.data_dir).display().to_string(),
            base_url: state.config.backend.base_url.clone(),
            timeout_secs: state.config.backend.timeout_secs,
            listen: format!("{}:{}", state.config.server.host, state.config.server.port),
            credential,
        }
    }
}

/// Display the status dashboard.
pub async fn status(state: &AppState, json: bool) -> Result<()> {
    let report = StatusReport::gather(state).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} Holland Bridge v{}",
        style("⚡").bold(),
        report.version
    );
    println!();

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Setting").fg(Color::White),
        Cell::new("Value").fg(Color::White),
    ]);

    table.add_row(vec![Cell::new("Data dir"), Cell::new(&report.data_dir)]);
    table.add_row(vec![Cell::new("Config file"), Cell::new(&report.config_file)]);
    table.add_row(vec![Cell::new("Secrets file"), Cell::new(&report.secrets_file)]);
    table.add_row(vec![Cell::new("Backend URL"), Cell::new(&report.base_url).fg(Color::Cyan)]);
    table.add_row(vec![
        Cell::new("Timeout"),
        Cell::new(format!("{}s", report.timeout_secs)),
    ]);
    table.add_row(vec![Cell::new("API listen"), Cell::new(&report.listen)]);

    let credential = match &report.credential {
        CredentialStatus::Found { source } => {
            Cell::new(format!("{OPENAI_API_KEY} from {source}")).fg(Color::Green)
        }
        CredentialStatus::Missing => {
            Cell::new(format!("{OPENAI_API_KEY} not configured")).fg(Color::Yellow)
        }
        CredentialStatus::Unreadable { error } => Cell::new(error).fg(Color::Red),
    };
    table.add_row(vec![Cell::new("Credential"), credential]);

    println!("{table}");
    println!();

    if report.credential == CredentialStatus::Missing {
        println!(
            "  {} Set {} or add it to {} to enable report generation.",
            style("i").blue().bold(),
            style(OPENAI_API_KEY).yellow(),
            style(&report.secrets_file).dim()
        );
        println!();
    }

    Ok(())
}
