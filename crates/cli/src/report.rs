//! Rendering of operation outcomes for the terminal.

use domain::models::{
    CustomerAddOutcome, CustomerDeleteOutcome, CustomerUpdateOutcome, PhoneAddOutcome,
    PhoneDeleteOutcome, SearchResult,
};
use serde::Serialize;

/// Output format of command reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// An outcome that can be printed as text or JSON.
pub trait Report: Serialize {
    fn render_text(&self) -> String;

    fn render(&self, format: OutputFormat) -> Result<String, serde_json::Error> {
        match format {
            OutputFormat::Text => Ok(self.render_text()),
            OutputFormat::Json => serde_json::to_string_pretty(self),
        }
    }
}

fn with_phone_lines(headline: String, phones: &[PhoneAddOutcome]) -> String {
    phones.iter().fold(headline, |mut text, phone| {
        text.push_str("\n  ");
        text.push_str(&phone.to_string());
        text
    })
}

impl Report for CustomerAddOutcome {
    fn render_text(&self) -> String {
        match self {
            CustomerAddOutcome::Added { phones, .. } => with_phone_lines(self.to_string(), phones),
            CustomerAddOutcome::Duplicate { .. } => self.to_string(),
        }
    }
}

impl Report for CustomerUpdateOutcome {
    fn render_text(&self) -> String {
        match self {
            CustomerUpdateOutcome::Updated {
                phones: Some(phones),
                ..
            } => with_phone_lines(self.to_string(), phones),
            _ => self.to_string(),
        }
    }
}

impl Report for CustomerDeleteOutcome {
    fn render_text(&self) -> String {
        self.to_string()
    }
}

impl Report for PhoneAddOutcome {
    fn render_text(&self) -> String {
        self.to_string()
    }
}

impl Report for PhoneDeleteOutcome {
    fn render_text(&self) -> String {
        self.to_string()
    }
}

impl Report for SearchResult {
    fn render_text(&self) -> String {
        self.to_string()
    }
}
