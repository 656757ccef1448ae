use std::io::IsTerminal;
use std::path::Path;

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;
use voicelines_session::VoiceCatalog;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

const SAMPLE_SIZE: usize = 5;

#[derive(Serialize)]
struct CatalogSummary<'a> {
    file: String,
    identifiers: usize,
    sample: Vec<&'a str>,
}

pub fn print_catalog_summary(path: &Path, catalog: &VoiceCatalog, format: OutputFormat) {
    let mut sample: Vec<&str> = catalog.iter().take(SAMPLE_SIZE).collect();
    sample.sort_unstable();

    match format {
        OutputFormat::Json => {
            let out = CatalogSummary {
                file: path.display().to_string(),
                identifiers: catalog.len(),
                sample,
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["FILE", "IDENTIFIERS", "SAMPLE"])
                .add_row(vec![
                    path.display().to_string(),
                    catalog.len().to_string(),
                    sample.join("\n"),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!(
                "file={} identifiers={} sample=[{}]",
                path.display(),
                catalog.len(),
                sample.join(", ")
            );
        }
    }
}
