//! Docshade CLI: submit a PDF for anonymization and collect the result.
//!
//! The backend host is fixed at build time (DOCSHADE_BACKEND_HOST). Local
//! paths come from DOCSHADE_LEDGER_DIR and DOCSHADE_OUTPUT_DIR.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use docshade_api_client::{ApiClient, WsConnector};
use docshade_cli::{
    exit_code, init_tracing, read_selected_file, report_error, ConsoleNotifier, DirectorySink,
    DocumentView,
};
use docshade_core::{
    ClientConfig, FileStore, Ledger, Notifier, TokioScheduler, UploadController, WorkflowOutcome,
};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "docshade", about = "Docshade document anonymization client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload a PDF, wait for processing and save the anonymized copy
    Upload {
        /// Path to the PDF to upload
        file: PathBuf,
        /// Keep running until the download-window reminder fires
        #[arg(long)]
        wait_for_reminder: bool,
    },
    /// List processed documents still inside their download window
    Documents,
    /// Check backend health
    Health,
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize response")?;
    println!("{}", out);
    Ok(())
}

fn open_ledger(config: &ClientConfig) -> anyhow::Result<Ledger> {
    let store = FileStore::new(&config.ledger_dir)
        .with_context(|| format!("Failed to open ledger at {}", config.ledger_dir.display()))?;
    Ok(Ledger::new(Arc::new(store)))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = ClientConfig::from_env().context("Invalid configuration")?;
    let cli = Cli::parse();

    match cli.command {
        Commands::Upload {
            file,
            wait_for_reminder,
        } => {
            let client = Arc::new(ApiClient::from_config(&config)?);
            let notifier: Arc<dyn Notifier> = Arc::new(ConsoleNotifier);
            let mut controller = UploadController::new(
                client,
                Arc::new(WsConnector::new(config.endpoints())),
                open_ledger(&config)?,
                notifier.clone(),
                Arc::new(TokioScheduler::new(notifier)),
                Arc::new(DirectorySink::new(&config.output_dir)),
            )
            .with_reminder_delay(config.reminder_delay);

            let selected = read_selected_file(&file)?;
            if let Err(e) = controller.select_file(Some(selected)) {
                report_error(&e);
                std::process::exit(exit_code(&e));
            }

            match controller.submit().await {
                Ok(WorkflowOutcome::Completed(record)) => {
                    print_json(&DocumentView::from(record))?;
                    if wait_for_reminder {
                        tracing::info!(
                            delay_secs = config.reminder_delay.as_secs(),
                            "Waiting for download-window reminder"
                        );
                        tokio::time::sleep(config.reminder_delay).await;
                        // let the reminder task run before exiting
                        tokio::task::yield_now().await;
                    }
                }
                Ok(WorkflowOutcome::ClosedWithoutResult) => {
                    eprintln!("Connection closed before processing finished; submit again.");
                    std::process::exit(1);
                }
                Err(e) => {
                    report_error(&e);
                    std::process::exit(exit_code(&e));
                }
            }
        }
        Commands::Documents => {
            let documents: Vec<DocumentView> = open_ledger(&config)?
                .load()
                .into_iter()
                .map(DocumentView::from)
                .collect();
            print_json(&documents)?;
        }
        Commands::Health => {
            let client = ApiClient::from_config(&config)?;
            print_json(&client.health().await)?;
        }
    }

    Ok(())
}
