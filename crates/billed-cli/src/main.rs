mod config;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use billed_app::navigation::{Navigator, Route};
use billed_app::session::{MemorySession, USER_KEY};
use billed_app::view::SelectedFile;
use billed_app::{BillsController, BillsPage, NewBillController};
use billed_store::{create_store, StoreConfig};
use bytes::Bytes;
use clap::Parser;
use tracing::info;

use crate::config::{Cli, Command};

/// The CLI has no page to swap in; a route change is just reported.
struct LogNavigator;

impl Navigator for LogNavigator {
    fn navigate(&self, route: Route) {
        info!("navigating to {route}");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut store_config = StoreConfig::from_env();
    if let Some(url) = &cli.api_url {
        store_config.api_url = url.clone();
    }
    if let Some(token) = &cli.api_token {
        store_config.api_token = Some(token.clone());
    }
    let store = create_store(&store_config);
    let navigator = Arc::new(LogNavigator);

    match cli.command {
        Command::List => {
            let controller = BillsController::new(Some(store), navigator);
            let mut page = BillsPage::new(controller);
            page.refresh().await;
            if let Some(message) = page.error().message() {
                anyhow::bail!("{message}");
            }
            println!("{}", page.title());
            for row in page.rows() {
                let bill = &row.bill;
                println!(
                    "{:<12} {:<24} {:>10.2} €  {}",
                    row.date_label, bill.name, bill.amount, row.status_label
                );
            }
        }
        Command::Submit {
            expense_type,
            name,
            date,
            amount,
            vat,
            pct,
            commentary,
            file,
        } => {
            let session = load_session(cli.session_file.as_deref())?;
            let mut controller = NewBillController::new(store, navigator, &session)?;

            let data = tokio::fs::read(&file)
                .await
                .with_context(|| format!("read {}", file.display()))?;
            let file_name = file
                .file_name()
                .and_then(|n| n.to_str())
                .map(str::to_string)
                .context("attachment path has no file name")?;
            controller
                .handle_file_selected(SelectedFile {
                    content_type: content_type_for(&file_name).to_string(),
                    name: file_name,
                    data: Bytes::from(data),
                })
                .await;
            if let Some(message) = controller.message().message() {
                anyhow::bail!("{message}");
            }

            let form = controller.form_mut();
            form.expense_type = expense_type;
            form.name = name;
            form.date = date;
            form.amount = amount;
            form.vat = vat;
            form.pct = pct;
            form.commentary = commentary;

            controller.handle_submit().await;
            println!("bill submitted");
        }
    }

    Ok(())
}

fn content_type_for(file_name: &str) -> &'static str {
    if file_name.to_lowercase().ends_with(".png") {
        "image/png"
    } else {
        "image/jpeg"
    }
}

fn load_session(path: Option<&Path>) -> Result<MemorySession> {
    let path =
        path.context("--session-file (or BILLED_SESSION_FILE) is required to submit")?;
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("read {}", path.display()))?;
    let mut session = MemorySession::new();
    session.set(USER_KEY, raw.trim().to_string());
    Ok(session)
}
