//! polkasend - desktop transfer console for Substrate chains.
//!
//! Lists vault accounts with their free balances and walks a one-token
//! transfer through make-raw, sign, and send against a configurable node
//! endpoint.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use eframe::egui;
use tokio::sync::mpsc;
use tracing::info;

use polkasend_client::Vault;

mod config;
mod core;
mod shell;

use crate::config::AppConfig;
use crate::core::AppCore;
use crate::shell::{EffectExecutor, PolkasendApp};

#[derive(Parser)]
#[command(name = "polkasend")]
#[command(about = "Desktop transfer console for Substrate chains", long_about = None)]
struct Cli {
    /// Node RPC endpoint for this session (overrides the saved config)
    #[arg(long, env = "POLKASEND_RPC")]
    rpc: Option<String>,

    /// Key vault directory, one secret URI per file
    #[arg(long, env = "POLKASEND_KEYS")]
    keys: Option<PathBuf>,

    /// Use the well-known dev accounts instead of the key vault
    #[arg(long)]
    dev: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "polkasend=info".into()),
        )
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load();
    let endpoint = cli.rpc.unwrap_or(config.endpoint);

    let vault = if cli.dev {
        Vault::dev()
    } else {
        let dir = cli
            .keys
            .or_else(AppConfig::default_keys_dir)
            .unwrap_or_else(|| PathBuf::from("keys"));
        Vault::open(&dir)?
    };

    info!("starting polkasend against {}", endpoint);

    let runtime = tokio::runtime::Runtime::new()?;
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let executor = EffectExecutor::new(runtime.handle().clone(), event_tx, Arc::new(vault));

    let mut core = AppCore::new(endpoint);
    let initial = core.startup();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 720.0])
            .with_title("polkasend"),
        ..Default::default()
    };

    eframe::run_native(
        "polkasend",
        options,
        Box::new(move |cc| {
            configure_style(&cc.egui_ctx);
            Ok(Box::new(PolkasendApp::new(
                core, executor, event_rx, runtime, initial,
            )))
        }),
    )
    .map_err(|e| anyhow::anyhow!("eframe error: {}", e))?;

    Ok(())
}

/// Quiet dark styling: generous spacing, monospace where hex lives.
fn configure_style(ctx: &egui::Context) {
    use egui::{FontFamily, FontId, TextStyle, Vec2};

    let mut style = (*ctx.style()).clone();

    style.spacing.item_spacing = Vec2::new(10.0, 8.0);
    style.spacing.button_padding = Vec2::new(18.0, 8.0);

    style.text_styles = [
        (TextStyle::Heading, FontId::new(18.0, FontFamily::Proportional)),
        (TextStyle::Body, FontId::new(14.0, FontFamily::Proportional)),
        (TextStyle::Monospace, FontId::new(12.0, FontFamily::Monospace)),
        (TextStyle::Button, FontId::new(14.0, FontFamily::Proportional)),
        (TextStyle::Small, FontId::new(11.0, FontFamily::Proportional)),
    ]
    .into();

    ctx.set_style(style);
}
