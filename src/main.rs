use anyhow::{Context, Result};
use clap::Parser;
use history_plot::utils::io::{load_history, save_figure};
use history_plot::{render_history_with, PlotConfig};
use log::info;
use std::path::PathBuf;

/// Plot training/validation loss and accuracy curves of a training run.
#[derive(Parser, Debug)]
#[command(version)]
struct Cli {
    /// History file: Keras-style `.json`, or bincode written by this crate.
    history: PathBuf,

    /// Output image; `.svg` writes SVG, anything else PNG.
    #[arg(short, long, default_value = "training_history.png")]
    output: PathBuf,

    /// Figure width in pixels.
    #[arg(long)]
    width: Option<u32>,

    /// Figure height in pixels.
    #[arg(long)]
    height: Option<u32>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let defaults = PlotConfig::default();
    let config = PlotConfig::default().with_size(
        cli.width.unwrap_or(defaults.width),
        cli.height.unwrap_or(defaults.height),
    );

    let history = load_history(&cli.history)
        .with_context(|| format!("failed to load history from {}", cli.history.display()))?;

    if let Some(summary) = history.summary() {
        info!(
            "{} epochs - loss: {:.4}, val_loss: {:.4}, accuracy: {:.2}%, val_accuracy: {:.2}%",
            summary.epochs,
            summary.final_loss,
            summary.final_val_loss,
            summary.final_accuracy * 100.0,
            summary.final_val_accuracy * 100.0
        );
        info!(
            "best val_accuracy at epoch {}, best val_loss at epoch {}",
            summary.best_val_accuracy_epoch, summary.best_val_loss_epoch
        );
    }

    let figure = render_history_with(&history, &config)?;
    save_figure(&cli.output, &figure, &config)
        .with_context(|| format!("failed to write plot to {}", cli.output.display()))?;

    Ok(())
}
