//! Loss and accuracy curves for a training run.
//!
//! A [`TrainingHistory`] holds the per-epoch `loss`, `val_loss`, `accuracy`
//! and `val_accuracy` of a run. [`render_history`] turns it into a [`Figure`]
//! with the two loss curves on the left and the two accuracy curves on the
//! right; the figure can be drawn on any `plotters` drawing area or written
//! to disk with [`utils::io::save_figure`].

pub mod config;
pub mod error;
pub mod training;
pub mod utils;

pub use config::PlotConfig;
pub use error::{HistoryError, Result};
pub use training::history::{HistorySummary, TrainingHistory};
pub use utils::plot::{render_history, render_history_with, Figure, LegendPosition, Panel, Series};
