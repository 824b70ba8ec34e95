use crate::config::PlotConfig;
use crate::error::{HistoryError, Result};
use crate::training::history::TrainingHistory;
use crate::utils::plot::{plot_error, Figure};
use log::info;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;

/// Saves a history as bincode. An empty history is refused, since
/// [`load_history`] could never read it back.
pub fn save_history(path: impl AsRef<Path>, history: &TrainingHistory) -> Result<()> {
    if history.is_empty() {
        return Err(HistoryError::EmptyHistory);
    }
    let data = bincode::serialize(history)?;
    std::fs::write(path, data)?;
    Ok(())
}

/// Loads a history from a `.json` file (Keras `history.history` layout) or,
/// for any other extension, from bincode written by [`save_history`].
pub fn load_history(path: impl AsRef<Path>) -> Result<TrainingHistory> {
    let path = path.as_ref();
    let data = std::fs::read(path)?;
    let history = if has_extension(path, "json") {
        serde_json::from_slice(&data)?
    } else {
        bincode::deserialize(&data)?
    };
    Ok(history)
}

/// Writes `figure` to `path`: SVG for `.svg`, PNG otherwise.
pub fn save_figure(path: impl AsRef<Path>, figure: &Figure, config: &PlotConfig) -> Result<()> {
    let path = path.as_ref();
    if has_extension(path, "svg") {
        draw_and_present(SVGBackend::new(path, figure.size).into_drawing_area(), figure, config)?;
    } else {
        draw_and_present(BitMapBackend::new(path, figure.size).into_drawing_area(), figure, config)?;
    }
    info!("saved training history plot to {}", path.display());
    Ok(())
}

fn draw_and_present<DB: DrawingBackend>(
    root: DrawingArea<DB, Shift>,
    figure: &Figure,
    config: &PlotConfig,
) -> Result<()> {
    figure.draw(&root, config)?;
    root.present().map_err(plot_error)?;
    Ok(())
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(ext))
}
