use crate::config::PlotConfig;
use crate::error::{HistoryError, Result};
use crate::training::history::TrainingHistory;
use log::debug;
use plotters::coord::Shift;
use plotters::prelude::*;

pub const TRAIN_LOSS: &str = "Train Loss";
pub const VALIDATION_LOSS: &str = "Validation Loss";
pub const TRAIN_ACCURACY: &str = "Train Accuracy";
pub const VALIDATION_ACCURACY: &str = "Validation Accuracy";

const TRAIN_COLOR: RGBColor = BLUE;
const VALIDATION_COLOR: RGBColor = RED;

// Above this many epochs plotters thins the tick labels (still integers only).
const MAX_X_LABELS: usize = 20;

/// One labelled line of per-epoch values.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    pub color: RGBColor,
    pub points: Vec<(usize, f64)>,
}

impl Series {
    fn from_epochs(label: &str, color: RGBColor, values: &[f64]) -> Self {
        Series {
            label: label.to_string(),
            color,
            points: values.iter().copied().enumerate().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Corner of a panel holding its legend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendPosition {
    UpperRight,
    LowerRight,
}

impl From<LegendPosition> for SeriesLabelPosition {
    fn from(position: LegendPosition) -> Self {
        match position {
            LegendPosition::UpperRight => SeriesLabelPosition::UpperRight,
            LegendPosition::LowerRight => SeriesLabelPosition::LowerRight,
        }
    }
}

/// A single chart: epoch on the x axis, one or more series with a legend.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub title: String,
    pub y_desc: String,
    /// Whole epochs that get a tick, `0..epochs`.
    pub x_ticks: Vec<usize>,
    pub y_range: (f64, f64),
    pub legend: LegendPosition,
    pub series: Vec<Series>,
}

impl Panel {
    fn new(
        title: &str,
        y_desc: &str,
        epochs: usize,
        min_top: f64,
        legend: LegendPosition,
        series: Vec<Series>,
    ) -> Self {
        let y_range = y_range(&series, min_top);
        Panel {
            title: title.to_string(),
            y_desc: y_desc.to_string(),
            x_ticks: (0..epochs).collect(),
            y_range,
            legend,
            series,
        }
    }

    pub fn labels(&self) -> Vec<&str> {
        self.series.iter().map(|s| s.label.as_str()).collect()
    }

    fn draw<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        config: &PlotConfig,
    ) -> Result<()> {
        let last_epoch = self.x_ticks.last().copied().unwrap_or(0);
        let (y_min, y_max) = self.y_range;
        let font = config.font_family.as_str();

        let mut chart = ChartBuilder::on(area)
            .caption(&self.title, (font, config.caption_font_size))
            .margin(10)
            .x_label_area_size(30)
            .y_label_area_size(45)
            .build_cartesian_2d(0usize..last_epoch.max(1), y_min..y_max)
            .map_err(plot_error)?;

        // A single epoch still gets a 0..1 axis; only label whole epochs we have.
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(self.x_ticks.len().clamp(2, MAX_X_LABELS))
            .x_label_formatter(&|x: &usize| {
                if *x <= last_epoch {
                    x.to_string()
                } else {
                    String::new()
                }
            })
            .x_desc("Epoch")
            .y_desc(self.y_desc.as_str())
            .label_style((font, config.label_font_size))
            .draw()
            .map_err(plot_error)?;

        let line_width = config.line_width;
        for series in &self.series {
            let color = series.color;
            chart
                .draw_series(LineSeries::new(
                    series.points.iter().copied(),
                    color.stroke_width(line_width),
                ))
                .map_err(plot_error)?
                .label(series.label.as_str())
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(line_width))
                });

            chart
                .draw_series(
                    series
                        .points
                        .iter()
                        .map(|&point| Circle::new(point, 3, color.filled())),
                )
                .map_err(plot_error)?;
        }

        chart
            .configure_series_labels()
            .position(self.legend.into())
            .label_font((font, config.label_font_size))
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()
            .map_err(plot_error)?;

        Ok(())
    }
}

/// Two panels side by side: loss on the left, accuracy on the right.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub size: (u32, u32),
    pub panels: [Panel; 2],
}

impl Figure {
    pub fn loss_panel(&self) -> &Panel {
        &self.panels[0]
    }

    pub fn accuracy_panel(&self) -> &Panel {
        &self.panels[1]
    }

    /// Draws both panels onto `area`, split into two equal columns.
    /// Presenting the area is left to the caller.
    pub fn draw<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        config: &PlotConfig,
    ) -> Result<()> {
        area.fill(&WHITE).map_err(plot_error)?;

        let columns = area.split_evenly((1, 2));
        for (panel, column) in self.panels.iter().zip(columns.iter()) {
            panel.draw(column, config)?;
        }
        Ok(())
    }
}

pub fn render_history(history: &TrainingHistory) -> Result<Figure> {
    render_history_with(history, &PlotConfig::default())
}

/// Builds the loss/accuracy figure for `history`. Nothing is drawn yet;
/// see [`Figure::draw`] and [`crate::utils::io::save_figure`].
pub fn render_history_with(history: &TrainingHistory, config: &PlotConfig) -> Result<Figure> {
    if history.is_empty() {
        return Err(HistoryError::EmptyHistory);
    }

    let epochs = history.epochs();
    debug!("rendering training history with {} epochs", epochs);

    // Loss falls toward the lower right and accuracy rises toward the upper
    // right, so each legend goes in the opposite corner.
    let loss = Panel::new(
        "Training and Validation Loss",
        "Loss",
        epochs,
        0.0,
        LegendPosition::UpperRight,
        vec![
            Series::from_epochs(TRAIN_LOSS, TRAIN_COLOR, history.loss()),
            Series::from_epochs(VALIDATION_LOSS, VALIDATION_COLOR, history.val_loss()),
        ],
    );

    let accuracy = Panel::new(
        "Training and Validation Accuracy",
        "Accuracy",
        epochs,
        1.0,
        LegendPosition::LowerRight,
        vec![
            Series::from_epochs(TRAIN_ACCURACY, TRAIN_COLOR, history.accuracy()),
            Series::from_epochs(VALIDATION_ACCURACY, VALIDATION_COLOR, history.val_accuracy()),
        ],
    );

    Ok(Figure {
        size: (config.width, config.height),
        panels: [loss, accuracy],
    })
}

pub(crate) fn plot_error(err: impl std::fmt::Display) -> HistoryError {
    HistoryError::Plot(err.to_string())
}

// Spans zero and every finite value with 10% headroom, and reaches at least `min_top`.
fn y_range(series: &[Series], min_top: f64) -> (f64, f64) {
    let values = series
        .iter()
        .flat_map(|s| s.points.iter().map(|&(_, y)| y))
        .filter(|y| y.is_finite());

    let (low, high) = values.fold((0.0f64, 0.0f64), |(lo, hi), y| (lo.min(y), hi.max(y)));
    let top = (high * 1.1).max(min_top);
    let top = if top > low { top } else { low + 1.0 };
    (low * 1.1, top)
}
