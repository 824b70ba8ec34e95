use history_plot::utils::plot::{TRAIN_ACCURACY, TRAIN_LOSS, VALIDATION_ACCURACY, VALIDATION_LOSS};
use history_plot::{render_history, HistoryError, PlotConfig, TrainingHistory};
use plotters::prelude::*;

fn three_epochs() -> TrainingHistory {
    TrainingHistory::new(
        vec![0.9, 0.5, 0.3],
        vec![1.0, 0.6, 0.4],
        vec![0.5, 0.7, 0.85],
        vec![0.45, 0.65, 0.8],
    )
    .unwrap()
}

#[test]
fn three_epoch_run_gives_two_panels_of_two_series() {
    let figure = render_history(&three_epochs()).unwrap();

    assert_eq!(figure.panels.len(), 2);
    for panel in &figure.panels {
        assert_eq!(panel.series.len(), 2);
        assert!(panel.series.iter().all(|s| s.points.len() == 3));
        assert_eq!(panel.x_ticks, vec![0, 1, 2]);
    }

    let loss = figure.loss_panel();
    assert_eq!(loss.labels(), vec![TRAIN_LOSS, VALIDATION_LOSS]);
    assert_eq!(loss.series[0].points, vec![(0, 0.9), (1, 0.5), (2, 0.3)]);

    let accuracy = figure.accuracy_panel();
    assert_eq!(accuracy.labels(), vec![TRAIN_ACCURACY, VALIDATION_ACCURACY]);
    assert_eq!(accuracy.series[1].points, vec![(0, 0.45), (1, 0.65), (2, 0.8)]);
}

#[test]
fn rendering_twice_gives_equal_figures() {
    let history = three_epochs();
    assert_eq!(render_history(&history).unwrap(), render_history(&history).unwrap());
}

#[test]
fn single_epoch_gives_single_point_series() {
    let mut history = TrainingHistory::default();
    history.record(0.7, 0.8, 0.6, 0.55);

    let figure = render_history(&history).unwrap();
    for panel in &figure.panels {
        assert_eq!(panel.x_ticks, vec![0]);
        assert!(panel.series.iter().all(|s| s.points.len() == 1));
    }
}

#[test]
fn mismatched_lengths_fail_before_rendering() {
    let err = TrainingHistory::new(
        vec![0.9, 0.5, 0.3],
        vec![1.0, 0.6],
        vec![0.5, 0.7, 0.85],
        vec![0.45, 0.65, 0.8],
    )
    .unwrap_err();

    assert!(matches!(
        err,
        HistoryError::MismatchedLength { expected: 3, found: 2, .. }
    ));
    assert_eq!(err.to_string(), "metric `val_loss` has 2 epochs, expected 3");
}

#[test]
fn ticks_are_whole_epochs_for_long_runs() {
    let mut history = TrainingHistory::default();
    for epoch in 0..50 {
        let t = epoch as f64 / 50.0;
        history.record(1.0 - t, 1.1 - t, t, t * 0.9);
    }

    let figure = render_history(&history).unwrap();
    let expected: Vec<usize> = (0..50).collect();
    assert_eq!(figure.loss_panel().x_ticks, expected);
    assert_eq!(figure.accuracy_panel().x_ticks, expected);
}

fn draw_to_svg(history: &TrainingHistory) -> String {
    let config = PlotConfig::default();
    let figure = render_history(history).unwrap();

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, figure.size).into_drawing_area();
        figure.draw(&root, &config).unwrap();
        root.present().unwrap();
    }
    svg
}

// Contents of every <text> element, in drawing order.
fn svg_texts(svg: &str) -> Vec<String> {
    svg.split("<text")
        .skip(1)
        .filter_map(|element| {
            let start = element.find('>')? + 1;
            let end = element.find("</text>")?;
            Some(element[start..end].trim().to_string())
        })
        .collect()
}

// Integer-valued texts are the epoch tick labels; the y axes print floats.
fn epoch_labels(texts: &[String]) -> Vec<usize> {
    let mut labels: Vec<usize> = texts.iter().filter_map(|t| t.parse().ok()).collect();
    labels.sort_unstable();
    labels
}

#[test]
fn draws_legends_into_svg() {
    let svg = draw_to_svg(&three_epochs());
    let texts = svg_texts(&svg);

    for label in [TRAIN_LOSS, VALIDATION_LOSS, TRAIN_ACCURACY, VALIDATION_ACCURACY] {
        assert!(texts.iter().any(|t| t == label), "missing legend label {label}");
    }
}

#[test]
fn drawn_ticks_are_the_whole_epochs() {
    let texts = svg_texts(&draw_to_svg(&three_epochs()));

    // Once per panel.
    assert_eq!(epoch_labels(&texts), vec![0, 0, 1, 1, 2, 2]);
}

#[test]
fn single_epoch_draws_only_tick_zero() {
    let mut history = TrainingHistory::default();
    history.record(0.7, 0.8, 0.6, 0.55);

    let texts = svg_texts(&draw_to_svg(&history));

    assert_eq!(epoch_labels(&texts), vec![0, 0]);
    assert!(!texts.iter().any(|t| t == "1"));
}
