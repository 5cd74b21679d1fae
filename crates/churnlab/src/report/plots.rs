use plotly::common::Orientation;
use plotly::layout::{Axis, Layout};
use plotly::{Bar, HeatMap, Plot};

use crate::metrics::ConfusionMatrix;

const CLASS_LABELS: [&str; 2] = ["stay", "churn"];

/// Confusion-matrix heat map: a 2x2 grid of counts with actual classes on
/// the y axis and predicted classes on the x axis.
pub fn plot_confusion_matrix(cm: &ConfusionMatrix, title: &str) -> Plot {
    let labels: Vec<String> = CLASS_LABELS.iter().map(|s| s.to_string()).collect();
    let z: Vec<Vec<f64>> = cm
        .grid()
        .iter()
        .map(|row| row.iter().map(|&count| count as f64).collect())
        .collect();

    let trace = HeatMap::new(labels.clone(), labels, z);

    let layout = Layout::new()
        .title(title)
        .x_axis(Axis::new().title("Predicted"))
        .y_axis(Axis::new().title("Actual"));

    let mut plot = Plot::new();
    plot.add_trace(trace);
    plot.set_layout(layout);
    plot
}

/// Horizontal bar chart of the ranked importances. Callers pass the ranking
/// already sorted ascending, so the least important feature draws at the
/// bottom of the chart.
pub fn plot_feature_importance(ranked: &[(String, f64)], title: &str) -> Plot {
    let names: Vec<String> = ranked.iter().map(|(name, _)| name.clone()).collect();
    let scores: Vec<f64> = ranked.iter().map(|(_, score)| *score).collect();

    let trace = Bar::new(scores, names).orientation(Orientation::Horizontal);

    let layout = Layout::new()
        .title(title)
        .x_axis(Axis::new().title("Importance Score"))
        .y_axis(Axis::new().title("Feature"));

    let mut plot = Plot::new();
    plot.add_trace(trace);
    plot.set_layout(layout);
    plot
}
