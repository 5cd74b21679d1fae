//! Finished artifacts for the sink: plotly figures, the HTML run summary,
//! and the console classification report. Nothing here touches the
//! filesystem; rendering to disk is the CLI's job.

pub mod plots;
pub mod report;

pub use plots::{plot_confusion_matrix, plot_feature_importance};
pub use report::{classification_report, render_run_report};
