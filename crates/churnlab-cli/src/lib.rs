//! Output side of the churnlab binary: config loading, the console
//! classification report, and rendering finished plot/report artifacts to
//! disk. The core hands over ready-made metric and plot values; this crate
//! only decides filenames and writes files.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use churnlab::config::PipelineConfig;
use churnlab::pipeline::PipelineRun;
use churnlab::report::{
    classification_report, plot_confusion_matrix, plot_feature_importance, render_run_report,
};

/// Load a pipeline configuration from a JSON file. Missing fields fall back
/// to the defaults.
pub fn load_pipeline_config<P: AsRef<Path>>(path: P) -> Result<PipelineConfig> {
    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config: {}", path.as_ref().display()))?;
    let config: PipelineConfig = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config: {}", path.as_ref().display()))?;
    Ok(config)
}

/// Print the per-model accuracy and classification report to stdout.
pub fn print_console_report(run: &PipelineRun) {
    for model in &run.models {
        println!("=== {} Model Evaluation ===", model.name);
        println!("Accuracy: {:.4}", model.evaluation.accuracy);
        println!("Classification Report:");
        println!("{}", classification_report(&model.evaluation));
    }
}

/// Write the plot artifacts (and, unless disabled, the HTML run summary)
/// into `output_dir`. Returns the paths written.
pub fn write_artifacts(
    run: &PipelineRun,
    output_dir: &Path,
    with_report: bool,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output dir: {}", output_dir.display()))?;

    let mut written = Vec::new();

    for model in &run.models {
        let slug = model.name.to_lowercase().replace(' ', "_");

        let cm_path = output_dir.join(format!("{}_confusion_matrix.html", slug));
        let title = format!("{} Confusion Matrix", model.name);
        plot_confusion_matrix(&model.evaluation.confusion, &title).write_html(&cm_path);
        written.push(cm_path);

        if let Some(ranked) = &model.importance {
            let imp_path = output_dir.join(format!("{}_feature_importance.html", slug));
            let title = format!("Feature Importances from {}", model.name);
            plot_feature_importance(ranked, &title).write_html(&imp_path);
            written.push(imp_path);
        }
    }

    if with_report {
        let report_path = output_dir.join("churn_report.html");
        fs::write(&report_path, render_run_report(run))
            .with_context(|| format!("Failed to write report: {}", report_path.display()))?;
        written.push(report_path);
    }

    Ok(written)
}
