use maud::{html, DOCTYPE};

use crate::metrics::Evaluation;
use crate::pipeline::PipelineRun;

/// sklearn-style classification report for one model, suitable for the
/// console.
pub fn classification_report(eval: &Evaluation) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:>12} {:>10} {:>10} {:>10} {:>10}\n\n",
        "", "precision", "recall", "f1-score", "support"
    ));
    for (label, m) in [("stay", &eval.stay), ("churn", &eval.churn)] {
        out.push_str(&format!(
            "{:>12} {:>10.2} {:>10.2} {:>10.2} {:>10}\n",
            label, m.precision, m.recall, m.f1, m.support
        ));
    }
    out.push_str(&format!(
        "\n{:>12} {:>32.2} {:>10}\n",
        "accuracy",
        eval.accuracy,
        eval.confusion.total()
    ));
    out
}

/// Self-contained HTML summary of a pipeline run.
pub fn render_run_report(run: &PipelineRun) -> String {
    let generated = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();

    let markup = html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                title { "churnlab run report" }
                style {
                    "body{font-family:sans-serif;margin:2em}"
                    "table{border-collapse:collapse;margin:1em 0}"
                    "td,th{border:1px solid #999;padding:4px 10px;text-align:right}"
                    "th:first-child,td:first-child{text-align:left}"
                }
            }
            body {
                h1 { "Churn prediction run" }
                p {
                    "Generated " (generated) " for " (run.population_size)
                    " customers (seed " (run.config.seed) ", "
                    (run.held_out_size) " held out)."
                }
                @for model in &run.models {
                    h2 { (model.name) }
                    p { "Accuracy: " (format!("{:.3}", model.evaluation.accuracy)) }
                    table {
                        tr { th { "class" } th { "precision" } th { "recall" } th { "f1" } th { "support" } }
                        @for (label, m) in [("stay", &model.evaluation.stay), ("churn", &model.evaluation.churn)] {
                            tr {
                                td { (label) }
                                td { (format!("{:.2}", m.precision)) }
                                td { (format!("{:.2}", m.recall)) }
                                td { (format!("{:.2}", m.f1)) }
                                td { (m.support) }
                            }
                        }
                    }
                    table {
                        tr { th { "" } th { "predicted stay" } th { "predicted churn" } }
                        tr {
                            td { "actual stay" }
                            td { (model.evaluation.confusion.true_negative) }
                            td { (model.evaluation.confusion.false_positive) }
                        }
                        tr {
                            td { "actual churn" }
                            td { (model.evaluation.confusion.false_negative) }
                            td { (model.evaluation.confusion.true_positive) }
                        }
                    }
                    @if let Some(ranked) = &model.importance {
                        h3 { "Feature importances" }
                        table {
                            tr { th { "feature" } th { "score" } }
                            @for (name, score) in ranked {
                                tr { td { (name) } td { (format!("{:.4}", score)) } }
                            }
                        }
                    }
                }
            }
        }
    };

    markup.into_string()
}
