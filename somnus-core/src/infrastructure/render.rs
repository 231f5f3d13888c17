// somnus-core/src/infrastructure/render.rs
//
// Plain-text tables for the EDA and modeling reports (the `.txt` artifacts
// and the CLI summaries).

use comfy_table::presets::ASCII_MARKDOWN;
use comfy_table::{CellAlignment, Table as TextTable};

use crate::domain::exploration::{EdaSummary, Subset};
use crate::domain::modeling::{ModelReport, TestMetrics};

fn fmt_f64(value: f64) -> String {
    if value.is_finite() {
        format!("{:.4}", value)
    } else {
        "-".to_string()
    }
}

fn fmt_opt(value: Option<f64>) -> String {
    value.map(fmt_f64).unwrap_or_else(|| "-".to_string())
}

fn text_table<H: Into<comfy_table::Cell>>(header: Vec<H>) -> TextTable {
    let mut table = TextTable::new();
    table.load_preset(ASCII_MARKDOWN).set_header(header);
    table
}

fn right_align_numbers(table: &mut TextTable, from: usize) {
    let width = table.column_count();
    for i in from..width {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
}

pub fn render_eda(summary: &EdaSummary) -> String {
    let mut out = String::new();

    let subset = match summary.subset {
        Subset::Train => "training subset",
        Subset::All => "all rows (no 'train' column)",
    };
    out.push_str(&format!("Sleep health EDA: {} ({} samples)\n\n", subset, summary.rows));

    let mut stats = text_table(vec![
        "column", "count", "mean", "std", "min", "25%", "50%", "75%", "max",
    ]);
    for c in &summary.columns {
        stats.add_row(vec![
            c.column.clone(),
            c.count.to_string(),
            fmt_opt(c.mean),
            fmt_opt(c.std),
            fmt_opt(c.min),
            fmt_opt(c.q25),
            fmt_opt(c.median),
            fmt_opt(c.q75),
            fmt_opt(c.max),
        ]);
    }
    right_align_numbers(&mut stats, 1);
    out.push_str(&format!("Descriptive statistics\n{}\n\n", stats));

    let mut disorders = text_table(vec!["sleep_disorder", "count", "mean stress_level"]);
    for (label, count) in &summary.disorder_counts {
        disorders.add_row(vec![
            label.clone(),
            count.to_string(),
            fmt_opt(summary.stress_by_disorder.get(label).copied()),
        ]);
    }
    right_align_numbers(&mut disorders, 1);
    out.push_str(&format!("Stress by sleep disorder\n{}\n\n", disorders));

    let mut corr = text_table(vec!["x", "y", "pearson r"]);
    for c in &summary.correlations {
        corr.add_row(vec![c.x.clone(), c.y.clone(), fmt_opt(c.pearson)]);
    }
    right_align_numbers(&mut corr, 2);
    out.push_str(&format!("Correlations\n{}\n\n", corr));

    match &summary.duration_trend {
        Some(t) => out.push_str(&format!(
            "Trend: stress_level = {} * sleep_duration + {}\n",
            fmt_f64(t.slope),
            fmt_f64(t.intercept)
        )),
        None => out.push_str("Trend: not enough varied samples\n"),
    }
    out
}

pub fn render_cv(report: &ModelReport) -> String {
    let mut table = text_table(vec!["fold", "train MSE", "test MSE", "train R2", "test R2"]);
    for f in &report.folds {
        table.add_row(vec![
            f.fold.to_string(),
            fmt_f64(f.train_mse),
            fmt_f64(f.test_mse),
            fmt_f64(f.train_r2),
            fmt_f64(f.test_r2),
        ]);
    }
    let m = &report.cv_mean;
    table.add_row(vec![
        "mean".to_string(),
        fmt_f64(m.train_mse),
        fmt_f64(m.test_mse),
        fmt_f64(m.train_r2),
        fmt_f64(m.test_r2),
    ]);
    right_align_numbers(&mut table, 1);
    format!(
        "Ridge cross-validation ({} folds, {} training samples)\n{}\n",
        report.folds.len(),
        report.train_rows,
        table
    )
}

pub fn render_test_metrics(metrics: &TestMetrics) -> String {
    let mut table = text_table(vec!["Metric", "Value"]);
    table.add_row(vec!["MSE".to_string(), fmt_f64(metrics.mse)]);
    table.add_row(vec!["R2 Score".to_string(), fmt_f64(metrics.r2)]);
    right_align_numbers(&mut table, 1);
    format!("Held-out evaluation ({} samples)\n{}\n", metrics.rows, table)
}
