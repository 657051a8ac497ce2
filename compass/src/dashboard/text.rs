use std::fmt::Write;

use super::{DashboardView, MediaSection, ReportView, TrendView};

/// Plain-text rendering of a dashboard, used by the `analyze` command.
pub fn render_text(view: &DashboardView) -> String {
    let mut out = String::new();

    if let Some(error) = &view.error {
        let _ = writeln!(out, "Error: {error}");
    }

    if let Some(report) = &view.report {
        render_report(&mut out, report);
    }

    match &view.trend {
        TrendView::Empty { prompt } => {
            let _ = writeln!(out, "{prompt}");
        }
        TrendView::Chart { points, caption } => {
            let _ = writeln!(out, "Mood trend");
            for point in points {
                let _ = writeln!(
                    out,
                    "  {}  {:<10} {}",
                    point.label,
                    point.mood.label(),
                    "*".repeat(point.score as usize)
                );
            }
            let _ = writeln!(out, "  {caption}");
        }
    }

    out
}

fn render_report(out: &mut String, report: &ReportView) {
    let _ = writeln!(out, "Overall mood: {} (score {})", report.mood, report.score);
    let _ = writeln!(out, "{}", report.summary);
    let _ = writeln!(out);
    let _ = writeln!(out, "Health tips");
    for tip in &report.health_tips {
        let _ = writeln!(out, "  - {tip}");
    }

    for section in [&report.movies, &report.books].into_iter().flatten() {
        render_section(out, section);
    }
    let _ = writeln!(out);
}

fn render_section(out: &mut String, section: &MediaSection) {
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", section.label);
    for item in &section.items {
        let _ = writeln!(out, "  - {}: {}", item.title, item.reason);
    }
}
