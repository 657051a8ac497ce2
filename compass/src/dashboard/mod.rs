mod text;
mod views;

pub use text::render_text;
pub use views::{
    DashboardView, MediaSection, ReportView, TrendPoint, TrendView, EMPTY_TREND_PROMPT,
    TREND_CAPTION,
};
