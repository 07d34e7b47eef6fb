//! Dashboard page model and its renderers

pub mod chart;
pub mod html;
pub mod terminal;
pub mod view;

pub use chart::{ChartPoint, ChartSeries, ChartSpec, LineStyle};
pub use view::{Banner, BannerLevel, DashboardView, TableView};
