//! History list and metrics view.

mod history_list;
mod metrics_view;

pub use history_list::HistoryList;
pub use metrics_view::MetricsView;
