//! Candlestick chart session: widget seam, interval loading and the
//! `lightweight-charts` binding used in the browser.

pub mod history;
#[cfg(target_arch = "wasm32")]
pub mod lightweight;
pub mod loader;
pub mod session;
pub mod widget;

pub use history::{read_history, HistoryError};
#[cfg(target_arch = "wasm32")]
pub use history::fetch_history;
#[cfg(target_arch = "wasm32")]
pub use lightweight::{mount_chart, observe_resize, LightweightChart};
pub use loader::{IntervalLoader, LoadRequest, LoadState, LoadTicket, OverlapPolicy, Settled};
pub use session::{ChartSession, LoadSnapshot};
pub use widget::{CandlestickStyle, ChartOptions, ChartWidget, WidgetError};
