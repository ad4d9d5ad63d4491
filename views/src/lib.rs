//! Data shaping and view-scoped state for the dashboard.
//!
//! The pure pieces (`paginator`, `table`, `chart`) turn fetched records into
//! renderable models. The view containers own one view's state for as long as
//! it is mounted and apply fetch results through version-tagged tickets.

pub mod chart;
pub mod controls;
pub mod detail_view;
pub mod fetch;
pub mod home_view;
pub mod list_view;
pub mod paginator;
pub mod table;

pub use chart::{Dataset, LineChart};
pub use controls::{Pager, RangeButton};
pub use detail_view::{DetailContent, DetailRequest, DetailView, DetailViewModel, Metric};
pub use fetch::{FetchTracker, Ticket, ViewStatus};
pub use home_view::{ChartRequest, HomeView, HomeViewModel, TrendingCard};
pub use list_view::{ListView, ListViewModel};
pub use paginator::{PageState, ITEMS_PER_PAGE};
pub use table::{CoinRow, Table, TableRow, Trend};
