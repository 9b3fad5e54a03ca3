//! Chart descriptions for the dashboard
//!
//! Charts are produced as data (`ChartSpec`) and handed to whatever draws
//! them: the terminal renderer in `display`, or an external renderer
//! through JSON/YAML.

pub mod dispatch;
pub mod histogram;
pub mod kind;
pub mod model;

pub use dispatch::{histogram_chart, select_chart_kind};
pub use histogram::{Bin, DEFAULT_BINS};
pub use kind::ChartKind;
pub use model::{BarChart, ChartSpec, HistogramChart, LineChart, PieChart, Series, Slice};
