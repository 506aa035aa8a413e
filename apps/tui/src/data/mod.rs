pub mod aggregate;
pub mod cache;
pub mod filter;
pub mod indicators;
pub mod scores;
pub mod sheet;

pub use aggregate::{aggregate_by_theme, mean, ThemeAggregate};
pub use cache::{DatasetCache, Session};
pub use filter::{area_options, distinct, filter_by};
pub use indicators::{forward_fill, load_indicators, IndicatorRow};
pub use scores::{load_scores, read_scores, ScoreRow, ScoreTable};
