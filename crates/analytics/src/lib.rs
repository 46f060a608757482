//! Median normalization, first-month cohort percentiles, and the view models
//! behind the dashboard pages.

pub mod aggregate;
pub mod cohort;
pub mod dashboard;
pub mod drilldown;
pub mod normalize;
pub mod stats;
pub mod window;

pub use aggregate::{AggregateRow, AggregateView, Tile, TileLayout, TILE_METRICS, TILE_SLOTS};
pub use cohort::{DailyViewStats, EnvelopePoint, JoinedTimeSeriesRecord, COHORT_DAYS};
pub use dashboard::{Dashboard, VideoSummary};
pub use drilldown::{AudienceRow, CountryBucket, TrajectoryPoint, VideoDrilldown};
pub use window::LookbackWindow;
