//! Activity Charts
//!
//! Recent-activity bar charts for mailing lists:
//! - [`series`]: parsing and validating daily message counts
//! - [`layout`]: scales, bars and grid lines
//! - [`svg`]: SVG output
//! - [`template`]: per-list chart URLs
//! - [`loader`]: guarded, strictly sequential loading into regions

pub mod layout;
pub mod loader;
pub mod series;
pub mod svg;
pub mod template;

pub use layout::{Bar, ChartLayout, ChartProps};
pub use loader::{ChartError, ChartLoader, ChartOutcome, ChartRow, OverviewChart};
pub use series::{ChartPoint, ChartSeries, EvolutionResponse, RawPoint, SeriesError};
pub use svg::{render_svg, RenderedChart, CHART_CLASS};
pub use template::{TemplateError, UrlTemplate, PLACEHOLDER};
