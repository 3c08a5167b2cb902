//! Incremental closed-tour construction over 2-D points.
//! Points are spliced in one at a time with nearest-neighbor or
//! smallest-increase insertion; nothing already placed is revisited.

mod error;
mod io;
pub mod logging;
mod metrics;
mod point;
mod tour;

pub(crate) use io::options;

pub use error::{Error, Result};
pub use io::input::{parse_points, random_points, read_points};
pub use io::options::{LogFormat, TourOptions};
pub use metrics::TourMetrics;
pub use point::Point;
pub use tour::{Heuristic, Tour};
