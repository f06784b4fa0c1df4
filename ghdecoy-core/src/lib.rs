pub mod config;
pub mod dates;
pub mod entry;
pub mod error;
pub mod parse_calendar;
pub mod scale;
pub mod synthesize;
pub mod timeframe;

pub use config::Config;
pub use entry::CalendarEntry;
pub use error::TimeframeError;
pub use parse_calendar::{is_valid_calendar, parse_calendar};
pub use scale::{compute_factor, scale};
pub use synthesize::{Placement, Policy, SynthesisOptions, synthesize};
pub use timeframe::{DateInterval, Timeframe, parse_timeframe};
