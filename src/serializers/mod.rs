//! JSON response shapes. Each wraps a model and adds the derived display
//! fields clients rely on (formatted dates, labels, computed statuses).

pub mod account;
pub mod meeting;
pub mod portal;
pub mod site;

pub use account::*;
pub use meeting::*;
pub use portal::*;
pub use site::*;

use chrono::{DateTime, Utc};

/// "January 05, 2026 at 06:00 PM"
pub fn format_schedule(at: DateTime<Utc>) -> String {
    at.format("%B %d, %Y at %I:%M %p").to_string()
}
