pub mod browser;
pub mod color;
pub mod format;

pub use browser::open_browser;
pub use color::{license_bar_class, limit_gauge_color, trust_icon_name, trust_status_class};
pub use format::{abbreviate_count, format_number};
