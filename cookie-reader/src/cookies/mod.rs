pub mod header;
pub mod parse;
pub mod reader;

pub use header::HeaderView;
pub use parse::get_cookie_value;
pub use reader::{CookieLookup, CookieReader};
