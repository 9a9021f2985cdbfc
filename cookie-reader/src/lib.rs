//! Read base64-encoded cookies off HTTP requests.
//!
//! [`CookieReader`] is the piece route handlers use; the rest of the crate is
//! the small hyper service and logging setup that hosts it.

pub mod config;
pub mod cookies;
pub mod encoding;
pub mod metrics;
pub mod obs;
pub mod server;
pub mod telemetry;

pub use config::{AppConfig, CookieConfig};
pub use cookies::{CookieLookup, CookieReader, HeaderView};
pub use encoding::{decode_base64, encode_base64, DecodeError};
