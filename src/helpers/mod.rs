//! URL, date, and head-tag helpers

mod date;
mod html;
mod url;

pub use date::*;
pub use html::*;
pub use url::*;
