//! TRA (Taiwan Railway) transfer query client.
//!
//! The TRA website offers a combined "TRA ⇄ THSR transfer" search that
//! renders its answer as an HTML table. There is no JSON API, so this client
//! posts the search form and hands the page to [`crate::timetable`].

mod client;
mod error;
mod query;

pub use client::{DEFAULT_BASE_URL, TraClient, TraConfig};
pub use error::TraError;
pub use query::{Route, TransferQuery};
