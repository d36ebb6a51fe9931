//! TRA ⇄ THSR transfer timetable server.
//!
//! Fetches the Taiwan Railway "transfer to/from High Speed Rail" search
//! results, rebuilds the merged-cell itinerary table into flat transfer
//! records, and tells a traveller which of today's options are still
//! catchable.

pub mod cache;
pub mod config;
pub mod domain;
pub mod feasibility;
pub mod timetable;
pub mod tra;
pub mod web;
