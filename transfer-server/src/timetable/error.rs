//! Timetable extraction errors.

/// The result page could not be understood.
///
/// Row-level oddities never end up here; they are skipped during
/// normalization. This is only raised when the page as a whole has an
/// unexpected shape.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractError {
    /// Neither the itinerary table nor a "no results" notice was found.
    #[error("could not find the {class} table in the HTML")]
    TableNotFound { class: &'static str },
}
