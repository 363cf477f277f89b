use thiserror::Error;

pub use qrz::LayoutError;

/// Faults raised by grid queries while an overlay is being recomputed
///
/// These never escape an input event: the step that hit one stops, logs it, and
/// the overlay keeps whatever it had applied so far.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum OverlayFault {
    #[error(transparent)]
    UnknownCell(#[from] qrz::UnknownCell),

    #[error("grid engine fault: {0}")]
    Engine(String),
}
