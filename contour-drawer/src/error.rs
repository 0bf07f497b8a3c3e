use crate::ContourKind;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The host viewport has not rendered yet, so there is no frame to convert coordinates in.
    /// Enabling drawing before the first render is a usage error of the embedding application.
    #[error("No render context available: the viewport must render before annotations can be drawn")]
    RenderContextUnavailable,
    #[error("A {kind} contour needs at least {min} points, got {got}")]
    TooFewPoints {
        kind: ContourKind,
        min: usize,
        got: usize,
    },
    #[error("A {kind} contour needs exactly {expected} points, got {got}")]
    WrongPointCount {
        kind: ContourKind,
        expected: usize,
        got: usize,
    },
}
