use thiserror::Error;

/// Failures produced by this crate's fallible entry points.
///
/// Arithmetic stays out of this enum on purpose: each numeric witness decides
/// what division by zero or overflow means for its payload, usually by
/// propagating the payload type's native behavior.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A wrapper factory was handed no payload.
    #[error("{type_name} requires a payload")]
    MissingPayload {
        /// base name of the wrapper type that refused construction
        type_name: &'static str,
    },
    /// An explicitly retyped map requested a result shape the functor does
    /// not produce.
    #[error("expected shape {expected}, but the functor produced {actual}")]
    ShapeMismatch {
        /// the shape the caller asked for
        expected: &'static str,
        /// the shape the functor actually built
        actual: &'static str,
    },
}
