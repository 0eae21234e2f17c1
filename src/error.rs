use thiserror::Error;

/// An error returned by the fallible [`AnyInvocable`] call methods.
///
/// This enum is marked `#[non_exhaustive]` and may include additional variants
/// in future releases.
///
/// [`AnyInvocable`]: crate::AnyInvocable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum Error {
    /// The wrapper holds no callable.
    #[error("tried to call an empty `AnyInvocable`")]
    Empty,
}

/// A result type alias to use with [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;
