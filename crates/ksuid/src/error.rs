use std::io;

/// A result type defaulting to the crate-wide [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All error variants that `ksuid` can emit.
///
/// Parsing and construction failures are ordinary return values; the only
/// condition allowed to abort the process is an entropy failure inside the
/// infallible [`Ksuid::new`] convenience, which panics instead of returning
/// `RandomSource`.
///
/// [`Ksuid::new`]: crate::Ksuid::new
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Binary input was not exactly 20 bytes.
    #[error("valid KSUIDs are 20 bytes, got {len}")]
    InvalidLength { len: usize },

    /// Text input was not exactly 27 characters.
    #[error("valid encoded KSUIDs are 27 characters, got {len}")]
    InvalidStringLength { len: usize },

    /// Text input of the right length was not a valid encoding.
    ///
    /// Covers both characters outside the base62 alphabet and values past
    /// the largest representable KSUID; match on the inner [`DecodeError`]
    /// to tell the two apart.
    #[error("valid encoded KSUIDs are bounded by 000000000000000000000000000 and aWgEPTl1tmebfsQzFP4bxwgy80V")]
    InvalidStringValue(#[from] DecodeError),

    /// A payload supplied to a constructor was not exactly 16 bytes.
    #[error("valid KSUID payloads are 16 bytes, got {len}")]
    InvalidPayloadLength { len: usize },

    /// The random source failed or returned fewer bytes than requested.
    #[error("random source failed")]
    RandomSource(#[source] io::Error),

    /// A SQL value of a type that cannot hold a KSUID.
    #[error("cannot scan a {0} value into a KSUID")]
    UnsupportedSqlType(&'static str),
}

/// Errors produced by the fixed-width base62 codec.
#[derive(thiserror::Error, Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecodeError {
    /// The input contained a byte outside the base62 alphabet.
    #[error("invalid base62 character {byte:#04x} at index {index}")]
    InvalidCharacter { byte: u8, index: usize },

    /// The input read as a base62 number does not fit in 160 bits.
    #[error("base62 value does not fit in 20 bytes")]
    Overflow,
}
