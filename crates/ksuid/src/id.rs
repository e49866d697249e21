use crate::base62::{EncodedKsuid, decode_base62};
use crate::error::{Error, Result};
use crate::uint128::Uint128;
use core::fmt;
use core::str::FromStr;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// KSUID epoch offset in Unix seconds (2014-05-13T16:53:20Z).
///
/// Subtracting it from wall-clock time delays the 32-bit timestamp rollover
/// until the year 2150.
pub const EPOCH_STAMP: u64 = 1_400_000_000;

/// Number of bytes in the timestamp portion.
pub const TIMESTAMP_LENGTH: usize = 4;
/// Number of bytes in the random payload portion.
pub const PAYLOAD_LENGTH: usize = 16;
/// Total number of bytes in a binary KSUID.
pub const BYTE_LENGTH: usize = TIMESTAMP_LENGTH + PAYLOAD_LENGTH;
/// Length of the base62 text encoding.
pub const STRING_ENCODED_LENGTH: usize = 27;

/// The encoding of [`Ksuid::NIL`], the smallest valid text form.
pub const MIN_STRING_ENCODED: &str = "000000000000000000000000000";
/// The encoding of [`Ksuid::MAX`], the largest valid text form.
pub const MAX_STRING_ENCODED: &str = "aWgEPTl1tmebfsQzFP4bxwgy80V";

/// A K-Sortable Unique IDentifier.
///
/// A KSUID is 20 bytes: a big-endian 32-bit timestamp in seconds since the
/// custom epoch ([`EPOCH_STAMP`]), followed by 128 bits of random payload.
///
/// ```text
///  Byte Index:  0            4                            20
///               +------------+-----------------------------+
///  Field:       | timestamp  |       payload (16)          |
///               +------------+-----------------------------+
///               |<-- big-endian, most significant first -->|
/// ```
///
/// Because the timestamp is stored big-endian and first, byte-wise
/// lexicographic order equals chronological order, with the payload breaking
/// ties. The 27-character base62 text form preserves the same order, so
/// KSUIDs sort correctly as raw bytes and as plain strings alike.
///
/// `Ksuid` is an immutable `Copy` value; every transformation returns a new
/// value. The all-zero [`Ksuid::NIL`] represents absence and the all-0xFF
/// [`Ksuid::MAX`] is the largest representable identifier.
///
/// # Example
///
/// ```
/// use ksuid::Ksuid;
///
/// let id = Ksuid::new();
/// let text = id.to_string();
/// assert_eq!(text.len(), 27);
/// assert_eq!(Ksuid::parse(&text).unwrap(), id);
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Ksuid {
    bytes: [u8; BYTE_LENGTH],
}

impl Ksuid {
    /// The all-zero KSUID, used to signal absence.
    pub const NIL: Self = Self {
        bytes: [0; BYTE_LENGTH],
    };

    /// The largest representable KSUID.
    pub const MAX: Self = Self {
        bytes: [0xFF; BYTE_LENGTH],
    };

    /// Generates a KSUID from the current time and the process-wide random
    /// source.
    ///
    /// # Panics
    ///
    /// Panics if the random source fails, since a broken entropy source is
    /// not something generation can recover from. Callers that need
    /// recoverable behavior use [`Ksuid::try_new`] or
    /// [`Ksuid::new_with_time`].
    #[must_use]
    pub fn new() -> Self {
        crate::generator::new()
    }

    /// Generates a KSUID from the current time, reporting entropy failures
    /// instead of panicking.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RandomSource`] if the random source fails or
    /// returns fewer than [`PAYLOAD_LENGTH`] bytes.
    pub fn try_new() -> Result<Self> {
        Self::new_with_time(SystemTime::now())
    }

    /// Generates a KSUID whose timestamp is taken from `time`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RandomSource`] if the random source fails or
    /// returns fewer than [`PAYLOAD_LENGTH`] bytes.
    pub fn new_with_time(time: SystemTime) -> Result<Self> {
        crate::generator::new_with_time(time)
    }

    /// Builds a KSUID from a timestamp and an explicit 16-byte payload.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPayloadLength`] unless `payload` is exactly
    /// [`PAYLOAD_LENGTH`] bytes.
    pub fn from_parts(time: SystemTime, payload: &[u8]) -> Result<Self> {
        let payload: [u8; PAYLOAD_LENGTH] =
            payload
                .try_into()
                .map_err(|_| Error::InvalidPayloadLength {
                    len: payload.len(),
                })?;
        Ok(Self::from_raw_parts(
            time_to_corrected_timestamp(time),
            payload,
        ))
    }

    /// Like [`Ksuid::from_parts`], but swallows the error and returns
    /// [`Ksuid::NIL`].
    #[must_use]
    pub fn from_parts_or_nil(time: SystemTime, payload: &[u8]) -> Self {
        Self::from_parts(time, payload).unwrap_or(Self::NIL)
    }

    /// Reads a KSUID back from its 20-byte binary form.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLength`] unless `bytes` is exactly
    /// [`BYTE_LENGTH`] bytes; the input is never truncated or padded.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        match <[u8; BYTE_LENGTH]>::try_from(bytes) {
            Ok(bytes) => Ok(Self { bytes }),
            Err(_) => Err(Error::InvalidLength { len: bytes.len() }),
        }
    }

    /// Like [`Ksuid::from_bytes`], but swallows the error and returns
    /// [`Ksuid::NIL`].
    #[must_use]
    pub fn from_bytes_or_nil(bytes: &[u8]) -> Self {
        Self::from_bytes(bytes).unwrap_or(Self::NIL)
    }

    /// Parses a KSUID from its 27-character base62 text form.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidStringLength`] unless `s` is exactly
    /// [`STRING_ENCODED_LENGTH`] characters, and [`Error::InvalidStringValue`]
    /// when a character falls outside the base62 alphabet or the value falls
    /// outside [`MIN_STRING_ENCODED`]..=[`MAX_STRING_ENCODED`].
    pub fn parse(s: &str) -> Result<Self> {
        if s.len() != STRING_ENCODED_LENGTH {
            return Err(Error::InvalidStringLength { len: s.len() });
        }
        let mut src = [0_u8; STRING_ENCODED_LENGTH];
        src.copy_from_slice(s.as_bytes());
        let mut bytes = [0_u8; BYTE_LENGTH];
        decode_base62(&mut bytes, &src)?;
        Ok(Self { bytes })
    }

    /// Like [`Ksuid::parse`], but swallows the error and returns
    /// [`Ksuid::NIL`].
    #[must_use]
    pub fn parse_or_nil(s: &str) -> Self {
        Self::parse(s).unwrap_or(Self::NIL)
    }

    pub(crate) const fn from_raw_parts(
        timestamp: u32,
        payload: [u8; PAYLOAD_LENGTH],
    ) -> Self {
        let ts = timestamp.to_be_bytes();
        let mut bytes = [0_u8; BYTE_LENGTH];
        bytes[0] = ts[0];
        bytes[1] = ts[1];
        bytes[2] = ts[2];
        bytes[3] = ts[3];
        let mut i = 0;
        while i < PAYLOAD_LENGTH {
            bytes[TIMESTAMP_LENGTH + i] = payload[i];
            i += 1;
        }
        Self { bytes }
    }

    /// The corrected timestamp: seconds since [`EPOCH_STAMP`].
    #[must_use]
    pub const fn timestamp(&self) -> u32 {
        u32::from_be_bytes([self.bytes[0], self.bytes[1], self.bytes[2], self.bytes[3]])
    }

    /// The wall-clock time this identifier was created, at second precision.
    #[must_use]
    pub fn time(&self) -> SystemTime {
        UNIX_EPOCH + Duration::from_secs(u64::from(self.timestamp()) + EPOCH_STAMP)
    }

    /// The 16-byte random payload.
    #[must_use]
    pub fn payload(&self) -> &[u8] {
        &self.bytes[TIMESTAMP_LENGTH..]
    }

    /// The raw 20-byte binary form.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; BYTE_LENGTH] {
        &self.bytes
    }

    /// The 27-character base62 text form as a stack-allocated view.
    #[must_use]
    pub fn encoded(&self) -> EncodedKsuid {
        EncodedKsuid::new(self)
    }

    /// Whether this is the all-zero [`Ksuid::NIL`] sentinel.
    #[must_use]
    pub const fn is_nil(&self) -> bool {
        let mut i = 0;
        while i < BYTE_LENGTH {
            if self.bytes[i] != 0 {
                return false;
            }
            i += 1;
        }
        true
    }

    /// The immediately following value in the total byte order.
    ///
    /// The payload is incremented with wrapping 128-bit arithmetic; a wrap
    /// to zero carries into the timestamp, rolling into the next second.
    /// `Ksuid::MAX.next()` wraps all the way around to [`Ksuid::NIL`].
    #[must_use]
    pub fn next(&self) -> Self {
        let mut timestamp = self.timestamp();
        let payload = Uint128::from_be_bytes(self.payload_bytes()).wrapping_add(Uint128::ONE);
        if payload == Uint128::ZERO {
            timestamp = timestamp.wrapping_add(1);
        }
        Self::from_raw_parts(timestamp, payload.to_be_bytes())
    }

    /// The immediately preceding value in the total byte order.
    ///
    /// Symmetric counterpart to [`Ksuid::next`]: a payload wrap to all-ones
    /// borrows from the timestamp. `Ksuid::NIL.prev()` wraps around to
    /// [`Ksuid::MAX`].
    #[must_use]
    pub fn prev(&self) -> Self {
        let mut timestamp = self.timestamp();
        let payload = Uint128::from_be_bytes(self.payload_bytes()).wrapping_sub(Uint128::ONE);
        if payload == Uint128::MAX {
            timestamp = timestamp.wrapping_sub(1);
        }
        Self::from_raw_parts(timestamp, payload.to_be_bytes())
    }

    const fn payload_bytes(&self) -> [u8; PAYLOAD_LENGTH] {
        let mut payload = [0_u8; PAYLOAD_LENGTH];
        let mut i = 0;
        while i < PAYLOAD_LENGTH {
            payload[i] = self.bytes[TIMESTAMP_LENGTH + i];
            i += 1;
        }
        payload
    }
}

/// Converts wall-clock time into the corrected 32-bit timestamp window.
///
/// Times before the custom epoch wrap, matching the narrowing conversion of
/// the binary layout.
pub(crate) fn time_to_corrected_timestamp(time: SystemTime) -> u32 {
    let unix_seconds = match time.duration_since(UNIX_EPOCH) {
        Ok(since) => since.as_secs() as i64,
        Err(before) => -(before.duration().as_secs() as i64),
    };
    unix_seconds.wrapping_sub(EPOCH_STAMP as i64) as u32
}

impl fmt::Display for Ksuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.encoded().as_str())
    }
}

impl fmt::Debug for Ksuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ksuid")
            .field("string", &self.encoded().as_str())
            .field("timestamp", &self.timestamp())
            .field("payload", &format_args!("{:02x?}", self.payload()))
            .finish()
    }
}

impl FromStr for Ksuid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for Ksuid {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<&[u8]> for Ksuid {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::from_bytes(bytes)
    }
}

impl From<[u8; BYTE_LENGTH]> for Ksuid {
    fn from(bytes: [u8; BYTE_LENGTH]) -> Self {
        Self { bytes }
    }
}

impl From<Ksuid> for [u8; BYTE_LENGTH] {
    fn from(id: Ksuid) -> Self {
        id.bytes
    }
}

impl AsRef<[u8]> for Ksuid {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodeError;

    fn at_unix(seconds: u64) -> SystemTime {
        UNIX_EPOCH + Duration::from_secs(seconds)
    }

    #[test]
    fn construction_from_known_time_and_payload() {
        let mut payload = [0_u8; PAYLOAD_LENGTH];
        payload[PAYLOAD_LENGTH - 1] = 1;

        let id = Ksuid::from_parts(at_unix(1_632_859_955), &payload).unwrap();
        assert_eq!(id.timestamp(), 232_859_955);
        assert_eq!(id.time(), at_unix(1_632_859_955));
        assert_eq!(id.payload(), &payload);

        assert_eq!(Ksuid::from_bytes(id.as_bytes()).unwrap(), id);
        assert_eq!(Ksuid::parse(&id.to_string()).unwrap(), id);
    }

    #[test]
    fn from_parts_rejects_wrong_payload_lengths() {
        for len in [0, 15, 17] {
            let err = Ksuid::from_parts(at_unix(EPOCH_STAMP), &vec![0; len]).unwrap_err();
            assert!(matches!(err, Error::InvalidPayloadLength { len: l } if l == len));
        }
    }

    #[test]
    fn from_bytes_rejects_wrong_lengths() {
        for len in [19, 21] {
            let err = Ksuid::from_bytes(&vec![0; len]).unwrap_err();
            assert!(matches!(err, Error::InvalidLength { len: l } if l == len));
        }
    }

    #[test]
    fn parse_rejects_wrong_lengths() {
        for len in [26, 28] {
            let err = Ksuid::parse(&"0".repeat(len)).unwrap_err();
            assert!(matches!(err, Error::InvalidStringLength { len: l } if l == len));
        }
    }

    #[test]
    fn parse_rejects_out_of_range_values() {
        let err = Ksuid::parse("aWgEPTl1tmebfsQzFP4bxwgy80W").unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidStringValue(DecodeError::Overflow)
        ));

        let err = Ksuid::parse("00000000000000000000000000*").unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidStringValue(DecodeError::InvalidCharacter { byte: b'*', index: 26 })
        ));
    }

    #[test]
    fn or_nil_variants_swallow_errors() {
        assert_eq!(Ksuid::parse_or_nil("not a ksuid"), Ksuid::NIL);
        assert_eq!(Ksuid::from_bytes_or_nil(&[0; 19]), Ksuid::NIL);
        assert_eq!(Ksuid::from_parts_or_nil(at_unix(EPOCH_STAMP), &[]), Ksuid::NIL);

        let id = Ksuid::new();
        assert_eq!(Ksuid::parse_or_nil(&id.to_string()), id);
        assert_eq!(Ksuid::from_bytes_or_nil(id.as_bytes()), id);
    }

    #[test]
    fn sentinels_round_trip_through_text() {
        assert_eq!(Ksuid::NIL.to_string(), MIN_STRING_ENCODED);
        assert_eq!(Ksuid::MAX.to_string(), MAX_STRING_ENCODED);
        assert_eq!(Ksuid::parse(MIN_STRING_ENCODED).unwrap(), Ksuid::NIL);
        assert_eq!(Ksuid::parse(MAX_STRING_ENCODED).unwrap(), Ksuid::MAX);
    }

    #[test]
    fn nil_is_the_default_and_reports_itself() {
        assert_eq!(Ksuid::default(), Ksuid::NIL);
        assert!(Ksuid::NIL.is_nil());
        assert!(!Ksuid::MAX.is_nil());
        assert!(!Ksuid::new().is_nil());
    }

    #[test]
    fn next_steps_through_the_payload() {
        let one = Ksuid::NIL.next();
        assert_eq!(one.timestamp(), 0);
        let mut expected = [0_u8; PAYLOAD_LENGTH];
        expected[PAYLOAD_LENGTH - 1] = 1;
        assert_eq!(one.payload(), &expected);
    }

    #[test]
    fn next_carries_into_the_timestamp() {
        let id = Ksuid::from_parts(at_unix(1_632_859_955), &[0xFF; PAYLOAD_LENGTH]).unwrap();
        let next = id.next();
        assert_eq!(next.timestamp(), id.timestamp() + 1);
        assert_eq!(next.payload(), &[0; PAYLOAD_LENGTH]);
    }

    #[test]
    fn prev_borrows_from_the_timestamp() {
        let id = Ksuid::from_parts(at_unix(1_632_859_955), &[0; PAYLOAD_LENGTH]).unwrap();
        let prev = id.prev();
        assert_eq!(prev.timestamp(), id.timestamp() - 1);
        assert_eq!(prev.payload(), &[0xFF; PAYLOAD_LENGTH]);
    }

    #[test]
    fn next_and_prev_are_inverses() {
        let id = Ksuid::new();
        assert_eq!(id.next().prev(), id);
        assert_eq!(id.prev().next(), id);
    }

    #[test]
    fn stepping_wraps_at_the_sentinels() {
        assert_eq!(Ksuid::MAX.next(), Ksuid::NIL);
        assert_eq!(Ksuid::NIL.prev(), Ksuid::MAX);
    }

    #[test]
    fn adjacent_values_order_in_text_and_binary() {
        let id = Ksuid::new();
        let next = id.next();
        assert!(id < next || id == Ksuid::MAX);
        assert!(id.to_string() < next.to_string() || id == Ksuid::MAX);
    }

    #[test]
    fn conversion_traits_agree_with_the_constructors() {
        let id = Ksuid::new();
        assert_eq!(id.to_string().parse::<Ksuid>().unwrap(), id);
        assert_eq!(Ksuid::try_from(id.as_bytes().as_slice()).unwrap(), id);
        assert_eq!(Ksuid::from(*id.as_bytes()), id);
        assert_eq!(<[u8; BYTE_LENGTH]>::from(id), *id.as_bytes());
        assert_eq!(id.as_ref(), id.as_bytes().as_slice());
    }

    #[test]
    fn debug_includes_the_string_form() {
        let id = Ksuid::NIL;
        let rendered = format!("{id:?}");
        assert!(rendered.contains(MIN_STRING_ENCODED));
    }
}
