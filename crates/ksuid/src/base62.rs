use crate::error::DecodeError;
use crate::id::{BYTE_LENGTH, Ksuid, STRING_ENCODED_LENGTH};
use core::fmt;

/// The base62 alphabet in rank order.
///
/// Digit rank equals alphabet position (`0-9` then `A-Z` then `a-z`), so a
/// fixed-length encoding left-padded with `'0'` compares exactly like the
/// 160-bit value it encodes. ASCII order happens to coincide for this digit
/// set, which is what makes the property hold for plain string comparison.
const ALPHABET: &[u8; 62] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";
const NO_VALUE: u8 = 255;

/// Words of the big-endian base-2^32 representation of a KSUID.
const WORDS: usize = BYTE_LENGTH / 4;

/// Lookup table for base62 decoding.
const LOOKUP: [u8; 256] = {
    let mut lut = [NO_VALUE; 256];
    let mut i = 0_u8;
    while i < 62 {
        lut[ALPHABET[i as usize] as usize] = i;
        i += 1;
    }
    lut
};

/// Encodes a 20-byte KSUID into its 27-character base62 form.
///
/// Deterministic and total: every input maps to exactly one output, written
/// into `dst` without allocating. The conversion treats the input as five
/// big-endian `u32` words and repeatedly divides the whole number by 62 in
/// `u64` arithmetic, producing one output digit per step from the least
/// significant end; the head is then padded with the zero digit.
pub fn encode_base62(dst: &mut [u8; STRING_ENCODED_LENGTH], src: &[u8; BYTE_LENGTH]) {
    const SRC_BASE: u64 = 4_294_967_296;
    const DST_BASE: u64 = 62;

    let parts: [u32; WORDS] = [
        u32::from_be_bytes([src[0], src[1], src[2], src[3]]),
        u32::from_be_bytes([src[4], src[5], src[6], src[7]]),
        u32::from_be_bytes([src[8], src[9], src[10], src[11]]),
        u32::from_be_bytes([src[12], src[13], src[14], src[15]]),
        u32::from_be_bytes([src[16], src[17], src[18], src[19]]),
    ];

    let mut bp = parts;
    let mut bp_len = parts.len();
    let mut n = dst.len();

    while bp_len != 0 {
        let mut bq = [0_u32; WORDS];
        let mut bq_len = 0;
        let mut remainder: u64 = 0;

        for &word in &bp[..bp_len] {
            let value = u64::from(word) + remainder * SRC_BASE;
            let digit = value / DST_BASE;
            remainder = value % DST_BASE;

            // Leading zero words are dropped so the quotient shrinks by at
            // least one word every few rounds.
            if bq_len != 0 || digit != 0 {
                bq[bq_len] = digit as u32;
                bq_len += 1;
            }
        }

        // The lowest digit is computed first, so fill from the back. A
        // 160-bit value needs at most 27 base62 digits, hence `n` cannot
        // underflow.
        n -= 1;
        dst[n] = ALPHABET[remainder as usize];
        bp = bq;
        bp_len = bq_len;
    }

    dst[..n].fill(ALPHABET[0]);
}

/// Decodes a 27-character base62 string into the 20-byte binary form.
///
/// The inverse of [`encode_base62`]: digits are mapped through a lookup
/// table, then the whole number is repeatedly divided by 2^32, emitting one
/// big-endian word per step from the least significant end.
///
/// # Errors
///
/// - [`DecodeError::InvalidCharacter`] if `src` contains a byte outside the
///   base62 alphabet.
/// - [`DecodeError::Overflow`] if the accumulated magnitude does not fit in
///   160 bits.
pub fn decode_base62(
    dst: &mut [u8; BYTE_LENGTH],
    src: &[u8; STRING_ENCODED_LENGTH],
) -> Result<(), DecodeError> {
    const SRC_BASE: u64 = 62;
    const DST_BASE: u64 = 4_294_967_296;

    let mut parts = [0_u8; STRING_ENCODED_LENGTH];
    for (index, &byte) in src.iter().enumerate() {
        let value = LOOKUP[byte as usize];
        if value == NO_VALUE {
            return Err(DecodeError::InvalidCharacter { byte, index });
        }
        parts[index] = value;
    }

    let mut bp = parts;
    let mut bp_len = parts.len();
    let mut n = dst.len();

    while bp_len != 0 {
        let mut bq = [0_u8; STRING_ENCODED_LENGTH];
        let mut bq_len = 0;
        let mut remainder: u64 = 0;

        for &digit in &bp[..bp_len] {
            let value = u64::from(digit) + remainder * SRC_BASE;
            let quotient = value / DST_BASE;
            remainder = value % DST_BASE;

            if bq_len != 0 || quotient != 0 {
                // quotient < 62 here: the divisor outweighs the accumulator.
                bq[bq_len] = quotient as u8;
                bq_len += 1;
            }
        }

        if n < 4 {
            return Err(DecodeError::Overflow);
        }
        dst[n - 4..n].copy_from_slice(&(remainder as u32).to_be_bytes());
        n -= 4;
        bp = bq;
        bp_len = bq_len;
    }

    dst[..n].fill(0);
    Ok(())
}

/// A stack-allocated view of the 27-character base62 encoding of a KSUID.
///
/// Produced by [`Ksuid::encoded`]. The buffer lives inline, so rendering an
/// identifier costs no heap allocation; convert with [`as_str`] or let the
/// `Display` impl write it out.
///
/// [`as_str`]: EncodedKsuid::as_str
///
/// # Example
///
/// ```
/// use ksuid::Ksuid;
///
/// let encoded = Ksuid::NIL.encoded();
/// assert_eq!(encoded.as_str(), "000000000000000000000000000");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EncodedKsuid {
    buf: [u8; STRING_ENCODED_LENGTH],
}

impl EncodedKsuid {
    pub(crate) fn new(id: &Ksuid) -> Self {
        let mut buf = [0_u8; STRING_ENCODED_LENGTH];
        encode_base62(&mut buf, id.as_bytes());
        Self { buf }
    }

    /// Returns a `&str` view of the encoding.
    #[must_use]
    pub fn as_str(&self) -> &str {
        // SAFETY: `self.buf` holds only bytes of `ALPHABET`, all ASCII.
        unsafe { core::str::from_utf8_unchecked(&self.buf) }
    }

    /// Consumes the view and returns the raw character buffer.
    #[must_use]
    pub const fn into_inner(self) -> [u8; STRING_ENCODED_LENGTH] {
        self.buf
    }
}

impl fmt::Display for EncodedKsuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for EncodedKsuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl AsRef<str> for EncodedKsuid {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq<str> for EncodedKsuid {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for EncodedKsuid {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}
