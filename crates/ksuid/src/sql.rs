use crate::base62::decode_base62;
use crate::error::{Error, Result};
use crate::id::{BYTE_LENGTH, Ksuid, STRING_ENCODED_LENGTH};

/// A driver-agnostic SQL value over the five fundamental storage classes.
///
/// Database adapters stay outside this crate; they exchange KSUID columns
/// through this enum via [`Ksuid::to_sql_value`] and
/// [`Ksuid::from_sql_value`].
#[derive(Clone, Debug, PartialEq)]
pub enum SqlValue {
    /// SQL NULL.
    Null,
    /// A 64-bit signed integer.
    Integer(i64),
    /// A 64-bit IEEE 754 floating-point number.
    Float(f64),
    /// A UTF-8 text string.
    Text(String),
    /// A binary large object.
    Blob(Vec<u8>),
}

impl Ksuid {
    /// Converts this identifier to the value a database driver should
    /// persist.
    ///
    /// [`Ksuid::NIL`] maps to `Null` (absence); every other identifier maps
    /// to its 27-character text form.
    #[must_use]
    pub fn to_sql_value(&self) -> SqlValue {
        if self.is_nil() {
            SqlValue::Null
        } else {
            SqlValue::Text(self.to_string())
        }
    }

    /// Reads an identifier back from a persisted driver value.
    ///
    /// Accepts `Null` and empty text/blobs (both map to [`Ksuid::NIL`]),
    /// 20-byte binary blobs, and 27-character text in either text or blob
    /// form.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedSqlType`] for numeric values and the
    /// usual length/value errors for malformed text or blobs.
    pub fn from_sql_value(value: SqlValue) -> Result<Self> {
        match value {
            SqlValue::Null => Ok(Self::NIL),
            SqlValue::Text(text) => Self::scan(text.as_bytes()),
            SqlValue::Blob(blob) => Self::scan(&blob),
            SqlValue::Integer(_) => Err(Error::UnsupportedSqlType("integer")),
            SqlValue::Float(_) => Err(Error::UnsupportedSqlType("float")),
        }
    }

    fn scan(bytes: &[u8]) -> Result<Self> {
        match bytes.len() {
            0 => Ok(Self::NIL),
            BYTE_LENGTH => Self::from_bytes(bytes),
            STRING_ENCODED_LENGTH => {
                let mut src = [0_u8; STRING_ENCODED_LENGTH];
                src.copy_from_slice(bytes);
                let mut decoded = [0_u8; BYTE_LENGTH];
                decode_base62(&mut decoded, &src)?;
                Ok(Self::from(decoded))
            }
            len => Err(Error::InvalidLength { len }),
        }
    }
}
