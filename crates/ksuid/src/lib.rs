//! K-Sortable Unique IDentifiers.
//!
//! A KSUID is a 160-bit identifier: a 32-bit UTC-second timestamp (offset
//! from a custom epoch) followed by a 128-bit random payload, rendered as a
//! fixed 27-character base62 string. The binary and text forms sort
//! identically, so identifiers order by creation time in databases, logs,
//! and plain string comparisons alike.
//!
//! # Generating
//!
//! ```
//! use ksuid::Ksuid;
//!
//! let id = Ksuid::new();
//! println!("{id}");
//! ```
//!
//! # Parsing and round-tripping
//!
//! ```
//! use ksuid::Ksuid;
//!
//! let id = Ksuid::new();
//!
//! let text = id.to_string();
//! let binary = *id.as_bytes();
//!
//! assert_eq!(Ksuid::parse(&text).unwrap(), id);
//! assert_eq!(Ksuid::from_bytes(&binary).unwrap(), id);
//! ```
//!
//! # Ordering
//!
//! ```
//! use ksuid::{Ksuid, is_sorted, sort};
//!
//! let mut ids: Vec<Ksuid> = (0..8).map(|_| Ksuid::new()).collect();
//! sort(&mut ids);
//! assert!(is_sorted(&ids));
//! ```
//!
//! # Feature flags
//!
//! - **`serde`**: `Serialize`/`Deserialize` for [`Ksuid`]: the text form
//!   in human-readable formats, the raw 20 bytes otherwise.
//! - **`tracing`**: trace-level instrumentation of the generator.

mod base62;
mod error;
mod generator;
mod id;
mod rand;
#[cfg(feature = "serde")]
mod serde;
mod sort;
mod sql;
mod uint128;

pub use crate::base62::*;
pub use crate::error::*;
pub use crate::generator::{Generator, set_random_source};
pub use crate::id::*;
pub use crate::rand::*;
pub use crate::sort::*;
pub use crate::sql::*;
pub use crate::uint128::*;
