use crate::error::{Error, Result};
use crate::id::{Ksuid, PAYLOAD_LENGTH, time_to_corrected_timestamp};
use crate::rand::{OsRandom, RandomSource};
use std::sync::{LazyLock, Mutex, MutexGuard, PoisonError};
use std::time::SystemTime;
#[cfg(feature = "tracing")]
use tracing::instrument;

/// Produces KSUIDs from a time source and an exclusive random source.
///
/// The generator owns a 16-byte scratch buffer refilled from its source on
/// every call; the two must never be touched by concurrent callers, or
/// interleaved reads could hand the same payload to two identifiers. A
/// `Generator` therefore requires `&mut self`, and the process-wide
/// instance behind [`Ksuid::new`] serializes access with a mutex.
///
/// # Example
///
/// ```
/// use ksuid::{Generator, OsRandom};
///
/// let mut generator = Generator::new(Box::new(OsRandom));
/// let a = generator.generate().unwrap();
/// let b = generator.generate().unwrap();
/// assert_ne!(a, b);
/// ```
pub struct Generator {
    source: Box<dyn RandomSource>,
    buffer: [u8; PAYLOAD_LENGTH],
}

impl Generator {
    /// Creates a generator reading payload entropy from `source`.
    #[must_use]
    pub fn new(source: Box<dyn RandomSource>) -> Self {
        Self {
            source,
            buffer: [0; PAYLOAD_LENGTH],
        }
    }

    /// Generates a KSUID for the current wall-clock time.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RandomSource`] if the source fails or returns
    /// fewer than [`PAYLOAD_LENGTH`] bytes.
    pub fn generate(&mut self) -> Result<Ksuid> {
        self.generate_with_time(SystemTime::now())
    }

    /// Generates a KSUID whose timestamp is taken from `time`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RandomSource`] if the source fails or returns
    /// fewer than [`PAYLOAD_LENGTH`] bytes.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn generate_with_time(&mut self, time: SystemTime) -> Result<Ksuid> {
        self.source
            .fill(&mut self.buffer)
            .map_err(Error::RandomSource)?;
        Ok(Ksuid::from_raw_parts(
            time_to_corrected_timestamp(time),
            self.buffer,
        ))
    }

    /// Replaces this generator's random source.
    pub fn set_source(&mut self, source: Box<dyn RandomSource>) {
        self.source = source;
    }
}

static GENERATOR: LazyLock<Mutex<Generator>> =
    LazyLock::new(|| Mutex::new(Generator::new(Box::new(OsRandom))));

fn global() -> MutexGuard<'static, Generator> {
    // The guarded state is a scratch buffer and a source handle, neither of
    // which a panicking holder can leave logically inconsistent.
    GENERATOR.lock().unwrap_or_else(PoisonError::into_inner)
}

pub(crate) fn new() -> Ksuid {
    match new_with_time(SystemTime::now()) {
        Ok(id) => id,
        Err(err) => panic!("couldn't generate KSUID: {err}"),
    }
}

pub(crate) fn new_with_time(time: SystemTime) -> Result<Ksuid> {
    global().generate_with_time(time)
}

/// Replaces the process-wide random source behind [`Ksuid::new`] and
/// friends.
///
/// Passing `None` restores the default [`OsRandom`]. The swap happens under
/// the same lock that serializes generation, so in-flight calls finish on
/// the source they started with.
///
/// This hook exists for deterministic test harnesses and must not be used
/// to weaken production entropy.
pub fn set_random_source(source: Option<Box<dyn RandomSource>>) {
    global().set_source(source.unwrap_or_else(|| Box::new(OsRandom)));
}
