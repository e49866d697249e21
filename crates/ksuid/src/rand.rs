use rand::TryRngCore;
use rand::rngs::OsRng;
use std::io;

/// A pluggable source of payload entropy.
///
/// This abstraction lets you swap the real random source for a mocked one
/// in tests. Production code should leave the default [`OsRandom`] in
/// place; the override hook exists for deterministic test harnesses, not
/// for weakening entropy.
///
/// # Example
///
/// ```
/// use ksuid::RandomSource;
/// use std::io;
///
/// struct FixedRandom(u8);
///
/// impl RandomSource for FixedRandom {
///     fn fill(&mut self, dest: &mut [u8]) -> io::Result<()> {
///         dest.fill(self.0);
///         Ok(())
///     }
/// }
///
/// let mut source = FixedRandom(0xAB);
/// let mut buf = [0_u8; 4];
/// source.fill(&mut buf).unwrap();
/// assert_eq!(buf, [0xAB; 4]);
/// ```
pub trait RandomSource: Send {
    /// Fills `dest` completely with random bytes.
    ///
    /// # Errors
    ///
    /// Implementations must fail rather than leave `dest` partially
    /// filled; a short read is an error, never a success.
    fn fill(&mut self, dest: &mut [u8]) -> io::Result<()>;
}

/// The default source: cryptographically secure entropy from the operating
/// system.
#[derive(Clone, Copy, Debug, Default)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn fill(&mut self, dest: &mut [u8]) -> io::Result<()> {
        OsRng.try_fill_bytes(dest).map_err(io::Error::other)
    }
}

/// Adapts any [`io::Read`] into a [`RandomSource`].
///
/// Useful for feeding canned bytes to the generator in tests; a reader
/// that runs out of bytes surfaces as an entropy failure.
pub struct ReaderSource<R>(pub R);

impl<R: io::Read + Send> RandomSource for ReaderSource<R> {
    fn fill(&mut self, dest: &mut [u8]) -> io::Result<()> {
        self.0.read_exact(dest)
    }
}
