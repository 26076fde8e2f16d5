//! Byte sources for the driver.
//!
//! A [`ByteSource`] hands out one byte per call and reports exhaustion with
//! `Ok(None)`. Once exhausted it stays exhausted.

use core::{convert::Infallible, iter::Fuse};

/// A sequential provider of input bytes.
pub trait ByteSource {
    /// Failure to read the next byte.
    type Error;

    /// Returns the next byte, or `None` once the stream has ended.
    ///
    /// # Errors
    ///
    /// When the underlying stream fails.
    fn next_byte(&mut self) -> Result<Option<u8>, Self::Error>;
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    type Error = S::Error;

    #[inline]
    fn next_byte(&mut self) -> Result<Option<u8>, Self::Error> {
        (**self).next_byte()
    }
}

/// Reads from an in-memory byte slice.
#[derive(Debug, Clone)]
pub struct SliceSource<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> SliceSource<'a> {
    /// Creates a source positioned at the first byte of `bytes`.
    #[must_use]
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// The bytes not read yet.
    #[must_use]
    pub fn remaining(&self) -> &'a [u8] {
        &self.bytes[self.pos..]
    }
}

impl ByteSource for SliceSource<'_> {
    type Error = Infallible;

    #[inline]
    fn next_byte(&mut self) -> Result<Option<u8>, Self::Error> {
        let byte = self.bytes.get(self.pos).copied();
        if byte.is_some() {
            self.pos += 1;
        }
        Ok(byte)
    }
}

/// Adapts any byte iterator.
#[derive(Debug, Clone)]
pub struct IterSource<I> {
    iter: Fuse<I>,
}

impl<I: Iterator<Item = u8>> IterSource<I> {
    /// Wraps `iter`. Iteration stops at the first `None`.
    pub fn new(iter: I) -> Self {
        Self { iter: iter.fuse() }
    }
}

impl<I: Iterator<Item = u8>> ByteSource for IterSource<I> {
    type Error = Infallible;

    #[inline]
    fn next_byte(&mut self) -> Result<Option<u8>, Self::Error> {
        Ok(self.iter.next())
    }
}

#[cfg(feature = "std")]
pub use read::ReadSource;

#[cfg(feature = "std")]
mod read {
    use std::io::{ErrorKind, Read};

    use super::ByteSource;

    /// Reads one byte at a time from a [`Read`] implementation.
    ///
    /// No buffering is done; wrap the reader in a
    /// [`BufReader`](std::io::BufReader) when reads are expensive.
    #[derive(Debug)]
    pub struct ReadSource<R> {
        reader: R,
        done: bool,
    }

    impl<R: Read> ReadSource<R> {
        /// Wraps `reader`.
        pub fn new(reader: R) -> Self {
            Self {
                reader,
                done: false,
            }
        }

        /// Returns the wrapped reader.
        pub fn into_inner(self) -> R {
            self.reader
        }
    }

    impl<R: Read> ByteSource for ReadSource<R> {
        type Error = std::io::Error;

        fn next_byte(&mut self) -> Result<Option<u8>, Self::Error> {
            if self.done {
                return Ok(None);
            }
            let mut buf = [0u8; 1];
            loop {
                match self.reader.read(&mut buf) {
                    Ok(0) => {
                        self.done = true;
                        return Ok(None);
                    }
                    Ok(_) => return Ok(Some(buf[0])),
                    Err(err) if err.kind() == ErrorKind::Interrupted => {}
                    Err(err) => return Err(err),
                }
            }
        }
    }
}
