//! Bounded mark/reset over any sequential byte source.

use std::collections::VecDeque;
use std::io::{self, Read};

/// Initial capacity of the pushback ring; the object-end lookahead needs 3.
const DEFAULT_CAPACITY: usize = 16;

/// Wraps a `Read` and lets the caller rewind up to `limit` bytes read since
/// the last [`mark`](Self::mark), without the source supporting seeks.
///
/// Rewound bytes sit in a ring buffer and are served before the inner
/// reader is touched again. Reading more than `limit` bytes after a mark
/// invalidates it, after which [`reset`](Self::reset) fails.
pub struct RewindReader<R> {
    inner: R,
    pending: VecDeque<u8>,
    history: Vec<u8>,
    limit: Option<usize>,
}

impl<R: Read> RewindReader<R> {
    pub fn new(inner: R) -> Self {
        Self::with_capacity(DEFAULT_CAPACITY, inner)
    }

    pub fn with_capacity(capacity: usize, inner: R) -> Self {
        Self {
            inner,
            pending: VecDeque::with_capacity(capacity),
            history: Vec::with_capacity(capacity),
            limit: None,
        }
    }

    /// Starts recording so that the next `limit` bytes can be rewound.
    /// Replaces any previous mark.
    pub fn mark(&mut self, limit: usize) {
        self.history.clear();
        self.limit = Some(limit);
    }

    /// Rewinds to the last mark. The mark is consumed.
    pub fn reset(&mut self) -> io::Result<()> {
        if self.limit.take().is_none() {
            return Err(io::Error::other("rewind mark missing or invalidated"));
        }
        for b in self.history.drain(..).rev() {
            self.pending.push_front(b);
        }
        Ok(())
    }

    /// Drops the mark, committing every byte read since.
    pub fn clear_mark(&mut self) {
        self.limit = None;
        self.history.clear();
    }

    pub fn is_marked(&self) -> bool {
        self.limit.is_some()
    }

    /// Number of rewound bytes waiting to be read again.
    pub fn buffered(&self) -> usize {
        self.pending.len()
    }

    /// Returns `true` when no byte is left, without consuming one otherwise.
    pub fn at_eof(&mut self) -> io::Result<bool> {
        if !self.pending.is_empty() {
            return Ok(false);
        }
        let mut byte = [0u8; 1];
        loop {
            match self.inner.read(&mut byte) {
                Ok(0) => return Ok(true),
                Ok(_) => {
                    self.pending.push_back(byte[0]);
                    return Ok(false);
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    /// Unwraps the inner reader. Rewound bytes not yet re-read are lost.
    pub fn into_inner(self) -> R {
        self.inner
    }

    fn record(&mut self, bytes: &[u8]) {
        let Some(limit) = self.limit else {
            return;
        };
        if self.history.len() + bytes.len() > limit {
            self.clear_mark();
        } else {
            self.history.extend_from_slice(bytes);
        }
    }
}

impl<R: Read> Read for RewindReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }

        let n = if self.pending.is_empty() {
            // Never pull more than the mark can still hold.
            let want = match self.limit {
                Some(limit) if limit > self.history.len() => {
                    buf.len().min(limit - self.history.len())
                }
                _ => buf.len(),
            };
            self.inner.read(&mut buf[..want])?
        } else {
            let n = buf.len().min(self.pending.len());
            for (dst, src) in buf.iter_mut().zip(self.pending.drain(..n)) {
                *dst = src;
            }
            n
        };

        self.record(&buf[..n]);
        Ok(n)
    }
}
