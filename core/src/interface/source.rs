use crate::prelude::{SweepError, SweepResult};
use std::collections::VecDeque;

/// Non-blocking producer of raw sensor bytes.
///
/// `read_available` appends whatever is buffered right now to `buf` and
/// returns how many bytes were added. Zero is a normal result, never a wait.
pub trait ByteSource {
    fn read_available(&mut self, buf: &mut Vec<u8>) -> SweepResult<usize>;
}

impl<T: ByteSource + ?Sized> ByteSource for Box<T> {
    fn read_available(&mut self, buf: &mut Vec<u8>) -> SweepResult<usize> {
        (**self).read_available(buf)
    }
}

/// Queue of pre-recorded chunks, one chunk handed out per read.
#[derive(Debug, Default)]
pub struct MemorySource {
    chunks: VecDeque<Vec<u8>>,
    disconnected: bool,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_chunks<I, C>(chunks: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: AsRef<[u8]>,
    {
        Self {
            chunks: chunks.into_iter().map(|c| c.as_ref().to_vec()).collect(),
            disconnected: false,
        }
    }

    /// Makes every subsequent read fail once the queue is drained.
    pub fn disconnect_when_drained(&mut self) {
        self.disconnected = true;
    }
}

impl ByteSource for MemorySource {
    fn read_available(&mut self, buf: &mut Vec<u8>) -> SweepResult<usize> {
        match self.chunks.pop_front() {
            Some(chunk) => {
                buf.extend_from_slice(&chunk);
                Ok(chunk.len())
            }
            None if self.disconnected => {
                Err(SweepError::Disconnected("memory source exhausted".into()))
            }
            None => Ok(0),
        }
    }
}
