use std::mem;

/// Partial lines longer than this without a newline are treated as noise.
pub const MAX_PENDING_BYTES: usize = 4096;

/// Reassembles newline-terminated lines from arbitrary byte chunks.
#[derive(Debug)]
pub struct LineAssembler {
    pending: String,
    max_pending: usize,
    overflowed: u64,
    discarding: bool,
}

impl LineAssembler {
    pub fn new(max_pending: usize) -> Self {
        Self {
            pending: String::new(),
            max_pending,
            overflowed: 0,
            discarding: false,
        }
    }

    /// Appends a chunk and returns every line it completed. The trailing
    /// unterminated segment stays pending until its newline arrives.
    ///
    /// After an overflow the rest of that physical line is skipped up to and
    /// including its newline.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        let decoded = String::from_utf8_lossy(chunk);
        let mut input: &str = &decoded;
        if self.discarding {
            match input.find('\n') {
                Some(idx) => {
                    input = &input[idx + 1..];
                    self.discarding = false;
                }
                None => return Vec::new(),
            }
        }
        self.pending.push_str(input);

        let lines = match self.pending.rfind('\n') {
            Some(idx) => {
                let rest = self.pending.split_off(idx + 1);
                let complete = mem::replace(&mut self.pending, rest);
                complete
                    .split('\n')
                    .filter(|line| !line.trim().is_empty())
                    .map(str::to_owned)
                    .collect()
            }
            None => Vec::new(),
        };

        if self.pending.len() > self.max_pending {
            self.pending.clear();
            self.overflowed += 1;
            self.discarding = true;
        }
        lines
    }

    pub fn pending(&self) -> &str {
        &self.pending
    }

    /// Number of partial lines discarded for exceeding the pending limit.
    pub fn overflowed(&self) -> u64 {
        self.overflowed
    }
}

impl Default for LineAssembler {
    fn default() -> Self {
        Self::new(MAX_PENDING_BYTES)
    }
}
