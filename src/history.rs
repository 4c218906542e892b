//! Bounded command history.
//!
//! A ring of fixed-size line buffers addressed by *global* indices: the
//! first line ever appended is index 0 and keeps that index until it is
//! evicted. `offset` tracks the global index of the oldest retained
//! entry, so the valid window is always `offset..offset + len`.

use core::array;

use heapless::String;

use crate::config::{MAX_HISTORY, MAX_LINE_LEN};
use crate::error::Error;

/// Fixed-capacity ring buffer of past lines.
#[derive(Debug)]
pub struct History {
    slots: [String<MAX_LINE_LEN>; MAX_HISTORY],
    /// Ring position of the oldest retained entry.
    head: usize,
    len: usize,
    /// Global index of the oldest retained entry.
    offset: usize,
}

impl History {
    /// Empty history.
    pub fn new() -> Self {
        Self {
            slots: array::from_fn(|_| String::new()),
            head: 0,
            len: 0,
            offset: 0,
        }
    }

    /// Number of retained lines.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether nothing is retained.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Global index of the oldest retained line.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Global index of the newest retained line.
    pub fn newest(&self) -> Option<usize> {
        self.len.checked_sub(1).map(|n| self.offset + n)
    }

    /// Append one line, evicting the oldest entry at capacity.
    ///
    /// A line that does not fit an entry buffer is a capacity fault:
    /// history never truncates.
    pub fn append(&mut self, line: &str) -> Result<(), Error> {
        if line.len() > MAX_LINE_LEN {
            return Err(Error::BufferExhausted);
        }
        let slot = if self.len == MAX_HISTORY {
            let evicted = self.head;
            self.head = (self.head + 1) % MAX_HISTORY;
            self.offset += 1;
            evicted
        } else {
            let next = (self.head + self.len) % MAX_HISTORY;
            self.len += 1;
            next
        };
        self.slots[slot].clear();
        self.slots[slot]
            .push_str(line)
            .map_err(|_| Error::BufferExhausted)
    }

    /// Line at global `index`.
    ///
    /// The returned text borrows a ring slot: it is valid until the next
    /// mutating call. Fails [`Error::LineNotFound`] outside the retained
    /// window.
    pub fn get(&self, index: usize) -> Result<&str, Error> {
        if index < self.offset || index >= self.offset + self.len {
            return Err(Error::LineNotFound);
        }
        Ok(self.slots[(self.head + (index - self.offset)) % MAX_HISTORY].as_str())
    }

    /// Drop the newest entry.
    ///
    /// Used by the `!` builtin to discard its own invocation before the
    /// referenced line is re-run.
    pub fn pop(&mut self) {
        if self.len > 0 {
            self.len -= 1;
            let slot = (self.head + self.len) % MAX_HISTORY;
            self.slots[slot].clear();
        }
    }

    /// Retained lines oldest-first, with their global indices.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        (0..self.len).map(move |n| {
            (
                self.offset + n,
                self.slots[(self.head + n) % MAX_HISTORY].as_str(),
            )
        })
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}
