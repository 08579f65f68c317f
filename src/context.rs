// Binary Arithmetic Coder: a context-adaptive arithmetic coding library
// Copyright (C) 2025  Yair Ziv
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use std::collections::VecDeque;

/// A fixed-width FIFO of the most recent emitted/consumed bits, fed to the
/// probability model on every step. Backed by a ring buffer for O(1)
/// `append`, rather than the quadratic naive slice-and-append.
#[derive(Debug, Clone)]
pub struct ContextWindow {
    bits: VecDeque<bool>,
    capacity: usize,
    // Scratch buffer kept around so `as_slice` doesn't allocate on every
    // model query.
    scratch: Vec<bool>,
}

impl ContextWindow {
    /// Creates a window of `capacity` bits, initialized to all zeros.
    pub fn new(capacity: usize) -> Self {
        Self {
            bits: VecDeque::from(vec![false; capacity]),
            capacity,
            scratch: Vec::with_capacity(capacity),
        }
    }

    /// Appends `bit` to the window, dropping the oldest bit if already at
    /// capacity. A `capacity` of 0 is supported: the window stays empty.
    pub fn append(&mut self, bit: bool) {
        if self.capacity == 0 {
            return;
        }
        if self.bits.len() >= self.capacity {
            self.bits.pop_front();
        }
        self.bits.push_back(bit);
    }

    /// Returns the window's content, oldest bit first, as a contiguous
    /// slice suitable for passing to a probability model.
    pub fn as_slice(&mut self) -> &[bool] {
        self.scratch.clear();
        self.scratch.extend(self.bits.iter().copied());
        &self.scratch
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
