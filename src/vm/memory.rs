use std::fmt;
use crate::vm::{VMError, VMResult};

/// Number of addressable cells
pub const MEM_SIZE: usize = 256;

/// What ADD does when the sum does not fit in a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverflowPolicy {
    /// Keep the sum modulo 256
    #[default]
    Wrap,
    /// Clamp the sum at 255
    Saturate,
    /// Raise `ArithmeticOverflow` and leave the cell untouched
    Fault,
}

/// Fixed array of byte cells
#[derive(Clone, PartialEq, Eq)]
pub struct Memory {
    cells: [u8; MEM_SIZE],
}

impl Memory {
    pub fn new() -> Self {
        Self { cells: [0; MEM_SIZE] }
    }

    /// Read a cell. Byte addresses always fall inside memory.
    pub fn read(&self, addr: u8) -> u8 {
        self.cells[addr as usize]
    }

    pub fn write(&mut self, addr: u8, value: u8) {
        self.cells[addr as usize] = value;
    }

    /// Checked read for callers holding a wider index
    pub fn get(&self, address: usize) -> VMResult<u8> {
        self.cells
            .get(address)
            .copied()
            .ok_or(VMError::OutOfRangeAddress { address, size: MEM_SIZE })
    }

    /// Checked write for callers holding a wider index
    pub fn set(&mut self, address: usize, value: u8) -> VMResult<()> {
        let cell = self
            .cells
            .get_mut(address)
            .ok_or(VMError::OutOfRangeAddress { address, size: MEM_SIZE })?;
        *cell = value;
        Ok(())
    }

    /// `cells[dst] += cells[src]` under the given overflow policy
    pub fn add(&mut self, dst: u8, src: u8, policy: OverflowPolicy) -> VMResult<u8> {
        let lhs = self.read(dst);
        let rhs = self.read(src);
        let sum = match policy {
            OverflowPolicy::Wrap => lhs.wrapping_add(rhs),
            OverflowPolicy::Saturate => lhs.saturating_add(rhs),
            OverflowPolicy::Fault => lhs
                .checked_add(rhs)
                .ok_or(VMError::ArithmeticOverflow { dst, src, lhs, rhs })?,
        };
        self.write(dst, sum);
        Ok(sum)
    }

    pub fn cells(&self) -> &[u8; MEM_SIZE] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        MEM_SIZE
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Memory {
    /// Only non-zero cells, which is what matters when tracing a run
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                self.cells
                    .iter()
                    .enumerate()
                    .filter(|(_, value)| **value != 0),
            )
            .finish()
    }
}
