use std::collections::VecDeque;
use crate::bytecode::{Decoded, Instruction, MAX_INSTRUCTION_LEN};

/// FIFO of program bytes waiting to be executed
#[derive(Debug, Default, Clone)]
pub struct InstructionStream {
    bytes: VecDeque<u8>,
    /// Bytes popped since the stream was created
    consumed: usize,
}

impl InstructionStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, byte: u8) {
        self.bytes.push_back(byte);
    }

    pub fn extend(&mut self, bytes: &[u8]) {
        self.bytes.extend(bytes.iter().copied());
    }

    pub fn pop(&mut self) -> Option<u8> {
        let byte = self.bytes.pop_front()?;
        self.consumed += 1;
        Some(byte)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Stream offset of the front byte
    pub fn position(&self) -> usize {
        self.consumed
    }

    /// Decode the front instruction without consuming anything
    pub fn peek_instruction(&self) -> Decoded {
        let mut window = [0u8; MAX_INSTRUCTION_LEN];
        let available = self.bytes.len().min(MAX_INSTRUCTION_LEN);
        for (slot, byte) in window.iter_mut().zip(self.bytes.iter()) {
            *slot = *byte;
        }
        Instruction::decode_prefix(&window[..available])
    }

    /// Drop the bytes of an instruction returned by `peek_instruction`
    pub fn consume(&mut self, instruction: &Instruction) {
        for _ in 0..instruction.encoded_len() {
            self.pop();
        }
    }

    /// Pending bytes, front first
    pub fn iter(&self) -> impl Iterator<Item = &u8> {
        self.bytes.iter()
    }
}
