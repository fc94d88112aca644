use std::fmt;
use crate::bytecode::OpCode;

/// Longest encoded instruction: opcode plus two operands
pub const MAX_INSTRUCTION_LEN: usize = 3;

/// Outcome of decoding the instruction at the front of a byte sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoded {
    /// A whole instruction is available
    Complete(Instruction),
    /// The opcode is known but not all of its operands have arrived
    Partial { opcode: OpCode, needed: usize, available: usize },
    /// The front byte is not an opcode
    Unknown(u8),
    Empty,
}

/// A single decoded instruction with its operands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// Store the immediate `value` at `addr`
    Load { addr: u8, value: u8 },
    /// Add the cell at `src` into the cell at `dst`
    Add { dst: u8, src: u8 },
    /// Announce the cell at `addr`
    Say { addr: u8 },
    Ret,
}

impl Instruction {
    /// Build an instruction from its opcode and operand bytes.
    ///
    /// `operands` must hold exactly `opcode.num_operands()` bytes.
    pub fn decode(opcode: OpCode, operands: &[u8]) -> Option<Self> {
        if operands.len() != opcode.num_operands() {
            return None;
        }
        let instruction = match opcode {
            OpCode::Load => Instruction::Load { addr: operands[0], value: operands[1] },
            OpCode::Add => Instruction::Add { dst: operands[0], src: operands[1] },
            OpCode::Say => Instruction::Say { addr: operands[0] },
            OpCode::Ret => Instruction::Ret,
        };
        Some(instruction)
    }

    /// Decode the instruction starting at `bytes[0]`, ignoring anything past it
    pub fn decode_prefix(bytes: &[u8]) -> Decoded {
        let Some(&first) = bytes.first() else {
            return Decoded::Empty;
        };
        let Some(opcode) = OpCode::from_byte(first) else {
            return Decoded::Unknown(first);
        };
        let needed = opcode.num_operands();
        let available = bytes.len() - 1;
        if available < needed {
            return Decoded::Partial { opcode, needed, available };
        }
        match Instruction::decode(opcode, &bytes[1..=needed]) {
            Some(instruction) => Decoded::Complete(instruction),
            None => Decoded::Partial { opcode, needed, available },
        }
    }

    pub fn opcode(&self) -> OpCode {
        match self {
            Instruction::Load { .. } => OpCode::Load,
            Instruction::Add { .. } => OpCode::Add,
            Instruction::Say { .. } => OpCode::Say,
            Instruction::Ret => OpCode::Ret,
        }
    }

    /// Total encoded length in bytes, opcode included
    pub fn encoded_len(&self) -> usize {
        1 + self.opcode().num_operands()
    }

    /// Append the encoded bytes to `out`
    pub fn encode_into(&self, out: &mut Vec<u8>) {
        out.push(self.opcode().to_byte());
        match *self {
            Instruction::Load { addr, value } => out.extend_from_slice(&[addr, value]),
            Instruction::Add { dst, src } => out.extend_from_slice(&[dst, src]),
            Instruction::Say { addr } => out.push(addr),
            Instruction::Ret => {},
        }
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.encoded_len());
        self.encode_into(&mut out);
        out
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Load { addr, value } => write!(f, "LOAD {:#04x}, {}", addr, value),
            Instruction::Add { dst, src } => write!(f, "ADD {:#04x}, {:#04x}", dst, src),
            Instruction::Say { addr } => write!(f, "SAY {:#04x}", addr),
            Instruction::Ret => write!(f, "RET"),
        }
    }
}
