use thiserror::Error;
use crate::bytecode::OpCode;
use crate::sink::SinkError;

/// Error type for CPU operations
#[derive(Error, Debug)]
pub enum VMError {
    #[error("Unknown opcode {opcode:#04x} at position {position}")]
    UnknownOpcode { opcode: u8, position: usize },

    #[error("{opcode} at position {position} needs {needed} operand(s) but only {available} remain")]
    StarvedOperand {
        opcode: OpCode,
        needed: usize,
        available: usize,
        position: usize,
    },

    #[error("Address {address} is outside memory of {size} cells")]
    OutOfRangeAddress { address: usize, size: usize },

    #[error("Overflow adding cell {src:#04x} ({rhs}) into cell {dst:#04x} ({lhs})")]
    ArithmeticOverflow { dst: u8, src: u8, lhs: u8, rhs: u8 },

    #[error("Byte value out of range: {0}")]
    InvalidByte(i64),

    #[error("Output error: {0}")]
    Output(#[from] SinkError),

    #[error("Interpreter has faulted and cannot run again")]
    Faulted,
}

/// Result type for CPU operations
pub type VMResult<T> = Result<T, VMError>;
