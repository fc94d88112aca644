/// Opcodes for the tiny CPU

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpCode {
    Load = 0x10,       // memory[addr] := val (2 operands)
    Add = 0x11,        // memory[x] := memory[x] + memory[y] (2 operands)
    Say = 0x12,        // Announce memory[addr] (1 operand)
    Ret = 0x13,        // No-op, reserved for subroutine return
}

const LOAD: u8 = OpCode::Load as u8;
const ADD: u8 = OpCode::Add as u8;
const SAY: u8 = OpCode::Say as u8;
const RET: u8 = OpCode::Ret as u8;

impl OpCode {
    /// Every opcode the CPU understands, in encoding order
    pub const ALL: [OpCode; 4] = [OpCode::Load, OpCode::Add, OpCode::Say, OpCode::Ret];

    /// Convert a byte to an opcode
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            LOAD => Some(OpCode::Load),
            ADD => Some(OpCode::Add),
            SAY => Some(OpCode::Say),
            RET => Some(OpCode::Ret),
            _ => None,
        }
    }

    /// Convert an opcode to a byte
    pub fn to_byte(&self) -> u8 {
        *self as u8
    }

    /// Get the number of operand bytes following the opcode
    pub fn num_operands(&self) -> usize {
        match self {
            OpCode::Load | OpCode::Add => 2,
            OpCode::Say => 1,
            OpCode::Ret => 0,
        }
    }

    /// Assembly mnemonic
    pub fn mnemonic(&self) -> &'static str {
        match self {
            OpCode::Load => "LOAD",
            OpCode::Add => "ADD",
            OpCode::Say => "SAY",
            OpCode::Ret => "RET",
        }
    }
}

impl TryFrom<u8> for OpCode {
    type Error = u8;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        OpCode::from_byte(byte).ok_or(byte)
    }
}

impl From<OpCode> for u8 {
    fn from(opcode: OpCode) -> Self {
        opcode.to_byte()
    }
}

impl std::fmt::Display for OpCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.mnemonic())
    }
}
