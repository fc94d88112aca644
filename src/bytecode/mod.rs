mod instruction;
mod opcode;
mod parser;
mod triplet;

pub use instruction::{Decoded, Instruction, MAX_INSTRUCTION_LEN};
pub use opcode::OpCode;
pub use parser::{Parser, ParseError, ParseResult, IMAGE_MAGIC, IMAGE_VERSION};
pub use triplet::TripletDecoder;

use std::fmt;

/// A named program: the raw byte sequence fed to the CPU
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    pub name: String,
    pub code: Vec<u8>,
}

impl Program {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            code: Vec::new(),
        }
    }

    pub fn from_bytes(name: &str, code: Vec<u8>) -> Self {
        Self {
            name: name.to_string(),
            code,
        }
    }

    /// Append an encoded instruction
    pub fn push(&mut self, instruction: Instruction) {
        instruction.encode_into(&mut self.code);
    }

    pub fn with_instruction(mut self, instruction: Instruction) -> Self {
        self.push(instruction);
        self
    }

    /// Append a raw byte, valid or not
    pub fn push_byte(&mut self, byte: u8) {
        self.code.push(byte);
    }

    pub fn bytes(&self) -> &[u8] {
        &self.code
    }

    pub fn len(&self) -> usize {
        self.code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }

    /// Decode the whole program into instructions.
    ///
    /// Fails on the first unknown opcode or on a truncated trailing instruction.
    pub fn disassemble(&self) -> ParseResult<Vec<Instruction>> {
        let mut instructions = Vec::new();
        let mut offset = 0;
        while offset < self.code.len() {
            match Instruction::decode_prefix(&self.code[offset..]) {
                Decoded::Complete(instruction) => {
                    offset += instruction.encoded_len();
                    instructions.push(instruction);
                },
                Decoded::Partial { opcode, .. } => {
                    return Err(ParseError::Truncated { offset, opcode });
                },
                Decoded::Unknown(opcode) => {
                    return Err(ParseError::UnknownOpcode { offset, opcode });
                },
                Decoded::Empty => break,
            }
        }
        Ok(instructions)
    }
}

impl fmt::Display for Program {
    /// Renders the program as a listing that `Parser::parse_listing` reads back
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Every line of the name stays inside a comment
        for line in self.name.lines() {
            writeln!(f, "# {}", line)?;
        }
        match self.disassemble() {
            Ok(instructions) => {
                for instruction in instructions {
                    let bytes: Vec<String> = instruction
                        .encode()
                        .iter()
                        .map(|b| format!("{:#04x}", b))
                        .collect();
                    writeln!(f, "{:<16}# {}", bytes.join(" "), instruction)?;
                }
            },
            Err(_) => {
                for chunk in self.code.chunks(8) {
                    let bytes: Vec<String> = chunk.iter().map(|b| format!("{:#04x}", b)).collect();
                    writeln!(f, "{}", bytes.join(" "))?;
                }
            },
        }
        Ok(())
    }
}
