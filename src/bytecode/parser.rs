use std::io::{Error as IoError, ErrorKind, Read};
use byteorder::{ReadBytesExt, BigEndian};
use thiserror::Error;
use crate::bytecode::{OpCode, Program};

/// "COZP" in ASCII
pub const IMAGE_MAGIC: u32 = 0x434F5A50;
pub const IMAGE_VERSION: u8 = 1;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    IoError(#[from] IoError),

    #[error("Invalid program image: {0}")]
    InvalidFormat(String),

    #[error("Unsupported program image version: {0}")]
    UnsupportedVersion(u8),

    #[error("Invalid token '{token}' on line {line}")]
    InvalidToken { line: usize, token: String },

    #[error("Value {value} on line {line} does not fit in a byte")]
    ByteOutOfRange { line: usize, value: u64 },

    #[error("Unknown opcode {opcode:#04x} at offset {offset}")]
    UnknownOpcode { offset: usize, opcode: u8 },

    #[error("{opcode} at offset {offset} is missing operands")]
    Truncated { offset: usize, opcode: OpCode },

    #[error("Bit group {0} does not fit in three bits")]
    InvalidTriplet(u8),

    #[error("Assembled value {0} does not fit in a byte")]
    TripletOverflow(u16),
}

pub type ParseResult<T> = Result<T, ParseError>;

pub struct Parser;

impl Parser {
    /// Parse a program image from a reader (file, memory buffer, etc.)
    ///
    /// Layout, big endian: magic `u32`, version `u8`, name length `u32`,
    /// name bytes, code length `u32`, code bytes.
    pub fn parse_image<R: Read>(reader: &mut R) -> ParseResult<Program> {
        let magic = reader.read_u32::<BigEndian>()?;
        if magic != IMAGE_MAGIC {
            return Err(ParseError::InvalidFormat("Invalid magic number".to_string()));
        }

        let version = reader.read_u8()?;
        if version != IMAGE_VERSION {
            return Err(ParseError::UnsupportedVersion(version));
        }

        let name_len = reader.read_u32::<BigEndian>()?;
        let name_bytes = Self::read_section(reader, name_len)?;
        let name = String::from_utf8_lossy(&name_bytes).to_string();

        let code_len = reader.read_u32::<BigEndian>()?;
        let code = Self::read_section(reader, code_len)?;

        Ok(Program::from_bytes(&name, code))
    }

    /// Read a length-prefixed section. The buffer grows with the bytes that
    /// actually arrive, so a corrupt length cannot force a huge allocation.
    fn read_section<R: Read>(reader: &mut R, len: u32) -> ParseResult<Vec<u8>> {
        let mut buf = Vec::new();
        reader.by_ref().take(u64::from(len)).read_to_end(&mut buf)?;
        if buf.len() as u64 != u64::from(len) {
            return Err(IoError::new(
                ErrorKind::UnexpectedEof,
                format!("section declares {} bytes, found {}", len, buf.len()),
            )
            .into());
        }
        Ok(buf)
    }

    /// Read raw program bytes until end of input, one byte at a time
    pub fn parse_raw<R: Read>(name: &str, reader: &mut R) -> ParseResult<Program> {
        let mut program = Program::new(name);
        loop {
            match reader.read_u8() {
                Ok(byte) => program.push_byte(byte),
                Err(e) if e.kind() == ErrorKind::UnexpectedEof => break,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(program)
    }

    /// Parse a text listing.
    ///
    /// Tokens are separated by whitespace or commas, `#` starts a comment.
    /// A token is a hex byte (`0x17`), a decimal byte (`23`) or a mnemonic
    /// (`LOAD`, `ADD`, `SAY`, `RET`, any case) standing for its opcode byte.
    pub fn parse_listing(name: &str, source: &str) -> ParseResult<Program> {
        let mut program = Program::new(name);
        for (idx, raw_line) in source.lines().enumerate() {
            let line = idx + 1;
            let code = raw_line.split('#').next().unwrap_or("");
            for token in code.split(|c: char| c.is_whitespace() || c == ',') {
                if token.is_empty() {
                    continue;
                }
                program.push_byte(Self::parse_token(line, token)?);
            }
        }
        Ok(program)
    }

    fn parse_token(line: usize, token: &str) -> ParseResult<u8> {
        if let Some(opcode) = OpCode::ALL
            .iter()
            .find(|op| op.mnemonic().eq_ignore_ascii_case(token))
        {
            return Ok(opcode.to_byte());
        }

        let parsed = match token.strip_prefix("0x").or_else(|| token.strip_prefix("0X")) {
            Some(hex) => u64::from_str_radix(hex, 16),
            None => token.parse::<u64>(),
        };
        let value = parsed.map_err(|_| ParseError::InvalidToken {
            line,
            token: token.to_string(),
        })?;

        u8::try_from(value).map_err(|_| ParseError::ByteOutOfRange { line, value })
    }
}
