//! Utility functions for the tiny CPU

use std::fs::File;
use std::io::{BufWriter, Write, Error as IoError};
use std::path::Path;
use byteorder::{BigEndian, WriteBytesExt};
use crate::bytecode::{Instruction, Program, IMAGE_MAGIC, IMAGE_VERSION};

/// Writes a program image to any writer
pub fn encode_image<W: Write>(program: &Program, writer: &mut W) -> Result<(), IoError> {
    writer.write_u32::<BigEndian>(IMAGE_MAGIC)?;
    writer.write_u8(IMAGE_VERSION)?;

    writer.write_u32::<BigEndian>(program.name.len() as u32)?;
    writer.write_all(program.name.as_bytes())?;

    writer.write_u32::<BigEndian>(program.code.len() as u32)?;
    writer.write_all(&program.code)?;
    Ok(())
}

/// Writes a program image to a file
pub fn write_program<P: AsRef<Path>>(program: &Program, path: P) -> Result<(), IoError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    encode_image(program, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Writes a program as a text listing
pub fn write_listing<P: AsRef<Path>>(program: &Program, path: P) -> Result<(), IoError> {
    let mut file = File::create(path)?;
    write!(file, "{}", program)?;
    file.flush()
}

/// The demonstration program: computes 23 + 19 and says "42"
pub fn generate_demo_program() -> Program {
    Program::new("demo")
        .with_instruction(Instruction::Load { addr: 0x00, value: 0x17 }) // Load 23 at 0x0
        .with_instruction(Instruction::Load { addr: 0x01, value: 0x13 }) // Load 19 at 0x1
        .with_instruction(Instruction::Add { dst: 0x00, src: 0x01 })     // Add 0x1 to 0x0
        .with_instruction(Instruction::Say { addr: 0x00 })
        .with_instruction(Instruction::Ret)
}
