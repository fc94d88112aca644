mod interpreter;
mod memory;
mod stream;
mod error;

pub use interpreter::{InterpreterState, TinyInterpreter};
pub use memory::{Memory, OverflowPolicy, MEM_SIZE};
pub use stream::InstructionStream;
pub use error::{VMError, VMResult};
