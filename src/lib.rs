// Cozputer - A tiny byte-code CPU fed one program byte at a time

pub mod bytecode;
pub mod sink;
pub mod vm;
pub mod runtime;
pub mod utils;

pub use bytecode::{Instruction, OpCode, Program};
pub use sink::{OutputSink, SinkError};
pub use vm::{TinyInterpreter, VMError};
pub use runtime::Runtime;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
