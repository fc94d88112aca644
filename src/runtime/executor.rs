use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;
use crossbeam::channel::Receiver;
use crate::bytecode::{Parser, Program, TripletDecoder};
use crate::runtime::{RuntimeConfig, RuntimeResult};
use crate::sink::OutputSink;
use crate::vm::TinyInterpreter;

/// The Runtime is the main entry point for loading and running programs
#[derive(Clone, Debug, Default)]
pub struct Runtime {
    config: RuntimeConfig,
}

impl Runtime {
    /// Create a new runtime with default configuration
    pub fn new() -> Self {
        Self::with_config(RuntimeConfig::default())
    }

    /// Create a new runtime with custom configuration
    pub fn with_config(config: RuntimeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Build a fresh interpreter that announces through `sink`
    pub fn interpreter<S: OutputSink>(&self, sink: S) -> TinyInterpreter<S> {
        let mut interpreter = TinyInterpreter::with_policy(sink, self.config.overflow_policy);
        interpreter.set_trace(self.config.trace_execution);
        interpreter
    }

    /// Queue a whole program and run it to completion.
    ///
    /// Returns the number of instructions executed.
    #[tracing::instrument(skip_all, fields(program = %program.name))]
    pub fn execute_program<S: OutputSink>(
        &self,
        program: &Program,
        interpreter: &mut TinyInterpreter<S>,
    ) -> RuntimeResult<usize> {
        if self.config.debug_mode {
            self.log_summary(program);
        }

        interpreter.enqueue_all(program.bytes());
        let executed = interpreter.run()?;
        tracing::debug!(executed, "program finished");
        Ok(executed)
    }

    /// Load a program image from disk
    pub fn load_file<P: AsRef<Path>>(&self, path: P) -> RuntimeResult<Program> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Ok(Parser::parse_image(&mut reader)?)
    }

    /// Load a text listing from disk, naming the program after the file
    pub fn load_listing_file<P: AsRef<Path>>(&self, path: P) -> RuntimeResult<Program> {
        let path = path.as_ref();
        let source = fs::read_to_string(path)?;
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_default();
        Ok(Parser::parse_listing(&name, &source)?)
    }

    /// Execute a program image file
    pub fn execute_file<P: AsRef<Path>, S: OutputSink>(
        &self,
        path: P,
        interpreter: &mut TinyInterpreter<S>,
    ) -> RuntimeResult<usize> {
        let program = self.load_file(path)?;
        self.execute_program(&program, interpreter)
    }

    /// Execute a text listing file
    pub fn execute_listing_file<P: AsRef<Path>, S: OutputSink>(
        &self,
        path: P,
        interpreter: &mut TinyInterpreter<S>,
    ) -> RuntimeResult<usize> {
        let program = self.load_listing_file(path)?;
        self.execute_program(&program, interpreter)
    }

    /// Run bytes as a producer sends them.
    ///
    /// Each received batch is executed as far as it goes; an instruction
    /// split across batches waits for its remaining bytes. Once the sender
    /// hangs up, whatever is left must form complete instructions.
    pub fn execute_channel<S: OutputSink>(
        &self,
        receiver: &Receiver<u8>,
        interpreter: &mut TinyInterpreter<S>,
    ) -> RuntimeResult<usize> {
        let mut executed = 0;
        while let Ok(byte) = receiver.recv() {
            interpreter.enqueue(byte);
            for byte in receiver.try_iter() {
                interpreter.enqueue(byte);
            }
            executed += interpreter.run_buffered()?;
        }

        tracing::debug!(pending = interpreter.pending(), "producer disconnected");
        executed += interpreter.run()?;
        Ok(executed)
    }

    /// Assemble bytes from three-bit groups, then run them.
    ///
    /// Groups left over after the last whole byte are dropped.
    pub fn execute_triplets<I, S>(
        &self,
        groups: I,
        interpreter: &mut TinyInterpreter<S>,
    ) -> RuntimeResult<usize>
    where
        I: IntoIterator<Item = u8>,
        S: OutputSink,
    {
        let mut decoder = TripletDecoder::new();
        let mut program = Program::new("triplets");
        for bits in groups {
            if let Some(byte) = decoder.push(bits)? {
                program.push_byte(byte);
            }
        }
        if decoder.groups_pending() > 0 {
            tracing::warn!(groups = decoder.groups_pending(), "dropping incomplete byte");
        }
        self.execute_program(&program, interpreter)
    }

    fn log_summary(&self, program: &Program) {
        tracing::info!(name = %program.name, bytes = program.len(), "loaded program");
        match program.disassemble() {
            Ok(instructions) => {
                for instruction in &instructions {
                    tracing::info!("  {}", instruction);
                }
            },
            Err(e) => tracing::warn!(error = %e, "program is malformed"),
        }
    }
}
