use crate::bytecode::{Decoded, Instruction};
use crate::sink::OutputSink;
use crate::vm::{InstructionStream, Memory, OverflowPolicy, VMError, VMResult};

/// Lifecycle of an interpreter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterpreterState {
    /// Not executing; bytes may still be pending
    Idle,
    /// Draining the stream
    Executing,
    /// Stopped by an error; only memory inspection remains useful
    Faulted,
}

/// How a run treats an instruction whose operands have not all arrived
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TailMode {
    /// The program is complete, so a partial instruction is a fault
    Strict,
    /// More bytes may follow, so stop and keep the partial instruction queued
    Buffered,
}

/// The tiny CPU: 256 byte cells, a byte stream and an output sink
pub struct TinyInterpreter<S: OutputSink> {
    memory: Memory,
    stream: InstructionStream,
    sink: S,
    policy: OverflowPolicy,
    state: InterpreterState,
    /// Stream offset of the instruction that faulted
    fault_position: Option<usize>,
    trace: bool,
}

impl<S: OutputSink> TinyInterpreter<S> {
    pub fn new(sink: S) -> Self {
        Self::with_policy(sink, OverflowPolicy::default())
    }

    pub fn with_policy(sink: S, policy: OverflowPolicy) -> Self {
        Self {
            memory: Memory::new(),
            stream: InstructionStream::new(),
            sink,
            policy,
            state: InterpreterState::Idle,
            fault_position: None,
            trace: false,
        }
    }

    /// Log every executed instruction at trace level
    pub fn set_trace(&mut self, enabled: bool) {
        self.trace = enabled;
    }

    /// Append one program byte. Nothing is validated until execution.
    pub fn enqueue(&mut self, byte: u8) {
        self.stream.push(byte);
    }

    pub fn enqueue_all(&mut self, bytes: &[u8]) {
        self.stream.extend(bytes);
    }

    /// Append a value that still has to be checked against the byte range
    pub fn try_enqueue(&mut self, value: i64) -> VMResult<()> {
        let byte = u8::try_from(value).map_err(|_| VMError::InvalidByte(value))?;
        self.enqueue(byte);
        Ok(())
    }

    /// Execute until the stream is empty, returning how many instructions ran.
    ///
    /// A trailing instruction without all of its operands is a
    /// `StarvedOperand` fault.
    pub fn run(&mut self) -> VMResult<usize> {
        self.drain(TailMode::Strict)
    }

    /// Execute every complete instruction, leaving a trailing partial one queued
    pub fn run_buffered(&mut self) -> VMResult<usize> {
        self.drain(TailMode::Buffered)
    }

    /// Execute a single instruction. `Ok(None)` when nothing is queued.
    pub fn step(&mut self) -> VMResult<Option<Instruction>> {
        self.ensure_runnable()?;
        let position = self.stream.position();
        let result = self.step_inner(TailMode::Strict);
        self.settle(result, position)
    }

    fn drain(&mut self, mode: TailMode) -> VMResult<usize> {
        self.ensure_runnable()?;
        if !self.stream.is_empty() {
            self.state = InterpreterState::Executing;
        }

        let mut executed = 0;
        loop {
            let position = self.stream.position();
            match self.step_inner(mode) {
                Ok(Some(_)) => executed += 1,
                Ok(None) => break,
                Err(e) => return self.settle(Err(e), position),
            }
        }

        self.state = InterpreterState::Idle;
        tracing::debug!(executed, pending = self.stream.len(), "run finished");
        Ok(executed)
    }

    fn ensure_runnable(&self) -> VMResult<()> {
        if self.state == InterpreterState::Faulted {
            return Err(VMError::Faulted);
        }
        Ok(())
    }

    /// Record the outcome of a step started at `position` in the state machine
    fn settle<T>(&mut self, result: VMResult<T>, position: usize) -> VMResult<T> {
        match result {
            Ok(value) => {
                self.state = InterpreterState::Idle;
                Ok(value)
            },
            Err(e) => {
                tracing::warn!(position, error = %e, "interpreter faulted");
                self.state = InterpreterState::Faulted;
                self.fault_position = Some(position);
                Err(e)
            },
        }
    }

    /// Decode, consume and execute the front instruction.
    ///
    /// Bytes are only consumed once the whole instruction is known to be
    /// present, so a fault never leaves half an instruction executed.
    fn step_inner(&mut self, mode: TailMode) -> VMResult<Option<Instruction>> {
        let position = self.stream.position();
        let instruction = match self.stream.peek_instruction() {
            Decoded::Complete(instruction) => instruction,
            Decoded::Empty => return Ok(None),
            Decoded::Unknown(opcode) => {
                return Err(VMError::UnknownOpcode { opcode, position });
            },
            Decoded::Partial { .. } if mode == TailMode::Buffered => return Ok(None),
            Decoded::Partial { opcode, needed, available } => {
                return Err(VMError::StarvedOperand { opcode, needed, available, position });
            },
        };

        self.stream.consume(&instruction);
        self.execute(&instruction)?;

        if self.trace {
            tracing::trace!(position, %instruction, memory = ?self.memory, "executed");
        }
        Ok(Some(instruction))
    }

    fn execute(&mut self, instruction: &Instruction) -> VMResult<()> {
        match *instruction {
            Instruction::Load { addr, value } => {
                self.memory.write(addr, value);
            },

            Instruction::Add { dst, src } => {
                self.memory.add(dst, src, self.policy)?;
            },

            Instruction::Say { addr } => {
                let value = self.memory.read(addr);
                self.sink.announce(value)?;
            },

            Instruction::Ret => {
                // Reserved for subroutine return
            },
        }
        Ok(())
    }

    pub fn state(&self) -> InterpreterState {
        self.state
    }

    /// Stream offset of the instruction that faulted, if any
    pub fn fault_position(&self) -> Option<usize> {
        self.fault_position
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn policy(&self) -> OverflowPolicy {
        self.policy
    }

    /// Bytes queued but not yet executed
    pub fn pending(&self) -> usize {
        self.stream.len()
    }

    /// Stream offset of the next byte to execute
    pub fn consumed(&self) -> usize {
        self.stream.position()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}
