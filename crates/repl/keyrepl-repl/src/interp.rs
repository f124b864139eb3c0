//! Interpreter service interface.
//!
//! The console never evaluates code itself. It hands source text to an
//! [`Interpreter`], which compiles it into an opaque program, runs it, and
//! prints its results through its own print primitive.

/// How a chunk of source should be compiled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMode {
    /// One or more statements.
    Statements,
    /// A single expression whose value is returned.
    Expression,
}

/// Result of compiling a chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome<P> {
    /// The chunk compiled into a runnable program.
    Loaded(P),
    /// The parser ran out of input; more lines may complete the chunk.
    Incomplete,
    /// The chunk is malformed.
    SyntaxError(String),
}

/// An embedded scripting interpreter.
pub trait Interpreter {
    /// A compiled chunk, ready to call.
    type Program;
    /// A value returned by a call.
    type Value;

    /// Compiles `source`, tagging it with `chunk_name` for error messages.
    fn load(&mut self, source: &str, chunk_name: &str, mode: LoadMode) -> LoadOutcome<Self::Program>;

    /// Runs a compiled program.
    ///
    /// # Errors
    ///
    /// Returns the interpreter's runtime error message if the program fails.
    fn call(&mut self, program: Self::Program) -> Result<Vec<Self::Value>, String>;

    /// Prints a value through the interpreter's own print primitive.
    ///
    /// # Errors
    ///
    /// Returns the error message if printing itself fails.
    fn print(&mut self, value: &Self::Value) -> Result<(), String>;

    /// Drains text printed since the last call, one entry per printed line.
    fn take_output(&mut self) -> Vec<String>;

    /// Formats an error the way the interpreter reports failed calls.
    fn traceback(&mut self, message: &str) -> String {
        message.to_owned()
    }
}
