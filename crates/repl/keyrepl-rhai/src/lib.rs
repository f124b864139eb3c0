//! Rhai interpreter service for the keyrepl console.
//!
//! [`RhaiInterpreter`] implements [`keyrepl_repl::Interpreter`] on top of a
//! [`rhai::Engine`]. State carries over between submitted chunks the way a
//! REPL user expects:
//!
//! - top-level `let` bindings live in a persistent [`Scope`]
//! - script functions from every successful chunk are kept and linked into
//!   later chunks
//!
//! Text produced by `print` and `debug` is captured instead of written to
//! stdout, and drained by the console after each call.

#![warn(missing_docs)]

use std::fmt;
use std::sync::{Arc, Mutex};

use keyrepl_repl::{Interpreter, InterpreterConfig, LoadMode, LoadOutcome};
use rhai::{AST, Dynamic, Engine, ParseError, ParseErrorType, Scope};
use tracing::debug;

/// Captured `print`/`debug` output.
type OutputSink = Arc<Mutex<Vec<String>>>;

/// A Rhai engine with REPL-style persistent state.
pub struct RhaiInterpreter {
    engine: Engine,
    scope: Scope<'static>,
    /// Functions defined by earlier chunks.
    lib: AST,
    output: OutputSink,
    /// Source and 1-based (line, column) of the last syntax error.
    last_error: Option<(String, usize, usize)>,
}

impl fmt::Debug for RhaiInterpreter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RhaiInterpreter")
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}

impl Default for RhaiInterpreter {
    fn default() -> Self {
        Self::new(&InterpreterConfig::default())
    }
}

impl RhaiInterpreter {
    /// Creates an interpreter with the given resource limits.
    pub fn new(config: &InterpreterConfig) -> Self {
        let output: OutputSink = Arc::new(Mutex::new(Vec::new()));
        let mut engine = Engine::new();

        // 0 means unlimited for both.
        engine.set_max_expr_depths(config.max_expr_depth, config.max_expr_depth);
        engine.set_max_operations(config.max_operations);

        let sink = output.clone();
        engine.on_print(move |text| capture(&sink, text));

        let sink = output.clone();
        engine.on_debug(move |text, source, pos| {
            let line = match source {
                Some(source) => format!("{source} @ {pos} > {text}"),
                None => format!("{pos} > {text}"),
            };
            capture(&sink, &line);
        });

        Self {
            engine,
            scope: Scope::new(),
            lib: AST::empty(),
            output,
            last_error: None,
        }
    }

    /// Variables bound at the top level so far.
    pub fn scope(&self) -> &Scope<'static> {
        &self.scope
    }
}

/// Appends printed text to the sink, one entry per line.
fn capture(sink: &OutputSink, text: &str) {
    let Ok(mut out) = sink.lock() else {
        return;
    };
    if text.is_empty() {
        out.push(String::new());
    } else {
        out.extend(text.lines().map(str::to_owned));
    }
}

/// 1-based line and column of the last non-whitespace character, counted
/// the way Rhai positions are.
fn end_position(source: &str) -> Option<(usize, usize)> {
    source
        .lines()
        .enumerate()
        .filter_map(|(index, line)| {
            let column = line.trim_end().chars().count();
            (column > 0).then_some((index + 1, column))
        })
        .last()
}

/// Returns `true` if the parser failed because it ran out of input.
fn is_incomplete(source: &str, err: &ParseError) -> bool {
    match err.err_type() {
        ParseErrorType::UnexpectedEOF => true,
        ParseErrorType::MissingToken(..) => {
            let pos = err.position();
            match (pos.line(), pos.position(), end_position(source)) {
                (Some(line), Some(column), Some(end)) => (line, column) > end,
                _ => true,
            }
        }
        _ => false,
    }
}

impl Interpreter for RhaiInterpreter {
    type Program = AST;
    type Value = Dynamic;

    fn load(&mut self, source: &str, chunk_name: &str, mode: LoadMode) -> LoadOutcome<AST> {
        self.last_error = None;
        let compiled = match mode {
            LoadMode::Statements => self.engine.compile_with_scope(&self.scope, source),
            LoadMode::Expression => self.engine.compile_expression_with_scope(&self.scope, source),
        };
        match compiled {
            Ok(mut ast) => {
                ast.set_source(chunk_name);
                LoadOutcome::Loaded(ast)
            }
            Err(err) if mode == LoadMode::Statements && is_incomplete(source, &err) => {
                debug!(%err, "parser ran out of input");
                LoadOutcome::Incomplete
            }
            Err(err) => {
                let pos = err.position();
                self.last_error = pos
                    .line()
                    .map(|line| (source.to_owned(), line, pos.position().unwrap_or(0)));
                LoadOutcome::SyntaxError(format!("{chunk_name}: {err}"))
            }
        }
    }

    fn call(&mut self, program: AST) -> Result<Vec<Dynamic>, String> {
        let mut linked = self.lib.merge(&program);
        if let Some(source) = program.source() {
            linked.set_source(source.to_owned());
        }

        let value = self
            .engine
            .eval_ast_with_scope::<Dynamic>(&mut self.scope, &linked)
            .map_err(|err| err.to_string())?;

        self.lib = self.lib.merge(&program.clone_functions_only());
        debug!(functions = self.lib.iter_functions().count(), "chunk evaluated");

        if value.is_unit() {
            Ok(Vec::new())
        } else {
            Ok(vec![value])
        }
    }

    fn print(&mut self, value: &Dynamic) -> Result<(), String> {
        // Linked against the script functions so a user-defined `to_string`
        // is honoured.
        let print = self
            .engine
            .compile("print(value)")
            .map_err(|err| err.to_string())?;
        let mut scope = Scope::new();
        scope.push("value", value.clone());
        self.engine
            .run_ast_with_scope(&mut scope, &self.lib.merge(&print))
            .map_err(|err| err.to_string())
    }

    fn take_output(&mut self) -> Vec<String> {
        self.output
            .lock()
            .map(|mut out| std::mem::take(&mut *out))
            .unwrap_or_default()
    }

    /// Appends the failing block with the offending line marked and a caret
    /// under the error column.
    fn traceback(&mut self, message: &str) -> String {
        let Some((source, line, column)) = self.last_error.take() else {
            return message.to_owned();
        };
        let mut out = message.to_owned();
        for (index, text) in source.lines().enumerate() {
            let number = index + 1;
            let marker = if number == line { '>' } else { ' ' };
            out.push_str(&format!("\n{marker} {number:>3} | {text}"));
            if number == line && column > 0 {
                out.push_str(&format!("\n      | {}^", " ".repeat(column - 1)));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_error(source: &str) -> ParseError {
        Engine::new().compile(source).unwrap_err()
    }

    #[test]
    fn end_position_skips_trailing_blank() {
        assert_eq!(end_position("if true {\n  print(1)  \n\n"), Some((2, 10)));
        assert_eq!(end_position("x"), Some((1, 1)));
        assert_eq!(end_position("   \n"), None);
    }

    #[test]
    fn open_block_is_incomplete() {
        let source = "if true {";
        assert!(is_incomplete(source, &parse_error(source)));
        let source = "fn f(x) {\n  x + 1";
        assert!(is_incomplete(source, &parse_error(source)));
    }

    #[test]
    fn open_call_is_incomplete() {
        let source = "print(1";
        assert!(is_incomplete(source, &parse_error(source)));
    }

    #[test]
    fn malformed_line_is_error() {
        let source = "let = 5";
        assert!(!is_incomplete(source, &parse_error(source)));
    }

    #[test]
    fn missing_token_on_last_char_is_error() {
        let source = "let x = 1 2";
        assert!(!is_incomplete(source, &parse_error(source)));
        let source = "foo(1 2";
        assert!(!is_incomplete(source, &parse_error(source)));
        let source = "let y = [1 2";
        assert!(!is_incomplete(source, &parse_error(source)));
    }

    #[test]
    fn traceback_marks_failing_line() {
        let mut rhai = RhaiInterpreter::default();
        let outcome = rhai.load("if true {\nlet = 1; }", "=stdin", LoadMode::Statements);
        let LoadOutcome::SyntaxError(message) = outcome else {
            panic!("should be a syntax error");
        };
        let traceback = rhai.traceback(&message);
        assert!(traceback.starts_with(&message));
        assert!(traceback.contains("\n    1 | if true {"));
        assert!(traceback.contains("\n>   2 | let = 1; }"));
        assert!(traceback.contains("\n      |     ^"));
        // Consumed by the first call.
        assert_eq!(rhai.traceback(&message), message);
    }

    #[test]
    fn unit_result_yields_nothing() {
        let mut rhai = RhaiInterpreter::default();
        let LoadOutcome::Loaded(ast) = rhai.load("let x = 1;", "=stdin", LoadMode::Statements) else {
            panic!("should compile");
        };
        assert!(rhai.call(ast).unwrap().is_empty());
        assert!(rhai.scope().contains("x"));
    }

    #[test]
    fn print_goes_to_sink() {
        let mut rhai = RhaiInterpreter::default();
        rhai.print(&Dynamic::from(42_i64)).unwrap();
        rhai.print(&Dynamic::from("two\nlines".to_string())).unwrap();
        assert_eq!(rhai.take_output(), ["42", "two", "lines"]);
        assert!(rhai.take_output().is_empty());
    }

    #[test]
    fn operation_limit_stops_runaway_loop() {
        let mut rhai = RhaiInterpreter::new(&InterpreterConfig {
            max_expr_depth: 64,
            max_operations: 1_000,
        });
        let LoadOutcome::Loaded(ast) = rhai.load("let n = 0; loop { n += 1; }", "=stdin", LoadMode::Statements) else {
            panic!("should compile");
        };
        assert!(rhai.call(ast).is_err());
    }
}
