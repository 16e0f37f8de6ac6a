//! Splitting a command line into an executable name and arguments the way
//! the Visual C++ runtime does it, and joining tokens back into a line that
//! re-splits to the same values.
//!
//! On Windows every program splits its own command line, and the main
//! providers of that service (the VC++ runtime building `argv` for `main`,
//! the `CommandLineToArgvW` API, the .NET runtime) each do it slightly
//! differently, mostly around double-quotes and backslashes. This crate
//! implements the VC++ runtime's rules: the meaning of a quote depends on
//! the parity of the backslash run before it, and sometimes on the
//! character after it. The host platform's own splitter stays available as
//! a black box in [`native`] so the two conventions can be compared on the
//! same input.
//!
//! ```
//! let parsed = cmdline_lexing::split_exe_and_args(r#"program.exe "hello\"there""#).unwrap();
//! assert_eq!(parsed.executable, "program.exe");
//! assert_eq!(parsed.arguments, vec![r#"hello"there"#]);
//! ```

pub mod native;
pub mod parser;
pub mod quote;
pub mod trace;

pub use parser::{take_argument, take_first_argument, take_remaining_arguments, truncate_at_nul};
pub use quote::{join_args, join_exe_and_args, quotify};
pub use trace::{LexStep, StateLog, TraceEvent, TraceSink};

/// Default ceiling on the number of arguments a single split will accept,
/// not counting the executable name.
pub const DEFAULT_MAX_ARGUMENTS: usize = 250;

/// A command line split into its executable name and decoded arguments.
///
/// Both the VC++-rule [`Splitter`] and the [`native`] black box produce
/// this shape, so the two conventions' results compare directly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseResult {
    pub executable: String,
    pub arguments: Vec<String>,
}

/// Errors produced while splitting a command line.
///
/// Splitting itself never rejects an input: unterminated quotes and stray
/// backslashes all decode deterministically. The only fatal condition is
/// running past the configured argument ceiling.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The driver collected the configured maximum number of arguments and
    /// unlexed input remained.
    #[error("more than {limit} arguments on the command line")]
    TooManyArguments { limit: usize },
}

/// Splits and joins command lines under a configured argument ceiling.
#[derive(Clone, Copy, Debug)]
pub struct Splitter {
    max_arguments: usize,
}

impl Default for Splitter {
    fn default() -> Self {
        Self::new()
    }
}

impl Splitter {
    /// A splitter with the default argument ceiling of 250.
    pub fn new() -> Self {
        Self {
            max_arguments: DEFAULT_MAX_ARGUMENTS,
        }
    }

    /// A splitter that accepts at most `max` arguments per command line.
    pub fn with_max_arguments(max: usize) -> Self {
        Self { max_arguments: max }
    }

    /// Splits `command_line` into the executable name and the argument
    /// list.
    ///
    /// The line is cut at the first NUL, the executable name comes off
    /// under the simplified first-token rules, and the remainder is lexed
    /// argument by argument under the full backslash/quote grammar.
    pub fn split_exe_and_args(&self, command_line: &str) -> Result<ParseResult, Error> {
        self.split_exe_and_args_traced(command_line, &mut ())
    }

    /// Like [`split_exe_and_args`](Self::split_exe_and_args), reporting
    /// every lexer step to `trace`.
    pub fn split_exe_and_args_traced<T: TraceSink>(
        &self,
        command_line: &str,
        trace: &mut T,
    ) -> Result<ParseResult, Error> {
        let effective = parser::truncate_at_nul(command_line);
        let (executable, rest) = parser::take_first_argument(effective);
        let arguments = parser::take_remaining_arguments(rest, self.max_arguments, trace)?;
        log::trace!("split {:?} plus {} argument(s)", executable, arguments.len());
        Ok(ParseResult {
            executable,
            arguments,
        })
    }

    /// Splits `command_line`, discarding the executable name.
    pub fn split_args(&self, command_line: &str) -> Result<Vec<String>, Error> {
        Ok(self.split_exe_and_args(command_line)?.arguments)
    }

    /// Joins an executable name and arguments into one command line; see
    /// [`quote::join_exe_and_args`].
    pub fn join_exe_and_args<S: AsRef<str>>(&self, executable: &str, arguments: &[S]) -> String {
        quote::join_exe_and_args(executable, arguments)
    }

    /// Joins arguments into one command line; see [`quote::join_args`].
    pub fn join_args<S: AsRef<str>>(&self, arguments: &[S]) -> String {
        quote::join_args(arguments)
    }
}

/// Splits `command_line` with the default argument ceiling.
pub fn split_exe_and_args(command_line: &str) -> Result<ParseResult, Error> {
    Splitter::new().split_exe_and_args(command_line)
}

/// Splits `command_line` with the default argument ceiling, discarding the
/// executable name.
pub fn split_args(command_line: &str) -> Result<Vec<String>, Error> {
    Splitter::new().split_args(command_line)
}
