//! Visibility into the argument lexer, one step at a time.
//!
//! The extractor in [`crate::parser`] reports every step it takes to a
//! [`TraceSink`]. Production callers pass `&mut ()` and pay nothing; tests
//! and the demo binary collect steps in a [`StateLog`] to inspect
//! transition sequences, counts, or a printable rendering.

use std::collections::BTreeMap;
use std::fmt;

/// The kinds of step the argument lexer takes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LexStep {
    /// A leading separator was skipped before the token started.
    SkipSeparator,
    /// A backslash joined the pending run.
    CountBackslash,
    /// A double-quote resolved the pending run to half its length.
    HalveBackslashes,
    /// A quote preceded by an odd run became a literal token character.
    LiteralQuote,
    /// A quote switched the lexer into quoting mode.
    OpenQuote,
    /// A quote switched the lexer out of quoting mode.
    CloseQuote,
    /// Two adjacent quotes inside quoting mode became one literal quote.
    DoubledQuote,
    /// A pending backslash run was emitted with no halving.
    FlushBackslashes,
    /// An ordinary character was appended to the token.
    AppendChar,
    /// A separator outside quoting mode ended the token.
    EndOfToken,
    /// The stream ran out.
    EndOfInput,
}

impl LexStep {
    /// Every step kind, in declaration order.
    pub const ALL: [LexStep; 11] = [
        LexStep::SkipSeparator,
        LexStep::CountBackslash,
        LexStep::HalveBackslashes,
        LexStep::LiteralQuote,
        LexStep::OpenQuote,
        LexStep::CloseQuote,
        LexStep::DoubledQuote,
        LexStep::FlushBackslashes,
        LexStep::AppendChar,
        LexStep::EndOfToken,
        LexStep::EndOfInput,
    ];
}

/// One recorded lexer step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TraceEvent {
    pub step: LexStep,
    /// The character under the cursor, or `None` at end of input.
    pub looking_at: Option<char>,
    /// Pending backslashes after this step.
    pub backslashes: usize,
    /// Whether the lexer is inside quoting mode after this step.
    pub in_quotes: bool,
    /// The token decoded so far.
    pub partial: String,
}

impl fmt::Display for TraceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:?}, ", self.step)?;
        match self.looking_at {
            Some(c) => write!(f, "'{}'", c.escape_default())?,
            None => f.write_str("end")?,
        }
        write!(
            f,
            ", {}, {}, \"{}\")",
            self.backslashes,
            if self.in_quotes { "inside" } else { "outside" },
            self.partial.escape_default(),
        )
    }
}

/// Receives lexer steps as they happen.
pub trait TraceSink {
    fn record(
        &mut self,
        step: LexStep,
        looking_at: Option<char>,
        backslashes: usize,
        in_quotes: bool,
        partial: &str,
    );
}

/// The sink that observes nothing. Lexing with it compiles down to the
/// bare state machine.
impl TraceSink for () {
    fn record(&mut self, _: LexStep, _: Option<char>, _: usize, _: bool, _: &str) {}
}

/// A sink that keeps every step for later inspection.
#[derive(Clone, Debug, Default)]
pub struct StateLog {
    events: Vec<TraceEvent>,
}

impl StateLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every recorded step, in order.
    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    /// Just the step kinds, in order.
    pub fn steps(&self) -> Vec<LexStep> {
        self.events.iter().map(|event| event.step).collect()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// How often each step kind fired. Kinds that never fired are present
    /// with a count of zero, so the map always covers [`LexStep::ALL`].
    pub fn histogram(&self) -> BTreeMap<LexStep, usize> {
        let mut counts: BTreeMap<LexStep, usize> =
            LexStep::ALL.iter().map(|&step| (step, 0)).collect();
        for event in &self.events {
            *counts.entry(event.step).or_insert(0) += 1;
        }
        counts
    }
}

impl TraceSink for StateLog {
    fn record(
        &mut self,
        step: LexStep,
        looking_at: Option<char>,
        backslashes: usize,
        in_quotes: bool,
        partial: &str,
    ) {
        self.events.push(TraceEvent {
            step,
            looking_at,
            backslashes,
            in_quotes,
            partial: partial.to_string(),
        });
    }
}

impl fmt::Display for StateLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for event in &self.events {
            writeln!(f, "{event}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::take_argument;

    #[test]
    fn records_a_transition_sequence() {
        let mut log = StateLog::new();
        let (token, rest) = take_argument(r#" "a b""#, &mut log);
        assert_eq!(token, "a b");
        assert_eq!(rest, "");
        assert_eq!(
            log.steps(),
            [
                LexStep::SkipSeparator,
                LexStep::OpenQuote,
                LexStep::AppendChar,
                LexStep::AppendChar,
                LexStep::AppendChar,
                LexStep::CloseQuote,
                LexStep::EndOfInput,
            ]
        );
    }

    #[test]
    fn records_backslash_run_resolution() {
        let mut log = StateLog::new();
        let (token, _) = take_argument(r#"\\\"x"#, &mut log);
        assert_eq!(token, r#"\"x"#);
        assert_eq!(
            log.steps(),
            [
                LexStep::CountBackslash,
                LexStep::CountBackslash,
                LexStep::CountBackslash,
                LexStep::HalveBackslashes,
                LexStep::LiteralQuote,
                LexStep::AppendChar,
                LexStep::EndOfInput,
            ]
        );
        // The halving step reports the emitted run length.
        assert_eq!(log.events()[3].backslashes, 1);
        assert_eq!(log.events()[3].partial, r"\");
    }

    #[test]
    fn histogram_covers_every_step_kind() {
        let mut log = StateLog::new();
        take_argument(r#" "a b""#, &mut log);
        let histogram = log.histogram();
        assert_eq!(histogram.len(), LexStep::ALL.len());
        assert_eq!(histogram[&LexStep::AppendChar], 3);
        assert_eq!(histogram[&LexStep::OpenQuote], 1);
        assert_eq!(histogram[&LexStep::LiteralQuote], 0);
    }

    #[test]
    fn event_rendering_is_compact() {
        let event = TraceEvent {
            step: LexStep::CountBackslash,
            looking_at: Some('\\'),
            backslashes: 2,
            in_quotes: true,
            partial: "ab".to_string(),
        };
        assert_eq!(event.to_string(), r#"(CountBackslash, '\\', 2, inside, "ab")"#);

        let end = TraceEvent {
            step: LexStep::EndOfInput,
            looking_at: None,
            backslashes: 0,
            in_quotes: false,
            partial: String::new(),
        };
        assert_eq!(end.to_string(), r#"(EndOfInput, end, 0, outside, "")"#);
    }

    #[test]
    fn log_renders_one_event_per_line() {
        let mut log = StateLog::new();
        take_argument("ab", &mut log);
        let rendered = log.to_string();
        assert_eq!(rendered.lines().count(), log.len());
        assert!(rendered.starts_with(r#"(AppendChar, 'a', 0, outside, "a")"#));
    }
}
