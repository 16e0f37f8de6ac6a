use crate::Error;
use crate::trace::{LexStep, TraceSink};

/// The two characters that delimit tokens outside quoting mode. Nothing
/// else, not even other whitespace, separates arguments.
pub(crate) fn is_separator(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// Cuts the command line at the first NUL.
///
/// Everything from the terminator onward is discarded before any
/// tokenization, so the lexer never observes characters past it.
pub fn truncate_at_nul(command_line: &str) -> &str {
    match command_line.find('\0') {
        Some(end) => &command_line[..end],
        None => command_line,
    }
}

/// Extracts the executable name from the front of a command line.
///
/// The first token follows simpler rules than every later argument: a
/// double-quote toggles quoting mode and is never copied, and any other
/// character — backslashes included — is copied verbatim. The name ends at
/// the first separator seen outside quoting mode, or at the end of input.
/// A file path cannot contain a double-quote, which is why no escape
/// handling is needed here.
///
/// The terminating separator is not consumed; it stays at the front of the
/// returned remainder for the next stage to skip.
pub fn take_first_argument(command_line: &str) -> (String, &str) {
    let mut name = String::new();
    let mut in_quotes = false;
    for (at, c) in command_line.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            c if is_separator(c) && !in_quotes => return (name, &command_line[at..]),
            c => name.push(c),
        }
    }
    (name, "")
}

/// Extracts one argument from the front of `stream`, returning the decoded
/// token and the unconsumed remainder.
///
/// Leading separators belong to no token and are skipped first. After that
/// the Visual C++ runtime grammar applies:
///
/// - A run of N backslashes followed by a double-quote collapses to N/2
///   literal backslashes. If N is odd the quote becomes a literal token
///   character; if N is even the quote toggles quoting mode — unless the
///   lexer is already inside quotes and the next character is another
///   double-quote, in which case the pair is one literal quote and quoting
///   mode is kept.
/// - A run of backslashes not followed by a double-quote stays fully
///   literal, with no halving.
/// - Outside quoting mode a separator ends the token and is left at the
///   front of the remainder; inside quoting mode it is an ordinary
///   character.
///
/// Unterminated quoting is not an error; the token simply runs to the end
/// of the stream, and any pending backslashes are still flushed. Every
/// step is reported to `trace`; pass `&mut ()` to observe nothing.
pub fn take_argument<'a, T: TraceSink>(stream: &'a str, trace: &mut T) -> (String, &'a str) {
    let chars: Vec<(usize, char)> = stream.char_indices().collect();
    let mut at = 0;

    while at < chars.len() && is_separator(chars[at].1) {
        trace.record(LexStep::SkipSeparator, Some(chars[at].1), 0, false, "");
        at += 1;
    }

    let mut token = String::new();
    let mut in_quotes = false;
    let mut backslashes = 0usize;

    while at < chars.len() {
        let (pos, c) = chars[at];
        match c {
            '\\' => {
                backslashes += 1;
                trace.record(LexStep::CountBackslash, Some(c), backslashes, in_quotes, &token);
                at += 1;
            }
            '"' => {
                let odd = backslashes % 2 == 1;
                if backslashes > 0 {
                    append_backslashes(&mut token, backslashes / 2);
                    trace.record(LexStep::HalveBackslashes, Some(c), backslashes / 2, in_quotes, &token);
                    backslashes = 0;
                }
                if odd {
                    token.push('"');
                    trace.record(LexStep::LiteralQuote, Some(c), 0, in_quotes, &token);
                } else if !in_quotes {
                    in_quotes = true;
                    trace.record(LexStep::OpenQuote, Some(c), 0, in_quotes, &token);
                } else if let Some(&(_, '"')) = chars.get(at + 1) {
                    // Two quotes in a row inside quoting mode collapse to
                    // one literal quote; quoting mode is kept.
                    token.push('"');
                    trace.record(LexStep::DoubledQuote, Some(c), 0, in_quotes, &token);
                    at += 1;
                } else {
                    in_quotes = false;
                    trace.record(LexStep::CloseQuote, Some(c), 0, in_quotes, &token);
                }
                at += 1;
            }
            c if is_separator(c) && !in_quotes => {
                if backslashes > 0 {
                    append_backslashes(&mut token, backslashes);
                    trace.record(LexStep::FlushBackslashes, Some(c), backslashes, in_quotes, &token);
                    backslashes = 0;
                }
                trace.record(LexStep::EndOfToken, Some(c), 0, in_quotes, &token);
                return (token, &stream[pos..]);
            }
            c => {
                if backslashes > 0 {
                    append_backslashes(&mut token, backslashes);
                    trace.record(LexStep::FlushBackslashes, Some(c), backslashes, in_quotes, &token);
                    backslashes = 0;
                }
                token.push(c);
                trace.record(LexStep::AppendChar, Some(c), 0, in_quotes, &token);
                at += 1;
            }
        }
    }

    if backslashes > 0 {
        append_backslashes(&mut token, backslashes);
        trace.record(LexStep::FlushBackslashes, None, backslashes, in_quotes, &token);
    }
    trace.record(LexStep::EndOfInput, None, 0, in_quotes, &token);
    (token, "")
}

fn append_backslashes(token: &mut String, count: usize) {
    for _ in 0..count {
        token.push('\\');
    }
}

/// Lexes every remaining argument off `stream` in encounter order.
///
/// `stream` is the remainder handed back by [`take_first_argument`]. The
/// loop stops once nothing but separators is left, so a trailing `""`
/// still yields its legitimately empty token while trailing whitespace
/// yields none. Collecting `max` arguments with real input still ahead
/// fails with [`Error::TooManyArguments`]; the bound is never enforced by
/// silent truncation.
pub fn take_remaining_arguments<T: TraceSink>(
    stream: &str,
    max: usize,
    trace: &mut T,
) -> Result<Vec<String>, Error> {
    let mut arguments = Vec::new();
    let mut rest = stream;
    while !rest.chars().all(is_separator) {
        if arguments.len() == max {
            log::warn!("command line still has input after {max} arguments");
            return Err(Error::TooManyArguments { limit: max });
        }
        let (argument, remaining) = take_argument(rest, trace);
        arguments.push(argument);
        rest = remaining;
    }
    Ok(arguments)
}
