//! The host platform's own command-line splitter, consumed as a black box.
//!
//! Windows exposes `CommandLineToArgvW`, whose quoting convention is close
//! to — but not the same as — the VC++ runtime rules this crate
//! implements. Off Windows no argv-splitting facility exists (the shell
//! owns that job), so the POSIX rules provided by `shlex` stand in. Either
//! way the convention is the host's, never reimplemented here; the output
//! shares [`ParseResult`] with the VC++-rule splitter so callers can
//! compare the two on the same input.

use std::io;

use crate::ParseResult;

/// Splits `command_line` with the host facility, discarding the executable
/// name.
pub fn split_args(command_line: &str) -> io::Result<Vec<String>> {
    Ok(split_exe_and_args(command_line)?.arguments)
}

/// Splits `command_line` into an executable name and arguments with the
/// host facility.
#[cfg(windows)]
pub fn split_exe_and_args(command_line: &str) -> io::Result<ParseResult> {
    use std::ffi::OsStr;
    use std::os::windows::ffi::OsStrExt;

    use windows_sys::Win32::System::Memory::LocalFree;
    use windows_sys::Win32::UI::Shell::CommandLineToArgvW;

    let wide: Vec<u16> = OsStr::new(command_line)
        .encode_wide()
        .chain(std::iter::once(0))
        .collect();

    let mut count = 0i32;
    let argv = unsafe { CommandLineToArgvW(wide.as_ptr(), &mut count) };
    if argv.is_null() {
        return Err(io::Error::last_os_error());
    }

    let mut tokens = Vec::with_capacity(count as usize);
    for i in 0..count as usize {
        let arg = unsafe { *argv.add(i) };
        let mut len = 0usize;
        while unsafe { *arg.add(len) } != 0 {
            len += 1;
        }
        let units = unsafe { std::slice::from_raw_parts(arg, len) };
        tokens.push(String::from_utf16_lossy(units));
    }
    unsafe { LocalFree(argv.cast()) };

    Ok(from_tokens(tokens))
}

/// Splits `command_line` into an executable name and arguments with the
/// host facility.
#[cfg(not(windows))]
pub fn split_exe_and_args(command_line: &str) -> io::Result<ParseResult> {
    let tokens = shlex::split(command_line).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "unbalanced quoting on the command line",
        )
    })?;
    Ok(from_tokens(tokens))
}

fn from_tokens(tokens: Vec<String>) -> ParseResult {
    let mut tokens = tokens.into_iter();
    ParseResult {
        executable: tokens.next().unwrap_or_default(),
        arguments: tokens.collect(),
    }
}
