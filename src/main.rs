use std::io::{self, BufRead, Write};

use cmdline_lexing::{native, Splitter, StateLog};

/// Reads command lines from stdin and shows how the VC++ runtime rules and
/// the host platform's own splitter each break them apart. Prefix a line
/// with `:trace ` to also dump the lexer's step log.
fn main() -> anyhow::Result<()> {
    let splitter = Splitter::new();
    let stdin = io::stdin();

    loop {
        print!("cmdline> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        // Keep leading separators: they decide whether the executable
        // name is empty.
        let line = line.trim_end_matches(['\r', '\n']);
        if line.is_empty() {
            continue;
        }
        if line == "exit" {
            break;
        }

        match line.strip_prefix(":trace ") {
            Some(rest) => report_with_trace(&splitter, rest),
            None => report(&splitter, line),
        }
    }
    Ok(())
}

fn report(splitter: &Splitter, line: &str) {
    match splitter.split_exe_and_args(line) {
        Ok(parsed) => {
            println!("vc++ rules:");
            println!("  executable: {:?}", parsed.executable);
            for (i, argument) in parsed.arguments.iter().enumerate() {
                println!("  arg[{i}]: {argument:?}");
            }
        }
        Err(e) => println!("vc++ rules: {e}"),
    }

    match native::split_exe_and_args(line) {
        Ok(parsed) => {
            println!("host rules:");
            println!("  executable: {:?}", parsed.executable);
            for (i, argument) in parsed.arguments.iter().enumerate() {
                println!("  arg[{i}]: {argument:?}");
            }
        }
        Err(e) => println!("host rules: {e}"),
    }
}

fn report_with_trace(splitter: &Splitter, line: &str) {
    let mut log = StateLog::new();
    match splitter.split_exe_and_args_traced(line, &mut log) {
        Ok(parsed) => {
            println!("executable: {:?}", parsed.executable);
            for (i, argument) in parsed.arguments.iter().enumerate() {
                println!("arg[{i}]: {argument:?}");
            }
        }
        Err(e) => println!("vc++ rules: {e}"),
    }

    print!("{log}");
    println!("histogram:");
    for (step, count) in log.histogram() {
        println!("  {step:?}: {count}");
    }
}
