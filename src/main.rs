//! A thin script-runner binary: reads a file, runs it through the library,
//! and prints the Inspect format of the result (or the parser's
//! diagnostics). This is *not* the REPL — no prompt loop, no history, no
//! `exit`/`q` commands — those remain out of scope.

use std::env;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();

    let Some(path) = env::args().nth(1) else {
        eprintln!("usage: sloth <script.sloth>");
        return ExitCode::FAILURE;
    };

    let source = match std::fs::read_to_string(&path) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("{path}: {error}");
            return ExitCode::FAILURE;
        }
    };

    match sloth::run(&source) {
        Ok(value) => {
            println!("{}", sloth::inspect(&value));
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("{error}");
            ExitCode::FAILURE
        }
    }
}
