use loxide::RunOutcome;
use std::{env, process};

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    match args.len() {
        0 => {
            if let Err(error) = loxide::run_prompt() {
                eprintln!("{}", error);
            }
        }
        1 => {
            let exit_code = match loxide::run_file(args[0].to_string()) {
                RunOutcome::Success => 0,
                RunOutcome::StaticError => 65,
                RunOutcome::RuntimeError => 70,
            };
            process::exit(exit_code);
        }
        _ => {
            println!("Usage: loxide [script]");
            process::exit(64);
        }
    }
}
