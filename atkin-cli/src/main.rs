//! Interactive front end for the Atkin sieve.
//!
//! Prompts for a bound, validates it against the application range (1..=50)
//! before the sieve is ever invoked, and reprompts on bad input. The bound
//! lives only in this loop — the sieve takes it as an explicit parameter and
//! keeps no state between calls.

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use atkin::atkin_primes;

const MIN_LIMIT: u64 = 1;
const MAX_LIMIT: u64 = 50;

fn read_limit(input: &mut impl BufRead) -> io::Result<Option<u64>> {
    loop {
        print!("Enter a natural number N ({}-{}): ", MIN_LIMIT, MAX_LIMIT);
        io::stdout().flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None); // EOF
        }

        match line.trim().parse::<u64>() {
            Ok(limit) if (MIN_LIMIT..=MAX_LIMIT).contains(&limit) => {
                return Ok(Some(limit));
            }
            _ => {
                println!("Error: please enter a number from {} to {}.", MIN_LIMIT, MAX_LIMIT);
            }
        }
    }
}

fn main() -> ExitCode {
    let stdin = io::stdin();
    let limit = match read_limit(&mut stdin.lock()) {
        Ok(Some(limit)) => limit,
        Ok(None) => return ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("I/O error: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let primes = atkin_primes(limit);
    println!("Primes up to {}:", limit);
    for prime in &primes {
        println!("{}", prime);
    }

    ExitCode::SUCCESS
}
