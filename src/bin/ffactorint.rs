// ffactorint -- print the prime-power factorization of each number
//
// Usage: factorint [--limit N] [NUMBER]...
//        (reads from stdin if no arguments given)

use std::io::{self, BufRead, BufWriter, Write};
use std::process;

use squares_rs::factor::{self, FactorError, FactorMap};

const TOOL_NAME: &str = "factorint";

fn print_help() {
    print!(
        "Usage: {0} [--limit N] [NUMBER]...\n\
         Print the prime-power factorization of each specified integer.\n\n\
         \x20     --limit N  only extract primes up to N; larger cofactors\n\
         \x20                are printed unfactored\n\
         \x20     --help     display this help and exit\n\
         \x20     --version  output version information and exit\n\n\
         Factors are printed as p^k terms in increasing order. If no NUMBER\n\
         is specified on the command line, read them from standard input.\n",
        TOOL_NAME
    );
}

fn print_version() {
    println!("{} (fsquares) {}", TOOL_NAME, env!("CARGO_PKG_VERSION"));
}

/// Render a factor map as "n: p^k p ..." with exponents of 1 left bare.
fn format_factor_map(n: u64, map: &FactorMap) -> String {
    if map.is_empty() {
        return format!("{}:", n);
    }
    let terms: Vec<String> = map
        .iter()
        .map(|(p, k)| {
            if *k == 1 {
                p.to_string()
            } else {
                format!("{}^{}", p, k)
            }
        })
        .collect();
    format!("{}: {}", n, terms.join(" "))
}

/// Process a single token: parse as u64, print its factorization, return
/// true on success.
fn process_number(token: &str, limit: u64, out: &mut impl Write) -> bool {
    let line;
    let ok;
    match token.parse::<u64>() {
        Ok(n) => match factor::factorint(n, limit) {
            Ok(map) => {
                line = format_factor_map(n, &map);
                ok = true;
            }
            Err(FactorError::OutOfRange { residual, partial }) => {
                eprintln!(
                    "{}: {}: residual {} needs methods beyond this tool",
                    TOOL_NAME, n, residual
                );
                line = format_factor_map(n, &partial);
                ok = false;
            }
        },
        Err(_) => {
            eprintln!(
                "{}: \u{2018}{}\u{2019} is not a valid 64-bit unsigned integer",
                TOOL_NAME, token
            );
            return false;
        }
    }
    if writeln!(out, "{}", line).is_err() {
        // Broken pipe or write error; exit cleanly
        process::exit(0);
    }
    ok
}

fn main() {
    squares_rs::common::reset_sigpipe();

    let args: Vec<String> = std::env::args().skip(1).collect();

    let mut numbers: Vec<String> = Vec::new();
    let mut limit: u64 = 0;
    let mut saw_dashdash = false;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if saw_dashdash {
            numbers.push(arg.clone());
            continue;
        }
        match arg.as_str() {
            "--" => {
                saw_dashdash = true;
            }
            "--help" => {
                print_help();
                process::exit(0);
            }
            "--version" => {
                print_version();
                process::exit(0);
            }
            "--limit" => {
                let Some(value) = iter.next() else {
                    eprintln!("{}: option \u{2018}--limit\u{2019} requires an argument", TOOL_NAME);
                    process::exit(1);
                };
                limit = match value.parse::<u64>() {
                    Ok(v) => v,
                    Err(_) => {
                        eprintln!(
                            "{}: invalid limit \u{2018}{}\u{2019}",
                            TOOL_NAME, value
                        );
                        process::exit(1);
                    }
                };
            }
            _ => {
                if let Some(value) = arg.strip_prefix("--limit=") {
                    limit = match value.parse::<u64>() {
                        Ok(v) => v,
                        Err(_) => {
                            eprintln!(
                                "{}: invalid limit \u{2018}{}\u{2019}",
                                TOOL_NAME, value
                            );
                            process::exit(1);
                        }
                    };
                } else if arg.starts_with("--") {
                    eprintln!("{}: unrecognized option \u{2018}{}\u{2019}", TOOL_NAME, arg);
                    process::exit(1);
                } else {
                    numbers.push(arg.clone());
                }
            }
        }
    }

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut had_error = false;

    if numbers.is_empty() {
        // Read from stdin, allowing several whitespace-separated numbers
        // per line.
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(l) => {
                    for token in l.split_whitespace() {
                        if !process_number(token, limit, &mut out) {
                            had_error = true;
                        }
                    }
                }
                Err(e) => {
                    eprintln!("{}: read error: {}", TOOL_NAME, e);
                    had_error = true;
                    break;
                }
            }
        }
    } else {
        for num_str in &numbers {
            if !process_number(num_str, limit, &mut out) {
                had_error = true;
            }
        }
    }

    if out.flush().is_err() {
        process::exit(0);
    }

    if had_error {
        process::exit(1);
    }
}
