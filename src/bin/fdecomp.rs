// fdecomp -- decompose each number into all sums of two distinct squares
//
// Prints every pair (a, b) with 0 < a < b and a^2 + b^2 = NUMBER.

use std::io::{self, BufRead, BufWriter, Write};
use std::process;

use clap::Parser;

use squares_rs::decompose::{SolutionSet, decompose_number};

#[derive(Parser)]
#[command(
    name = "decomp",
    version,
    about = "Decompose each NUMBER into all pairs with a^2 + b^2 = NUMBER"
)]
struct Cli {
    /// Skip numbers predicted to have fewer than COUNT solutions
    #[arg(long = "check-count", value_name = "COUNT", default_value_t = 0)]
    check_count: u64,

    /// Print the number of solutions instead of the pairs
    #[arg(short = 'c', long = "count")]
    count: bool,

    /// Numbers to decompose (reads stdin if none given)
    numbers: Vec<String>,
}

/// Render a solution set as "n: (a,b) (c,d) ..." in ascending order.
fn format_solutions(n: u64, solutions: &SolutionSet, count_only: bool) -> String {
    if count_only {
        return format!("{}: {}", n, solutions.len());
    }
    if solutions.is_empty() {
        return format!("{}:", n);
    }
    let pairs: Vec<String> = solutions
        .iter()
        .map(|(a, b)| format!("({},{})", a, b))
        .collect();
    format!("{}: {}", n, pairs.join(" "))
}

/// Process a single token: parse as u64, print its decomposition, return
/// true on success.
fn process_number(token: &str, cli: &Cli, out: &mut impl Write) -> bool {
    match token.parse::<u64>() {
        Ok(n) => match decompose_number(n, cli.check_count) {
            Ok(solutions) => {
                let line = format_solutions(n, &solutions, cli.count);
                if writeln!(out, "{}", line).is_err() {
                    // Broken pipe or write error; exit cleanly
                    process::exit(0);
                }
                true
            }
            Err(e) => {
                eprintln!("decomp: {}: {}", n, e);
                false
            }
        },
        Err(_) => {
            eprintln!(
                "decomp: \u{2018}{}\u{2019} is not a valid 64-bit unsigned integer",
                token
            );
            false
        }
    }
}

fn main() {
    squares_rs::common::reset_sigpipe();

    let cli = Cli::parse();

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut had_error = false;

    if cli.numbers.is_empty() {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(l) => {
                    for token in l.split_whitespace() {
                        if !process_number(token, &cli, &mut out) {
                            had_error = true;
                        }
                    }
                }
                Err(e) => {
                    eprintln!("decomp: read error: {}", e);
                    had_error = true;
                    break;
                }
            }
        }
    } else {
        for num_str in &cli.numbers {
            if !process_number(num_str, &cli, &mut out) {
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
