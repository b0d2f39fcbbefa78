use super::*;
use crate::primes::prime_range;
use crate::roots::isqrt;

fn decompose(n: u64) -> SolutionSet {
    decompose_number(n, 0).expect("decomposition in 64-bit range")
}

/// Brute-force oracle: every (a, b) with 0 < a < b and a^2 + b^2 = n.
fn decompose_naive(n: u64) -> SolutionSet {
    let mut out = SolutionSet::new();
    let mut a = 1u64;
    while 2 * a * a < n {
        let rest = n - a * a;
        let b = isqrt(rest);
        if b * b == rest && b > a {
            out.insert((a, b));
        }
        a += 1;
    }
    out
}

#[test]
fn test_decompose_prime_known() {
    assert_eq!(decompose_prime(5), Some((1, 2)));
    assert_eq!(decompose_prime(13), Some((2, 3)));
    assert_eq!(decompose_prime(17), Some((1, 4)));
    assert_eq!(decompose_prime(29), Some((2, 5)));
    assert_eq!(decompose_prime(37), Some((1, 6)));
    assert_eq!(decompose_prime(41), Some((4, 5)));
}

#[test]
fn test_decompose_prime_wrong_form() {
    assert_eq!(decompose_prime(2), None);
    assert_eq!(decompose_prime(3), None);
    assert_eq!(decompose_prime(7), None);
    assert_eq!(decompose_prime(11), None);
    assert_eq!(decompose_prime(9_223_372_036_854_775_783), None); // ≡ 3 (mod 4)
}

#[test]
fn test_decompose_prime_sweep() {
    for p in prime_range(5, 10_000) {
        if p % 4 != 1 {
            continue;
        }
        let (x, y) = decompose_prime(p).unwrap_or_else(|| panic!("decompose_prime({})", p));
        assert!(0 < x && x < y, "({}, {}) from {}", x, y, p);
        assert_eq!(x * x + y * y, p, "({}, {}) from {}", x, y, p);
    }
}

#[test]
fn test_decompose_prime_large() {
    // 1000000009 ≡ 1 (mod 4)
    let (x, y) = decompose_prime(1_000_000_009).expect("splits");
    assert_eq!(x * x + y * y, 1_000_000_009);
    // 99999999977 ≡ 1 (mod 4), the largest 11-digit prime.
    let (x, y) = decompose_prime(99_999_999_977).expect("splits");
    assert!(0 < x && x < y);
    assert_eq!(x * x + y * y, 99_999_999_977);
}

#[test]
fn test_decompose_number_known() {
    assert_eq!(decompose(50), SolutionSet::from([(1, 7)]));
    assert_eq!(
        decompose(325),
        SolutionSet::from([(1, 18), (6, 17), (10, 15)])
    );
    assert_eq!(decompose(25), SolutionSet::from([(3, 4)]));
    assert_eq!(decompose(65), SolutionSet::from([(1, 8), (4, 7)]));
    assert_eq!(decompose(5), SolutionSet::from([(1, 2)]));
    assert_eq!(decompose(13), SolutionSet::from([(2, 3)]));
}

#[test]
fn test_decompose_number_empty() {
    // 21 = 3 * 7, both ≡ 3 (mod 4) with odd exponents.
    assert_eq!(decompose(21), SolutionSet::new());
    assert_eq!(decompose(0), SolutionSet::new());
    assert_eq!(decompose(1), SolutionSet::new());
    assert_eq!(decompose(2), SolutionSet::new());
    assert_eq!(decompose(3), SolutionSet::new());
    assert_eq!(decompose(4), SolutionSet::new());
    assert_eq!(decompose(7), SolutionSet::new());
    // 2 * a^2 is always symmetric-only.
    assert_eq!(decompose(8), SolutionSet::new());
    assert_eq!(decompose(18), SolutionSet::new());
}

#[test]
fn test_decompose_number_squares_excluded() {
    // 5^2 = 3^2 + 4^2 but also 5^2 + 0^2; the zero form must not appear.
    for set in [decompose(25), decompose(100), decompose(169)] {
        for &(a, b) in &set {
            assert!(a > 0 && a < b);
        }
    }
}

#[test]
fn test_decompose_number_matches_naive() {
    for n in 0u64..3000 {
        assert_eq!(decompose(n), decompose_naive(n), "decompose({})", n);
    }
}

#[test]
fn test_decompose_number_idempotent() {
    for a in 1u64..40 {
        for b in a + 1..40 {
            let n = a * a + b * b;
            assert!(
                decompose(n).contains(&(a, b)),
                "decompose({}) missing ({}, {})",
                n,
                a,
                b
            );
        }
    }
}

#[test]
fn test_decompose_number_many_solutions() {
    // 5 * 13 * 17 * 29 = 32045 is the smallest n with 16 primitive-ish
    // choices; it has 8 distinct pairs.
    let set = decompose(32045);
    assert_eq!(set.len(), 8);
    for &(a, b) in &set {
        assert_eq!(a * a + b * b, 32045);
    }
    assert_eq!(set, decompose_naive(32045));
}

#[test]
fn test_decompose_number_check_count() {
    // 325 = 5^2 * 13 predicts (2+1)(1+1) = 6 solutions.
    assert_eq!(decompose_number(325, 6).unwrap().len(), 3);
    assert_eq!(decompose_number(325, 7).unwrap(), SolutionSet::new());
    // Bare primes predict one solution.
    assert_eq!(decompose_number(13, 1).unwrap(), SolutionSet::from([(2, 3)]));
    assert_eq!(decompose_number(13, 2).unwrap(), SolutionSet::new());
    // check_count = 0 never skips.
    assert_eq!(decompose_number(13, 0).unwrap(), SolutionSet::from([(2, 3)]));
}

#[test]
fn test_decompose_number_large() {
    // 1000000009 is prime, ≡ 1 (mod 4).
    let set = decompose(1_000_000_009);
    assert_eq!(set.len(), 1);
    let &(a, b) = set.iter().next().unwrap();
    assert_eq!(a * a + b * b, 1_000_000_009);

    // 5^2 * 1000000009
    let n = 25 * 1_000_000_009;
    let set = decompose(n);
    assert_eq!(set, decompose_naive(n));
    assert!(set.len() >= 2);
}

// Integration tests using the binary
#[cfg(test)]
mod integration {
    use std::process::Command;

    fn bin_path() -> std::path::PathBuf {
        let mut path = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        path.push("target");
        if cfg!(debug_assertions) {
            path.push("debug");
        } else {
            path.push("release");
        }
        path.push("fdecomp");
        path
    }

    fn run_fdecomp(args: &[&str]) -> (String, String, i32) {
        let output = Command::new(bin_path())
            .args(args)
            .output()
            .expect("failed to spawn fdecomp");
        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        let code = output.status.code().unwrap_or(1);
        (stdout, stderr, code)
    }

    #[test]
    fn test_fdecomp_args() {
        let (stdout, _, code) = run_fdecomp(&["325", "21", "50"]);
        assert_eq!(code, 0);
        let lines: Vec<&str> = stdout.trim_end().split('\n').collect();
        assert_eq!(
            lines,
            vec!["325: (1,18) (6,17) (10,15)", "21:", "50: (1,7)"]
        );
    }

    #[test]
    fn test_fdecomp_count() {
        let (stdout, _, code) = run_fdecomp(&["--count", "325"]);
        assert_eq!(code, 0);
        assert_eq!(stdout.trim(), "325: 3");
    }

    #[test]
    fn test_fdecomp_check_count() {
        let (stdout, _, code) = run_fdecomp(&["--check-count", "7", "325"]);
        assert_eq!(code, 0);
        assert_eq!(stdout.trim(), "325:");
    }

    #[test]
    fn test_fdecomp_invalid_input() {
        let (stdout, stderr, code) = run_fdecomp(&["50", "-3"]);
        // clap rejects the stray flag-like token before any output.
        let _ = stdout;
        assert!(!stderr.is_empty());
        assert_ne!(code, 0);
    }
}
