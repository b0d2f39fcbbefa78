/// Full 64-bit factorization into a prime-power map, combining a trial
/// stage on the 6k wheel, a perfect-power probe, Fermat's method, windowed
/// prime trials, and Pollard p-1 / rho on barren windows.
use std::collections::BTreeMap;

use thiserror::Error;

use crate::primes::prime_range;
use crate::primetest::isprime;
use crate::roots::{integer_nthroot, isqrt};
use crate::util::{ipow, multiplicity, trailing};

use super::pollard::{pollard_pm1, pollard_rho};

/// Canonical factorization: prime -> exponent. The empty map represents 1,
/// and {0: 1} represents 0.
pub type FactorMap = BTreeMap<u64, u64>;

/// The trial stage handles primes up to here before the windowed stages
/// take over.
const SMALL_TRIAL_LIMIT: u64 = 1 << 15;

/// Consecutive non-divisors tolerated by the trial stage.
const SMALL_TRIAL_FAIL_MAX: u64 = 600;

/// Residuals at or above this would need methods beyond this kernel
/// (ECM, quadratic sieve); unreachable for 64-bit inputs.
const ADVANCED_THRESHOLD: u128 = 10_u128.pow(25);

#[derive(Debug, Clone, Error)]
pub enum FactorError {
    /// The windowed stages gave up with a residual too large for the
    /// implemented methods. `partial` holds everything found so far; its
    /// product does not equal the original input.
    #[error("cannot factor residual {residual}: very advanced methods are not implemented")]
    OutOfRange { residual: u64, partial: FactorMap },
}

/// Divide d out of n until it no longer divides, returning the exponent.
/// Twenty rounds of single division cap the naive loop; `multiplicity`
/// finishes any larger exponent in O(log k).
fn strip_factor(n: &mut u64, d: u64) -> u64 {
    let mut m: u64 = 0;
    while *n % d == 0 {
        *n /= d;
        m += 1;
        if m == 20 {
            let mm = multiplicity(d, *n);
            m += mm;
            *n /= ipow(d, mm);
            break;
        }
    }
    m
}

/// Trial stage: strip 2 via the trailing-zero count, then 3, then walk the
/// 6k±1 wheel from 5. Stops at `limit`^2, at d^2 > n, or after `fail_max`
/// consecutive non-divisors. Returns the residual and the next candidate
/// divisor, 0 meaning the residual needs no further work.
fn factorint_small(factors: &mut FactorMap, n: u64, limit: u64, fail_max: u64) -> (u64, u64) {
    let mut n = n;
    let m = trailing(n);
    if m > 0 {
        factors.insert(2, m);
        n >>= m;
    }

    let mut d: u64 = 3;
    if limit < d {
        return if d * d <= n { (n, d) } else { (n, 0) };
    }

    let m = strip_factor(&mut n, d);
    if m > 0 {
        factors.insert(d, m);
    }

    let maxx = if limit * limit > n { 0 } else { limit * limit };
    let mut dd = if maxx > 0 { maxx } else { n };
    d = 5;
    let mut fails: u64 = 0;

    while fails < fail_max {
        if d * d > dd {
            break;
        }

        let m = strip_factor(&mut n, d);
        if m > 0 {
            factors.insert(d, m);
            dd = if maxx > 0 { maxx } else { n };
            fails = 0;
        } else {
            fails += 1;
        }

        d += 2;
        if d * d > dd {
            break;
        }

        let m = strip_factor(&mut n, d);
        if m > 0 {
            factors.insert(d, m);
            dd = if maxx > 0 { maxx } else { n };
            fails = 0;
        } else {
            fails += 1;
        }

        d += 4;
    }

    if d * d <= n { (n, d) } else { (n, 0) }
}

/// Probe n = r^e over prime exponents e. On success the root is reduced
/// recursively, so the returned exponent is maximal.
fn perfect_power(n: u64) -> Option<(u64, u64)> {
    if n <= 3 {
        return None;
    }
    let logn = (n as f64).log2();
    let max_possible = logn as u64 + 2;
    // Squares never end in 2, 3, 7, or 8.
    let not_square = matches!(n % 10, 2 | 3 | 7 | 8);
    let min_possible = 2 + u64::from(not_square);

    for e in prime_range(min_possible, max_possible) {
        // Cheap float screen before the exact root.
        let b = (logn / e as f64).exp2();
        if (b - b.round()).abs() > 0.01 {
            continue;
        }
        let (r, exact) = integer_nthroot(n, e);
        if exact {
            if let Some((r2, e2)) = perfect_power(r) {
                return Some((r2, e * e2));
            }
            return Some((r, e));
        }
    }
    None
}

/// Termination probe for a residual: record it and report done when it is
/// 1, prime, or a perfect power whose base factors completely.
fn check_termination(factors: &mut FactorMap, n: u64, limitp1: u64) -> Result<bool, FactorError> {
    if let Some((base, exp)) = perfect_power(n) {
        let facs = factorint(base, limitp1.saturating_sub(1))?;
        for (p, k) in facs {
            factors.insert(p, exp * k);
        }
        return Ok(true);
    }
    if isprime(n) {
        factors.insert(n, 1);
        return Ok(true);
    }
    Ok(n == 1)
}

/// Strip every candidate divisor out of n to its full multiplicity,
/// reporting whether any new factor landed.
fn trial_in(
    factors: &mut FactorMap,
    n: u64,
    candidates: impl IntoIterator<Item = u64>,
) -> (u64, bool) {
    let before = factors.len();
    let mut n = n;
    for d in candidates {
        if n % d == 0 {
            let m = multiplicity(d, n);
            n /= ipow(d, m);
            factors.insert(d, m);
        }
    }
    (n, factors.len() != before)
}

/// Smoothness / step budget for a window: max(ln(high^0.7), low), at
/// least 3.
fn pollard_bound(high: u64, low: u64) -> u64 {
    let root = (high as f64).powf(0.7).ln() as u64;
    root.max(low).max(3)
}

/// Factor n into its prime-power map.
///
/// `limit` = 0 factors completely. Otherwise only primes up to `limit` are
/// fully extracted; a surviving cofactor is recorded with exponent 1 even
/// when composite, so the product invariant holds only for `limit` = 0.
pub fn factorint(n: u64, limit: u64) -> Result<FactorMap, FactorError> {
    let mut factors = FactorMap::new();

    if limit > 0 && limit < 2 {
        if n != 1 {
            factors.insert(n, 1);
        }
        return Ok(factors);
    }
    if n < 10 {
        match n {
            0 => {
                factors.insert(0, 1);
            }
            1 => {}
            2 => {
                factors.insert(2, 1);
            }
            3 => {
                factors.insert(3, 1);
            }
            4 => {
                factors.insert(2, 2);
            }
            5 => {
                factors.insert(5, 1);
            }
            6 => {
                factors.insert(2, 1);
                factors.insert(3, 1);
            }
            7 => {
                factors.insert(7, 1);
            }
            8 => {
                factors.insert(2, 3);
            }
            _ => {
                factors.insert(3, 2);
            }
        }
        return Ok(factors);
    }

    let small = if limit > 0 {
        SMALL_TRIAL_LIMIT.min(limit)
    } else {
        SMALL_TRIAL_LIMIT
    };
    let (mut n, next_p) = factorint_small(&mut factors, n, small, SMALL_TRIAL_FAIL_MAX);

    if next_p == 0 {
        if n > 1 {
            factors.insert(n, 1);
        }
        return Ok(factors);
    }

    if limit > 0 && next_p > limit {
        if check_termination(&mut factors, n, limit)? {
            return Ok(factors);
        }
        if n > 1 {
            factors.insert(n, 1);
        }
        return Ok(factors);
    }

    // Fermat's method: if a^2 - n is a square b^2 for a just above sqrt(n),
    // then n = (a - b)(a + b). Three candidates catch balanced semiprimes.
    let sqrt_n = isqrt(n);
    let mut a = sqrt_n + 1;
    let mut b2 = (a as u128 * a as u128 - n as u128) as u64;
    let mut b: u64 = 0;
    let mut fermat = false;
    for _ in 0..3 {
        let (root, exact) = integer_nthroot(b2, 2);
        if exact {
            b = root;
            fermat = true;
            break;
        }
        b2 += 2 * a + 1;
        a += 1;
    }
    if fermat {
        let limit = limit.saturating_sub(1);
        for r in [a - b, a + b] {
            let facs = factorint(r, limit)?;
            for (p, k) in facs {
                *factors.entry(p).or_insert(0) += k;
            }
        }
        return Ok(factors);
    }

    if check_termination(&mut factors, n, limit)? {
        return Ok(factors);
    }

    // Windowed trial division over doubling prime windows; Pollard p-1 and
    // rho probe any window that yields nothing.
    let mut low = next_p;
    let mut high = 2 * next_p;
    let mut limit = if limit == 0 { sqrt_n } else { limit };
    limit += 1;
    let mut iteration: u32 = 0;
    loop {
        let high_ = high.min(limit);

        let (n_trial, found_trial) = trial_in(&mut factors, n, prime_range(low, high_));
        n = n_trial;
        if found_trial && check_termination(&mut factors, n, limit)? {
            return Ok(factors);
        }

        if high > limit {
            if n > 1 {
                factors.insert(n, 1);
            }
            return Ok(factors);
        }

        if !found_trial {
            let budget = pollard_bound(high, low);

            if let Some(c) = pollard_pm1(n, budget, 2, 0, high_) {
                let known = factorint(c, limit - 1)?;
                let (n_pm1, _) = trial_in(&mut factors, n, known.keys().copied());
                n = n_pm1;
                if check_termination(&mut factors, n, limit)? {
                    return Ok(factors);
                }
            }

            if let Some(c) = pollard_rho(n, 2, 1, 1, high_, budget) {
                let known = factorint(c, limit - 1)?;
                let (n_rho, _) = trial_in(&mut factors, n, known.keys().copied());
                n = n_rho;
                if check_termination(&mut factors, n, limit)? {
                    return Ok(factors);
                }
            }
        }

        iteration += 1;
        if iteration >= 3 && n as u128 >= ADVANCED_THRESHOLD {
            break;
        }
        low = high;
        high *= 2;
    }

    Err(FactorError::OutOfRange {
        residual: n,
        partial: factors,
    })
}
