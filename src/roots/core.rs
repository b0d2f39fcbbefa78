/// Integer roots: `isqrt` and the general `integer_nthroot` with an
/// exactness flag. Float estimates seed the search; exact integer
/// comparisons settle it.
use crate::util::ipow;

/// Below this, an f64 square root truncates to the exact integer root.
const FLOAT_SQRT_MAX: u64 = 1 << 50;

/// Integer square root: the largest r with r * r <= x.
///
/// Above 2^50 the float estimate is nudged high and Newton iteration
/// r <- (r + x/r) / 2 converges onto the floor from above.
pub fn isqrt(x: u64) -> u64 {
    if x == 0 {
        return 0;
    }
    if x < FLOAT_SQRT_MAX {
        return (x as f64).sqrt() as u64;
    }
    let mut r = ((x as f64).sqrt() * 1.000_000_000_000_01) as u64 + 1;
    loop {
        let y = (r + x / r) >> 1;
        if y >= r {
            return r;
        }
        r = y;
    }
}

/// Square root with remainder.
fn sqrtrem(x: u64) -> (u64, u64) {
    let y = isqrt(x);
    (y, x - y * y)
}

/// Integer n-th root of y: (r, exact) with r^n <= y < (r+1)^n, and exact
/// iff r^n = y.
pub fn integer_nthroot(y: u64, n: u64) -> (u64, bool) {
    if y == 0 || y == 1 || n == 1 {
        return (y, true);
    }
    if n == 2 {
        let (root, rem) = sqrtrem(y);
        return (root, rem == 0);
    }
    if n > y {
        return (1, false);
    }

    let guess = ((y as f64).powf(1.0 / n as f64) + 0.5) as u64;
    let mut x = guess;

    if guess > FLOAT_SQRT_MAX {
        // Newton: x <- ((n-1)x + y/x^(n-1)) / n until the step stalls.
        loop {
            let t = ipow(x, n - 1);
            let xprev = x;
            x = ((n - 1) * x + y / t) / n;
            if x.abs_diff(xprev) < 2 {
                break;
            }
        }
    }

    // Correct in both directions with exact integer comparisons. Powers are
    // taken saturating in u128 so (x+1)^n cannot wrap the comparison.
    let y = y as u128;
    let mut t = pow_saturating(x, n);
    while t < y {
        x += 1;
        t = pow_saturating(x, n);
    }
    while t > y {
        x -= 1;
        t = pow_saturating(x, n);
    }
    (x, t == y)
}

/// x^p in u128, saturating instead of wrapping. Anything that saturates is
/// far above any 64-bit operand, so comparisons against y stay valid.
fn pow_saturating(x: u64, mut p: u64) -> u128 {
    let mut base = x as u128;
    let mut acc: u128 = 1;
    loop {
        if p & 1 == 1 {
            acc = acc.saturating_mul(base);
        }
        p >>= 1;
        if p == 0 {
            return acc;
        }
        base = base.saturating_mul(base);
    }
}
