/// Cornacchia-style decomposition of a prime p ≡ 1 (mod 4) into x^2 + y^2.
use crate::roots::isqrt;
use crate::util::ipow_mod;

/// Euclidean reduction on (a, b): runs the remainder chain and returns the
/// first two remainders that drop to c or below, most recent first.
/// A zero remainder terminates the chain; it is never kept as a first
/// remainder.
fn euclid_reduction(mut a: u64, mut b: u64, c: u64) -> Option<(u64, u64)> {
    let mut first: Option<u64> = None;
    while a != 1 && b != 0 {
        let r = a % b;
        a = b;
        b = r;
        if r > c {
            continue;
        }
        if r == 0 {
            break;
        }
        match first {
            Some(f) => return Some((r, f)),
            None => first = Some(r),
        }
    }
    None
}

/// Split a prime p ≡ 1 (mod 4) into (x, y) with x^2 + y^2 = p and
/// 0 < x < y. Returns None when p is not of that form.
///
/// Searches for a quadratic non-residue a, takes b = a^((p-1)/4) so that
/// b^2 ≡ -1 (mod p), then reduces (p, b) until two remainders at or below
/// √p appear; those are the legs. The caller is responsible for p being
/// prime; composite inputs produce garbage, not errors.
pub fn decompose_prime(p: u64) -> Option<(u64, u64)> {
    if p < 5 || p % 4 != 1 {
        return None;
    }
    let p_sqrt = isqrt(p);
    let test_exp = (p - 1) / 2;
    let exp = (p - 1) / 4;

    for a in 1..p {
        // Non-residues satisfy a^((p-1)/2) ≡ -1 (mod p).
        if ipow_mod(a, test_exp, p) != p - 1 {
            continue;
        }
        let b = ipow_mod(a, exp, p);
        if let Some(pair) = euclid_reduction(p, b, p_sqrt) {
            return Some(pair);
        }
    }
    None
}
