/// Enumeration of every representation n = a^2 + b^2 with 0 < a < b, by
/// combining Gaussian-integer factor choices over the prime factorization
/// of n.
use std::collections::{BTreeMap, BTreeSet};

use crate::factor::{FactorError, FactorMap, factorint};

use super::gaussian::Gaussian;
use super::prime::decompose_prime;

/// Unordered solution pairs, canonicalized smaller component first.
pub type SolutionSet = BTreeSet<(u64, u64)>;

/// Decompose n into all pairs (a, b) with 0 < a < b and a^2 + b^2 = n.
///
/// When `check_count` is nonzero and the predicted solution count
/// ∏(k_p + 1) over primes p ≡ 1 (mod 4) is smaller than it, the
/// enumeration is skipped and the empty set returned.
pub fn decompose_number(n: u64, check_count: u64) -> Result<SolutionSet, FactorError> {
    let mut solutions = SolutionSet::new();

    // Step 1: factor n. The dominant cost on large inputs.
    let factors = factorint(n, 0)?;

    // A bare prime decomposes directly or not at all.
    if factors.len() == 1 {
        if let Some((&p, &k)) = factors.iter().next() {
            if k == 1 {
                // A lone prime has exactly one solution; a higher
                // check_count means the caller is not interested.
                if check_count > 1 || p % 4 != 1 {
                    return Ok(solutions);
                }
                if let Some(pair) = decompose_prime(p) {
                    solutions.insert(pair);
                }
                return Ok(solutions);
            }
        }
    }

    // Partition the odd primes by residue mod 4. A p ≡ 3 (mod 4) with odd
    // exponent rules out every representation.
    let mut p_1 = FactorMap::new();
    let mut p_3 = FactorMap::new();
    for (&p, &k) in &factors {
        if p % 4 == 1 {
            p_1.insert(p, k);
        } else if p % 4 == 3 {
            if k % 2 == 1 {
                return Ok(solutions);
            }
            p_3.insert(p, k);
        }
    }
    if p_1.is_empty() {
        return Ok(solutions);
    }

    if check_count > 0 {
        let predicted: u64 = p_1.values().map(|&k| k + 1).product();
        if check_count > predicted {
            return Ok(solutions);
        }
    }

    // Fixed coefficient from the factors that do not split:
    // (1 - i)^e2 times ∏ (-p i)^(k/2) over p ≡ 3 (mod 4).
    let two_power = factors.get(&2).copied().unwrap_or(0);
    let mut coefficient = Gaussian::ONE;
    for _ in 0..two_power {
        coefficient = coefficient * Gaussian::new(1, -1);
    }
    for (&p, &k) in &p_3 {
        let base = Gaussian::new(0, -(p as i64));
        for _ in 0..(k / 2).max(1) {
            coefficient = coefficient * base;
        }
    }

    // Each p ≡ 1 (mod 4) splits into conjugate Gaussian primes
    // (x + yi)(x - yi).
    let mut splits: BTreeMap<u64, Gaussian> = BTreeMap::new();
    let mut total_exp: u64 = 0;
    for (&p, &k) in &p_1 {
        let Some((x, y)) = decompose_prime(p) else {
            return Ok(solutions);
        };
        splits.insert(p, Gaussian::new(x as i64, y as i64));
        total_exp += k;
    }

    // One factor instance is fixed to its plus form: conjugating every
    // choice mirrors a solution, so 2^(E-1) sign choices already cover all
    // of them.
    let Some((&first_p, _)) = p_1.iter().next() else {
        return Ok(solutions);
    };
    if let Some(k) = p_1.get_mut(&first_p) {
        *k -= 1;
    }
    total_exp -= 1;
    let base_item = splits[&first_p] * coefficient;

    for choices in 0u64..(1u64 << total_exp) {
        let mut total = base_item;
        let mut cur = choices;
        for (&p, &k) in &p_1 {
            let plus = splits[&p];
            for _ in 0..k {
                total = total * if cur & 1 == 0 { plus } else { plus.conj() };
                cur >>= 1;
            }
        }
        let v1 = total.re.unsigned_abs();
        let v2 = total.im.unsigned_abs();
        if v1 == v2 || v1 == 0 || v2 == 0 {
            continue;
        }
        let pair = if v1 > v2 { (v2, v1) } else { (v1, v2) };
        solutions.insert(pair);
    }

    Ok(solutions)
}
