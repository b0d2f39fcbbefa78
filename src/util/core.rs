/// Arithmetic primitives shared by the factoring, primality, and
/// decomposition stages: bit tricks, integer powers, modular arithmetic,
/// p-adic valuation, and gcd.

/// Number of trailing zero bits of `v`; 0 for v = 0 (degenerate, callers
/// must not rely on it).
#[inline]
pub fn trailing(v: u64) -> u64 {
    if v == 0 { 0 } else { v.trailing_zeros() as u64 }
}

/// x^p by exponentiation-by-squaring. The caller guarantees the result
/// fits in a u64.
pub fn ipow(mut x: u64, mut p: u64) -> u64 {
    let mut acc: u64 = 1;
    loop {
        if p & 1 == 1 {
            acc *= x;
        }
        p >>= 1;
        if p == 0 {
            return acc;
        }
        x *= x;
    }
}

/// Modular multiplication through a u128 intermediate, so the product
/// cannot wrap for any modulus.
#[inline]
pub fn mul_mod(a: u64, b: u64, m: u64) -> u64 {
    ((a as u128 * b as u128) % m as u128) as u64
}

/// a^b mod m for m >= 1 by right-to-left square-and-multiply.
pub fn ipow_mod(mut a: u64, mut b: u64, m: u64) -> u64 {
    if m == 1 {
        return 0;
    }
    let mut res: u64 = 1;
    a %= m;
    while b > 0 {
        if b & 1 == 1 {
            res = mul_mod(res, a, m);
        }
        a = mul_mod(a, a, m);
        b >>= 1;
    }
    res
}

/// Largest k with p^k dividing n; 0 when p does not divide n.
///
/// After five successful single divisions the loop switches to stripping
/// doubling powers p^2, p^4, p^8, ... so a huge multiplicity costs
/// O(log k) divisions instead of O(k).
pub fn multiplicity(p: u64, n: u64) -> u64 {
    if p == 2 {
        return trailing(n);
    }
    if p == n {
        return 1;
    }

    let mut n = n;
    let mut m: u64 = 0;
    let mut rem = n % p;
    n /= p;
    while rem == 0 {
        m += 1;
        if m > 5 {
            let mut e: u32 = 2;
            loop {
                match p.checked_pow(e) {
                    Some(ppow) if ppow < n && n % ppow == 0 => {
                        m += e as u64;
                        n /= ppow;
                        e *= 2;
                    }
                    _ => return m + multiplicity(p, n),
                }
            }
        }
        rem = n % p;
        n /= p;
    }
    m
}

/// Euclidean remainder loop.
pub fn gcd(mut u: u64, mut v: u64) -> u64 {
    while v != 0 {
        let r = u % v;
        u = v;
        v = r;
    }
    u
}

/// gcd over signed inputs, taking absolute values.
#[inline]
pub fn gcd_i64(u: i64, v: i64) -> u64 {
    gcd(u.unsigned_abs(), v.unsigned_abs())
}
