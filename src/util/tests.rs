use super::*;

#[test]
fn test_trailing() {
    assert_eq!(trailing(0), 0);
    assert_eq!(trailing(1), 0);
    assert_eq!(trailing(2), 1);
    assert_eq!(trailing(8), 3);
    assert_eq!(trailing(12), 2);
    assert_eq!(trailing(96), 5);
    assert_eq!(trailing(u64::MAX), 0);
    assert_eq!(trailing(1 << 63), 63);
}

#[test]
fn test_ipow() {
    assert_eq!(ipow(2, 10), 1024);
    assert_eq!(ipow(3, 0), 1);
    assert_eq!(ipow(0, 0), 1);
    assert_eq!(ipow(0, 5), 0);
    assert_eq!(ipow(7, 1), 7);
    assert_eq!(ipow(5, 3), 125);
    assert_eq!(ipow(10, 19), 10_000_000_000_000_000_000);
    assert_eq!(ipow(1, 10_000), 1);
}

#[test]
fn test_ipow_mod() {
    assert_eq!(ipow_mod(2, 10, 1000), 24);
    assert_eq!(ipow_mod(5, 0, 7), 1);
    assert_eq!(ipow_mod(5, 3, 1), 0);
    // Fermat: a^(p-1) = 1 mod p
    assert_eq!(ipow_mod(3, 100, 101), 1);
    assert_eq!(ipow_mod(2, 562, 563), 1);
    // Wide operands must not wrap.
    assert_eq!(ipow_mod(2, 64, u64::MAX), 1);
    assert_eq!(
        ipow_mod(u64::MAX - 1, 2, u64::MAX),
        1 // (-1)^2 mod (2^64 - 1)
    );
}

#[test]
fn test_multiplicity() {
    assert_eq!(multiplicity(2, 48), 4);
    assert_eq!(multiplicity(3, 81), 4);
    assert_eq!(multiplicity(5, 7), 0);
    assert_eq!(multiplicity(7, 7), 1);
    assert_eq!(multiplicity(3, 2), 0);
    assert_eq!(multiplicity(2, 0), 0);
    assert_eq!(multiplicity(13, 13 * 13 * 13), 3);
}

#[test]
fn test_multiplicity_large_exponent() {
    // 3^40 fits in a u64; forces the doubling-exponent path.
    let n = ipow(3, 40);
    assert_eq!(multiplicity(3, n), 40);
    assert_eq!(multiplicity(3, n / 3), 39);
    assert_eq!(multiplicity(3, 2 * n / 3), 39);
    assert_eq!(multiplicity(5, ipow(5, 27)), 27);
    assert_eq!(multiplicity(2, 1 << 63), 63);
}

#[test]
fn test_multiplicity_mixed() {
    // multiplicity picks out a single prime from a composite.
    let n = ipow(2, 5) * ipow(3, 11) * 7;
    assert_eq!(multiplicity(2, n), 5);
    assert_eq!(multiplicity(3, n), 11);
    assert_eq!(multiplicity(7, n), 1);
    assert_eq!(multiplicity(11, n), 0);
}

#[test]
fn test_gcd() {
    assert_eq!(gcd(0, 5), 5);
    assert_eq!(gcd(5, 0), 5);
    assert_eq!(gcd(0, 0), 0);
    assert_eq!(gcd(12, 18), 6);
    assert_eq!(gcd(18, 12), 6);
    assert_eq!(gcd(17, 13), 1);
    assert_eq!(gcd(u64::MAX, u64::MAX - 1), 1);
}

#[test]
fn test_gcd_i64() {
    assert_eq!(gcd_i64(-12, 18), 6);
    assert_eq!(gcd_i64(12, -18), 6);
    assert_eq!(gcd_i64(-4, -6), 2);
    assert_eq!(gcd_i64(i64::MIN, 2), 2);
}
