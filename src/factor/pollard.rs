/// Pollard p-1 and Pollard rho. Both own their state and their reseeding
/// generator, so runs are reproducible for a given seed.
use crate::primes::prime_range;
use crate::util::{gcd, ipow, ipow_mod};

fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Deterministic xorshift128+ generator for parameter reseeding, seeded
/// from the caller so every run is reproducible.
struct ReseedRng {
    s0: u64,
    s1: u64,
}

impl ReseedRng {
    fn new(seed: u64) -> Self {
        let mut state = seed;
        let s0 = splitmix64(&mut state);
        let s1 = splitmix64(&mut state);
        // Ensure not all-zero state
        ReseedRng {
            s0: if s0 == 0 { 0x12345678 } else { s0 },
            s1: if s1 == 0 { 0x87654321 } else { s1 },
        }
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        let mut s1 = self.s0;
        let s0 = self.s1;
        let result = s0.wrapping_add(s1);
        self.s0 = s0;
        s1 ^= s1 << 23;
        self.s1 = s1 ^ s0 ^ (s1 >> 18) ^ (s0 >> 5);
        result
    }

    /// Uniform draw from [lo, hi], both ends inclusive.
    fn gen_range(&mut self, lo: u64, hi: u64) -> u64 {
        lo + self.next_u64() % (hi - lo + 1)
    }
}

/// Pollard p-1 with smoothness bound `b`: accumulate
/// a^(prod p^floor(log_p b)) mod n over all primes p <= b, then look for a
/// factor in gcd(a^M - 1, n). Succeeds when some prime q | n has b-smooth
/// q - 1. Failed rounds resample the witness from [2, n-2].
pub(crate) fn pollard_pm1(n: u64, b: u64, a: u64, retries: u64, seed: u64) -> Option<u64> {
    let mut rng = ReseedRng::new(seed.wrapping_add(b));
    let mut a = a;

    for _ in 0..=retries {
        let mut am = a;
        for p in prime_range(2, b + 1) {
            let e = ((b as f64).ln() / (p as f64).ln()) as u64;
            am = ipow_mod(am, ipow(p, e), n);
        }
        let g = gcd(if am == 0 { n - 1 } else { am - 1 }, n);
        if 1 < g && g < n {
            return Some(g);
        }
        a = rng.gen_range(2, n - 2);
    }
    None
}

/// One step of the rho walk: x <- (x^2 + a) mod n, widened through u128.
#[inline]
fn rho_step(x: u64, a: u64, n: u64) -> u64 {
    let squared = (x as u128 * x as u128) % n as u128;
    ((squared + a as u128) % n as u128) as u64
}

/// Pollard rho with Floyd cycle detection on f(x) = (x^2 + a) mod n,
/// starting from U = V = s. Returns a proper divisor, or None once every
/// retry exhausts `max_steps` (0 = unbounded). A gcd of n restarts the
/// walk; failed rounds reseed V from [0, n-1] and a from [1, n-3].
pub(crate) fn pollard_rho(
    n: u64,
    s: u64,
    a: u64,
    retries: u64,
    seed: u64,
    max_steps: u64,
) -> Option<u64> {
    let mut rng = ReseedRng::new(seed.wrapping_add(retries));
    let mut v = s;
    let mut a = a;

    for _ in 0..=retries {
        let mut u = v;
        let mut found = None;
        let mut j: u64 = 0;
        while max_steps == 0 || j <= max_steps {
            u = rho_step(u, a, n);
            v = rho_step(v, a, n);
            v = rho_step(v, a, n);
            let g = gcd(u.abs_diff(v), n);
            if g != 1 {
                if g != n {
                    found = Some(g);
                }
                break;
            }
            j += 1;
        }
        if found.is_some() {
            return found;
        }
        v = rng.gen_range(0, n - 1);
        a = rng.gen_range(1, n - 3);
    }
    None
}
