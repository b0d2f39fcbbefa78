mod core;
mod gaussian;
mod prime;

#[cfg(test)]
mod tests;

pub use self::core::{SolutionSet, decompose_number};
pub use self::prime::decompose_prime;
