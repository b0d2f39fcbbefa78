mod core;
mod pollard;


pub use self::core::{FactorError, FactorMap, factorint};
