// Allow pre-existing clippy lints across the codebase
#![allow(
    clippy::collapsible_if,
    clippy::manual_range_contains,
    clippy::needless_range_loop,
    clippy::needless_return,
    clippy::unnecessary_cast
)]

/// Use mimalloc as the global allocator for all binaries.
/// The factoring pipeline allocates many small maps during recursion;
/// mimalloc's thread-local caching makes those allocations cheap.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

pub mod common;
pub mod decompose;
pub mod factor;
pub mod primes;
pub mod primetest;
pub mod roots;
pub mod util;
