// Shared helpers for integration tests. Each test binary pulls in what it
// needs, so not every item is used by every binary.
#[allow(dead_code)]
pub mod factories;
#[allow(dead_code)]
pub mod mocks;
