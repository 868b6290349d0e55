/// Common test fixtures and helpers for integration tests
pub mod fixtures;

/// Initialize test logging
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
