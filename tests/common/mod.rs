// tests/common/mod.rs

/// Routes library log output to the test harness; filter with `RUST_LOG`.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
