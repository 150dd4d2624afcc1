#![allow(dead_code)]

use tracing_subscriber::{fmt, EnvFilter};

pub const WORDS: [&str; 9] = ["the", "quick", "brown", "fox", "jumped", "over", "the", "lazy", "dog"];

/// Route `tracing` output through the test harness, filtered by `RUST_LOG`.
pub fn init_tracing() {
  let _ = fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .with_test_writer()
    .try_init();
}

pub fn numbered(word: &'static str, index: i64) -> String { format!("{index:2}. {word}") }
