pub mod lint;

pub use lint::{exit_code, load_config, resolve_root, run_lint, run_lint_impl};
