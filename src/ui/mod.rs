//! Terminal UI: styled output, prompts, spinners
//!
//! Uses `cliclack` on an interactive terminal and falls back to plain
//! prefixed lines when piped or running in CI.

mod context;
mod output;
mod progress;
mod prompts;
mod theme;

pub use context::UiContext;
pub use output::{
    intro, key_value, key_value_status, remark, step_info, step_ok, step_warn, step_warn_hint,
};
pub use progress::TaskSpinner;
pub use prompts::{confirm, input, password};
pub use theme::{init_theme, AgrowTheme};
