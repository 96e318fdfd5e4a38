//! Terminal output for the `roster` binary
//!
//! Uses `cliclack` for prompts and spinners when attached to a terminal,
//! falling back to plain line output in CI or when piped.
//!
//! # Example
//!
//! ```rust,ignore
//! use roster::ui::{self, UiContext, TaskSpinner};
//!
//! let ctx = UiContext::detect();
//!
//! let mut spinner = TaskSpinner::new(&ctx);
//! spinner.start("Fetching data products...");
//! // ... do work ...
//! spinner.stop("Loaded 12 data products");
//!
//! ui::step_warn_hint(&ctx, "orders: profile unavailable", "Run: roster refresh");
//! ```

mod context;
mod format;
mod output;
mod progress;
mod prompts;
mod table;
mod theme;

pub use context::UiContext;
pub use format::{format_age, format_count, format_ratio, truncate};
pub use output::{
    intro, key_value, key_value_status, outro_success, remark, section, step_error_detail,
    step_info, step_ok, step_ok_detail, step_warn, step_warn_hint,
};
pub use progress::TaskSpinner;
pub use prompts::{confirm, input};
pub use table::Table;
pub use theme::{init_theme, kind_badge, RosterTheme};
