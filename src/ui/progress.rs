//! Spinner around backend round trips

use super::context::UiContext;
use console::style;

/// cliclack spinner, or start/finish lines when not on a terminal
pub struct TaskSpinner {
    spinner: Option<cliclack::ProgressBar>,
    interactive: bool,
}

impl TaskSpinner {
    pub fn new(ctx: &UiContext) -> Self {
        Self {
            spinner: None,
            interactive: ctx.use_fancy_output(),
        }
    }

    pub fn start(&mut self, message: &str) {
        if self.interactive {
            let spinner = cliclack::spinner();
            spinner.start(message);
            self.spinner = Some(spinner);
        } else {
            eprintln!("{} {}", style("...").dim(), message);
        }
    }

    pub fn stop(&mut self, message: &str) {
        match self.spinner.take() {
            Some(spinner) => spinner.stop(message),
            None if self.interactive => println!("{} {}", style("✓").green(), message),
            None => eprintln!("{} {}", style("[OK]").green(), message),
        }
    }

    pub fn stop_error(&mut self, message: &str) {
        match self.spinner.take() {
            Some(spinner) => spinner.error(message),
            None if self.interactive => println!("{} {}", style("✗").red(), message),
            None => eprintln!("{} {}", style("[FAIL]").red(), message),
        }
    }

    /// Remove the spinner line without a message
    pub fn clear(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.clear();
        }
    }
}

impl Drop for TaskSpinner {
    fn drop(&mut self) {
        self.clear();
    }
}
