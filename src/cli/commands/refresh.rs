//! Refresh command - drop cached responses and refetch

use crate::cli::CommandContext;
use crate::error::{RosterError, RosterResult};
use crate::ui::{self, TaskSpinner, UiContext};

/// Execute the refresh command
pub async fn execute(ctx: &CommandContext) -> RosterResult<()> {
    let ui_ctx = UiContext::detect();

    let scope = match ctx.coordinator.scope().await {
        Ok(scope) => Some(scope),
        Err(RosterError::ConfigurationMissing) => None,
        Err(e) => return Err(e),
    };

    let mut spinner = TaskSpinner::new(&ui_ctx);
    spinner.start("Refreshing data products...");
    match ctx.coordinator.refresh(scope.as_ref()).await {
        Ok(products) => {
            spinner.stop(&format!("Loaded {} data product(s)", products.len()));
            ui::remark(&ui_ctx, "Profiles and lineage will be refetched on next view");
            Ok(())
        }
        Err(e) => {
            spinner.stop_error("Refresh failed");
            Err(e)
        }
    }
}
