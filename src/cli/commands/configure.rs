//! Configure command - choose the Dataplex scope to browse

use crate::catalog::DataplexScope;
use crate::cli::args::ConfigureArgs;
use crate::cli::CommandContext;
use crate::error::{RosterError, RosterResult};
use crate::ui::{self, TaskSpinner, UiContext};

/// Execute the configure command
pub async fn execute(args: ConfigureArgs, ctx: &CommandContext) -> RosterResult<()> {
    let ui_ctx = UiContext::detect();
    let current = ctx.coordinator.scope().await.ok();

    ui::intro(&ui_ctx, "Dataplex Configuration");

    let project_id = match args.project_id {
        Some(id) => Some(id),
        None => {
            ui::input(
                &ui_ctx,
                "Project ID",
                "my-gcp-project",
                current.as_ref().map(|s| s.project_id.as_str()),
            )
            .await?
        }
    };
    let location = match args.location {
        Some(location) => Some(location),
        None => {
            ui::input(
                &ui_ctx,
                "Location",
                "europe-west1",
                current.as_ref().map(|s| s.location.as_str()),
            )
            .await?
        }
    };

    let (Some(project_id), Some(location)) = (project_id, location) else {
        return Err(RosterError::ConfigurationMissing);
    };

    let scope = DataplexScope {
        project_id: project_id.trim().to_string(),
        location: location.trim().to_string(),
    };
    ctx.coordinator.save_scope(&scope).await?;
    ui::step_ok_detail(
        &ui_ctx,
        "Saved configuration",
        &format!("{}/{}", scope.project_id, scope.location),
    );

    // Cached responses belong to the previous scope
    let changed = current.as_ref() != Some(&scope);
    let mut spinner = TaskSpinner::new(&ui_ctx);
    spinner.start("Fetching data products...");
    let loaded = if changed {
        ctx.coordinator.refresh(Some(&scope)).await
    } else {
        ctx.coordinator.load_products(&scope, false).await
    };
    match loaded {
        Ok(products) => {
            spinner.stop(&format!("Loaded {} data product(s)", products.len()));
            ui::outro_success(&ui_ctx, "Run: roster products");
            Ok(())
        }
        Err(e) => {
            spinner.stop_error("Failed to fetch data products");
            Err(e)
        }
    }
}
