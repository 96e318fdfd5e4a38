//! Access command - validate an access request against a product

use crate::cli::args::AccessArgs;
use crate::cli::CommandContext;
use crate::error::{RosterError, RosterResult};
use crate::governance::{AccessRequest, StepStatus, WORKFLOW_STEPS};
use crate::ui::{self, UiContext};
use console::style;
use tracing::info;

/// Execute the access command
pub async fn execute(args: AccessArgs, ctx: &CommandContext) -> RosterResult<()> {
    let ui_ctx = UiContext::detect();
    let products = ctx.load_products().await?;

    let product = products
        .iter()
        .find(|p| p.id == args.product)
        .ok_or_else(|| RosterError::ProductNotFound(args.product.clone()))?;

    let request = AccessRequest {
        product_id: product.id.clone(),
        purpose: args.purpose,
        duration: args.duration,
        accepted_contract: args.accept_contract,
    };
    request.validate(product)?;
    info!("Access request for {} validated", product.id);

    ui::intro(&ui_ctx, &format!("Request Access to {}", product.name));
    ui::key_value(&ui_ctx, "Purpose", request.purpose.trim());
    ui::key_value(&ui_ctx, "Duration", &request.duration.to_string());
    if !product.contracts.is_empty() {
        ui::key_value(&ui_ctx, "Contract", "accepted");
    }

    ui::section(&ui_ctx, "Workflow");
    for step in WORKFLOW_STEPS {
        let marker = match step.status {
            StepStatus::Current => style("●").blue(),
            StepStatus::Pending => style("○").dim(),
        };
        let status = match step.status {
            StepStatus::Current => style("current").blue(),
            StepStatus::Pending => style("pending").dim(),
        };
        println!("  {} {}. {:<24} {}", marker, step.number, step.name, status);
    }

    ui::outro_success(&ui_ctx, "Request ready for Team Manager Review");
    Ok(())
}
