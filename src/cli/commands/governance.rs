//! Governance command - access status across data products

use crate::catalog::ProductFilter;
use crate::cli::args::GovernanceArgs;
use crate::cli::CommandContext;
use crate::error::RosterResult;
use crate::governance::contract_status;
use crate::ui::{self, Table, UiContext};
use console::style;

/// Execute the governance command
pub async fn execute(args: GovernanceArgs, ctx: &CommandContext) -> RosterResult<()> {
    let ui_ctx = UiContext::detect();
    let products = ctx.load_products().await?;

    let filter = ProductFilter {
        search: args.search,
        ..Default::default()
    };
    let matching = filter.apply(&products);

    if matching.is_empty() {
        ui::step_info(&ui_ctx, "No data products found");
        return Ok(());
    }

    ui::intro(&ui_ctx, "Data Access Governance");

    let table = Table::new()
        .column("ID", 24)
        .column("NAME", 28)
        .column("KIND", 18)
        .column("TEAM", 20)
        .column("DATA CONTRACT", 13);
    table.print_header();

    for product in &matching {
        let status = contract_status(product);
        let status = if product.contracts.is_empty() {
            style(status).dim()
        } else {
            style(status).green()
        };
        table.print_row(&[
            product.id.clone(),
            product.name.clone(),
            ui::kind_badge(&product.kind).to_string(),
            product.team.clone(),
            status.to_string(),
        ]);
    }

    println!();
    ui::remark(&ui_ctx, "Request access: roster access <product> --purpose <text>");
    Ok(())
}
