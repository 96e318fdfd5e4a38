//! Contracts command - products and the contracts stored for them

use crate::catalog::{DataProduct, ProductFilter};
use crate::cli::args::{ContractsArgs, OutputFormat};
use crate::cli::CommandContext;
use crate::error::RosterResult;
use crate::ui::{self, Table, UiContext};
use console::style;

/// Execute the contracts command
pub async fn execute(args: ContractsArgs, ctx: &CommandContext) -> RosterResult<()> {
    let ui_ctx = UiContext::detect();
    let products = ctx.load_products().await?;

    let filter = ProductFilter {
        search: args.search,
        ..Default::default()
    };
    let matching = filter.apply(&products);

    match args.format {
        OutputFormat::Json => {
            #[derive(serde::Serialize)]
            struct ContractsJson<'a> {
                product_id: &'a str,
                name: &'a str,
                contracts: &'a [crate::catalog::Contract],
            }

            let rows: Vec<_> = matching
                .iter()
                .map(|p| ContractsJson {
                    product_id: &p.id,
                    name: &p.name,
                    contracts: &p.contracts,
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        OutputFormat::Plain => {
            for product in &matching {
                for contract in &product.contracts {
                    println!("{}\t{}", product.id, contract.id);
                }
            }
        }
        OutputFormat::Table => print_table(&ui_ctx, &matching),
    }

    Ok(())
}

fn print_table(ctx: &UiContext, products: &[&DataProduct]) {
    if products.is_empty() {
        ui::step_info(ctx, "No data products found");
        return;
    }

    ui::intro(ctx, "Data Contracts");
    let table = Table::new()
        .indent(2)
        .column("ID", 40)
        .column("TITLE", 30)
        .column("VERSION", 8)
        .column("STATUS", 10);

    for product in products {
        println!(
            "{} {} {}",
            style(&product.name).bold(),
            ui::kind_badge(&product.kind),
            style(&product.team).dim()
        );

        if product.contracts.is_empty() {
            println!(
                "  {} {}",
                style("No contract").dim(),
                style(format!("(roster contract template {})", product.id)).dim()
            );
            continue;
        }

        for contract in &product.contracts {
            table.print_row(&[
                contract.id.clone(),
                contract.title().unwrap_or("-").to_string(),
                contract.version().unwrap_or("-").to_string(),
                contract.status().unwrap_or("-").to_string(),
            ]);
        }
    }
}
