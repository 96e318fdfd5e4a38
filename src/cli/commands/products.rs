//! Products command - list data products

use crate::catalog::{filter, DataProduct, ProductFilter};
use crate::cli::args::{OutputFormat, ProductsArgs};
use crate::cli::CommandContext;
use crate::error::RosterResult;
use crate::ui::{self, Table, TaskSpinner, UiContext};

/// Execute the products command
pub async fn execute(args: ProductsArgs, ctx: &CommandContext) -> RosterResult<()> {
    let ui_ctx = UiContext::detect();

    let mut spinner = TaskSpinner::new(&ui_ctx);
    spinner.start("Loading data products...");
    let products = match ctx.load_products().await {
        Ok(products) => {
            spinner.clear();
            products
        }
        Err(e) => {
            spinner.stop_error("Failed to load data products");
            return Err(e);
        }
    };

    let filter = ProductFilter {
        kind: args.kind,
        team: args.team,
        search: args.search,
    };
    let matching = filter.apply(&products);

    match args.format {
        OutputFormat::Table => print_table(&ui_ctx, &matching, &products),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&matching)?),
        OutputFormat::Plain => {
            for product in matching {
                println!("{}", product.id);
            }
        }
    }

    Ok(())
}

fn print_table(ctx: &UiContext, products: &[&DataProduct], all: &[DataProduct]) {
    let total = all.len();
    if products.is_empty() {
        ui::step_info(ctx, "No data products found");
        if total > 0 {
            ui::remark(ctx, &format!("Kinds: {}", filter::kinds(all).join(", ")));
            ui::remark(ctx, &format!("Teams: {}", filter::teams(all).join(", ")));
        }
        return;
    }

    ui::intro(ctx, "Data Products");

    let table = Table::new()
        .column("ID", 24)
        .column("NAME", 28)
        .column("KIND", 18)
        .column("TEAM", 20)
        .numeric("COMPONENTS", 10)
        .numeric("CONTRACTS", 9);
    table.print_header();

    for product in products {
        table.print_row(&[
            product.id.clone(),
            product.name.clone(),
            ui::kind_badge(&product.kind).to_string(),
            product.team.clone(),
            product.components.len().to_string(),
            product.contracts.len().to_string(),
        ]);
    }

    println!();
    if products.len() == total {
        println!("{} data product(s)", total);
    } else {
        println!("{} of {} data product(s)", products.len(), total);
    }
}
