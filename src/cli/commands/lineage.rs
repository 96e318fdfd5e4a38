//! Lineage command - upstream graph for one component

use crate::catalog::{Component, DataProduct};
use crate::cli::args::{LineageArgs, OutputFormat};
use crate::cli::CommandContext;
use crate::coordinator::ComponentState;
use crate::error::{RosterError, RosterResult};
use crate::lineage::{LineageGraph, NodeRole};
use crate::ui::{self, TaskSpinner, UiContext};
use console::style;

/// Execute the lineage command
pub async fn execute(args: LineageArgs, ctx: &CommandContext) -> RosterResult<()> {
    let ui_ctx = UiContext::detect();
    let scope = ctx.coordinator.scope().await?;

    let mut spinner = TaskSpinner::new(&ui_ctx);
    spinner.start("Loading lineage...");
    let products = match ctx.coordinator.load_products(&scope, false).await {
        Ok(products) => products,
        Err(e) => {
            spinner.stop_error("Failed to load data products");
            return Err(e);
        }
    };

    let component = match find_component(&products, &args.product, &args.component) {
        Ok(component) => component,
        Err(e) => {
            spinner.stop_error("Failed to find component");
            return Err(e);
        }
    };

    let lineage = match ctx.coordinator.load_component(&scope, component).await {
        ComponentState::Loaded { lineage, .. } => {
            spinner.clear();
            lineage
        }
        ComponentState::Skipped => {
            spinner.clear();
            return Err(RosterError::User(format!(
                "{} is not a BigQuery table; no lineage is recorded for it",
                component.name
            )));
        }
        ComponentState::Failed { error, lineage, .. } => match lineage {
            Some(lineage) => {
                spinner.clear();
                ui::step_warn(&ui_ctx, &format!("Profile unavailable: {}", error));
                lineage
            }
            None => {
                spinner.stop_error("Failed to load lineage");
                return Err(error);
            }
        },
    };

    let table = component.source.table_name();
    let graph = LineageGraph::layout(table, &lineage, &products);

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&graph)?),
        OutputFormat::Plain => {
            for source in graph.sources() {
                println!("{}", source.id);
            }
        }
        OutputFormat::Table => print_graph(&ui_ctx, table, &graph),
    }

    Ok(())
}

fn find_component<'a>(
    products: &'a [DataProduct],
    product_id: &str,
    component_id: &str,
) -> RosterResult<&'a Component> {
    products
        .iter()
        .find(|p| p.id == product_id)
        .ok_or_else(|| RosterError::ProductNotFound(product_id.to_string()))?
        .component(component_id)
        .ok_or_else(|| RosterError::ComponentNotFound {
            product: product_id.to_string(),
            component: component_id.to_string(),
        })
}

fn print_graph(ctx: &UiContext, table: &str, graph: &LineageGraph) {
    ui::intro(ctx, &format!("Lineage for {}", table));

    let sources: Vec<_> = graph.sources().collect();
    if sources.is_empty() {
        ui::step_info(ctx, "No upstream sources recorded");
        return;
    }

    for node in &sources {
        let owner = node
            .product_id
            .as_deref()
            .map(|id| format!(" [{}]", id))
            .unwrap_or_default();
        let edge = graph
            .edge_from(&node.id)
            .and_then(|e| e.label.as_deref())
            .map(|label| format!(" --{}-->", label))
            .unwrap_or_else(|| " -->".to_string());
        println!(
            "  {}{}{}",
            style(&node.id).bold(),
            style(owner).dim(),
            style(edge).blue()
        );
    }

    if let Some(target) = graph.target() {
        let owner = target
            .product_id
            .as_deref()
            .map(|id| format!(" [{}]", id))
            .unwrap_or_default();
        println!("  {} {}{}", style("=>").blue(), style(&target.id).bold(), style(owner).dim());
    }

    if !graph.groups.is_empty() {
        ui::section(ctx, "Data products");
        for group in &graph.groups {
            let members = graph
                .nodes
                .iter()
                .filter(|n| group.node_ids.contains(&n.id))
                .map(|n| match n.role {
                    NodeRole::Target => format!("{} (this table)", n.label),
                    NodeRole::Source => n.label.clone(),
                })
                .collect::<Vec<_>>()
                .join(", ");
            ui::key_value(
                ctx,
                &format!("{} ({})", group.name, group.kind),
                &members,
            );
        }
    }
}
