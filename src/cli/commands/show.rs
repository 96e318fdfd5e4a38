//! Show command - one data product with per-component detail

use crate::catalog::report::{DataProfile, DataQuality, TableSchema};
use crate::catalog::{Component, LineageReport, ProfileReport};
use crate::cli::args::{OutputFormat, ShowArgs};
use crate::cli::CommandContext;
use crate::coordinator::{ComponentState, ProductDetail};
use crate::error::RosterResult;
use crate::ui::{self, Table, TaskSpinner, UiContext};
use console::style;
use serde::Serialize;

/// Execute the show command
pub async fn execute(args: ShowArgs, ctx: &CommandContext) -> RosterResult<()> {
    let ui_ctx = UiContext::detect();
    let scope = ctx.coordinator.scope().await?;

    let mut spinner = TaskSpinner::new(&ui_ctx);
    spinner.start("Loading data product...");
    let loaded = match ctx.coordinator.load_products(&scope, false).await {
        Ok(_) => {
            ctx.coordinator
                .load_product_detail(&scope, &args.product)
                .await
        }
        Err(e) => Err(e),
    };
    let detail = match loaded {
        Ok(detail) => {
            spinner.clear();
            detail
        }
        Err(e) => {
            spinner.stop_error("Failed to load data product");
            return Err(e);
        }
    };

    match args.format {
        OutputFormat::Json => print_json(&detail)?,
        OutputFormat::Table | OutputFormat::Plain => print_detail(&ui_ctx, &detail),
    }

    Ok(())
}

#[derive(Serialize)]
struct ComponentJson<'a> {
    #[serde(flatten)]
    component: &'a Component,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    profile: Option<&'a ProfileReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    lineage: Option<&'a LineageReport>,
}

fn print_json(detail: &ProductDetail) -> RosterResult<()> {
    let components: Vec<ComponentJson<'_>> = detail
        .components
        .iter()
        .map(|c| ComponentJson {
            component: &c.component,
            status: c.state.label(),
            error: c.state.error().map(|e| e.to_string()),
            profile: c.state.profile(),
            lineage: c.state.lineage(),
        })
        .collect();

    let mut value = serde_json::to_value(&detail.product)?;
    value["components"] = serde_json::to_value(components)?;
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

fn print_detail(ctx: &UiContext, detail: &ProductDetail) {
    let product = &detail.product;
    ui::intro(ctx, &product.name);
    ui::key_value(ctx, "Kind", &ui::kind_badge(&product.kind).to_string());
    ui::key_value(ctx, "Team", &product.team);
    if !product.tags.is_empty() {
        ui::key_value(ctx, "Tags", &product.tags.join(", "));
    }
    ui::key_value(ctx, "Contracts", &product.contracts.len().to_string());

    if detail.components.is_empty() {
        ui::step_info(ctx, "No components");
        return;
    }

    for entry in &detail.components {
        let component = &entry.component;
        ui::section(ctx, &format!("{} ({})", component.name, component.kind));
        ui::key_value(ctx, "Source", &component.source.system);
        ui::key_value(ctx, "Resource", resource_path(&component.source.resource));

        match &entry.state {
            ComponentState::Skipped => {}
            ComponentState::Loaded { profile, lineage } => {
                print_profile(ctx, profile);
                print_lineage_summary(ctx, lineage);
            }
            ComponentState::Failed {
                error,
                profile,
                lineage,
            } => {
                ui::step_error_detail(ctx, "Error fetching data", &error.to_string());
                if let Some(profile) = profile {
                    print_profile(ctx, profile);
                }
                if let Some(lineage) = lineage {
                    print_lineage_summary(ctx, lineage);
                }
                if error.is_retryable() {
                    ui::remark(ctx, &format!("Retry: roster show {}", product.id));
                }
            }
        }
    }
    println!();
}

/// Resource name without its `//service` prefix
fn resource_path(resource: &str) -> &str {
    resource.rsplit("//").next().unwrap_or(resource)
}

fn print_profile(ctx: &UiContext, report: &ProfileReport) {
    if let Some(schema) = &report.schema {
        print_schema(schema);
    }
    if let Some(profile) = report.latest_profile() {
        print_data_profile(profile);
    }
    if let Some(quality) = report.latest_quality() {
        print_quality(ctx, quality);
    }
}

fn print_schema(schema: &TableSchema) {
    println!();
    println!("  {}", style("Schema").bold());
    if !schema.description.is_empty() {
        println!("  {}", style(&schema.description).dim());
    }
    let table = Table::new()
        .indent(2)
        .column("COLUMN", 28)
        .column("TYPE", 12)
        .column("MODE", 10)
        .column("DESCRIPTION", 0);
    table.print_header();
    for field in &schema.fields {
        table.print_row(&[
            field.name.clone(),
            field.field_type.clone(),
            field.mode.clone(),
            field.description.clone(),
        ]);
    }
}

fn print_data_profile(profile: &DataProfile) {
    println!();
    println!(
        "  {} ({} rows)",
        style("Data Profile").bold(),
        ui::format_count(profile.row_count)
    );
    let table = Table::new()
        .indent(2)
        .column("COLUMN", 28)
        .column("TYPE", 12)
        .numeric("NULLS", 10)
        .numeric("DISTINCT", 10)
        .numeric("LENGTH", 14)
        .column("TOP VALUES", 0);
    table.print_header();
    for field in &profile.fields {
        let lengths = format!(
            "{}-{} ~{:.1}",
            field.profile.min_length, field.profile.max_length, field.profile.avg_length
        );
        let top = field
            .top_n_values
            .iter()
            .take(3)
            .map(|v| format!("{} ({})", v.value, ui::format_ratio(v.ratio)))
            .collect::<Vec<_>>()
            .join(", ");
        table.print_row(&[
            field.name.clone(),
            field.field_type.clone(),
            ui::format_count(field.null_count),
            ui::format_count(field.distinct_count),
            lengths,
            top,
        ]);
    }
}

fn print_quality(ctx: &UiContext, quality: &DataQuality) {
    println!();
    println!(
        "  {} ({}/{} rules passed)",
        style("Data Quality").bold(),
        quality.passed_rules(),
        quality.rules.len()
    );

    for dim in &quality.dimensions {
        let name = if dim.dimension.name.is_empty() {
            "Unknown"
        } else {
            &dim.dimension.name
        };
        let verdict = if dim.passed { "PASSED" } else { "FAILED" };
        ui::key_value_status(
            ctx,
            name,
            &format!("{} {}", ui::format_ratio(dim.score), verdict),
            dim.passed,
        );
    }

    for rule in &quality.rules {
        let mark = if rule.passed {
            style("✓").green()
        } else {
            style("✗").red()
        };
        println!(
            "  {} {:<20} {:<14} {} ({}, {}/{})",
            mark,
            ui::truncate(rule.column_label(), 20),
            rule.dimension,
            rule.description(),
            ui::format_ratio(rule.pass_ratio),
            ui::format_count(rule.passed_count),
            ui::format_count(rule.evaluated_count)
        );
    }
}

fn print_lineage_summary(ctx: &UiContext, lineage: &LineageReport) {
    println!();
    if lineage.sources.is_empty() {
        ui::key_value(ctx, "Lineage", "no upstream sources");
    } else {
        ui::key_value(
            ctx,
            "Lineage",
            &format!("{} upstream source(s)", lineage.sources.len()),
        );
    }
}
