//! Cache command - inspect and clear cached responses

use crate::cache::{CacheEntryInfo, CACHE_FAMILIES, CACHE_TTL_MS};
use crate::cli::args::{CacheAction, CacheArgs, CacheFamily, OutputFormat};
use crate::cli::CommandContext;
use crate::error::RosterResult;
use crate::store::keys;
use crate::ui::{self, Table, UiContext};
use console::style;

/// Execute the cache command
pub async fn execute(args: CacheArgs, ctx: &CommandContext) -> RosterResult<()> {
    match args.action {
        CacheAction::Status { format } => status(ctx, format).await,
        CacheAction::Clear { family } => clear(ctx, family).await,
    }
}

async fn status(ctx: &CommandContext, format: OutputFormat) -> RosterResult<()> {
    let entries = ctx.cache.entries().await;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
        OutputFormat::Plain => {
            for entry in &entries {
                println!("{}", entry.key);
            }
        }
        OutputFormat::Table => print_table(ctx, &entries),
    }
    Ok(())
}

fn print_table(ctx: &CommandContext, entries: &[CacheEntryInfo]) {
    let ui_ctx = UiContext::detect();

    if entries.is_empty() {
        ui::step_info(&ui_ctx, "No cached responses");
        ui::remark(&ui_ctx, &format!("Store: {}", ctx.store_dir.display()));
        return;
    }

    let table = Table::new()
        .column("KEY", 48)
        .column("AGE", 10)
        .column("STATE", 8);
    table.print_header();

    for entry in entries {
        let state = if entry.fresh {
            style("fresh").green()
        } else {
            style("stale").dim()
        };
        table.print_row(&[
            entry.key.clone(),
            ui::format_age(entry.age_ms),
            state.to_string(),
        ]);
    }

    let fresh = entries.iter().filter(|e| e.fresh).count();
    println!();
    println!(
        "{} entr(ies), {} fresh (TTL {})",
        entries.len(),
        fresh,
        ui::format_age(CACHE_TTL_MS)
    );
}

/// Key prefixes covered by a family selection
fn prefixes(family: CacheFamily) -> &'static [&'static str] {
    match family {
        CacheFamily::Products => &[keys::DATA_PRODUCTS_CACHE],
        CacheFamily::Profile => &[keys::PROFILE_CACHE_PREFIX],
        CacheFamily::Lineage => &[keys::LINEAGE_CACHE_PREFIX],
        CacheFamily::All => &CACHE_FAMILIES,
    }
}

async fn clear(ctx: &CommandContext, family: CacheFamily) -> RosterResult<()> {
    let ui_ctx = UiContext::detect();

    let mut removed = 0;
    for prefix in prefixes(family) {
        removed += ctx.cache.clear_by_prefix(prefix).await;
    }

    ui::step_ok(&ui_ctx, &format!("Cleared {} cached response(s)", removed));
    Ok(())
}
