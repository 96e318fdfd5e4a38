//! Contract command - author and manage data contracts

use crate::cache::{Clock, SystemClock};
use crate::catalog::{contract_template, Contract, DataProduct};
use crate::cli::args::{ContractAction, ContractArgs};
use crate::cli::CommandContext;
use crate::error::{RosterError, RosterResult};
use crate::ui::{self, UiContext};
use std::io::Read;
use std::path::Path;

/// Execute the contract command
pub async fn execute(args: ContractArgs, ctx: &CommandContext) -> RosterResult<()> {
    // Contracts live in the durable product list; no backend round trip
    let products = ctx.coordinator.load_initial().await?;

    match args.action {
        ContractAction::Template { product } => {
            let product = find_product(&products, &product)?;
            print!("{}", contract_template(product, SystemClock.now_millis()));
            Ok(())
        }
        ContractAction::Save { product, file } => save(ctx, &products, &product, &file).await,
        ContractAction::Show { product, contract } => {
            let product = find_product(&products, &product)?;
            let contract = product.contract(&contract).ok_or_else(|| {
                RosterError::ContractNotFound {
                    product: product.id.clone(),
                    contract: contract.clone(),
                }
            })?;
            print!("{}", contract.to_yaml()?);
            Ok(())
        }
        ContractAction::Delete {
            product,
            contract,
            yes,
        } => delete(ctx, &product, &contract, yes).await,
    }
}

fn find_product<'a>(products: &'a [DataProduct], id: &str) -> RosterResult<&'a DataProduct> {
    products
        .iter()
        .find(|p| p.id == id)
        .ok_or_else(|| RosterError::ProductNotFound(id.to_string()))
}

async fn save(
    ctx: &CommandContext,
    products: &[DataProduct],
    product_id: &str,
    file: &Path,
) -> RosterResult<()> {
    let ui_ctx = UiContext::detect();
    find_product(products, product_id)?;

    let text = read_document(file).await?;
    let contract = Contract::from_yaml(&text)?;
    let contract_id = contract.id.clone();
    let replacing = products
        .iter()
        .any(|p| p.id == product_id && p.contract(&contract_id).is_some());

    ctx.coordinator.save_contract(product_id, contract).await?;

    let verb = if replacing { "Updated" } else { "Saved" };
    ui::step_ok(
        &ui_ctx,
        &format!("{} contract {} for {}", verb, contract_id, product_id),
    );
    Ok(())
}

async fn delete(
    ctx: &CommandContext,
    product_id: &str,
    contract_id: &str,
    yes: bool,
) -> RosterResult<()> {
    let ui_ctx = UiContext::detect().with_auto_yes(yes);

    let prompt = format!("Delete contract {} from {}?", contract_id, product_id);
    if !ui::confirm(&ui_ctx, &prompt, false).await? {
        ui::step_warn_hint(&ui_ctx, "Not deleted", "Pass --yes to skip confirmation");
        return Ok(());
    }

    ctx.coordinator.delete_contract(product_id, contract_id).await?;
    ui::step_ok(
        &ui_ctx,
        &format!("Deleted contract {} from {}", contract_id, product_id),
    );
    Ok(())
}

/// Contract text from a file, or stdin for `-`
async fn read_document(file: &Path) -> RosterResult<String> {
    if file == Path::new("-") {
        return tokio::task::spawn_blocking(|| {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .map(|_| text)
                .map_err(|e| RosterError::io("reading contract from stdin", e))
        })
        .await
        .map_err(|e| RosterError::Internal(format!("stdin task failed: {e}")))?;
    }

    tokio::fs::read_to_string(file)
        .await
        .map_err(|e| RosterError::io(format!("reading {}", file.display()), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn reads_document_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "id: sales_contract_1").unwrap();

        let text = read_document(file.path()).await.unwrap();
        assert_eq!(Contract::from_yaml(&text).unwrap().id, "sales_contract_1");
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_document(&dir.path().join("absent.yaml"))
            .await
            .unwrap_err();
        assert!(matches!(err, RosterError::Io { .. }));
    }
}
