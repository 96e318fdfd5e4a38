//! Reconciling fetched products with locally owned contracts

use super::contract::Contract;
use super::model::DataProduct;
use crate::error::{RosterError, RosterResult};
use std::collections::HashMap;

/// Carry each previously stored product's contracts onto its fresh copy
///
/// Fresh products replace the old ones field for field; only `contracts`
/// comes from `previous`, matched by product id. Products without a
/// previous copy start with no contracts.
pub fn merge_contracts(fresh: Vec<DataProduct>, previous: &[DataProduct]) -> Vec<DataProduct> {
    let mut by_id: HashMap<&str, &[Contract]> = HashMap::with_capacity(previous.len());
    for product in previous {
        by_id.entry(product.id.as_str()).or_insert(&product.contracts);
    }

    fresh
        .into_iter()
        .map(|mut product| {
            product.contracts = by_id
                .get(product.id.as_str())
                .map(|contracts| contracts.to_vec())
                .unwrap_or_default();
            product
        })
        .collect()
}

/// Replace the contract with the same id, or append it
pub fn upsert_contract(
    products: &mut [DataProduct],
    product_id: &str,
    contract: Contract,
) -> RosterResult<()> {
    let product = find_product_mut(products, product_id)?;

    match product.contracts.iter_mut().find(|c| c.id == contract.id) {
        Some(existing) => *existing = contract,
        None => product.contracts.push(contract),
    }
    Ok(())
}

/// Remove a contract by id
pub fn remove_contract(
    products: &mut [DataProduct],
    product_id: &str,
    contract_id: &str,
) -> RosterResult<Contract> {
    let product = find_product_mut(products, product_id)?;

    let index = product
        .contracts
        .iter()
        .position(|c| c.id == contract_id)
        .ok_or_else(|| RosterError::ContractNotFound {
            product: product_id.to_string(),
            contract: contract_id.to_string(),
        })?;

    Ok(product.contracts.remove(index))
}

fn find_product_mut<'a>(
    products: &'a mut [DataProduct],
    product_id: &str,
) -> RosterResult<&'a mut DataProduct> {
    products
        .iter_mut()
        .find(|p| p.id == product_id)
        .ok_or_else(|| RosterError::ProductNotFound(product_id.to_string()))
}
