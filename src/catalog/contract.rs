//! Data contracts: locally authored usage terms for a data product

use super::model::DataProduct;
use crate::error::{RosterError, RosterResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Free-form contract document identified by `id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    pub id: String,

    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Contract {
    /// Parse a contract from its YAML text
    pub fn from_yaml(text: &str) -> RosterResult<Self> {
        let contract: Contract =
            serde_yaml::from_str(text).map_err(|e| RosterError::ContractInvalid(e.to_string()))?;

        if contract.id.trim().is_empty() {
            return Err(RosterError::ContractInvalid(
                "contract id must not be empty".to_string(),
            ));
        }
        Ok(contract)
    }

    /// Render the contract as YAML text
    pub fn to_yaml(&self) -> RosterResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn title(&self) -> Option<&str> {
        self.info_field("title")
    }

    pub fn status(&self) -> Option<&str> {
        self.info_field("status")
    }

    pub fn version(&self) -> Option<&str> {
        self.info_field("version")
    }

    fn info_field(&self, name: &str) -> Option<&str> {
        self.fields.get("info")?.get(name)?.as_str()
    }
}

/// Starting document for a new contract on `product`
pub fn contract_template(product: &DataProduct, now_millis: i64) -> String {
    let id = &product.id;
    let name = &product.name;
    format!(
        r#"dataContractSpecification: 1.1.0
id: {id}_contract_{now_millis}
info:
  title: {name} Contract
  version: 1.0.0
  description: Data contract for {name}
  status: draft
  owner: {team}
  contact:
    name: Team Contact
    email: contact@example.com
terms:
  usage: Max. 10x queries per day
  limitations: Not suitable for real-time use cases
  billing: Define billing terms
  noticePeriod: P3M
models:
  {id}:
    description: {name} data model
    title: {name}
    fields:
      # Add fields based on your data product schema
examples:
  - type: csv
    model: {id}
    description: Sample data
    data: |
      # Add sample data here
tags:
  - {kind}
"#,
        team = product.team,
        kind = product.kind,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn product() -> DataProduct {
        serde_json::from_value(json!({
            "id": "sales",
            "name": "Sales",
            "team": "Revenue",
            "kind": "consumer-aligned"
        }))
        .unwrap()
    }

    #[test]
    fn template_parses_as_contract() {
        let text = contract_template(&product(), 1_700_000_000_000);
        let contract = Contract::from_yaml(&text).unwrap();

        assert_eq!(contract.id, "sales_contract_1700000000000");
        assert_eq!(contract.title(), Some("Sales Contract"));
        assert_eq!(contract.status(), Some("draft"));
        assert_eq!(contract.version(), Some("1.0.0"));
        assert_eq!(
            contract.fields["tags"],
            json!(["consumer-aligned"])
        );
    }

    #[test]
    fn malformed_yaml_is_invalid_contract() {
        let err = Contract::from_yaml("id: [unclosed").unwrap_err();
        assert!(matches!(err, RosterError::ContractInvalid(_)));
    }

    #[test]
    fn missing_or_blank_id_is_invalid() {
        assert!(matches!(
            Contract::from_yaml("info:\n  title: x\n"),
            Err(RosterError::ContractInvalid(_))
        ));
        assert!(matches!(
            Contract::from_yaml("id: '  '\n"),
            Err(RosterError::ContractInvalid(_))
        ));
    }

    #[test]
    fn yaml_text_survives_edit_cycle() {
        let original = Contract::from_yaml("id: c1\ninfo:\n  status: active\n").unwrap();
        let text = original.to_yaml().unwrap();
        assert!(text.contains("id: c1"));
        assert_eq!(Contract::from_yaml(&text).unwrap(), original);
    }
}
