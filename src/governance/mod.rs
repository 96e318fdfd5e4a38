//! Access-request workflow
//!
//! Requests are validated locally and reported against a fixed approval
//! workflow. There is no submission backend; a valid request stops at the
//! first step.

use crate::catalog::DataProduct;
use crate::error::{RosterError, RosterResult};
use clap::ValueEnum;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Current,
    Pending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WorkflowStep {
    pub number: u8,
    pub name: &'static str,
    pub status: StepStatus,
}

/// Approval chain every request goes through
pub const WORKFLOW_STEPS: [WorkflowStep; 5] = [
    WorkflowStep {
        number: 1,
        name: "Request Initiation",
        status: StepStatus::Current,
    },
    WorkflowStep {
        number: 2,
        name: "Team Manager Review",
        status: StepStatus::Pending,
    },
    WorkflowStep {
        number: 3,
        name: "Data Owner Review",
        status: StepStatus::Pending,
    },
    WorkflowStep {
        number: 4,
        name: "DPO Assessment",
        status: StepStatus::Pending,
    },
    WorkflowStep {
        number: 5,
        name: "Access Provisioning",
        status: StepStatus::Pending,
    },
];

/// How long granted access lasts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize)]
pub enum AccessDuration {
    #[default]
    #[value(name = "3months")]
    #[serde(rename = "3months")]
    ThreeMonths,

    #[value(name = "6months")]
    #[serde(rename = "6months")]
    SixMonths,

    #[value(name = "1year")]
    #[serde(rename = "1year")]
    OneYear,

    #[value(name = "permanent")]
    #[serde(rename = "permanent")]
    Permanent,
}

impl fmt::Display for AccessDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::ThreeMonths => "3 Months",
            Self::SixMonths => "6 Months",
            Self::OneYear => "1 Year",
            Self::Permanent => "Permanent",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessRequest {
    pub product_id: String,
    pub purpose: String,
    pub duration: AccessDuration,
    pub accepted_contract: bool,
}

impl AccessRequest {
    /// Check the request against the product it targets
    pub fn validate(&self, product: &DataProduct) -> RosterResult<()> {
        if product.id != self.product_id {
            return Err(RosterError::AccessRequestInvalid(format!(
                "request targets {} but product is {}",
                self.product_id, product.id
            )));
        }
        if self.purpose.trim().is_empty() {
            return Err(RosterError::AccessRequestInvalid(
                "purpose of access is required".to_string(),
            ));
        }
        if !product.contracts.is_empty() && !self.accepted_contract {
            return Err(RosterError::AccessRequestInvalid(format!(
                "{} has a data contract; accept its terms to continue",
                product.name
            )));
        }
        Ok(())
    }
}

/// Whether a product publishes a contract, for governance listings
pub fn contract_status(product: &DataProduct) -> &'static str {
    if product.contracts.is_empty() {
        "No contract"
    } else {
        "Available"
    }
}
