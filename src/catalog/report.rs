//! Profile, quality and lineage payloads for a single component

use serde::{Deserialize, Serialize};

/// Response of the component profile endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileReport {
    #[serde(default)]
    pub data_profile: Vec<DataProfile>,

    #[serde(default)]
    pub data_quality: Vec<DataQuality>,

    #[serde(default)]
    pub schema: Option<TableSchema>,
}

impl ProfileReport {
    /// Most recent profile scan result
    pub fn latest_profile(&self) -> Option<&DataProfile> {
        self.data_profile.first()
    }

    /// Most recent quality scan result
    pub fn latest_quality(&self) -> Option<&DataQuality> {
        self.data_quality.first()
    }
}

/// One profile scan result
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataProfile {
    #[serde(default)]
    pub row_count: u64,

    #[serde(default)]
    pub fields: Vec<FieldProfile>,
}

/// Per-column profile statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldProfile {
    pub name: String,

    #[serde(rename = "type", default)]
    pub field_type: String,

    #[serde(default)]
    pub mode: String,

    #[serde(default)]
    pub null_count: u64,

    #[serde(default)]
    pub distinct_count: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distinct_ratio: Option<f64>,

    #[serde(rename = "topNValues", default)]
    pub top_n_values: Vec<TopValue>,

    #[serde(default)]
    pub profile: StringProfile,
}

/// A frequent value and its share of rows
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopValue {
    pub value: String,

    #[serde(default)]
    pub count: u64,

    #[serde(default)]
    pub ratio: f64,
}

/// String length statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StringProfile {
    #[serde(default)]
    pub min_length: u64,

    #[serde(default)]
    pub max_length: u64,

    #[serde(default)]
    pub avg_length: f64,
}

/// One quality scan result
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataQuality {
    #[serde(default)]
    pub dimensions: Vec<QualityDimension>,

    #[serde(default)]
    pub rules: Vec<QualityRule>,
}

impl DataQuality {
    /// Number of rules that passed
    pub fn passed_rules(&self) -> usize {
        self.rules.iter().filter(|r| r.passed).count()
    }
}

/// Aggregate score for a quality dimension (completeness, validity, ...)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QualityDimension {
    pub dimension: DimensionName,

    #[serde(default)]
    pub score: f64,

    #[serde(default)]
    pub passed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DimensionName {
    #[serde(default)]
    pub name: String,
}

/// Outcome of a single quality rule
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityRule {
    #[serde(default)]
    pub column: String,

    #[serde(default)]
    pub dimension: String,

    #[serde(default)]
    pub passed: bool,

    #[serde(default)]
    pub pass_ratio: f64,

    #[serde(default)]
    pub passed_count: u64,

    #[serde(default)]
    pub evaluated_count: u64,

    #[serde(rename = "failing_rows_query", default)]
    pub failing_rows_query: String,

    #[serde(default)]
    pub rule: RuleExpectation,
}

/// What a quality rule checks
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleExpectation {
    #[serde(default)]
    pub non_null_expectation: Option<bool>,

    #[serde(default)]
    pub uniqueness_expectation: Option<bool>,

    #[serde(default)]
    pub set_expectation: Option<SetExpectation>,

    #[serde(default)]
    pub row_condition_expectation: Option<RowConditionExpectation>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SetExpectation {
    #[serde(default)]
    pub values: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RowConditionExpectation {
    #[serde(default)]
    pub sql_expression: String,
}

impl QualityRule {
    /// Column the rule applies to, or all columns
    pub fn column_label(&self) -> &str {
        if self.column.is_empty() {
            "All Columns"
        } else {
            &self.column
        }
    }

    /// Human-readable description of the expectation
    pub fn description(&self) -> String {
        let rule = &self.rule;
        if rule.non_null_expectation == Some(true) {
            return "Non-null values expected".to_string();
        }
        if rule.uniqueness_expectation == Some(true) {
            return "Unique values expected".to_string();
        }
        if let Some(set) = rule.set_expectation.as_ref().filter(|s| !s.values.is_empty()) {
            return format!(
                "Values must be in the allowed set ({} values)",
                set.values.len()
            );
        }
        if let Some(cond) = rule
            .row_condition_expectation
            .as_ref()
            .filter(|c| !c.sql_expression.is_empty())
        {
            return format!("Custom condition: {}", cond.sql_expression);
        }
        "Custom rule".to_string()
    }
}

/// Table schema as reported by the warehouse
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableSchema {
    #[serde(default)]
    pub fields: Vec<SchemaField>,

    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaField {
    pub name: String,

    #[serde(rename = "type", default)]
    pub field_type: String,

    #[serde(default)]
    pub mode: String,

    #[serde(default)]
    pub description: String,
}

/// Response of the component lineage endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineageReport {
    #[serde(default)]
    pub sources: Vec<String>,

    #[serde(default)]
    pub processes: Vec<LineageProcess>,
}

/// A transformation job that produced the table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineageProcess {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub sql: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
}
