//! Loan application record.
//!
//! Stored on the ledger as UTF-8 JSON with the field names below. Missing
//! fields decode to their defaults and unknown fields are ignored, so
//! partially filled applications from clients still parse.

use serde::{Deserialize, Serialize};

use ledgermock_stubapi::{ChaincodeError, ChaincodeResult};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalInfo {
    pub firstname: String,
    pub lastname: String,
    #[serde(rename = "DOB", alias = "dob")]
    pub dob: String,
    pub email: String,
    pub mobile: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FinancialInfo {
    pub monthly_salary: i64,
    pub monthly_rent: i64,
    pub other_expenditure: i64,
    pub monthly_loan_payment: i64,
}

/// A mortgage loan application as kept on the ledger.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoanApplication {
    pub id: String,
    pub property_id: String,
    pub land_id: String,
    pub permit_id: String,
    pub buyer_id: String,
    #[serde(rename = "appraiserApplicationId")]
    pub appraisal_application_id: String,
    pub sales_contract_id: String,
    pub personal_info: PersonalInfo,
    pub financial_info: FinancialInfo,
    pub status: String,
    pub requested_amount: i64,
    pub fair_market_value: i64,
    pub approved_amount: i64,
    pub reviewer_id: String,
    pub last_modified_date: String,
}

impl LoanApplication {
    /// Decode a record from its JSON bytes.
    pub fn from_json(bytes: &[u8]) -> ChaincodeResult<Self> {
        serde_json::from_slice(bytes).map_err(|e| {
            ChaincodeError::Serialization(format!("could not unmarshal loan application: {}", e))
        })
    }

    /// Encode the record as JSON bytes.
    pub fn to_json(&self) -> ChaincodeResult<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| {
            ChaincodeError::Serialization(format!("could not marshal loan application: {}", e))
        })
    }
}
