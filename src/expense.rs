// 💸 Expense - The single record type held by the API
// Created once by the create path, never mutated afterwards

use chrono::NaiveDate;
use serde::{Serialize, Serializer};

/// Largest integer a JSON number can carry without losing precision (2^53 - 1)
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// A stored expense
///
/// `id` is assigned by the store at insertion (collection length + 1).
/// `date` is normalized to a calendar date and serialized as `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Expense {
    pub id: u64,

    #[serde(serialize_with = "serialize_amount")]
    pub amount: f64,

    pub description: String,

    pub category: String,

    #[serde(serialize_with = "serialize_date")]
    pub date: NaiveDate,
}

/// Validated fields of an expense that has not been stored yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub amount: f64,
    pub description: String,
    pub category: String,
    pub date: NaiveDate,
}

impl NewExpense {
    /// Attach an id, producing the record that gets stored
    pub fn into_expense(self, id: u64) -> Expense {
        Expense {
            id,
            amount: self.amount,
            description: self.description,
            category: self.category,
            date: self.date,
        }
    }
}

// ============================================================================
// SERDE HELPERS
// ============================================================================

/// Integral amounts render as integers (`5`, not `5.0`), the way a JSON
/// client produced them. Non-finite amounts render as `null`.
fn serialize_amount<S>(amount: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if !amount.is_finite() {
        return serializer.serialize_none();
    }

    if amount.fract() == 0.0 && amount.abs() <= MAX_SAFE_INTEGER {
        serializer.serialize_i64(*amount as i64)
    } else {
        serializer.serialize_f64(*amount)
    }
}

fn serialize_date<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&date.format("%Y-%m-%d"))
}

// ============================================================================
// TESTS
// ============================================================================
