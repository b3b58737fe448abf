use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillStatus {
    Pending,
    Accepted,
    Refused,
}

impl BillStatus {
    pub const ALL: &[BillStatus] = &[
        BillStatus::Pending,
        BillStatus::Accepted,
        BillStatus::Refused,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BillStatus::Pending => "pending",
            BillStatus::Accepted => "accepted",
            BillStatus::Refused => "refused",
        }
    }

    /// Display label shown in the listing.
    pub fn label(&self) -> &'static str {
        match self {
            BillStatus::Pending => "En attente",
            BillStatus::Accepted => "Accepté",
            BillStatus::Refused => "Refusé",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(BillStatus::Pending),
            "accepted" => Some(BillStatus::Accepted),
            "refused" => Some(BillStatus::Refused),
            _ => None,
        }
    }
}

impl fmt::Display for BillStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An expense-report record as the backend serves it.
///
/// `date` and `status` stay raw strings on the wire: the backend holds
/// records with malformed dates and out-of-set statuses, and those must
/// survive listing untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    pub id: String,
    pub email: String,
    #[serde(rename = "type")]
    pub expense_type: String,
    pub name: String,
    pub date: String,
    pub amount: f64,
    #[serde(default)]
    pub vat: Option<f64>,
    #[serde(default)]
    pub pct: Option<u32>,
    #[serde(default)]
    pub commentary: Option<String>,
    pub status: String,
    #[serde(default)]
    pub file_url: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
}

/// Submission payload for a new bill. The attachment fields are set from
/// the upload receipt before the record is persisted, never after.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBill {
    pub email: String,
    #[serde(rename = "type")]
    pub expense_type: String,
    pub name: String,
    pub date: String,
    pub amount: f64,
    #[serde(default)]
    pub vat: Option<f64>,
    pub pct: u32,
    #[serde(default)]
    pub commentary: Option<String>,
    pub status: BillStatus,
    #[serde(default)]
    pub file_url: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
}
