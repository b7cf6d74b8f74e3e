//! Leave Request Model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Leave type
///
/// Paid leave and RTT carry dedicated balance rules; every other label
/// coming from the backend is preserved verbatim as [`LeaveType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LeaveType {
    /// Statutory annual paid leave ("Congés payés")
    CongesPayes,
    /// Compensatory time-off, tracked in hours ("RTT")
    Rtt,
    /// Any other leave label (sick child, formation, unpaid, ...)
    Other(String),
}

impl LeaveType {
    pub const CONGES_PAYES: &'static str = "Congés payés";
    pub const RTT: &'static str = "RTT";

    /// Wire label for this leave type
    pub fn label(&self) -> &str {
        match self {
            Self::CongesPayes => Self::CONGES_PAYES,
            Self::Rtt => Self::RTT,
            Self::Other(label) => label,
        }
    }
}

impl From<String> for LeaveType {
    fn from(value: String) -> Self {
        match value.as_str() {
            Self::CONGES_PAYES => Self::CongesPayes,
            Self::RTT => Self::Rtt,
            _ => Self::Other(value),
        }
    }
}

impl From<LeaveType> for String {
    fn from(value: LeaveType) -> Self {
        value.label().to_string()
    }
}

impl fmt::Display for LeaveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Leave request status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaveStatus {
    Pending,
    Approved,
    Refused,
}

impl Default for LeaveStatus {
    fn default() -> Self {
        Self::Pending
    }
}

/// Leave request record
///
/// `start_date`/`end_date` are inclusive calendar dates in `YYYY-MM-DD`
/// form. They stay as strings on this type; the core parses them with a
/// literal component parser when it needs actual dates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveRequest {
    pub id: String,
    /// Canonical owner reference - the only join key to an agent
    pub agent_id: String,
    pub leave_type: LeaveType,
    /// Inclusive start date (YYYY-MM-DD)
    pub start_date: String,
    /// Inclusive end date (YYYY-MM-DD)
    pub end_date: String,
    /// Number of days requested
    #[serde(default)]
    pub days_count: f64,
    #[serde(default)]
    pub status: LeaveStatus,
    /// Creation timestamp (ISO 8601)
    #[serde(default)]
    pub created_at: Option<String>,
    /// Free-text reason
    #[serde(default)]
    pub reason: Option<String>,
}

impl LeaveRequest {
    pub fn is_approved(&self) -> bool {
        self.status == LeaveStatus::Approved
    }
}
