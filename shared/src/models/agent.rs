//! Agent Model

use serde::{Deserialize, Serialize};

/// Role held by an agent within the organization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentRole {
    Employee,
    Nurse,
    Doctor,
    Dentist,
    DentalAssistant,
    Hr,
    Accounting,
    Midwife,
    DepartmentHead,
    Admin,
}

impl Default for AgentRole {
    fn default() -> Self {
        Self::Employee
    }
}

impl AgentRole {
    /// Roles entitled to formation hours
    pub fn has_formation_entitlement(&self) -> bool {
        matches!(self, Self::DepartmentHead | Self::Doctor)
    }
}

/// Agent record - one member of the organization
///
/// Entitlement fields are read-only inputs to the balance calculator;
/// nothing in the reconciliation core ever mutates an agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    pub id: String,
    /// Display name shown on the dashboard
    pub display_name: String,
    #[serde(default)]
    pub role: AgentRole,
    /// Weekly contracted hours
    #[serde(default = "default_weekly_hours")]
    pub weekly_hours: f64,
    /// Annual RTT day allotment
    #[serde(default)]
    pub rtt_days: f64,
    /// Annual paid-leave day allotment (congés annuels)
    #[serde(default = "default_annual_leave_days")]
    pub annual_leave_days: f64,
    /// Sick-child day allotment (enfant malade)
    #[serde(default = "default_sick_child_days")]
    pub sick_child_days: u32,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_weekly_hours() -> f64 {
    35.0
}

fn default_annual_leave_days() -> f64 {
    25.0
}

fn default_sick_child_days() -> u32 {
    3
}

fn default_true() -> bool {
    true
}

impl Agent {
    /// Minimal agent with entitlement defaults, for tests and seeding
    pub fn new(id: impl Into<String>, display_name: impl Into<String>, role: AgentRole) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            role,
            weekly_hours: default_weekly_hours(),
            rtt_days: 0.0,
            annual_leave_days: default_annual_leave_days(),
            sick_child_days: default_sick_child_days(),
            is_active: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entitlement_defaults_apply_on_deserialize() {
        let agent: Agent =
            serde_json::from_str(r#"{"id":"A1","display_name":"Marie Dupont"}"#).unwrap();
        assert_eq!(agent.weekly_hours, 35.0);
        assert_eq!(agent.annual_leave_days, 25.0);
        assert_eq!(agent.sick_child_days, 3);
        assert_eq!(agent.role, AgentRole::Employee);
        assert!(agent.is_active);
    }

    #[test]
    fn test_role_wire_format() {
        let json = serde_json::to_string(&AgentRole::DepartmentHead).unwrap();
        assert_eq!(json, "\"department_head\"");
        assert!(AgentRole::DepartmentHead.has_formation_entitlement());
        assert!(!AgentRole::Nurse.has_formation_entitlement());
    }
}
