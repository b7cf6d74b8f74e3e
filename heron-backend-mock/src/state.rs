//! Mock backend state
//!
//! In-memory row collections plus a fixed set of demo users. Everything
//! resets on restart; that is the point of an offline mock.

use serde_json::{json, Value};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Demo user accepted by the mock login endpoint
#[derive(Debug, Clone)]
pub struct MockUser {
    pub id: String,
    pub username: String,
    pub password: String,
    pub role: String,
}

/// Shared mock server state
pub struct AppState {
    /// Collection name → rows
    pub collections: RwLock<HashMap<String, Vec<Value>>>,
    /// HS256 signing secret for issued tokens
    pub jwt_secret: String,
    pub users: Vec<MockUser>,
}

impl AppState {
    /// State pre-seeded with demo agents and leave requests
    pub fn seeded() -> Self {
        let mut collections = HashMap::new();
        collections.insert("agents".to_string(), seed_agents());
        collections.insert("leave_requests".to_string(), seed_leave_requests());

        Self {
            collections: RwLock::new(collections),
            jwt_secret: "heron-mock-secret".to_string(),
            users: seed_users(),
        }
    }

    /// Look up a demo user by credentials
    pub fn authenticate(&self, username: &str, password: &str) -> Option<&MockUser> {
        self.users
            .iter()
            .find(|u| u.username == username && u.password == password)
    }
}

fn seed_users() -> Vec<MockUser> {
    vec![
        MockUser {
            id: "U1".to_string(),
            username: "admin".to_string(),
            password: "admin123".to_string(),
            role: "admin".to_string(),
        },
        MockUser {
            id: "U2".to_string(),
            username: "chef".to_string(),
            password: "chef123".to_string(),
            role: "department_head".to_string(),
        },
        MockUser {
            id: "U3".to_string(),
            username: "marie".to_string(),
            password: "marie123".to_string(),
            role: "employee".to_string(),
        },
    ]
}

fn seed_agents() -> Vec<Value> {
    vec![
        json!({
            "id": "A1",
            "display_name": "Marie Dupont",
            "role": "nurse",
            "weekly_hours": 35.0,
            "rtt_days": 2.0,
            "annual_leave_days": 25.0,
            "sick_child_days": 3,
            "is_active": true
        }),
        json!({
            "id": "A2",
            "display_name": "Jean Petit",
            "role": "department_head",
            "weekly_hours": 40.0,
            "rtt_days": 10.0,
            "annual_leave_days": 25.0,
            "sick_child_days": 3,
            "is_active": true
        }),
        json!({
            "id": "A3",
            "display_name": "Sofia Marchetti",
            "role": "doctor",
            "weekly_hours": 35.0,
            "rtt_days": 0.0,
            "annual_leave_days": 25.0,
            "sick_child_days": 3,
            "is_active": true
        }),
    ]
}

fn seed_leave_requests() -> Vec<Value> {
    vec![
        json!({
            "id": "L1",
            "agent_id": "A1",
            "leave_type": "Congés payés",
            "start_date": "2024-08-05",
            "end_date": "2024-08-09",
            "days_count": 5.0,
            "status": "approved",
            "created_at": "2024-06-01T09:15:00Z",
            "reason": null
        }),
        json!({
            "id": "L2",
            "agent_id": "A1",
            "leave_type": "RTT",
            "start_date": "2024-06-03",
            "end_date": "2024-06-04",
            "days_count": 2.0,
            "status": "pending",
            "created_at": "2024-05-28T14:02:00Z",
            "reason": "Déménagement"
        }),
    ]
}
