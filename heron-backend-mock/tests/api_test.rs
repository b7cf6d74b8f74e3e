//! Mock API integration tests, driven through the in-process client

use heron_backend_mock::{router, AppState};
use heron_client::{ClientError, InProcessClient};
use serde_json::{json, Value};
use shared::models::{Agent, AgentRole, LeaveRequest, LeaveStatus};
use std::sync::Arc;

fn client() -> InProcessClient {
    InProcessClient::new(router(Arc::new(AppState::seeded())))
}

async fn logged_in() -> InProcessClient {
    let mut c = client();
    c.login("admin", "admin123").await.unwrap();
    c
}

#[tokio::test]
async fn login_and_me_round_trip() {
    let mut c = client();
    let login = c.login("admin", "admin123").await.unwrap();
    assert_eq!(login.user.username, "admin");
    assert!(c.token().is_some());

    let me = c.me().await.unwrap();
    assert_eq!(me.id, login.user.id);
    assert_eq!(me.role, "admin");

    c.logout().await.unwrap();
    assert!(c.token().is_none());
}

#[tokio::test]
async fn bad_credentials_rejected() {
    let mut c = client();
    let err = c.login("admin", "wrong").await.unwrap_err();
    assert!(matches!(err, ClientError::Unauthorized));
}

#[tokio::test]
async fn rows_require_token() {
    let c = client();
    let err = c.agents().await.unwrap_err();
    assert!(matches!(err, ClientError::Unauthorized));
}

#[tokio::test]
async fn seeded_agents_deserialize_into_models() {
    let c = logged_in().await;
    let agents: Vec<Agent> = c.agents().await.unwrap();
    assert_eq!(agents.len(), 3);

    let chef = agents.iter().find(|a| a.id == "A2").unwrap();
    assert_eq!(chef.role, AgentRole::DepartmentHead);
    assert_eq!(chef.weekly_hours, 40.0);
}

#[tokio::test]
async fn equality_filters_restrict_rows() {
    let c = logged_in().await;

    let approved: Vec<LeaveRequest> =
        c.leave_requests(Some(LeaveStatus::Approved)).await.unwrap();
    assert_eq!(approved.len(), 1);
    assert_eq!(approved[0].id, "L1");

    let for_a1 = c.approved_leaves_for("A1").await.unwrap();
    assert_eq!(for_a1.len(), 1);

    let for_other = c.approved_leaves_for("A3").await.unwrap();
    assert!(for_other.is_empty());
}

#[tokio::test]
async fn unknown_collection_lists_empty() {
    let c = logged_in().await;
    let rows: Vec<Value> = c.fetch_rows("nonexistent", &[]).await.unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn insert_assigns_id_and_created_at() {
    let c = logged_in().await;
    let inserted: Value = c
        .insert_row(
            "leave_requests",
            &json!({
                "agent_id": "A3",
                "leave_type": "RTT",
                "start_date": "2024-09-02",
                "end_date": "2024-09-02",
                "days_count": 1.0,
                "status": "pending"
            }),
        )
        .await
        .unwrap();

    assert!(inserted.get("id").and_then(Value::as_str).is_some());
    assert!(inserted.get("created_at").and_then(Value::as_str).is_some());

    let pending: Vec<LeaveRequest> = c
        .fetch_rows("leave_requests", &[("agent_id", "A3"), ("status", "pending")])
        .await
        .unwrap();
    assert_eq!(pending.len(), 1);
}

#[tokio::test]
async fn update_and_delete_report_affected_counts() {
    let c = logged_in().await;

    // Approve the pending RTT request
    let affected = c
        .update_rows(
            "leave_requests",
            &[("id", "L2")],
            &json!({"status": "approved"}),
        )
        .await
        .unwrap();
    assert_eq!(affected, 1);

    let approved: Vec<LeaveRequest> =
        c.leave_requests(Some(LeaveStatus::Approved)).await.unwrap();
    assert_eq!(approved.len(), 2);

    // Filters that match nothing affect nothing
    let none = c
        .update_rows("leave_requests", &[("id", "L999")], &json!({"status": "refused"}))
        .await
        .unwrap();
    assert_eq!(none, 0);

    let deleted = c.delete_rows("leave_requests", &[("id", "L2")]).await.unwrap();
    assert_eq!(deleted, 1);
    let remaining: Vec<LeaveRequest> = c.leave_requests(None).await.unwrap();
    assert_eq!(remaining.len(), 1);
}
