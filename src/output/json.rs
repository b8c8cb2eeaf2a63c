use serde_json::{json, Value};

use crate::cards::CardRegistry;
use crate::db::policy_repo::PremiumSummary;
use crate::error::AgencyError;
use crate::kpi::TaskKpis;
use crate::models::{Policy, Task};

pub fn success(data: Value) -> Value {
    json!({
        "success": true,
        "data": data
    })
}

pub fn error(err: &AgencyError) -> Value {
    json!({
        "success": false,
        "error": {
            "code": err.code.as_str(),
            "message": err.message
        }
    })
}

pub fn print(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("Error: failed to encode JSON output: {e}"),
    }
}

pub fn task_summary(t: &Task) -> Value {
    let mut v = json!({
        "id": t.id,
        "title": t.title,
        "status": t.status.as_str(),
        "priority": t.priority.as_str(),
        "due_date": t.due_date
    });
    if let Some(ref client) = t.client_name {
        v["client_name"] = json!(client);
    }
    v
}

pub fn task_detail(t: &Task) -> Value {
    json!({
        "id": t.id,
        "title": t.title,
        "description": t.description,
        "client_name": t.client_name,
        "status": t.status.as_str(),
        "priority": t.priority.as_str(),
        "due_date": t.due_date,
        "created_at": t.created_at,
        "updated_at": t.updated_at
    })
}

pub fn policy_json(p: &Policy) -> Value {
    json!({
        "id": p.id,
        "policy_number": p.policy_number,
        "client_name": p.client_name,
        "carrier": p.carrier,
        "policy_type": p.policy_type,
        "premium": p.premium,
        "status": p.status.as_str(),
        "created_at": p.created_at,
        "updated_at": p.updated_at
    })
}

pub fn premium_json(s: &PremiumSummary) -> Value {
    json!({
        "total_policies": s.total_policies,
        "active_policies": s.active_policies,
        "active_premium": (s.active_premium * 100.0).round() / 100.0
    })
}

pub fn dashboard_json(kpis: &TaskKpis, registry: &CardRegistry, premium: &PremiumSummary, as_of: &str) -> Value {
    let cards: Vec<_> = registry.iter().map(|card| card.render_json(kpis)).collect();
    json!({
        "as_of": as_of,
        "kpis": kpis,
        "cards": cards,
        "policies": premium_json(premium)
    })
}
