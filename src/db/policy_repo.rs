use rusqlite::{params, Connection};
use serde::Serialize;

use crate::error::{AgencyError, ErrorCode};
use crate::models::{Policy, PolicyStatus};

const POLICY_COLUMNS: &str = "id, policy_number, client_name, carrier, policy_type,
                premium, status, created_at, updated_at";

pub struct NewPolicy<'a> {
    pub policy_number: &'a str,
    pub client_name: &'a str,
    pub carrier: &'a str,
    pub policy_type: Option<&'a str>,
    pub premium: f64,
    pub status: PolicyStatus,
}

pub fn create_policy(conn: &Connection, id: &str, new: &NewPolicy<'_>) -> Result<Policy, AgencyError> {
    conn.execute(
        "INSERT INTO policies (id, policy_number, client_name, carrier, policy_type, premium, status)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            id,
            new.policy_number,
            new.client_name,
            new.carrier,
            new.policy_type,
            new.premium,
            new.status.as_str()
        ],
    )
    .map_err(|e| match e {
        rusqlite::Error::SqliteFailure(ref err, _)
            if err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            AgencyError::policy_number_conflict(new.policy_number)
        }
        _ => AgencyError::from(e),
    })?;
    tracing::debug!(policy_id = id, number = new.policy_number, "policy created");
    get_policy_by_id(conn, id)
}

pub fn get_policy_by_id(conn: &Connection, id: &str) -> Result<Policy, AgencyError> {
    conn.query_row(
        &format!("SELECT {POLICY_COLUMNS} FROM policies WHERE id = ?1"),
        params![id],
        row_to_policy,
    )
    .map_err(|e| match e {
        rusqlite::Error::QueryReturnedNoRows => AgencyError::policy_not_found(id),
        _ => AgencyError::from(e),
    })
}

pub fn get_policy_by_number(conn: &Connection, number: &str) -> Result<Option<Policy>, AgencyError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {POLICY_COLUMNS} FROM policies WHERE policy_number = ?1"
    ))?;
    let mut rows = stmt.query(params![number])?;
    let policy = match rows.next()? {
        Some(row) => Some(row_to_policy(row)?),
        None => None,
    };
    Ok(policy)
}

/// Resolve a policy by exact policy number, exact ID, or unique ID prefix.
pub fn resolve_policy(conn: &Connection, reference: &str) -> Result<Policy, AgencyError> {
    super::check_reference(reference)?;
    if let Some(policy) = get_policy_by_number(conn, reference)? {
        return Ok(policy);
    }
    match get_policy_by_id(conn, reference) {
        Ok(policy) => return Ok(policy),
        Err(e) if e.code == ErrorCode::PolicyNotFound => {}
        Err(e) => return Err(e),
    }

    // Literal prefix compare; LIKE would treat `_` and `%` as wildcards.
    let mut stmt = conn.prepare(&format!(
        "SELECT {POLICY_COLUMNS} FROM policies WHERE substr(id, 1, length(?1)) = ?1"
    ))?;
    let mut policies: Vec<Policy> = stmt
        .query_map(params![reference], row_to_policy)?
        .collect::<Result<Vec<_>, _>>()?;

    match policies.len() {
        0 => Err(AgencyError::policy_not_found(reference)),
        1 => Ok(policies.remove(0)),
        _ => {
            let candidates: Vec<String> = policies
                .iter()
                .map(|p| format!("{} ({})", p.policy_number, p.id))
                .collect();
            Err(AgencyError::ambiguous_ref(reference, &candidates))
        }
    }
}

pub fn list_policies(conn: &Connection) -> Result<Vec<Policy>, AgencyError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {POLICY_COLUMNS} FROM policies ORDER BY client_name ASC, policy_number ASC"
    ))?;
    let policies = stmt
        .query_map([], row_to_policy)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(policies)
}

pub fn delete_policy(conn: &Connection, id: &str) -> Result<(), AgencyError> {
    let changed = conn.execute("DELETE FROM policies WHERE id = ?1", params![id])?;
    if changed == 0 {
        return Err(AgencyError::policy_not_found(id));
    }
    tracing::debug!(policy_id = id, "policy deleted");
    Ok(())
}

#[derive(Debug, Default, Clone, Serialize)]
pub struct PremiumSummary {
    pub total_policies: i64,
    pub active_policies: i64,
    pub active_premium: f64,
}

pub fn premium_summary(conn: &Connection) -> Result<PremiumSummary, AgencyError> {
    let summary = conn.query_row(
        "SELECT COUNT(*),
                COALESCE(SUM(CASE WHEN status = 'active' THEN 1 ELSE 0 END), 0),
                COALESCE(SUM(CASE WHEN status = 'active' THEN premium ELSE 0 END), 0.0)
         FROM policies",
        [],
        |row| {
            Ok(PremiumSummary {
                total_policies: row.get(0)?,
                active_policies: row.get(1)?,
                active_premium: row.get(2)?,
            })
        },
    )?;
    Ok(summary)
}

fn row_to_policy(row: &rusqlite::Row) -> rusqlite::Result<Policy> {
    Ok(Policy {
        id: row.get(0)?,
        policy_number: row.get(1)?,
        client_name: row.get(2)?,
        carrier: row.get(3)?,
        policy_type: row.get(4)?,
        premium: row.get(5)?,
        status: PolicyStatus::from_str(&row.get::<_, String>(6)?).unwrap_or(PolicyStatus::Pending),
        created_at: row.get(7)?,
        updated_at: row.get(8)?,
    })
}
