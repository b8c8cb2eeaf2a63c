use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};

use crate::error::{AgencyError, ErrorCode};
use crate::kpi;
use crate::models::{Task, TaskPriority, TaskStatus};

const TASK_COLUMNS: &str = "id, title, description, client_name, status, priority,
                due_date, created_at, updated_at";

pub struct NewTask<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub client_name: Option<&'a str>,
    pub priority: TaskPriority,
    pub due_date: Option<&'a str>,
}

pub fn create_task(conn: &Connection, id: &str, new: &NewTask<'_>) -> Result<Task, AgencyError> {
    conn.execute(
        "INSERT INTO tasks (id, title, description, client_name, status, priority, due_date)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            id,
            new.title,
            new.description,
            new.client_name,
            TaskStatus::Pending.as_str(),
            new.priority.as_str(),
            new.due_date
        ],
    )?;
    tracing::debug!(task_id = id, "task created");
    get_task_by_id(conn, id)
}

pub fn get_task_by_id(conn: &Connection, id: &str) -> Result<Task, AgencyError> {
    conn.query_row(
        &format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?1"),
        params![id],
        row_to_task,
    )
    .map_err(|e| match e {
        rusqlite::Error::QueryReturnedNoRows => AgencyError::task_not_found(id),
        _ => AgencyError::from(e),
    })
}

/// Resolve task by exact ID or unique ID prefix.
pub fn resolve_task(conn: &Connection, reference: &str) -> Result<Task, AgencyError> {
    super::check_reference(reference)?;
    match get_task_by_id(conn, reference) {
        Ok(task) => return Ok(task),
        Err(e) if e.code == ErrorCode::TaskNotFound => {}
        Err(e) => return Err(e),
    }

    // Literal prefix compare; LIKE would treat `_` and `%` as wildcards.
    let mut stmt = conn.prepare(&format!(
        "SELECT {TASK_COLUMNS} FROM tasks WHERE substr(id, 1, length(?1)) = ?1"
    ))?;
    let mut tasks: Vec<Task> = stmt
        .query_map(params![reference], row_to_task)?
        .collect::<Result<Vec<_>, _>>()?;

    match tasks.len() {
        0 => Err(AgencyError::task_not_found(reference)),
        1 => Ok(tasks.remove(0)),
        _ => {
            let candidates: Vec<String> = tasks
                .iter()
                .map(|t| format!("{} ({})", t.title, t.id))
                .collect();
            Err(AgencyError::ambiguous_ref(reference, &candidates))
        }
    }
}

/// List tasks, earliest due first; tasks without a readable deadline go last.
pub fn list_tasks(conn: &Connection, status: Option<&TaskStatus>) -> Result<Vec<Task>, AgencyError> {
    let mut tasks = match status {
        Some(status) => {
            let mut stmt = conn.prepare(&format!(
                "SELECT {TASK_COLUMNS} FROM tasks WHERE status = ?1"
            ))?;
            let rows = stmt.query_map(params![status.as_str()], row_to_task)?;
            rows.collect::<Result<Vec<_>, _>>()?
        }
        None => {
            let mut stmt = conn.prepare(&format!("SELECT {TASK_COLUMNS} FROM tasks"))?;
            let rows = stmt.query_map([], row_to_task)?;
            rows.collect::<Result<Vec<_>, _>>()?
        }
    };
    // Due dates are user input in several formats, so compare parsed instants.
    tasks.sort_by_cached_key(|t| {
        let due = t.due_date.as_deref().and_then(|d| kpi::parse_instant(d, &Utc));
        let created = kpi::parse_instant(&t.created_at, &Utc);
        (DueKey(due), created)
    });
    Ok(tasks)
}

#[derive(PartialEq, Eq)]
struct DueKey(Option<DateTime<Utc>>);

impl Ord for DueKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.0, other.0) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

impl PartialOrd for DueKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

pub fn update_task_status(conn: &Connection, id: &str, status: &TaskStatus) -> Result<(), AgencyError> {
    let changed = conn.execute(
        "UPDATE tasks SET status = ?1,
         updated_at = strftime('%Y-%m-%dT%H:%M:%SZ', 'now')
         WHERE id = ?2",
        params![status.as_str(), id],
    )?;
    if changed == 0 {
        return Err(AgencyError::task_not_found(id));
    }
    tracing::debug!(task_id = id, status = status.as_str(), "task status updated");
    Ok(())
}

pub fn delete_task(conn: &Connection, id: &str) -> Result<(), AgencyError> {
    let changed = conn.execute("DELETE FROM tasks WHERE id = ?1", params![id])?;
    if changed == 0 {
        return Err(AgencyError::task_not_found(id));
    }
    tracing::debug!(task_id = id, "task deleted");
    Ok(())
}

fn row_to_task(row: &rusqlite::Row) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        client_name: row.get(3)?,
        status: TaskStatus::from_tag(&row.get::<_, String>(4)?),
        priority: TaskPriority::from_str(&row.get::<_, String>(5)?).unwrap_or(TaskPriority::Medium),
        due_date: row.get(6)?,
        created_at: row.get(7)?,
        updated_at: row.get(8)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connection::open_in_memory;
    use crate::error::ErrorCode;

    fn add(conn: &Connection, id: &str, title: &str, due: Option<&str>) -> Task {
        create_task(
            conn,
            id,
            &NewTask {
                title,
                description: None,
                client_name: Some("Harper Family"),
                priority: TaskPriority::High,
                due_date: due,
            },
        )
        .unwrap()
    }

    #[test]
    fn new_tasks_start_pending_with_rfc3339_timestamps() {
        let conn = open_in_memory().unwrap();
        let task = add(&conn, "01TASKA", "Renewal call", None);
        assert_eq!(task.status, TaskStatus::Pending);
        assert!(chrono::DateTime::parse_from_rfc3339(&task.created_at).is_ok());
    }

    #[test]
    fn resolve_by_prefix_and_ambiguity() {
        let conn = open_in_memory().unwrap();
        add(&conn, "01AAA1", "First", None);
        add(&conn, "01AAA2", "Second", None);
        add(&conn, "01BBB1", "Third", None);

        assert_eq!(resolve_task(&conn, "01B").unwrap().title, "Third");
        assert_eq!(resolve_task(&conn, "01AAA2").unwrap().title, "Second");
        assert_eq!(resolve_task(&conn, "01A").unwrap_err().code, ErrorCode::AmbiguousRef);
        assert_eq!(resolve_task(&conn, "ZZ").unwrap_err().code, ErrorCode::TaskNotFound);
    }

    #[test]
    fn list_orders_by_due_date_and_filters_status() {
        let conn = open_in_memory().unwrap();
        add(&conn, "T1", "No deadline", None);
        add(&conn, "T2", "Later", Some("2026-11-01"));
        add(&conn, "T3", "Sooner", Some("2026-10-20"));
        update_task_status(&conn, "T2", &TaskStatus::Completed).unwrap();

        let titles: Vec<_> = list_tasks(&conn, None).unwrap().into_iter().map(|t| t.title).collect();
        assert_eq!(titles, vec!["Sooner", "Later", "No deadline"]);

        let done = list_tasks(&conn, Some(&TaskStatus::Completed)).unwrap();
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].id, "T2");
    }

    #[test]
    fn list_orders_mixed_due_formats_by_instant() {
        let conn = open_in_memory().unwrap();
        add(&conn, "T1", "Hawaii morning", Some("2026-10-18T01:00:00-10:00"));
        add(&conn, "T2", "UTC dawn", Some("2026-10-18T05:00:00Z"));
        add(&conn, "T3", "Naive 02:00", Some("2026-10-18 02:00:00"));
        add(&conn, "T4", "Unreadable", Some("whenever"));

        let titles: Vec<_> = list_tasks(&conn, None).unwrap().into_iter().map(|t| t.title).collect();
        assert_eq!(titles, vec!["Naive 02:00", "UTC dawn", "Hawaii morning", "Unreadable"]);
    }

    #[test]
    fn prefix_lookup_ignores_sql_wildcards() {
        let conn = open_in_memory().unwrap();
        add(&conn, "01AAA1", "Only task", None);

        assert_eq!(resolve_task(&conn, "_").unwrap_err().code, ErrorCode::TaskNotFound);
        assert_eq!(resolve_task(&conn, "%").unwrap_err().code, ErrorCode::TaskNotFound);
        assert_eq!(resolve_task(&conn, "01_").unwrap_err().code, ErrorCode::TaskNotFound);
        assert_eq!(resolve_task(&conn, "").unwrap_err().code, ErrorCode::ValidationError);
        assert_eq!(resolve_task(&conn, "  ").unwrap_err().code, ErrorCode::ValidationError);
    }

    #[test]
    fn lookup_propagates_database_errors() {
        let conn = open_in_memory().unwrap();
        conn.execute_batch("DROP TABLE tasks;").unwrap();
        assert_eq!(resolve_task(&conn, "01A").unwrap_err().code, ErrorCode::DatabaseError);
    }

    #[test]
    fn unknown_status_round_trips() {
        let conn = open_in_memory().unwrap();
        add(&conn, "T1", "Waiting", None);
        let custom = TaskStatus::from_tag("waiting_on_client");
        update_task_status(&conn, "T1", &custom).unwrap();
        assert_eq!(get_task_by_id(&conn, "T1").unwrap().status, custom);
    }

    #[test]
    fn delete_missing_task_is_not_found() {
        let conn = open_in_memory().unwrap();
        add(&conn, "T1", "Gone soon", None);
        delete_task(&conn, "T1").unwrap();
        assert_eq!(delete_task(&conn, "T1").unwrap_err().code, ErrorCode::TaskNotFound);
    }
}
