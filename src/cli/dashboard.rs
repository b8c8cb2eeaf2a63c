use std::path::Path;

use chrono::{DateTime, FixedOffset, Local, SecondsFormat};

use crate::cards::CardRegistry;
use crate::db::{connection, policy_repo, task_repo};
use crate::error::AgencyError;
use crate::kpi;
use crate::output;

pub fn run(now: Option<&str>, json_output: bool, home: Option<&Path>) -> i32 {
    super::finish(run_inner(now, json_output, home), json_output)
}

fn resolve_now(raw: Option<&str>) -> Result<DateTime<FixedOffset>, AgencyError> {
    match raw {
        Some(raw) => DateTime::parse_from_rfc3339(raw).map_err(|e| {
            AgencyError::validation(format!("Invalid --now '{raw}': {e}. Use RFC 3339."))
        }),
        None => Ok(Local::now().fixed_offset()),
    }
}

fn run_inner(now: Option<&str>, json_output: bool, home: Option<&Path>) -> Result<i32, AgencyError> {
    let now = resolve_now(now)?;
    let conn = connection::open_db(home)?;
    let tasks = task_repo::list_tasks(&conn, None)?;
    let premium = policy_repo::premium_summary(&conn)?;

    let kpis = kpi::compute(Some(tasks.as_slice()), &now);
    tracing::debug!(?kpis, "dashboard computed");
    let registry = CardRegistry::default();
    let as_of = now.to_rfc3339_opts(SecondsFormat::Secs, true);

    if json_output {
        output::json::print(&output::json::success(output::json::dashboard_json(
            &kpis, &registry, &premium, &as_of,
        )));
    } else {
        output::text::print_dashboard(&kpis, &registry, &premium, &as_of);
    }
    Ok(0)
}
