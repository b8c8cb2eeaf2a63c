use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, TimeZone};
use serde::Serialize;

use crate::models::{Task, TaskPriority, TaskStatus};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskKpis {
    pub total: usize,
    pub pending: usize,
    pub overdue: usize,
    pub completed_this_week: usize,
    pub high_priority_open: usize,
}

/// Compute the four task KPIs as of `now`. A missing slice counts as empty.
///
/// A task can land in several buckets at once (a high-priority pending task
/// is both `pending` and `high_priority_open`).
pub fn compute<Tz: TimeZone>(tasks: Option<&[Task]>, now: &DateTime<Tz>) -> TaskKpis {
    let tasks = tasks.unwrap_or(&[]);
    let tz = now.timezone();
    let today = start_of_day(now);
    let week_ago = now.clone().checked_sub_signed(Duration::days(7));

    let mut kpis = TaskKpis {
        total: tasks.len(),
        ..TaskKpis::default()
    };

    for task in tasks {
        let completed = task.status.is_completed();

        if task.status == TaskStatus::Pending {
            kpis.pending += 1;
        }

        if !completed && is_before(task.due_date.as_deref(), today.as_ref(), &tz) {
            kpis.overdue += 1;
        }

        if completed && is_after(Some(task.created_at.as_str()), week_ago.as_ref(), &tz) {
            kpis.completed_this_week += 1;
        }

        if !completed && task.priority == TaskPriority::High {
            kpis.high_priority_open += 1;
        }
    }

    kpis
}

/// Midnight of `now`'s calendar day, in `now`'s timezone.
pub fn start_of_day<Tz: TimeZone>(now: &DateTime<Tz>) -> Option<DateTime<Tz>> {
    let midnight = now.date_naive().and_hms_opt(0, 0, 0)?;
    local_instant(&now.timezone(), midnight)
}

/// Parse a stored timestamp. Accepts RFC 3339, a naive `YYYY-MM-DD[ T]HH:MM:SS`
/// read as wall-clock time in `tz`, or a bare `YYYY-MM-DD` read as midnight.
/// Anything else is not a valid instant.
pub fn parse_instant<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<DateTime<Tz>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(tz));
    }
    for fmt in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return local_instant(tz, naive);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .and_then(|naive| local_instant(tz, naive))
}

fn local_instant<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> Option<DateTime<Tz>> {
    tz.from_local_datetime(&naive).earliest()
}

// Both helpers are false whenever either side is not a valid instant.
fn is_before<Tz: TimeZone>(raw: Option<&str>, bound: Option<&DateTime<Tz>>, tz: &Tz) -> bool {
    match (raw.and_then(|r| parse_instant(r, tz)), bound) {
        (Some(at), Some(bound)) => at < *bound,
        _ => false,
    }
}

fn is_after<Tz: TimeZone>(raw: Option<&str>, bound: Option<&DateTime<Tz>>, tz: &Tz) -> bool {
    match (raw.and_then(|r| parse_instant(r, tz)), bound) {
        (Some(at), Some(bound)) => at > *bound,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    fn task(status: &str, priority: TaskPriority, due: Option<&str>, created: &str) -> Task {
        Task {
            id: format!("t-{status}-{}", priority.as_str()),
            title: "Call client about renewal".into(),
            description: None,
            client_name: None,
            status: TaskStatus::from_tag(status),
            priority,
            due_date: due.map(str::to_string),
            created_at: created.into(),
            updated_at: created.into(),
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 14, 0, 0).unwrap()
    }

    #[test]
    fn missing_tasks_yield_zeroes() {
        assert_eq!(compute::<Utc>(None, &now()), TaskKpis::default());
        assert_eq!(compute(Some(Vec::new().as_slice()), &now()), TaskKpis::default());
    }

    #[test]
    fn pending_partitions_the_input() {
        let tasks = vec![
            task("pending", TaskPriority::Low, None, "2026-10-01T00:00:00Z"),
            task("in_progress", TaskPriority::Low, None, "2026-10-01T00:00:00Z"),
            task("completed", TaskPriority::Low, None, "2026-10-01T00:00:00Z"),
            task("pending", TaskPriority::High, None, "2026-10-01T00:00:00Z"),
            task("on_hold", TaskPriority::Medium, None, "2026-10-01T00:00:00Z"),
        ];
        let kpis = compute(Some(tasks.as_slice()), &now());
        let not_pending = tasks
            .iter()
            .filter(|t| t.status != TaskStatus::Pending)
            .count();
        assert_eq!(kpis.pending, 2);
        assert_eq!(kpis.pending + not_pending, kpis.total);
    }

    #[test]
    fn no_due_date_is_never_overdue() {
        let tasks = vec![task("pending", TaskPriority::High, None, "2020-01-01T00:00:00Z")];
        for year in [2021, 2026, 2099] {
            let at = Utc.with_ymd_and_hms(year, 6, 1, 12, 0, 0).unwrap();
            assert_eq!(compute(Some(tasks.as_slice()), &at).overdue, 0);
        }
    }

    #[test]
    fn overdue_boundary_is_start_of_day() {
        let earlier_today = task(
            "pending",
            TaskPriority::Low,
            Some("2026-10-18T08:00:00Z"),
            "2026-10-01T00:00:00Z",
        );
        let late_yesterday = task(
            "pending",
            TaskPriority::Low,
            Some("2026-10-17T23:59:00Z"),
            "2026-10-01T00:00:00Z",
        );
        assert_eq!(compute(Some(&[earlier_today][..]), &now()).overdue, 0);
        assert_eq!(compute(Some(&[late_yesterday][..]), &now()).overdue, 1);
    }

    #[test]
    fn completed_tasks_are_not_overdue() {
        let tasks = vec![task(
            "completed",
            TaskPriority::Low,
            Some("2026-09-01"),
            "2026-08-01T00:00:00Z",
        )];
        assert_eq!(compute(Some(tasks.as_slice()), &now()).overdue, 0);
    }

    #[test]
    fn start_of_day_follows_the_clock_timezone() {
        // 01:00 on the 18th at +05:00 is still the 17th in UTC.
        let tz = FixedOffset::east_opt(5 * 3600).unwrap();
        let at = tz.with_ymd_and_hms(2026, 10, 18, 1, 0, 0).unwrap();
        let due_evening_before = task(
            "pending",
            TaskPriority::Low,
            Some("2026-10-17 22:00:00"),
            "2026-10-01T00:00:00Z",
        );
        assert_eq!(compute(Some(&[due_evening_before][..]), &at).overdue, 1);
        assert_eq!(
            start_of_day(&at).unwrap(),
            tz.with_ymd_and_hms(2026, 10, 18, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn completed_this_week_window() {
        let just_outside = task("completed", TaskPriority::Low, None, "2026-10-11T13:59:59Z");
        let exactly_seven = task("completed", TaskPriority::Low, None, "2026-10-11T14:00:00Z");
        let six_days = task("completed", TaskPriority::Low, None, "2026-10-12T14:00:00Z");
        assert_eq!(compute(Some(&[just_outside][..]), &now()).completed_this_week, 0);
        assert_eq!(compute(Some(&[exactly_seven][..]), &now()).completed_this_week, 0);
        assert_eq!(compute(Some(&[six_days][..]), &now()).completed_this_week, 1);
    }

    #[test]
    fn open_tasks_do_not_count_as_completed_this_week() {
        let tasks = vec![task("pending", TaskPriority::Low, None, "2026-10-17T00:00:00Z")];
        assert_eq!(compute(Some(tasks.as_slice()), &now()).completed_this_week, 0);
    }

    #[test]
    fn completed_high_priority_is_not_open() {
        let tasks = vec![
            task("completed", TaskPriority::High, None, "2026-10-01T00:00:00Z"),
            task("in_progress", TaskPriority::High, None, "2026-10-01T00:00:00Z"),
        ];
        assert_eq!(compute(Some(tasks.as_slice()), &now()).high_priority_open, 1);
    }

    #[test]
    fn malformed_dates_are_silently_excluded() {
        let tasks = vec![
            task("pending", TaskPriority::Low, Some("next tuesday"), "2026-10-01T00:00:00Z"),
            task("completed", TaskPriority::Low, None, "not-a-date"),
        ];
        let kpis = compute(Some(tasks.as_slice()), &now());
        assert_eq!(kpis.overdue, 0);
        assert_eq!(kpis.completed_this_week, 0);
        assert_eq!(kpis.pending, 1);
    }

    #[test]
    fn dashboard_scenario() {
        let tasks = vec![
            task(
                "pending",
                TaskPriority::High,
                Some("2026-10-17T10:00:00Z"),
                "2026-10-10T09:00:00Z",
            ),
            task("completed", TaskPriority::Low, None, "2026-10-16T14:00:00Z"),
        ];
        let kpis = compute(Some(tasks.as_slice()), &now());
        assert_eq!(
            kpis,
            TaskKpis {
                total: 2,
                pending: 1,
                overdue: 1,
                completed_this_week: 1,
                high_priority_open: 1,
            }
        );
    }

    #[test]
    fn parse_instant_accepts_stored_formats() {
        let tz = Utc;
        let expected = Utc.with_ymd_and_hms(2026, 10, 18, 9, 30, 0).unwrap();
        assert_eq!(parse_instant("2026-10-18T09:30:00Z", &tz), Some(expected));
        assert_eq!(parse_instant("2026-10-18T11:30:00+02:00", &tz), Some(expected));
        assert_eq!(parse_instant("2026-10-18 09:30:00", &tz), Some(expected));
        assert_eq!(parse_instant("2026-10-18T09:30:00.000", &tz), Some(expected));
        assert_eq!(
            parse_instant("2026-10-18", &tz),
            Some(Utc.with_ymd_and_hms(2026, 10, 18, 0, 0, 0).unwrap())
        );
        assert_eq!(parse_instant("18/10/2026", &tz), None);
    }

    #[test]
    fn kpis_serialize_with_dashboard_keys() {
        let value = serde_json::to_value(TaskKpis::default()).unwrap();
        for key in ["pending", "overdue", "completedThisWeek", "highPriorityOpen", "total"] {
            assert!(value.get(key).is_some(), "missing {key}");
        }
    }
}
