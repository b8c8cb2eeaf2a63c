use std::path::Path;

use serde_json::json;

use crate::cli::commands::TaskCommands;
use crate::db::task_repo::{self, NewTask};
use crate::db::connection;
use crate::delete_flow::DeleteFlow;
use crate::error::AgencyError;
use crate::kpi;
use crate::models::{TaskPriority, TaskStatus};
use crate::output;
use crate::session::Session;

pub fn run(cmd: TaskCommands, session: &Session, json_output: bool, home: Option<&Path>) -> i32 {
    let result = match cmd {
        TaskCommands::Add { title, description, client, priority, due } => run_add(
            &title,
            description.as_deref(),
            client.as_deref(),
            priority.as_deref(),
            due.as_deref(),
            session,
            json_output,
            home,
        ),
        TaskCommands::List { status } => run_list(status.as_deref(), json_output, home),
        TaskCommands::Show { id } => run_show(&id, json_output, home),
        TaskCommands::Start { id } => run_set_status(&id, Some(TaskStatus::InProgress), session, json_output, home),
        TaskCommands::Done { id } => run_set_status(&id, Some(TaskStatus::Completed), session, json_output, home),
        TaskCommands::Reopen { id } => run_set_status(&id, Some(TaskStatus::Pending), session, json_output, home),
        TaskCommands::Toggle { id } => run_set_status(&id, None, session, json_output, home),
        TaskCommands::Delete { id } => run_delete(&id, session, json_output, home),
    };
    super::finish(result, json_output)
}

fn parse_priority(raw: &str) -> Result<TaskPriority, AgencyError> {
    TaskPriority::from_str(raw).ok_or_else(|| {
        AgencyError::validation(format!("Invalid priority '{raw}'. Use low, medium or high."))
    })
}

fn validate_due(raw: &str) -> Result<(), AgencyError> {
    if kpi::parse_instant(raw, &chrono::Utc).is_none() {
        return Err(AgencyError::validation(format!(
            "Invalid due date '{raw}'. Use YYYY-MM-DD or RFC 3339."
        )));
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn run_add(
    title: &str,
    description: Option<&str>,
    client: Option<&str>,
    priority: Option<&str>,
    due: Option<&str>,
    session: &Session,
    json_output: bool,
    home: Option<&Path>,
) -> Result<i32, AgencyError> {
    session.require_user()?;
    let title = title.trim();
    if title.is_empty() {
        return Err(AgencyError::validation("Task title must not be empty"));
    }
    let priority = match priority {
        Some(raw) => parse_priority(raw)?,
        None => session.config().default_priority,
    };
    if let Some(raw) = due {
        validate_due(raw)?;
    }

    let conn = connection::open_db(home)?;
    let task_id = ulid::Ulid::new().to_string();
    let task = task_repo::create_task(
        &conn,
        &task_id,
        &NewTask {
            title,
            description,
            client_name: client,
            priority,
            due_date: due,
        },
    )?;

    if json_output {
        output::json::print(&output::json::success(json!({
            "task": output::json::task_summary(&task)
        })));
    } else {
        println!("Added task: {} ({})", task.title, task.id);
    }
    Ok(0)
}

fn run_list(status: Option<&str>, json_output: bool, home: Option<&Path>) -> Result<i32, AgencyError> {
    let conn = connection::open_db(home)?;
    let status = status.map(TaskStatus::from_tag);
    let tasks = task_repo::list_tasks(&conn, status.as_ref())?;

    if json_output {
        let tasks_json: Vec<_> = tasks.iter().map(output::json::task_summary).collect();
        output::json::print(&output::json::success(json!({
            "tasks": tasks_json,
            "count": tasks.len()
        })));
    } else {
        output::text::print_task_list(&tasks);
    }
    Ok(0)
}

fn run_show(id: &str, json_output: bool, home: Option<&Path>) -> Result<i32, AgencyError> {
    let conn = connection::open_db(home)?;
    let task = task_repo::resolve_task(&conn, id)?;

    if json_output {
        output::json::print(&output::json::success(json!({
            "task": output::json::task_detail(&task)
        })));
    } else {
        output::text::print_task(&task);
    }
    Ok(0)
}

/// `None` toggles between completed and pending.
fn run_set_status(
    id: &str,
    target: Option<TaskStatus>,
    session: &Session,
    json_output: bool,
    home: Option<&Path>,
) -> Result<i32, AgencyError> {
    session.require_user()?;
    let conn = connection::open_db(home)?;
    let task = task_repo::resolve_task(&conn, id)?;
    let target = target.unwrap_or(if task.status.is_completed() {
        TaskStatus::Pending
    } else {
        TaskStatus::Completed
    });

    task_repo::update_task_status(&conn, &task.id, &target)?;
    let updated = task_repo::get_task_by_id(&conn, &task.id)?;

    if json_output {
        output::json::print(&output::json::success(json!({
            "task": output::json::task_summary(&updated),
            "previous_status": task.status.as_str()
        })));
    } else {
        println!(
            "Task {}: {} → {}",
            updated.id,
            task.status.as_str(),
            updated.status.as_str()
        );
    }
    Ok(0)
}

fn run_delete(id: &str, session: &Session, json_output: bool, home: Option<&Path>) -> Result<i32, AgencyError> {
    let user = session.require_user()?;
    let conn = connection::open_db(home)?;
    let task = task_repo::resolve_task(&conn, id)?;

    // One invocation is one submission; the flow only lives for this command.
    let flow = DeleteFlow::new();
    flow.confirm(&task.id, |task_id| task_repo::delete_task(&conn, task_id))?;
    tracing::info!(task_id = task.id.as_str(), user, "task deleted");

    if json_output {
        output::json::print(&output::json::success(json!({ "deleted": task.id })));
    } else {
        println!("Deleted task: {} ({})", task.title, task.id);
    }
    Ok(0)
}
