use std::path::Path;

use serde_json::json;

use crate::cli::commands::PolicyCommands;
use crate::db::policy_repo::{self, NewPolicy};
use crate::db::connection;
use crate::delete_flow::DeleteFlow;
use crate::error::AgencyError;
use crate::models::PolicyStatus;
use crate::output;
use crate::session::Session;

pub fn run(cmd: PolicyCommands, session: &Session, json_output: bool, home: Option<&Path>) -> i32 {
    let result = match cmd {
        PolicyCommands::Add { number, client, carrier, policy_type, premium, status } => {
            parse_status(&status).and_then(|status| {
                let new = NewPolicy {
                    policy_number: number.trim(),
                    client_name: client.trim(),
                    carrier: carrier.trim(),
                    policy_type: policy_type.as_deref(),
                    premium,
                    status,
                };
                run_add(&new, session, json_output, home)
            })
        }
        PolicyCommands::List => run_list(json_output, home),
        PolicyCommands::Show { reference } => run_show(&reference, json_output, home),
        PolicyCommands::Delete { reference } => run_delete(&reference, session, json_output, home),
    };
    super::finish(result, json_output)
}

fn parse_status(raw: &str) -> Result<PolicyStatus, AgencyError> {
    PolicyStatus::from_str(raw).ok_or_else(|| {
        AgencyError::validation(format!(
            "Invalid policy status '{raw}'. Use active, pending, cancelled or expired."
        ))
    })
}

fn run_add(
    new: &NewPolicy<'_>,
    session: &Session,
    json_output: bool,
    home: Option<&Path>,
) -> Result<i32, AgencyError> {
    session.require_user()?;
    if new.policy_number.is_empty() || new.client_name.is_empty() || new.carrier.is_empty() {
        return Err(AgencyError::validation(
            "Policy number, client and carrier must not be empty",
        ));
    }
    if !new.premium.is_finite() || new.premium < 0.0 {
        return Err(AgencyError::validation("Premium must be a non-negative amount"));
    }

    let conn = connection::open_db(home)?;
    let id = ulid::Ulid::new().to_string();
    let policy = policy_repo::create_policy(&conn, &id, new)?;

    if json_output {
        output::json::print(&output::json::success(output::json::policy_json(&policy)));
    } else {
        println!("Added policy: {} ({})", policy.policy_number, policy.id);
    }
    Ok(0)
}

fn run_list(json_output: bool, home: Option<&Path>) -> Result<i32, AgencyError> {
    let conn = connection::open_db(home)?;
    let policies = policy_repo::list_policies(&conn)?;

    if json_output {
        let policies_json: Vec<_> = policies.iter().map(output::json::policy_json).collect();
        output::json::print(&output::json::success(json!({ "policies": policies_json })));
    } else {
        output::text::print_policy_list(&policies);
    }
    Ok(0)
}

fn run_show(reference: &str, json_output: bool, home: Option<&Path>) -> Result<i32, AgencyError> {
    let conn = connection::open_db(home)?;
    let policy = policy_repo::resolve_policy(&conn, reference)?;

    if json_output {
        output::json::print(&output::json::success(output::json::policy_json(&policy)));
    } else {
        output::text::print_policy(&policy);
    }
    Ok(0)
}

fn run_delete(reference: &str, session: &Session, json_output: bool, home: Option<&Path>) -> Result<i32, AgencyError> {
    let user = session.require_user()?;
    let conn = connection::open_db(home)?;
    let policy = policy_repo::resolve_policy(&conn, reference)?;

    // One invocation is one submission; the flow only lives for this command.
    let flow = DeleteFlow::new();
    flow.confirm(&policy.id, |id| policy_repo::delete_policy(&conn, id))?;
    tracing::info!(policy_id = policy.id.as_str(), user, "policy deleted");

    if json_output {
        output::json::print(&output::json::success(json!({
            "deleted": policy.id,
            "policy_number": policy.policy_number
        })));
    } else {
        println!("Deleted policy: {} ({})", policy.policy_number, policy.id);
    }
    Ok(0)
}
