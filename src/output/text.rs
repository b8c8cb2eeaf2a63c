use crate::cards::CardRegistry;
use crate::db::policy_repo::PremiumSummary;
use crate::kpi::TaskKpis;
use crate::models::{Policy, Task};

fn short_id(id: &str) -> &str {
    &id[..std::cmp::min(8, id.len())]
}

pub fn print_task(t: &Task) {
    println!("Task: {} ({})", t.title, t.id);
    if let Some(ref desc) = t.description {
        println!("  Description: {desc}");
    }
    if let Some(ref client) = t.client_name {
        println!("  Client: {client}");
    }
    println!("  Status: {}", t.status.as_str());
    println!("  Priority: {}", t.priority.as_str());
    if let Some(ref due) = t.due_date {
        println!("  Due: {due}");
    }
    println!("  Created: {}", t.created_at);
}

pub fn print_task_list(tasks: &[Task]) {
    if tasks.is_empty() {
        println!("No tasks found.");
        return;
    }
    for t in tasks {
        println!(
            "  [{}] {} ({}) {} {}",
            t.status.as_str(),
            t.title,
            short_id(&t.id),
            t.priority.as_str(),
            t.due_date.as_deref().map(|d| format!("due {d}")).unwrap_or_default()
        );
    }
}

pub fn print_policy(p: &Policy) {
    println!("Policy: {} ({})", p.policy_number, p.id);
    println!("  Client: {}", p.client_name);
    println!("  Carrier: {}", p.carrier);
    if let Some(ref kind) = p.policy_type {
        println!("  Type: {kind}");
    }
    println!("  Premium: {:.2}", p.premium);
    println!("  Status: {}", p.status.as_str());
}

pub fn print_policy_list(policies: &[Policy]) {
    if policies.is_empty() {
        println!("No policies found.");
        return;
    }
    for p in policies {
        println!(
            "  {} ({}) [{}] {} - {} {:.2}",
            p.policy_number,
            short_id(&p.id),
            p.status.as_str(),
            p.client_name,
            p.carrier,
            p.premium
        );
    }
}

pub fn print_dashboard(kpis: &TaskKpis, registry: &CardRegistry, premium: &PremiumSummary, as_of: &str) {
    println!("Dashboard as of {as_of}");
    println!();
    for card in registry.iter() {
        println!("  {}", card.render_text(kpis));
    }
    println!();
    println!(
        "Policies: {} active of {} (premium {:.2})",
        premium.active_policies, premium.total_policies, premium.active_premium
    );
}
