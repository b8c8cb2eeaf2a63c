use serde_json::json;

use crate::error::AgencyError;
use crate::output;
use crate::session::Session;

pub fn run_login(user: &str, session: &mut Session, json_output: bool) -> i32 {
    let result = session.sign_in(user).map(|()| {
        let user = session.user.as_deref().unwrap_or_default();
        if json_output {
            output::json::print(&output::json::success(json!({ "user": user })));
        } else {
            println!("Signed in as {user}");
        }
        0
    });
    super::finish(result, json_output)
}

pub fn run_logout(session: &mut Session, json_output: bool) -> i32 {
    let result = session.sign_out().map(|previous| {
        if json_output {
            output::json::print(&output::json::success(json!({ "signed_out": previous })));
        } else {
            match previous {
                Some(user) => println!("Signed out {user}"),
                None => println!("Nobody was signed in."),
            }
        }
        0
    });
    super::finish(result, json_output)
}

pub fn run_whoami(session: &Session, json_output: bool) -> i32 {
    let result: Result<i32, AgencyError> = session.require_user().map(|user| {
        if json_output {
            output::json::print(&output::json::success(json!({ "user": user })));
        } else {
            println!("{user}");
        }
        0
    });
    super::finish(result, json_output)
}
