use std::path::Path;

use serde_json::json;

use crate::db::connection;
use crate::error::AgencyError;
use crate::output;

pub fn run(json_output: bool, home: Option<&Path>) -> i32 {
    super::finish(run_inner(json_output, home), json_output)
}

fn run_inner(json_output: bool, home: Option<&Path>) -> Result<i32, AgencyError> {
    let path = connection::init_db(home)?;
    if json_output {
        output::json::print(&output::json::success(json!({
            "path": path.to_string_lossy()
        })));
    } else {
        println!("Initialized agencydesk at {}", path.display());
    }
    Ok(0)
}
