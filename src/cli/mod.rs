pub mod commands;
pub mod dashboard;
pub mod init;
pub mod policy;
pub mod session;
pub mod task;

pub use commands::*;

use crate::error::AgencyError;
use crate::output;

/// Map a command result to an exit code, printing the error in the chosen format.
pub fn finish(result: Result<i32, AgencyError>, json_output: bool) -> i32 {
    match result {
        Ok(code) => code,
        Err(e) => {
            if json_output {
                output::json::print(&output::json::error(&e));
            } else {
                eprintln!("Error: {}", e.message);
            }
            1
        }
    }
}
