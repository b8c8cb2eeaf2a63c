use clap::Parser;
use std::path::Path;
use std::process;

use agencydesk::cli::commands::{Cli, Commands};
use agencydesk::session::Session;
use agencydesk::{cli, logging};

fn with_session(home: Option<&Path>, json_output: bool, f: impl FnOnce(&mut Session) -> i32) -> i32 {
    match Session::open(home) {
        Ok(mut session) => f(&mut session),
        Err(e) => cli::finish(Err(e), json_output),
    }
}

fn main() {
    let cli_args = Cli::parse();
    logging::init(cli_args.verbose);
    let json_output = cli_args.json;
    let home = cli_args.home.as_deref();

    let exit_code = match cli_args.command {
        Commands::Init => cli::init::run(json_output, home),
        Commands::Login { user } => with_session(home, json_output, |s| {
            cli::session::run_login(&user, s, json_output)
        }),
        Commands::Logout => with_session(home, json_output, |s| cli::session::run_logout(s, json_output)),
        Commands::Whoami => with_session(home, json_output, |s| cli::session::run_whoami(s, json_output)),
        Commands::Task(cmd) => with_session(home, json_output, |s| {
            cli::task::run(cmd, s, json_output, home)
        }),
        Commands::Policy(cmd) => with_session(home, json_output, |s| {
            cli::policy::run(cmd, s, json_output, home)
        }),
        Commands::Dashboard { now } => cli::dashboard::run(now.as_deref(), json_output, home),
    };

    process::exit(exit_code);
}
