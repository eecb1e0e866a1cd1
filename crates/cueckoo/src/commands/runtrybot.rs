//! Trybot command.

use anyhow::{Context, Result};
use clap::Args;
use cueckoo_config::{Credentials, find_and_load_config};
use cueckoo_core::{TrybotOptions, TrybotTrigger};
use cueckoo_git::Repository;

use super::github_client;

/// Long help for the runtrybot command.
pub const LONG_ABOUT: &str = "\
Triggers trybot and unity runs for its arguments.

When run with no arguments, runtrybot uses the single pending commit of the
current branch. If multiple pending commits are found, you must either specify
which commits or change IDs to run, or specify HEAD to run the trybots for all
of them.

runtrybot needs your GitHub username and a personal access token with the
\"repo\" scope. Configure them via your git credential helper, or by setting the
GITHUB_USER and GITHUB_PAT environment variables.

If --nounity is given, only a trybot run is triggered.";

/// Arguments for the runtrybot command.
#[derive(Debug, Args)]
pub struct RuntrybotArgs {
    /// Do not simultaneously trigger a unity run
    #[arg(long = "nounity")]
    pub no_unity: bool,

    /// Force the trybots to run, ignoring any existing results
    #[arg(short, long)]
    pub force: bool,

    /// Commits, change IDs, or HEAD for every pending commit
    #[arg(value_name = "ARGS")]
    pub targets: Vec<String>,
}

/// Runs the runtrybot command.
pub fn run(args: &RuntrybotArgs) -> Result<()> {
    let config = find_and_load_config().context("failed to load configuration")?;
    let client = github_client(&config)?;
    let credentials = Credentials::require(&client.credential_host())
        .context("failed to look up GitHub credentials")?;
    let client = client.with_basic_auth(credentials.user, credentials.token);
    let repo = Repository::discover().context("failed to open git repository")?;

    let options = TrybotOptions {
        no_unity: args.no_unity,
        force: args.force,
    };
    let trigger = TrybotTrigger::new(&client, &config, options);
    let payloads = trigger.run(&repo, &args.targets)?;

    for payload in &payloads {
        println!("Triggered {} run for {}", payload.kind, payload.commit);
    }
    Ok(())
}
