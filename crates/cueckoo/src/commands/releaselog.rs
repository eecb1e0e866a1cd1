//! Release log command.

use anyhow::{Context, Result};
use clap::Args;
use cueckoo_config::{Credentials, find_and_load_config};
use cueckoo_core::{ReleaseRange, generate_release_log};
use tracing::debug;

use super::{github_client, main_repo};

/// Long help for the releaselog command.
pub const LONG_ABOUT: &str = "\
Generates a bullet list of commits similar to the GitHub change log that is
automatically created for a release in a repository that uses pull requests.
Projects reviewed on Gerrit do not use PRs, so GitHub refuses to generate one.

RANGE_START and RANGE_END are both required. The arguments are interpreted in a
similar way to:

    git log $RANGE_START..$RANGE_END

Like git log, commits are read in reverse chronological order; the list is
printed oldest first.";

/// Arguments for the releaselog command.
#[derive(Debug, Args)]
pub struct ReleaselogArgs {
    /// RANGE_START and RANGE_END, e.g. `v0.8.0-alpha.1 master`
    #[arg(value_name = "REF", num_args = 0..)]
    pub refs: Vec<String>,
}

/// Runs the releaselog command.
pub fn run(args: &ReleaselogArgs) -> Result<()> {
    // Validate before touching the network
    let range = ReleaseRange::from_args(&args.refs)?;

    let config = find_and_load_config().context("failed to load configuration")?;
    let client = github_client(&config)?;
    let client = match Credentials::discover(&client.credential_host()) {
        Some(creds) => client.with_basic_auth(creds.user, creds.token),
        None => {
            debug!("no GitHub credentials found, using anonymous access");
            client
        }
    };

    let log = generate_release_log(&client, &main_repo(&config), &range)?;

    print!("{log}");
    Ok(())
}
