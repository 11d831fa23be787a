use super::{print_json, session::Session};
use crate::{
    cli::globals::GlobalArgs,
    guard::{GuardOutcome, NavigationGuard},
};
use anyhow::Result;
use serde::Serialize;

#[derive(Debug)]
pub struct Args {
    pub globals: GlobalArgs,
    pub paths: Vec<String>,
}

#[derive(Serialize)]
struct PathDecision {
    path: String,
    #[serde(flatten)]
    outcome: GuardOutcome,
}

/// Runs the guard for every requested path as if navigated to in order.
/// # Errors
/// Returns an error if the session cannot be opened or output fails.
pub async fn execute(args: Args) -> Result<()> {
    let session = Session::open(&args.globals).await?;
    let snapshot = session.store.snapshot();
    let mut guard = NavigationGuard::new();

    let decisions: Vec<PathDecision> = args
        .paths
        .into_iter()
        .map(|path| PathDecision {
            outcome: guard.check(&session.auth, &snapshot, &path),
            path,
        })
        .collect();

    print_json(&decisions)?;
    session.close();
    Ok(())
}
