use super::{print_json, session::Session};
use crate::{cli::globals::GlobalArgs, sidebar::compose};
use anyhow::Result;

#[derive(Debug)]
pub struct Args {
    pub globals: GlobalArgs,
    pub filter: String,
}

/// Prints the composed sidebar for the session user.
/// # Errors
/// Returns an error if the session cannot be opened or output fails.
pub async fn execute(args: Args) -> Result<()> {
    let session = Session::open(&args.globals).await?;
    let view = compose(
        &session.store.snapshot(),
        &args.filter,
        session.auth.session_user(),
    );
    print_json(&view)?;
    session.close();
    Ok(())
}
