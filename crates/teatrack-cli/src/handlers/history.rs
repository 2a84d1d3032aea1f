//! History command handler.

use anyhow::Result;
use teatrack_core::ProfileId;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::render_history;

/// Print the snapshot sequence for a profile.
///
/// Like the HTTP route, an unknown id simply has no history.
pub async fn execute(ctx: &CliContext, id: ProfileId) -> Result<()> {
    let history = ctx.app().history().history(id).await.map_err(CliError::from)?;

    if history.is_empty() {
        println!("No price history for profile {id}.");
        return Ok(());
    }
    print!("{}", render_history(&history));
    Ok(())
}
