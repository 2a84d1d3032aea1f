//! Show command handler.

use anyhow::Result;
use teatrack_core::ProfileId;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::render_profile;

/// Print one profile with its price summary.
pub async fn execute(ctx: &CliContext, id: ProfileId) -> Result<()> {
    let view = ctx
        .app()
        .directory()
        .profile_with_history(id)
        .await
        .map_err(CliError::from)?;
    print!("{}", render_profile(&view));
    Ok(())
}
