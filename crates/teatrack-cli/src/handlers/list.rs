//! List command handler.

use anyhow::Result;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::render_profile_table;

/// Print the whole directory as a table.
pub async fn execute(ctx: &CliContext) -> Result<()> {
    let profiles = ctx.app().directory().list().await.map_err(CliError::from)?;

    if profiles.is_empty() {
        println!("No factories registered yet.");
        return Ok(());
    }

    println!("Found {} factory profile(s):\n", profiles.len());
    print!("{}", render_profile_table(&profiles));
    Ok(())
}
