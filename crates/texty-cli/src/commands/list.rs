//! The `texty list` command.

use anyhow::Result;

use crate::session::Session;

pub fn execute(session: &Session, by_section: bool) -> Result<()> {
    let mut psm = session.open_manager()?;
    if by_section {
        psm.sort();
    }
    println!("{}", psm.render_listing());
    Ok(())
}
