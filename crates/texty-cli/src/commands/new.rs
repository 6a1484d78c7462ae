//! The `texty new` command.

use anyhow::Result;
use texty_core::ProblemSetManager;

use crate::session::Session;

pub fn execute(session: &Session) -> Result<()> {
    let name = session.source_name()?;
    let path = session.encoding.path_for(&name);
    anyhow::ensure!(!path.exists(), "{} already exists", path.display());

    ProblemSetManager::new(name).persist(session.encoding)?;
    println!("Created {}", path.display());
    Ok(())
}
