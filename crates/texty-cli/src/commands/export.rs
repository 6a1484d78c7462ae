//! The `texty export` command.

use anyhow::Result;
use texty_core::StorageEncoding;

use crate::session::{timestamped_path, Session};

pub fn execute(session: &Session, to: StorageEncoding, timestamp: bool) -> Result<()> {
    let psm = session.open_manager()?;
    let path = if timestamp {
        timestamped_path(psm.source_name(), to)
    } else {
        to.path_for(psm.source_name())
    };
    anyhow::ensure!(
        path != session.source_path()?,
        "{} is the file being read; pick a different encoding or --timestamp",
        path.display()
    );

    psm.persist_to(to, &path)?;
    println!("Saved {}", path.display());
    Ok(())
}
