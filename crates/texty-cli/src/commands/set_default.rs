//! The `texty default` command.

use anyhow::Result;

use crate::session::{strip_extension, Session};

pub fn execute(session: &Session, name: Option<String>) -> Result<()> {
    let store = session.default_store();
    match name {
        Some(name) => {
            let name = strip_extension(&name);
            store.write(&name)?;
            println!("Default book set to {name}");
        }
        None => match store.read()? {
            Some(name) => println!("{name}"),
            None => println!("No default book set."),
        },
    }
    Ok(())
}
