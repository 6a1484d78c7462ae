//! The `texty add` command.

use anyhow::Result;

use crate::problem_ref::SectionSpec;
use crate::session::Session;

pub fn execute(session: &Session, specs: &[String]) -> Result<()> {
    let mut psm = session.open_manager()?;
    let mut added = 0;

    for raw in specs {
        let spec: SectionSpec = match raw.parse() {
            Ok(spec) => spec,
            Err(e) => {
                eprintln!("Skipping {raw}: {e}");
                continue;
            }
        };
        if psm.contains(spec.chapter, spec.section) {
            tracing::warn!(
                chapter = spec.chapter,
                section = spec.section,
                "problem set already exists, not adding"
            );
            eprintln!(
                "Skipping {raw}: chapter {} section {} already exists",
                spec.chapter, spec.section
            );
            continue;
        }
        psm.add(spec.chapter, spec.section, spec.problem_count, spec.page);
        added += 1;
    }

    if added > 0 {
        psm.persist(session.encoding)?;
    }
    println!(
        "Added {added} problem set(s) to {}",
        session.encoding.path_for(psm.source_name()).display()
    );
    Ok(())
}
