//! The `texty mark` command.

use anyhow::Result;
use texty_core::{Outcome, ProblemSetManager, StorageEncoding};

use crate::problem_ref::ProblemRef;
use crate::session::{timestamped_path, Session};

pub fn execute(
    session: &Session,
    correct: &[String],
    incorrect: &[String],
    timestamp: bool,
) -> Result<()> {
    anyhow::ensure!(
        !correct.is_empty() || !incorrect.is_empty(),
        "nothing to mark: pass --correct and/or --incorrect"
    );

    let mut psm = session.open_manager()?;

    let marks = correct
        .iter()
        .map(|raw| (raw, Outcome::Correct))
        .chain(incorrect.iter().map(|raw| (raw, Outcome::Incorrect)));

    let mut recorded = 0;
    let mut failed = 0;
    for (raw, outcome) in marks {
        match apply(&mut psm, raw, outcome) {
            Ok(()) => recorded += 1,
            Err(e) => {
                failed += 1;
                eprintln!("Problem not in problem set! {raw}: {e:#}");
            }
        }
    }

    psm.rank_by_performance();
    psm.persist(session.encoding)?;
    println!(
        "Recorded {recorded} answer(s), {failed} skipped; saved {}",
        session.encoding.path_for(psm.source_name()).display()
    );

    if timestamp {
        let path = timestamped_path(psm.source_name(), StorageEncoding::Text);
        psm.persist_to(StorageEncoding::Text, &path)?;
        println!("Saved {}", path.display());
    }

    Ok(())
}

fn apply(psm: &mut ProblemSetManager, raw: &str, outcome: Outcome) -> Result<()> {
    let r: ProblemRef = raw.parse()?;
    match outcome {
        Outcome::Correct => psm.mark_right(r.chapter, r.section, r.problem)?,
        Outcome::Incorrect => psm.mark_wrong(r.chapter, r.section, r.problem)?,
    }
    Ok(())
}
