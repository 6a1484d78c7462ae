//! The `texty pick` command.

use anyhow::Result;
use texty_core::{ProblemFilter, TextyError, DISPLAY_HEADER};

use crate::session::Session;

pub fn execute(session: &Session, count: usize, odd: bool, even: bool) -> Result<()> {
    let filter = match (odd, even) {
        (true, false) => ProblemFilter::OddOnly,
        (false, true) => ProblemFilter::EvenOnly,
        _ => ProblemFilter::All,
    };

    let mut psm = session.open_manager()?;
    anyhow::ensure!(
        !psm.is_empty(),
        "{} has no problem sets to pick from",
        psm.source_name()
    );
    psm.rank_by_performance();

    println!("{DISPLAY_HEADER}");
    for _ in 0..count {
        match psm.pick_problem(filter) {
            Ok(pick) => println!("{pick}"),
            // One draw per requested problem: a set with nothing eligible
            // uses up its turn rather than being redrawn.
            Err(e @ TextyError::Domain(_)) => eprintln!("Skipped: {e}"),
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}
