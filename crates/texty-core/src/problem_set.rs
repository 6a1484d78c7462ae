//! A single chapter/section review record.
//!
//! A [`ProblemSet`] is identified by its `(chapter, section)` pair alone:
//! equality, hashing and the natural ordering all ignore the score fields.
//! Ranking by performance uses [`ProblemSet::quotient`] explicitly instead.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TextyError};

/// Whether an attempt was answered correctly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Correct,
    Incorrect,
}

impl Outcome {
    /// Signed score contribution: `+1` for correct, `-1` for incorrect.
    pub fn score(self) -> i8 {
        match self {
            Outcome::Correct => 1,
            Outcome::Incorrect => -1,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:+}", self.score())
    }
}

/// One recorded attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// When the attempt was recorded.
    pub at: DateTime<Utc>,
    /// Whether it was right or wrong.
    pub outcome: Outcome,
    /// Index of the problem within the set.
    pub problem: u32,
}

/// Restricts which problem indices a random draw may return.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProblemFilter {
    #[default]
    All,
    OddOnly,
    EvenOnly,
}

impl ProblemFilter {
    /// Whether `index` passes this filter.
    pub fn accepts(self, index: u32) -> bool {
        match self {
            ProblemFilter::All => true,
            ProblemFilter::OddOnly => index & 1 == 1,
            ProblemFilter::EvenOnly => index & 1 == 0,
        }
    }

    /// How many of the indices `0..problem_count` pass this filter.
    pub fn eligible(self, problem_count: u32) -> u32 {
        match self {
            ProblemFilter::All => problem_count,
            ProblemFilter::OddOnly => problem_count / 2,
            ProblemFilter::EvenOnly => problem_count - problem_count / 2,
        }
    }

    /// The `n`th accepted index, counting from zero.
    fn nth(self, n: u32) -> u32 {
        match self {
            ProblemFilter::All => n,
            ProblemFilter::OddOnly => 2 * n + 1,
            ProblemFilter::EvenOnly => 2 * n,
        }
    }
}

/// The six columns every record carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Chapter,
    Section,
    Problems,
    Page,
    Right,
    Wrong,
}

impl Field {
    /// Canonical column order, also used when writing files.
    pub const ALL: [Field; 6] = [
        Field::Chapter,
        Field::Section,
        Field::Problems,
        Field::Page,
        Field::Right,
        Field::Wrong,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Field::Chapter => "chapter",
            Field::Section => "section",
            Field::Problems => "problems",
            Field::Page => "page",
            Field::Right => "right",
            Field::Wrong => "wrong",
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

impl FromStr for Field {
    type Err = TextyError;

    fn from_str(s: &str) -> Result<Self> {
        Field::ALL
            .into_iter()
            .find(|f| f.name() == s)
            .ok_or_else(|| TextyError::format(format!("unknown header field `{s}`")))
    }
}

/// Maps each [`Field`] to its column in a text record.
///
/// Built from a header line such as `chapter\tsection\tproblems\tpage\tright\twrong`.
/// The columns may appear in any order, but each of the six names must occur
/// exactly once and nothing else may appear.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldKey {
    columns: [usize; 6],
}

impl FieldKey {
    /// Parse a tab-separated header line.
    pub fn parse(header: &str) -> Result<Self> {
        let mut columns = [usize::MAX; 6];
        let names: Vec<&str> = header.split('\t').map(str::trim).collect();
        if names.len() != Field::ALL.len() {
            return Err(TextyError::format(format!(
                "header must name exactly {} fields, found {}",
                Field::ALL.len(),
                names.len()
            )));
        }
        for (column, name) in names.into_iter().enumerate() {
            let field: Field = name.parse()?;
            if columns[field.slot()] != usize::MAX {
                return Err(TextyError::format(format!(
                    "header field `{name}` appears twice"
                )));
            }
            columns[field.slot()] = column;
        }
        Ok(Self { columns })
    }

    /// Column index of `field`.
    pub fn column(&self, field: Field) -> usize {
        self.columns[field.slot()]
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }
}

impl Default for FieldKey {
    fn default() -> Self {
        Self {
            columns: [0, 1, 2, 3, 4, 5],
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ordered = Field::ALL;
        ordered.sort_by_key(|field| self.column(*field));
        let names: Vec<&str> = ordered.iter().map(|field| field.name()).collect();
        f.write_str(&names.join("\t"))
    }
}

/// A group of problems, usually the exercises at the end of one section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProblemSet {
    pub chapter: u32,
    pub section: u32,
    /// Number of problems in the section.
    pub problem_count: u32,
    /// Page the problems start on. Informational only.
    pub page: u32,
    pub right_count: u32,
    pub wrong_count: u32,
    history: Vec<HistoryEntry>,
}

impl ProblemSet {
    /// A fresh set with no attempts recorded.
    pub fn new(chapter: u32, section: u32, problem_count: u32, page: u32) -> Self {
        Self {
            chapter,
            section,
            problem_count,
            page,
            ..Default::default()
        }
    }

    /// A set carrying existing right/wrong tallies, as read from a text record.
    pub fn with_scores(
        chapter: u32,
        section: u32,
        problem_count: u32,
        page: u32,
        right_count: u32,
        wrong_count: u32,
    ) -> Self {
        Self {
            chapter,
            section,
            problem_count,
            page,
            right_count,
            wrong_count,
            history: Vec::new(),
        }
    }

    /// Decode one tab-separated record laid out according to `key`.
    pub fn from_record(line: &str, key: &FieldKey) -> Result<Self> {
        let cells: Vec<&str> = line.split('\t').map(str::trim).collect();
        if cells.len() != key.width() {
            return Err(TextyError::format(format!(
                "expected {} columns, found {}",
                key.width(),
                cells.len()
            )));
        }
        let value = |field: Field| -> Result<u32> {
            let raw = cells[key.column(field)];
            raw.parse().map_err(|_| {
                TextyError::format(format!("invalid value `{raw}` for field `{}`", field.name()))
            })
        };
        Ok(Self::with_scores(
            value(Field::Chapter)?,
            value(Field::Section)?,
            value(Field::Problems)?,
            value(Field::Page)?,
            value(Field::Right)?,
            value(Field::Wrong)?,
        ))
    }

    /// The `(chapter, section)` pair identifying this set.
    pub fn key(&self) -> (u32, u32) {
        (self.chapter, self.section)
    }

    /// Number right minus number wrong.
    pub fn quotient(&self) -> i64 {
        i64::from(self.right_count) - i64::from(self.wrong_count)
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn mark_right(&mut self, problem: u32) -> Result<()> {
        self.record(problem, Outcome::Correct)
    }

    pub fn mark_wrong(&mut self, problem: u32) -> Result<()> {
        self.record(problem, Outcome::Incorrect)
    }

    fn record(&mut self, problem: u32, outcome: Outcome) -> Result<()> {
        if problem > self.problem_count {
            return Err(TextyError::Range {
                problem,
                problem_count: self.problem_count,
            });
        }
        let (tally, name) = match outcome {
            Outcome::Correct => (&mut self.right_count, "right"),
            Outcome::Incorrect => (&mut self.wrong_count, "wrong"),
        };
        *tally = tally.checked_add(1).ok_or(TextyError::TallyOverflow {
            chapter: self.chapter,
            section: self.section,
            tally: name,
        })?;
        self.history.push(HistoryEntry {
            at: Utc::now(),
            outcome,
            problem,
        });
        Ok(())
    }

    /// Canonical tab-separated record in [`Field::ALL`] order.
    pub fn render(&self) -> String {
        self.to_string()
    }

    /// Pick one problem uniformly from those `filter` accepts.
    pub fn sample_problem<R: Rng + ?Sized>(
        &self,
        filter: ProblemFilter,
        rng: &mut R,
    ) -> Result<SampledProblem> {
        let eligible = filter.eligible(self.problem_count);
        if eligible == 0 {
            return Err(TextyError::Domain(format!(
                "chapter {} section {} has no problem matching {filter:?}",
                self.chapter, self.section
            )));
        }
        let problem = filter.nth(rng.gen_range(0..eligible));
        Ok(SampledProblem {
            chapter: self.chapter,
            section: self.section,
            problem,
            page: self.page,
            right_count: self.right_count,
            wrong_count: self.wrong_count,
        })
    }
}

impl PartialEq for ProblemSet {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for ProblemSet {}

impl Hash for ProblemSet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl PartialOrd for ProblemSet {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ProblemSet {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl fmt::Display for ProblemSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}\t{}",
            self.chapter,
            self.section,
            self.problem_count,
            self.page,
            self.right_count,
            self.wrong_count
        )
    }
}

/// A problem drawn from a set: the set's record with the chosen problem
/// index in place of the problem count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampledProblem {
    pub chapter: u32,
    pub section: u32,
    pub problem: u32,
    pub page: u32,
    pub right_count: u32,
    pub wrong_count: u32,
}

impl fmt::Display for SampledProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}\t{}",
            self.chapter, self.section, self.problem, self.page, self.right_count, self.wrong_count
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const CANONICAL: &str = "chapter\tsection\tproblems\tpage\tright\twrong";

    #[test]
    fn decode_render_roundtrip() {
        let key = FieldKey::parse(CANONICAL).unwrap();
        let ps = ProblemSet::from_record("3\t2\t20\t45\t5\t1", &key).unwrap();
        assert_eq!(ps.render(), "3\t2\t20\t45\t5\t1");

        let again = ProblemSet::from_record(&ps.render(), &FieldKey::default()).unwrap();
        assert_eq!(again.key(), ps.key());
        assert_eq!(again.problem_count, 20);
        assert_eq!(again.page, 45);
        assert_eq!(again.right_count, 5);
        assert_eq!(again.wrong_count, 1);
    }

    #[test]
    fn decode_with_reordered_header() {
        let key = FieldKey::parse("wrong\tright\tpage\tproblems\tsection\tchapter").unwrap();
        let ps = ProblemSet::from_record("1\t5\t45\t20\t2\t3", &key).unwrap();
        assert_eq!(ps.render(), "3\t2\t20\t45\t5\t1");
        assert_eq!(key.to_string(), "wrong\tright\tpage\tproblems\tsection\tchapter");
    }

    #[test]
    fn header_errors() {
        assert!(FieldKey::parse("chapter\tsection\tproblems\tpage\tright").is_err());
        assert!(FieldKey::parse("chapter\tsection\tproblems\tpage\tright\tright").is_err());
        assert!(FieldKey::parse("chapter\tsection\tproblems\tpage\tright\tscore").is_err());
        assert_eq!(FieldKey::parse(CANONICAL).unwrap(), FieldKey::default());
    }

    #[test]
    fn record_errors() {
        let key = FieldKey::default();
        let err = ProblemSet::from_record("3\t2\tx\t45\t5\t1", &key).unwrap_err();
        assert!(err.to_string().contains("problems"));
        assert!(ProblemSet::from_record("3\t2\t20\t45\t5", &key).is_err());
        assert!(ProblemSet::from_record("3\t-2\t20\t45\t5\t1", &key).is_err());
    }

    #[test]
    fn quotient_tracks_marks() {
        let mut ps = ProblemSet::new(1, 1, 10, 0);
        assert_eq!(ps.quotient(), 0);
        ps.mark_right(1).unwrap();
        ps.mark_wrong(2).unwrap();
        ps.mark_wrong(3).unwrap();
        assert_eq!(ps.quotient(), -1);
        assert_eq!(ps.right_count, 1);
        assert_eq!(ps.wrong_count, 2);
    }

    #[test]
    fn marks_append_history() {
        let mut ps = ProblemSet::new(4, 2, 12, 88);
        ps.mark_right(3).unwrap();
        assert_eq!(ps.history().len(), 1);
        ps.mark_wrong(12).unwrap();
        assert_eq!(ps.history().len(), 2);

        let last = &ps.history()[1];
        assert_eq!(last.outcome, Outcome::Incorrect);
        assert_eq!(last.problem, 12);
        assert_eq!(ps.history()[0].outcome, Outcome::Correct);
    }

    #[test]
    fn mark_out_of_range_leaves_state_alone() {
        let mut ps = ProblemSet::new(4, 2, 12, 88);
        let err = ps.mark_right(13).unwrap_err();
        assert!(matches!(err, TextyError::Range { problem: 13, .. }));
        assert_eq!(ps.right_count, 0);
        assert!(ps.history().is_empty());
    }

    #[test]
    fn full_tally_is_an_error() {
        let key = FieldKey::default();
        let mut ps = ProblemSet::from_record("1\t1\t10\t0\t4294967295\t0", &key).unwrap();
        let err = ps.mark_right(1).unwrap_err();
        assert!(matches!(err, TextyError::TallyOverflow { tally: "right", .. }));
        assert_eq!(ps.right_count, u32::MAX);
        assert!(ps.history().is_empty());

        ps.mark_wrong(1).unwrap();
        assert_eq!(ps.wrong_count, 1);
    }

    #[test]
    fn identity_ignores_scores() {
        let a = ProblemSet::with_scores(2, 1, 39, 10, 4, 0);
        let b = ProblemSet::with_scores(2, 1, 5, 0, 0, 9);
        assert_eq!(a, b);
        assert!(ProblemSet::new(1, 9, 0, 0) < ProblemSet::new(2, 1, 0, 0));
        assert!(ProblemSet::new(2, 1, 0, 0) < ProblemSet::new(2, 3, 0, 0));
    }

    #[test]
    fn sample_even_never_odd() {
        let ps = ProblemSet::new(1, 1, 3, 0);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let pick = ps.sample_problem(ProblemFilter::EvenOnly, &mut rng).unwrap();
            assert_ne!(pick.problem, 1);
            assert!(pick.problem < 3);
        }
    }

    #[test]
    fn eligible_counts_match_accepts() {
        for count in 0..12 {
            for filter in [ProblemFilter::All, ProblemFilter::OddOnly, ProblemFilter::EvenOnly] {
                let accepted: Vec<u32> = (0..count).filter(|&i| filter.accepts(i)).collect();
                assert_eq!(filter.eligible(count), accepted.len() as u32);
                for (n, &index) in accepted.iter().enumerate() {
                    assert_eq!(filter.nth(n as u32), index);
                }
            }
        }
    }

    #[test]
    fn sample_from_huge_set_is_one_draw() {
        let ps = ProblemSet::new(1, 1, 4_000_000_000, 0);
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..100 {
            let pick = ps.sample_problem(ProblemFilter::OddOnly, &mut rng).unwrap();
            assert_eq!(pick.problem % 2, 1);
            assert!(pick.problem < 4_000_000_000);
        }
    }

    #[test]
    fn sample_with_nothing_eligible() {
        let ps = ProblemSet::new(1, 1, 1, 0);
        let mut rng = StdRng::seed_from_u64(7);
        let err = ps.sample_problem(ProblemFilter::OddOnly, &mut rng).unwrap_err();
        assert!(matches!(err, TextyError::Domain(_)));

        let empty = ProblemSet::new(1, 2, 0, 0);
        assert!(empty.sample_problem(ProblemFilter::All, &mut rng).is_err());
    }

    #[test]
    fn sampled_problem_substitutes_index() {
        let ps = ProblemSet::with_scores(6, 5, 1, 210, 2, 3);
        let mut rng = StdRng::seed_from_u64(1);
        let pick = ps.sample_problem(ProblemFilter::All, &mut rng).unwrap();
        assert_eq!(pick.to_string(), "6\t5\t0\t210\t2\t3");
    }
}
