//! The problem-set collection for one book.
//!
//! [`ProblemSetManager`] owns every [`ProblemSet`] loaded from a single
//! storage location. All mutation happens in memory; nothing reaches disk
//! until [`ProblemSetManager::persist`] is called.

use std::path::Path;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::{Result, TextyError};
use crate::problem_set::{ProblemFilter, ProblemSet, SampledProblem};
use crate::sampling::{weighted_index, SamplingConfig};
use crate::statistics::AggregateStats;
use crate::storage::{self, StorageEncoding};

/// Column header used when listing problem sets for display.
pub const DISPLAY_HEADER: &str = "ch.\tsect.\tprob.\tpage\tright\twrong";

/// Loads problem sets and performs operations on them.
#[derive(Debug)]
pub struct ProblemSetManager {
    /// Storage location without its extension.
    source_name: String,
    problem_sets: Vec<ProblemSet>,
    sampling: SamplingConfig,
    rng: StdRng,
}

impl ProblemSetManager {
    /// An empty collection for `source_name`.
    pub fn new(source_name: impl Into<String>) -> Self {
        Self::from_sets(source_name, Vec::new())
    }

    /// Wrap an existing collection, keeping its order.
    pub fn from_sets(source_name: impl Into<String>, problem_sets: Vec<ProblemSet>) -> Self {
        Self {
            source_name: source_name.into(),
            problem_sets,
            sampling: SamplingConfig::default(),
            rng: StdRng::from_entropy(),
        }
    }

    /// Load `<source_name>.txt` or `<source_name>.txy`.
    ///
    /// Either the whole file decodes or an error is returned; there is no
    /// partially loaded manager.
    pub fn load(source_name: impl Into<String>, encoding: StorageEncoding) -> Result<Self> {
        let source_name = source_name.into();
        let path = encoding.path_for(&source_name);
        let problem_sets = storage::load(&path, encoding)?;
        Ok(Self::from_sets(source_name, problem_sets))
    }

    /// Use `config` for weighted picks.
    pub fn with_sampling(mut self, config: SamplingConfig) -> Self {
        self.sampling = config;
        self
    }

    /// Reseed the random generator so picks are reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    pub fn problem_sets(&self) -> &[ProblemSet] {
        &self.problem_sets
    }

    pub fn len(&self) -> usize {
        self.problem_sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.problem_sets.is_empty()
    }

    /// Position of the set for `(chapter, section)`.
    pub fn lookup(&self, chapter: u32, section: u32) -> Result<usize> {
        self.problem_sets
            .iter()
            .position(|ps| ps.key() == (chapter, section))
            .ok_or(TextyError::SectionNotFound { chapter, section })
    }

    /// The set for `(chapter, section)`.
    pub fn get(&self, chapter: u32, section: u32) -> Result<&ProblemSet> {
        let index = self.lookup(chapter, section)?;
        Ok(&self.problem_sets[index])
    }

    pub fn contains(&self, chapter: u32, section: u32) -> bool {
        self.lookup(chapter, section).is_ok()
    }

    pub fn mark_right(&mut self, chapter: u32, section: u32, problem: u32) -> Result<()> {
        let index = self.lookup(chapter, section)?;
        self.problem_sets[index].mark_right(problem)
    }

    pub fn mark_wrong(&mut self, chapter: u32, section: u32, problem: u32) -> Result<()> {
        let index = self.lookup(chapter, section)?;
        self.problem_sets[index].mark_wrong(problem)
    }

    /// Append a new, unscored set.
    ///
    /// Does not check for an existing `(chapter, section)`; use
    /// [`ProblemSetManager::contains`] first if that matters.
    pub fn add(&mut self, chapter: u32, section: u32, problem_count: u32, page: u32) {
        self.add_problem_set(ProblemSet::new(chapter, section, problem_count, page));
    }

    pub fn add_problem_set(&mut self, problem_set: ProblemSet) {
        self.problem_sets.push(problem_set);
    }

    /// Remove the first set matching `(chapter, section)`.
    ///
    /// Returns `false` (and logs a warning) when there is nothing to remove.
    pub fn remove(&mut self, chapter: u32, section: u32) -> bool {
        match self.lookup(chapter, section) {
            Ok(index) => {
                self.problem_sets.remove(index);
                true
            }
            Err(e) => {
                tracing::warn!("remove skipped: {e}");
                false
            }
        }
    }

    /// Swap the set keyed by `old_key` for `replacement`, keeping its position.
    ///
    /// Returns `false` (and logs a warning) when `old_key` is not present.
    pub fn replace(&mut self, old_key: (u32, u32), replacement: ProblemSet) -> bool {
        match self.lookup(old_key.0, old_key.1) {
            Ok(index) => {
                self.problem_sets[index] = replacement;
                true
            }
            Err(e) => {
                tracing::warn!("replace skipped: {e}");
                false
            }
        }
    }

    /// Order by `(chapter, section)`.
    pub fn sort(&mut self) {
        self.problem_sets.sort();
    }

    /// Order weakest first: ascending quotient, ties keep their current order.
    pub fn rank_by_performance(&mut self) {
        self.problem_sets.sort_by_key(ProblemSet::quotient);
    }

    /// A set drawn with a bias toward the front of the current order.
    pub fn weighted_pick(&mut self) -> Result<&ProblemSet> {
        let index = weighted_index(self.problem_sets.len(), &self.sampling, &mut self.rng)?;
        Ok(&self.problem_sets[index])
    }

    /// A weighted set pick followed by a uniform problem pick inside it.
    pub fn pick_problem(&mut self, filter: ProblemFilter) -> Result<SampledProblem> {
        let index = weighted_index(self.problem_sets.len(), &self.sampling, &mut self.rng)?;
        self.problem_sets[index].sample_problem(filter, &mut self.rng)
    }

    pub fn aggregate_stats(&self) -> AggregateStats {
        AggregateStats::compute(&self.problem_sets)
    }

    /// Save to `<source_name>.<extension>` for `encoding`.
    pub fn persist(&self, encoding: StorageEncoding) -> Result<()> {
        self.persist_to(encoding, &encoding.path_for(&self.source_name))
    }

    /// Save to an explicit destination.
    pub fn persist_to(&self, encoding: StorageEncoding, destination: &Path) -> Result<()> {
        storage::save(destination, encoding, &self.problem_sets)
    }

    /// Display header followed by one rendered record per set.
    pub fn render_listing(&self) -> String {
        let mut out = String::from(DISPLAY_HEADER);
        for ps in &self.problem_sets {
            out.push('\n');
            out.push_str(&ps.render());
        }
        out
    }
}
