//! Parsing of problem and section references given on the command line.
//!
//! Only the digit runs matter, so `6.5:15`, `6-5-15` and `6 5 15` all name
//! problem 15 of chapter 6 section 5.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use anyhow::{bail, Result};
use regex::Regex;

static NUMBERS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]+").expect("valid regex"));

fn numbers(s: &str) -> Result<Vec<u32>> {
    NUMBERS
        .find_iter(s)
        .map(|m| {
            m.as_str()
                .parse::<u32>()
                .map_err(|_| anyhow::anyhow!("number too large: {}", m.as_str()))
        })
        .collect()
}

/// `chapter.section:problem`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProblemRef {
    pub chapter: u32,
    pub section: u32,
    pub problem: u32,
}

impl FromStr for ProblemRef {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match numbers(s)?.as_slice() {
            &[chapter, section, problem] => Ok(Self {
                chapter,
                section,
                problem,
            }),
            _ => bail!("expected chapter.section:problem, got `{s}`"),
        }
    }
}

impl fmt::Display for ProblemRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}:{}", self.chapter, self.section, self.problem)
    }
}

/// `chapter.section:problems[:page]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionSpec {
    pub chapter: u32,
    pub section: u32,
    pub problem_count: u32,
    pub page: u32,
}

impl FromStr for SectionSpec {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let (chapter, section, problem_count, page) = match numbers(s)?.as_slice() {
            &[chapter, section, problem_count] => (chapter, section, problem_count, 0),
            &[chapter, section, problem_count, page] => (chapter, section, problem_count, page),
            _ => bail!("expected chapter.section:problems[:page], got `{s}`"),
        };
        Ok(Self {
            chapter,
            section,
            problem_count,
            page,
        })
    }
}
