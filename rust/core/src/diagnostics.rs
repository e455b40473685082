// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Export diagnostics: outcome counters and the user-facing failure log.

use std::fmt;
use std::ops::{Add, AddAssign};

use crate::element::{Element, ElementId};

/// Sub-operations attempted vs. succeeded
///
/// Aggregation is best-effort: a parent succeeds when any child succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Outcome {
    pub attempted: usize,
    pub succeeded: usize,
}

impl Outcome {
    pub const fn success() -> Self {
        Self {
            attempted: 1,
            succeeded: 1,
        }
    }

    pub const fn failure() -> Self {
        Self {
            attempted: 1,
            succeeded: 0,
        }
    }

    pub const fn from_bool(ok: bool) -> Self {
        if ok {
            Self::success()
        } else {
            Self::failure()
        }
    }

    /// True when at least one sub-operation succeeded
    #[inline]
    pub fn is_success(&self) -> bool {
        self.succeeded > 0
    }

    #[inline]
    pub fn failed(&self) -> usize {
        self.attempted - self.succeeded
    }
}

impl Add for Outcome {
    type Output = Outcome;

    fn add(self, rhs: Outcome) -> Outcome {
        Outcome {
            attempted: self.attempted + rhs.attempted,
            succeeded: self.succeeded + rhs.succeeded,
        }
    }
}

impl AddAssign for Outcome {
    fn add_assign(&mut self, rhs: Outcome) {
        *self = *self + rhs;
    }
}

impl std::iter::Sum for Outcome {
    fn sum<I: Iterator<Item = Outcome>>(iter: I) -> Outcome {
        iter.fold(Outcome::default(), Add::add)
    }
}

/// Identity of the element being exported, for failure messages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementContext {
    pub id: ElementId,
    pub name: String,
}

impl ElementContext {
    pub fn new(id: ElementId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl From<&Element> for ElementContext {
    fn from(element: &Element) -> Self {
        Self::new(element.id, element.name.clone())
    }
}

impl fmt::Display for ElementContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Element Id {} Name \"{}\"", self.id, self.name)
    }
}

/// Plain-text diagnostic log shown to the user after an export
///
/// Every entry is mirrored to `tracing` so embedding applications can route it.
#[derive(Debug, Clone, Default)]
pub struct ExportLog {
    lines: Vec<String>,
}

impl ExportLog {
    pub fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Record a recoverable failure of `what` (e.g. `Solid`, `Face`) on an element
    pub fn failure(&mut self, what: &str, element: &ElementContext) {
        tracing::warn!(
            element_id = element.id.value(),
            element_name = %element.name,
            what,
            "Geometry conversion failed"
        );
        self.lines.push(format!("Failed {} to Json at {}", what, element));
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn failure_count(&self) -> usize {
        self.lines.iter().filter(|l| l.starts_with("Failed ")).count()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl fmt::Display for ExportLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_sum_is_best_effort() {
        let total: Outcome = [Outcome::failure(), Outcome::success(), Outcome::failure()]
            .into_iter()
            .sum();
        assert_eq!(total.attempted, 3);
        assert_eq!(total.succeeded, 1);
        assert_eq!(total.failed(), 2);
        assert!(total.is_success());

        assert!(!Outcome::default().is_success());
        assert!(!(Outcome::failure() + Outcome::failure()).is_success());
    }

    #[test]
    fn failure_line_names_element() {
        let mut log = ExportLog::new();
        log.failure("Solid", &ElementContext::new(ElementId(42), "Basic Wall"));
        assert_eq!(
            log.lines(),
            ["Failed Solid to Json at Element Id 42 Name \"Basic Wall\""]
        );
        assert_eq!(log.failure_count(), 1);
        assert_eq!(log.to_string(), "Failed Solid to Json at Element Id 42 Name \"Basic Wall\"\n");
    }
}
