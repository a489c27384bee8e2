//! Pure computation behind the hybrid progress percentage.
//!
//! Three completion signals exist for a course: the locally tracked lesson
//! completion set, an optional server snapshot of exercise totals, and a
//! server-cached headline percentage. They are merged with a fixed
//! precedence; the breakdown always reports every signal it has, no matter
//! which one produced the headline number.

use serde::{Deserialize, Serialize};

/// Completed/total pair for one exercise category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PairProgress {
    pub total: u32,
    pub completed: u32,
}

/// Server-supplied snapshot of exercise completion for a course.
///
/// Absent when the server has no exercise data for the course yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    pub total_exercises: u32,
    pub completed_exercises: u32,
    pub quiz_progress: PairProgress,
    pub practice_progress: PairProgress,
}

/// Structured progress report: headline percent plus per-signal breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressReport {
    pub percent: u32,
    pub completed_lessons: u32,
    pub total_lessons: u32,
    pub quiz_progress: Option<PairProgress>,
    pub practice_progress: Option<PairProgress>,
}

fn percent_of(completed: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    let raw = (f64::from(completed) * 100.0 / f64::from(total)).round();
    // round() keeps us in [0, ...]; the clamp guards completed > total.
    if raw >= 100.0 {
        100
    } else if raw <= 0.0 {
        0
    } else {
        raw as u32
    }
}

/// Merge the three completion signals into one report.
///
/// Precedence for the headline percent, first applicable wins:
///
/// 1. a supplied `snapshot`, with lessons and exercises pooled into one
///    ratio;
/// 2. a positive `initial_percent` cached by the server, used verbatim;
/// 3. the locally computed lesson percentage.
#[must_use]
pub fn compute_percent(
    completed_lessons: u32,
    total_lessons: u32,
    initial_percent: Option<u32>,
    snapshot: Option<&ProgressSnapshot>,
) -> ProgressReport {
    let percent = if let Some(snapshot) = snapshot {
        let total_items = total_lessons.saturating_add(snapshot.total_exercises);
        let completed_items = completed_lessons.saturating_add(snapshot.completed_exercises);
        percent_of(completed_items, total_items)
    } else if let Some(initial) = initial_percent.filter(|p| *p > 0) {
        initial
    } else {
        percent_of(completed_lessons, total_lessons)
    };

    ProgressReport {
        percent,
        completed_lessons,
        total_lessons,
        quiz_progress: snapshot.map(|s| s.quiz_progress),
        practice_progress: snapshot.map(|s| s.practice_progress),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(total: u32, completed: u32) -> ProgressSnapshot {
        ProgressSnapshot {
            total_exercises: total,
            completed_exercises: completed,
            quiz_progress: PairProgress {
                total: total / 2,
                completed: completed / 2,
            },
            practice_progress: PairProgress {
                total: total - total / 2,
                completed: completed - completed / 2,
            },
        }
    }

    #[test]
    fn snapshot_takes_precedence_over_everything() {
        let report = compute_percent(2, 4, Some(99), Some(&snapshot(4, 2)));
        assert_eq!(report.percent, 50);
    }

    #[test]
    fn positive_initial_percent_used_verbatim_without_snapshot() {
        let report = compute_percent(1, 4, Some(73), None);
        assert_eq!(report.percent, 73);
    }

    #[test]
    fn zero_initial_percent_falls_through_to_lessons() {
        let report = compute_percent(1, 4, Some(0), None);
        assert_eq!(report.percent, 25);
    }

    #[test]
    fn lesson_percent_rounds_and_clamps() {
        assert_eq!(compute_percent(1, 3, None, None).percent, 33);
        assert_eq!(compute_percent(2, 3, None, None).percent, 67);
        assert_eq!(compute_percent(5, 4, None, None).percent, 100);
        assert_eq!(compute_percent(3, 0, None, None).percent, 0);
    }

    #[test]
    fn empty_snapshot_totals_yield_zero() {
        let report = compute_percent(0, 0, None, Some(&snapshot(0, 0)));
        assert_eq!(report.percent, 0);
    }

    #[test]
    fn breakdown_is_independent_of_headline_tier() {
        let report = compute_percent(2, 4, Some(99), Some(&snapshot(6, 3)));
        assert_eq!(report.completed_lessons, 2);
        assert_eq!(report.total_lessons, 4);
        assert_eq!(
            report.quiz_progress,
            Some(PairProgress {
                total: 3,
                completed: 1
            })
        );
        assert!(report.practice_progress.is_some());

        let no_snapshot = compute_percent(2, 4, None, None);
        assert_eq!(no_snapshot.quiz_progress, None);
        assert_eq!(no_snapshot.practice_progress, None);
    }
}
