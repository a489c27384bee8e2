use serde::{Deserialize, Serialize};

use crate::model::TestCaseId;

/// One input/expected-output pair for a code exercise.
///
/// Test cases are graded and reported in the order given; the engine never
/// reorders or deduplicates them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    pub id: TestCaseId,
    pub input: String,
    pub expected_output: String,
    /// Hidden test cases are still graded; the flag only controls whether
    /// the UI may show input/expected output to the learner.
    pub visible: bool,
}

impl TestCase {
    #[must_use]
    pub fn new(
        id: TestCaseId,
        input: impl Into<String>,
        expected_output: impl Into<String>,
        visible: bool,
    ) -> Self {
        Self {
            id,
            input: input.into(),
            expected_output: expected_output.into(),
            visible,
        }
    }
}

/// Outcome of running one test case. Immutable once produced; exactly one
/// exists per test case regardless of whether execution succeeded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestResult {
    pub test_case_id: TestCaseId,
    pub passed: bool,
    pub expected: String,
    pub actual: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TestResult {
    #[must_use]
    pub fn passed(test_case_id: TestCaseId, expected: String, actual: String) -> Self {
        Self {
            test_case_id,
            passed: true,
            expected,
            actual,
            error: None,
        }
    }

    #[must_use]
    pub fn failed(
        test_case_id: TestCaseId,
        expected: String,
        actual: String,
        error: Option<String>,
    ) -> Self {
        Self {
            test_case_id,
            passed: false,
            expected,
            actual,
            error,
        }
    }
}

/// Summary verdict over an ordered list of test results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionResult {
    success: bool,
    passed_tests: usize,
    total_tests: usize,
    results: Vec<TestResult>,
    message: String,
}

impl SubmissionResult {
    /// Build a summary from per-case results.
    ///
    /// `passed_tests` and `success` are derived from the list so the
    /// invariants `passed_tests == count(passed)` and
    /// `success == (passed_tests == total_tests && total_tests > 0)` hold by
    /// construction.
    #[must_use]
    pub fn from_results(results: Vec<TestResult>) -> Self {
        if results.is_empty() {
            return Self::empty();
        }

        let total_tests = results.len();
        let passed_tests = results.iter().filter(|r| r.passed).count();
        let success = passed_tests == total_tests;
        let message = if success {
            "All tests passed".to_string()
        } else {
            format!("{passed_tests}/{total_tests} tests passed")
        };

        Self {
            success,
            passed_tests,
            total_tests,
            results,
            message,
        }
    }

    /// The zero-test-case shape: grading never reports success with zero
    /// cases.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            success: false,
            passed_tests: 0,
            total_tests: 0,
            results: Vec::new(),
            message: "No test cases available".to_string(),
        }
    }

    #[must_use]
    pub fn success(&self) -> bool {
        self.success
    }

    #[must_use]
    pub fn passed_tests(&self) -> usize {
        self.passed_tests
    }

    #[must_use]
    pub fn total_tests(&self) -> usize {
        self.total_tests
    }

    #[must_use]
    pub fn results(&self) -> &[TestResult] {
        &self.results
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(id: u64, passed: bool) -> TestResult {
        if passed {
            TestResult::passed(TestCaseId::new(id), "1".into(), "1".into())
        } else {
            TestResult::failed(TestCaseId::new(id), "1".into(), "2".into(), None)
        }
    }

    #[test]
    fn empty_results_never_report_success() {
        let summary = SubmissionResult::from_results(Vec::new());
        assert!(!summary.success());
        assert_eq!(summary.total_tests(), 0);
        assert_eq!(summary.passed_tests(), 0);
        assert_eq!(summary.message(), "No test cases available");
    }

    #[test]
    fn all_passing_is_success() {
        let summary = SubmissionResult::from_results(vec![result(1, true), result(2, true)]);
        assert!(summary.success());
        assert_eq!(summary.passed_tests(), 2);
        assert_eq!(summary.message(), "All tests passed");
    }

    #[test]
    fn partial_pass_counts_and_message() {
        let summary =
            SubmissionResult::from_results(vec![result(1, true), result(2, false), result(3, false)]);
        assert!(!summary.success());
        assert_eq!(summary.passed_tests(), 1);
        assert_eq!(summary.total_tests(), 3);
        assert_eq!(summary.message(), "1/3 tests passed");
    }

    #[test]
    fn results_keep_input_order() {
        let summary = SubmissionResult::from_results(vec![result(9, false), result(4, true)]);
        let ids: Vec<u64> = summary
            .results()
            .iter()
            .map(|r| r.test_case_id.value())
            .collect();
        assert_eq!(ids, vec![9, 4]);
    }
}
