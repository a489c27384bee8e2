//! Drives the sandbox over an ordered list of test cases and produces a
//! submission verdict.

use std::sync::Arc;

use assess_core::model::{SubmissionResult, TestCase, TestResult};
use assess_core::output;

use crate::execution::Executor;

/// Grades code submissions by running every test case through an
/// [`Executor`] and comparing outputs leniently.
#[derive(Clone)]
pub struct GradingService {
    executor: Arc<dyn Executor>,
}

impl GradingService {
    #[must_use]
    pub fn new(executor: Arc<dyn Executor>) -> Self {
        Self { executor }
    }

    /// Grade `code` against `test_cases`, in order.
    ///
    /// The loop is intentionally sequential: at most one execution is in
    /// flight, and results come back in input order. A failure on one case
    /// never aborts the loop; every case gets exactly one result.
    pub async fn grade(
        &self,
        language: &str,
        code: &str,
        test_cases: &[TestCase],
    ) -> SubmissionResult {
        if test_cases.is_empty() {
            tracing::info!(language, "grading skipped: no test cases");
            return SubmissionResult::empty();
        }

        let mut results = Vec::with_capacity(test_cases.len());
        for case in test_cases {
            let outcome = self.executor.execute(language, code, &case.input).await;

            let result = if outcome.success
                && output::matches(&outcome.output, &case.expected_output)
            {
                TestResult::passed(case.id, case.expected_output.clone(), outcome.output)
            } else {
                if !outcome.error.is_empty() {
                    tracing::warn!(
                        test_case = %case.id,
                        error = %outcome.error,
                        "test case execution failed"
                    );
                }
                let error = (!outcome.error.is_empty()).then_some(outcome.error);
                TestResult::failed(case.id, case.expected_output.clone(), outcome.output, error)
            };
            results.push(result);
        }

        let summary = SubmissionResult::from_results(results);
        tracing::info!(
            language,
            passed = summary.passed_tests(),
            total = summary.total_tests(),
            "grading complete"
        );
        summary
    }
}
