mod ids;
mod quiz;
mod test_case;

pub use ids::{CourseId, LessonId, OptionId, PracticeId, QuestionId, QuizId, TestCaseId};
pub use quiz::{
    QuestionOutcome, QuizAnswer, QuizDefinition, QuizError, QuizOption, QuizQuestion,
    QuizSubmissionRecord, SelectionMode,
};
pub use test_case::{SubmissionResult, TestCase, TestResult};
