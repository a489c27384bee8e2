use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(u64);

        impl $name {
            /// Creates a new identifier from its raw value.
            #[must_use]
            pub fn new(id: u64) -> Self {
                Self(id)
            }

            /// Returns the underlying u64 value.
            #[must_use]
            pub fn value(&self) -> u64 {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id!(
    /// Unique identifier for a course.
    CourseId
);
define_id!(
    /// Unique identifier for a lesson within a course.
    LessonId
);
define_id!(
    /// Unique identifier for a quiz.
    QuizId
);
define_id!(
    /// Unique identifier for a quiz question.
    QuestionId
);
define_id!(
    /// Unique identifier for an answer option.
    OptionId
);
define_id!(
    /// Unique identifier for a code-exercise test case.
    TestCaseId
);
define_id!(
    /// Unique identifier for a practice exercise.
    PracticeId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_includes_type_name() {
        assert_eq!(format!("{:?}", LessonId::new(7)), "LessonId(7)");
        assert_eq!(format!("{:?}", OptionId::new(42)), "OptionId(42)");
    }

    #[test]
    fn display_is_raw_value() {
        assert_eq!(QuizId::new(3).to_string(), "3");
        assert_eq!(CourseId::new(11).value(), 11);
    }
}
