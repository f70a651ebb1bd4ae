//! Quiz shape and grading.

use serde::{Deserialize, Serialize};

pub const QUIZ_LENGTH: usize = 10;
pub const OPTIONS_PER_QUESTION: usize = 4;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    #[serde(default)]
    pub explanation: String,
}

impl QuizQuestion {
    fn is_well_formed(&self) -> bool {
        !self.question.trim().is_empty()
            && self.options.len() == OPTIONS_PER_QUESTION
            && self.options.contains(&self.correct_answer)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quiz {
    pub questions: Vec<QuizQuestion>,
}

impl Quiz {
    /// Keeps the well-formed questions, capped at [`QUIZ_LENGTH`]. `None` if nothing usable is left.
    pub fn checked(self) -> Option<Quiz> {
        let questions: Vec<QuizQuestion> = self
            .questions
            .into_iter()
            .filter(QuizQuestion::is_well_formed)
            .take(QUIZ_LENGTH)
            .collect();
        (!questions.is_empty()).then_some(Quiz { questions })
    }
}

/// One answered question as stored with the assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResult {
    pub question: String,
    pub answer: String,
    pub user_answer: Option<String>,
    pub is_correct: bool,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Graded {
    pub results: Vec<QuestionResult>,
    /// `correct / total * 100`.
    pub score: f64,
}

impl Graded {
    pub fn wrong(&self) -> impl Iterator<Item = &QuestionResult> {
        self.results.iter().filter(|r| !r.is_correct)
    }
}

/// Grades `answers` against `questions` by position. A missing answer counts as wrong.
pub fn grade(questions: &[QuizQuestion], answers: &[Option<String>]) -> Graded {
    let results: Vec<QuestionResult> = questions
        .iter()
        .enumerate()
        .map(|(i, q)| {
            let user_answer = answers.get(i).cloned().flatten();
            QuestionResult {
                question: q.question.clone(),
                answer: q.correct_answer.clone(),
                is_correct: user_answer.as_deref() == Some(q.correct_answer.as_str()),
                user_answer,
                explanation: q.explanation.clone(),
            }
        })
        .collect();

    let score = if results.is_empty() {
        0.0
    } else {
        let correct = results.iter().filter(|r| r.is_correct).count();
        correct as f64 / results.len() as f64 * 100.0
    };

    Graded { results, score }
}

/// Text block listing wrong answers for the improvement tip prompt.
pub fn describe_wrong_answers(graded: &Graded) -> String {
    graded
        .wrong()
        .map(|r| {
            format!(
                "Question: \"{}\"\nCorrect answer: \"{}\"\nCandidate answer: \"{}\"",
                r.question,
                r.answer,
                r.user_answer.as_deref().unwrap_or("(no answer)")
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(n: usize) -> QuizQuestion {
        QuizQuestion {
            question: format!("Question {n}?"),
            options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
            correct_answer: "b".into(),
            explanation: "b is right".into(),
        }
    }

    #[test]
    fn test_grade_scores_percentage() {
        let questions: Vec<_> = (0..4).map(question).collect();
        let answers = vec![Some("b".into()), Some("a".into()), Some("b".into()), None];
        let graded = grade(&questions, &answers);
        assert_eq!(graded.score, 50.0);
        assert_eq!(graded.wrong().count(), 2);
        assert!(graded.results[0].is_correct);
        assert_eq!(graded.results[3].user_answer, None);
    }

    #[test]
    fn test_grade_missing_answers_are_wrong() {
        let questions: Vec<_> = (0..2).map(question).collect();
        let graded = grade(&questions, &[Some("b".into())]);
        assert_eq!(graded.score, 50.0);
    }

    #[test]
    fn test_grade_empty_quiz() {
        assert_eq!(grade(&[], &[]).score, 0.0);
    }

    #[test]
    fn test_checked_drops_malformed_questions() {
        let mut bad_answer = question(1);
        bad_answer.correct_answer = "z".into();
        let mut three_options = question(2);
        three_options.options.pop();
        let quiz = Quiz {
            questions: vec![question(0), bad_answer, three_options],
        };
        let checked = quiz.checked().unwrap();
        assert_eq!(checked.questions, vec![question(0)]);

        let empty = Quiz { questions: vec![] };
        assert!(empty.checked().is_none());
    }

    #[test]
    fn test_checked_caps_length() {
        let quiz = Quiz {
            questions: (0..14).map(question).collect(),
        };
        assert_eq!(quiz.checked().unwrap().questions.len(), QUIZ_LENGTH);
    }

    #[test]
    fn test_question_parses_camel_case() {
        let json = r#"{"question":"Q?","options":["a","b","c","d"],"correctAnswer":"c","explanation":"e"}"#;
        let q: QuizQuestion = serde_json::from_str(json).unwrap();
        assert_eq!(q.correct_answer, "c");
    }

    #[test]
    fn test_describe_wrong_answers() {
        let questions = vec![question(0), question(1)];
        let graded = grade(&questions, &[Some("b".into()), None]);
        let text = describe_wrong_answers(&graded);
        assert!(text.contains("Question 1?"));
        assert!(text.contains("(no answer)"));
        assert!(!text.contains("Question 0?"));
    }
}
