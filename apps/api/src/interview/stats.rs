use serde::Serialize;

use crate::models::assessment::AssessmentRow;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewStats {
    /// Mean quiz score, one decimal. `0.0` with no assessments.
    pub average_score: f64,
    pub questions_practiced: usize,
    pub latest_score: Option<f64>,
    pub assessments_taken: usize,
}

/// `assessments` must be oldest first; the last one is the latest.
pub fn compute_stats(assessments: &[AssessmentRow]) -> InterviewStats {
    let average_score = if assessments.is_empty() {
        0.0
    } else {
        let total: f64 = assessments.iter().map(|a| a.quiz_score).sum();
        (total / assessments.len() as f64 * 10.0).round() / 10.0
    };

    let questions_practiced = assessments
        .iter()
        .map(|a| a.questions.as_array().map_or(0, Vec::len))
        .sum();

    InterviewStats {
        average_score,
        questions_practiced,
        latest_score: assessments.last().map(|a| a.quiz_score),
        assessments_taken: assessments.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;
    use uuid::Uuid;

    fn assessment(score: f64, questions: usize) -> AssessmentRow {
        AssessmentRow {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            quiz_score: score,
            questions: json!(vec![json!({}); questions]),
            category: "Technical".into(),
            improvement_tip: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_stats_empty() {
        let stats = compute_stats(&[]);
        assert_eq!(stats.average_score, 0.0);
        assert_eq!(stats.questions_practiced, 0);
        assert_eq!(stats.latest_score, None);
    }

    #[test]
    fn test_stats_average_one_decimal() {
        let stats = compute_stats(&[
            assessment(70.0, 10),
            assessment(80.0, 10),
            assessment(90.0, 5),
        ]);
        assert_eq!(stats.average_score, 80.0);
        assert_eq!(stats.questions_practiced, 25);
        assert_eq!(stats.latest_score, Some(90.0));
        assert_eq!(stats.assessments_taken, 3);

        let stats = compute_stats(&[assessment(100.0, 3), assessment(100.0 / 3.0, 3)]);
        assert_eq!(stats.average_score, 66.7);
    }
}
