use crate::errors::AdapterError;
use crate::models::mission::{Choice, Mission};
use crate::models::theme::ThemeSelection;
use crate::models::{QuestionRecord, QuestionType};

const CHOICE_IDS: [&str; 5] = ["A", "B", "C", "D", "E"];

/// Builds the mission list the engine consumes, one mission per fetched
/// question, preserving input order as the 1-based ordinal.
pub fn build_missions(
    records: Vec<QuestionRecord>,
    theme: &ThemeSelection,
) -> Result<Vec<Mission>, AdapterError> {
    if records.is_empty() {
        return Err(AdapterError::NoQuestionsAvailable);
    }

    let missions = records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            let ordinal = (index + 1) as u32;
            let choices = match record.question_type {
                QuestionType::OpenEnded => Vec::new(),
                _ => map_choices(&record),
            };
            Mission {
                id: record.id,
                ordinal,
                question_type: record.question_type,
                prompt_text: record.text,
                choices,
                narrative: theme.dress(ordinal),
            }
        })
        .collect();

    Ok(missions)
}

/// Maps at most five option strings to ids A..E and marks exactly one as
/// correct. A missing or out-of-range declared index defaults to 0.
/// Multiple-correct questions are also collapsed to a single correct
/// index; the grading service is authoritative at run time anyway, so the
/// flag only matters for the offline fallback.
fn map_choices(record: &QuestionRecord) -> Vec<Choice> {
    let count = record.config.options.len().min(CHOICE_IDS.len());
    let correct_index = record
        .config
        .correct_option_index
        .filter(|&i| i < count)
        .unwrap_or(0);

    record
        .config
        .options
        .iter()
        .take(count)
        .enumerate()
        .map(|(i, text)| Choice {
            id: CHOICE_IDS[i].to_string(),
            text: text.clone(),
            is_correct: i == correct_index,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Difficulty, QuestionConfig};

    fn record(question_type: QuestionType, options: Vec<&str>, correct: Option<usize>) -> QuestionRecord {
        QuestionRecord {
            id: "q-1".to_string(),
            room_id: None,
            question_type,
            text: "¿...?".to_string(),
            score: 100.0,
            difficulty: Difficulty::Medium,
            config: QuestionConfig {
                options: options.into_iter().map(String::from).collect(),
                correct_option_index: correct,
            },
            tags: Vec::new(),
        }
    }

    #[test]
    fn declared_correct_index_is_honored() {
        let theme = ThemeSelection::default();
        let missions = build_missions(
            vec![record(QuestionType::SingleChoice, vec!["Nilo", "Amazonas"], Some(1))],
            &theme,
        )
        .unwrap();

        let choices = &missions[0].choices;
        assert_eq!(choices[0].id, "A");
        assert!(!choices[0].is_correct);
        assert!(choices[1].is_correct);
    }

    #[test]
    fn missing_index_defaults_to_first_option() {
        let theme = ThemeSelection::default();
        let missions = build_missions(
            vec![record(QuestionType::MultipleChoice, vec!["a", "b", "c"], None)],
            &theme,
        )
        .unwrap();

        assert!(missions[0].choices[0].is_correct);
        assert_eq!(missions[0].choices.iter().filter(|c| c.is_correct).count(), 1);
    }

    #[test]
    fn out_of_range_index_is_treated_as_missing() {
        let theme = ThemeSelection::default();
        let missions = build_missions(
            vec![record(QuestionType::SingleChoice, vec!["a", "b"], Some(9))],
            &theme,
        )
        .unwrap();

        assert!(missions[0].choices[0].is_correct);
    }

    #[test]
    fn options_are_capped_at_five() {
        let theme = ThemeSelection::default();
        let missions = build_missions(
            vec![record(
                QuestionType::SingleChoice,
                vec!["1", "2", "3", "4", "5", "6", "7"],
                Some(4),
            )],
            &theme,
        )
        .unwrap();

        let choices = &missions[0].choices;
        assert_eq!(choices.len(), 5);
        assert_eq!(choices.last().unwrap().id, "E");
        assert!(choices[4].is_correct);
    }

    #[test]
    fn empty_input_is_an_error() {
        let theme = ThemeSelection::default();
        let err = build_missions(Vec::new(), &theme).unwrap_err();
        assert!(matches!(err, AdapterError::NoQuestionsAvailable));
    }
}
