use crate::category::ClueDraft;
use crate::errors::GameError;

/// The point values a finished board must carry, one clue each.
pub const CLUE_POINT_VALUES: [u32; 5] = [100, 200, 300, 400, 500];

/// Minimum number of players before a game can start.
pub const MIN_PLAYERS: usize = 2;

/// Checks every clue's point value against the allowed domain. This runs on
/// every save, draft or not, so a category can never hold an off-scale value.
///
/// # Examples
///
/// ```
/// use buzzboard_engine::category::ClueDraft;
/// use buzzboard_engine::rules::validate_point_values;
///
/// let clue = ClueDraft {
///     question: "This planet is closest to the sun".into(),
///     answer: "What is Mercury?".into(),
///     point_value: 250,
/// };
/// assert!(validate_point_values(std::slice::from_ref(&clue)).is_err());
/// ```
pub fn validate_point_values(clues: &[ClueDraft]) -> Result<(), GameError> {
    for clue in clues {
        let value = clue.point_value;
        if !(100..=500).contains(&value) || value % 100 != 0 {
            return Err(GameError::InvalidPointValue { value });
        }
    }
    Ok(())
}

/// The submission invariant: exactly five clues whose point values are the
/// set {100, 200, 300, 400, 500} in any order, each with non-blank question
/// and answer text.
pub fn validate_submission(clues: &[ClueDraft]) -> Result<(), GameError> {
    if clues.len() != CLUE_POINT_VALUES.len() {
        return Err(GameError::IncompleteCategory);
    }

    let mut values: Vec<u32> = clues.iter().map(|c| c.point_value).collect();
    values.sort_unstable();
    if values != CLUE_POINT_VALUES {
        return Err(GameError::IncompleteCategory);
    }

    if clues
        .iter()
        .any(|c| c.question.trim().is_empty() || c.answer.trim().is_empty())
    {
        return Err(GameError::BlankClueText);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clue(point_value: u32) -> ClueDraft {
        ClueDraft {
            question: format!("question for {point_value}"),
            answer: format!("answer for {point_value}"),
            point_value,
        }
    }

    #[test]
    fn point_values_outside_the_domain_are_rejected() {
        for bad in [0, 50, 150, 501, 600, 1000] {
            let result = validate_point_values(&[clue(bad)]);
            assert_eq!(result, Err(GameError::InvalidPointValue { value: bad }));
        }
        for good in CLUE_POINT_VALUES {
            assert!(validate_point_values(&[clue(good)]).is_ok());
        }
    }

    #[test]
    fn submission_accepts_the_exact_value_set_in_any_order() {
        let clues: Vec<ClueDraft> = [300, 100, 500, 200, 400].map(clue).to_vec();
        assert!(validate_submission(&clues).is_ok());
    }

    #[test]
    fn submission_rejects_wrong_counts_and_multisets() {
        let four: Vec<ClueDraft> = [100, 200, 300, 400].map(clue).to_vec();
        assert_eq!(validate_submission(&four), Err(GameError::IncompleteCategory));

        let duplicate: Vec<ClueDraft> = [100, 200, 300, 400, 400].map(clue).to_vec();
        assert_eq!(
            validate_submission(&duplicate),
            Err(GameError::IncompleteCategory)
        );

        let six: Vec<ClueDraft> = [100, 200, 300, 400, 500, 500].map(clue).to_vec();
        assert_eq!(validate_submission(&six), Err(GameError::IncompleteCategory));
    }

    #[test]
    fn submission_rejects_blank_texts() {
        let mut clues: Vec<ClueDraft> = CLUE_POINT_VALUES.map(clue).to_vec();
        clues[2].answer = "   ".into();
        assert_eq!(validate_submission(&clues), Err(GameError::BlankClueText));
    }

    #[test]
    fn drafts_may_be_incomplete_but_never_off_scale() {
        // a two-clue draft passes the unconditional check
        let partial: Vec<ClueDraft> = [100, 200].map(clue).to_vec();
        assert!(validate_point_values(&partial).is_ok());
        // but would fail submission
        assert_eq!(
            validate_submission(&partial),
            Err(GameError::IncompleteCategory)
        );
    }
}
