//! Sentence rewrite collaborator — asks the LLM for exactly three
//! alternatives of one sentence, each with the `{from, to}` substitutions it
//! made. Two modes exist; the mode only changes the prompt, never the shape
//! of the result.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::llm_client::LlmClient;
use crate::sentence::prompts::{IMPROVE_PROMPT_TEMPLATE, REWRITE_SYSTEM, SHORTEN_PROMPT_TEMPLATE};

const REWRITE_MAX_TOKENS: u32 = 500;

/// Exactly this many alternatives per rewrite.
pub const SUGGESTION_COUNT: usize = 3;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RewriteMode {
    /// Subtle wording improvements, roughly length-preserving.
    #[default]
    Improve,
    /// Aggressive trimming, 20-40% shorter.
    Shorten,
}

impl RewriteMode {
    fn prompt_template(self) -> &'static str {
        match self {
            RewriteMode::Improve => IMPROVE_PROMPT_TEMPLATE,
            RewriteMode::Shorten => SHORTEN_PROMPT_TEMPLATE,
        }
    }
}

/// One token or phrase substitution, used by the UI to highlight what changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhraseChange {
    pub from: String,
    pub to: String,
}

/// Three alternative sentences plus, per alternative, its ordered changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionSet {
    pub suggestions: Vec<String>,
    pub changes: Vec<Vec<PhraseChange>>,
}

/// Requests rewrites of one sentence. Shape violations (anything other than
/// exactly three suggestions) fail this call only.
pub async fn rewrite_sentence(
    sentence: &str,
    mode: RewriteMode,
    llm: &LlmClient,
) -> Result<SuggestionSet, AppError> {
    let prompt = mode.prompt_template().replace("{sentence}", sentence);

    let raw: SuggestionSet = llm
        .call_json_with_limit(&prompt, REWRITE_SYSTEM, REWRITE_MAX_TOKENS)
        .await
        .map_err(|e| AppError::Llm(format!("Sentence rewrite failed: {e}")))?;

    validate_suggestions(raw)
}

/// Enforces the exactly-three contract and pads `changes` so every
/// suggestion has a (possibly empty) change list.
fn validate_suggestions(mut set: SuggestionSet) -> Result<SuggestionSet, AppError> {
    if set.suggestions.len() != SUGGESTION_COUNT {
        return Err(AppError::Llm(format!(
            "Rewrite returned {} suggestions, expected {SUGGESTION_COUNT}",
            set.suggestions.len()
        )));
    }
    if set.suggestions.iter().any(|s| s.trim().is_empty()) {
        return Err(AppError::Llm("Rewrite returned a blank suggestion".to_string()));
    }

    set.changes.truncate(SUGGESTION_COUNT);
    while set.changes.len() < SUGGESTION_COUNT {
        set.changes.push(Vec::new());
    }
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(suggestions: &[&str], changes: Vec<Vec<PhraseChange>>) -> SuggestionSet {
        SuggestionSet {
            suggestions: suggestions.iter().map(|s| s.to_string()).collect(),
            changes,
        }
    }

    fn change(from: &str, to: &str) -> PhraseChange {
        PhraseChange {
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    #[test]
    fn test_validate_accepts_exactly_three() {
        let validated = validate_suggestions(set(
            &["one", "two", "three"],
            vec![vec![change("a", "b")], vec![], vec![]],
        ))
        .unwrap();
        assert_eq!(validated.suggestions.len(), 3);
        assert_eq!(validated.changes.len(), 3);
    }

    #[test]
    fn test_validate_rejects_wrong_count() {
        assert!(validate_suggestions(set(&["one", "two"], vec![])).is_err());
        assert!(validate_suggestions(set(&["a", "b", "c", "d"], vec![])).is_err());
    }

    #[test]
    fn test_validate_rejects_blank_suggestion() {
        assert!(validate_suggestions(set(&["one", "  ", "three"], vec![])).is_err());
    }

    #[test]
    fn test_validate_pads_missing_change_lists() {
        let validated =
            validate_suggestions(set(&["one", "two", "three"], vec![vec![change("x", "y")]]))
                .unwrap();
        assert_eq!(validated.changes.len(), 3);
        assert!(validated.changes[1].is_empty());
        assert!(validated.changes[2].is_empty());
    }

    #[test]
    fn test_validate_truncates_extra_change_lists() {
        let validated = validate_suggestions(set(
            &["one", "two", "three"],
            vec![vec![], vec![], vec![], vec![change("x", "y")]],
        ))
        .unwrap();
        assert_eq!(validated.changes.len(), 3);
    }

    #[test]
    fn test_suggestion_set_deserializes_wire_shape() {
        let json = r#"{
            "suggestions": ["A", "B", "C"],
            "changes": [[{"from": "led", "to": "drove"}], [], []]
        }"#;
        let set: SuggestionSet = serde_json::from_str(json).unwrap();
        assert_eq!(set.suggestions[0], "A");
        assert_eq!(set.changes[0][0], PhraseChange {
            from: "led".to_string(),
            to: "drove".to_string()
        });
    }

    #[test]
    fn test_mode_serde_is_lowercase() {
        assert_eq!(
            serde_json::to_string(&RewriteMode::Shorten).unwrap(),
            "\"shorten\""
        );
        let mode: RewriteMode = serde_json::from_str("\"improve\"").unwrap();
        assert_eq!(mode, RewriteMode::Improve);
    }
}
