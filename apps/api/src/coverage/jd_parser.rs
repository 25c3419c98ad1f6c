//! JD parser — extracts the three criterion categories from a raw job
//! description via the LLM, then shape-validates the result.

use crate::coverage::criteria::{Category, ParsedJobDescription};
use crate::coverage::prompts::{JD_PARSE_PROMPT_TEMPLATE, JD_PARSE_SYSTEM};
use crate::errors::AppError;
use crate::llm_client::LlmClient;

/// Parses a job description into ordered criterion sequences.
pub async fn parse_job_description(
    jd_text: &str,
    llm: &LlmClient,
) -> Result<ParsedJobDescription, AppError> {
    let prompt = JD_PARSE_PROMPT_TEMPLATE.replace("{jd_text}", jd_text);
    let parsed: ParsedJobDescription = llm
        .call_json(&prompt, JD_PARSE_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("JD parsing failed: {e}")))?;

    validate_parsed(&parsed)?;
    Ok(parsed)
}

/// Every item must carry a non-empty summary and description; an all-empty
/// parse is a failure of this call.
fn validate_parsed(parsed: &ParsedJobDescription) -> Result<(), AppError> {
    if parsed.is_empty() {
        return Err(AppError::Llm(
            "JD parsing returned no criteria in any category".to_string(),
        ));
    }

    for category in Category::ALL {
        for (index, item) in parsed.section(category).iter().enumerate() {
            if item.summary.trim().is_empty() || item.description.trim().is_empty() {
                return Err(AppError::Llm(format!(
                    "Invalid {} item at index {index}: missing summary or description",
                    category.key_prefix()
                )));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coverage::criteria::Criterion;

    fn item(summary: &str, description: &str) -> Criterion {
        Criterion {
            summary: summary.to_string(),
            description: description.to_string(),
        }
    }

    #[test]
    fn test_validate_accepts_well_formed_parse() {
        let parsed = ParsedJobDescription {
            responsibilities: vec![item("APIs", "Design and build REST APIs")],
            company_culture: vec![item("Remote", "Remote-first, async culture")],
            technical_skills: vec![item("Rust", "5+ years of Rust")],
        };
        assert!(validate_parsed(&parsed).is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_parse() {
        let parsed = ParsedJobDescription::default();
        assert!(matches!(
            validate_parsed(&parsed),
            Err(AppError::Llm(_))
        ));
    }

    #[test]
    fn test_validate_rejects_blank_summary() {
        let parsed = ParsedJobDescription {
            responsibilities: vec![item("  ", "Ship features")],
            ..Default::default()
        };
        let err = validate_parsed(&parsed).unwrap_err();
        assert!(err.to_string().contains("resp"));
    }

    #[test]
    fn test_validate_rejects_blank_description() {
        let parsed = ParsedJobDescription {
            technical_skills: vec![item("Rust", "")],
            ..Default::default()
        };
        let err = validate_parsed(&parsed).unwrap_err();
        assert!(err.to_string().contains("skill"));
    }
}
