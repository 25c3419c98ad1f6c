//! Criteria model — the three fixed categories extracted from a job
//! description and the `(category, index)` identity used everywhere a
//! criterion is scored or weighted.

use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// The three fixed sections of a parsed job description.
///
/// Everything downstream (weights, scores, the results grid) is generic over
/// this tag rather than triplicating per-section logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Responsibilities,
    CompanyCulture,
    TechnicalSkills,
}

impl Category {
    /// Fixed iteration order: responsibilities, culture, skills.
    pub const ALL: [Category; 3] = [
        Category::Responsibilities,
        Category::CompanyCulture,
        Category::TechnicalSkills,
    ];

    /// Short key prefix used in criterion keys ("resp-0", "culture-2", ...).
    pub fn key_prefix(self) -> &'static str {
        match self {
            Category::Responsibilities => "resp",
            Category::CompanyCulture => "culture",
            Category::TechnicalSkills => "skill",
        }
    }

    /// Human phrasing injected into scoring prompts.
    pub fn prompt_context(self) -> &'static str {
        match self {
            Category::Responsibilities => "job responsibilities and duties",
            Category::CompanyCulture => "company culture and work environment aspects",
            Category::TechnicalSkills => "technical skills and qualifications",
        }
    }

    fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "resp" => Some(Category::Responsibilities),
            "culture" => Some(Category::CompanyCulture),
            "skill" => Some(Category::TechnicalSkills),
            _ => None,
        }
    }
}

/// One extracted requirement, culture point, or skill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Criterion {
    /// 1-2 word label shown in grid headers.
    pub summary: String,
    /// Full requirement text fed to the scoring prompt.
    pub description: String,
}

/// Identity of a criterion: its category plus its position within that
/// category's ordered sequence. Stable for the lifetime of one parsed JD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CriterionKey {
    pub category: Category,
    pub index: usize,
}

impl CriterionKey {
    pub fn new(category: Category, index: usize) -> Self {
        Self { category, index }
    }
}

impl fmt::Display for CriterionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.category.key_prefix(), self.index)
    }
}

impl FromStr for CriterionKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (prefix, index) = s
            .rsplit_once('-')
            .ok_or_else(|| format!("invalid criterion key '{s}'"))?;
        let category = Category::from_prefix(prefix)
            .ok_or_else(|| format!("unknown criterion category in key '{s}'"))?;
        let index = index
            .parse::<usize>()
            .map_err(|_| format!("invalid criterion index in key '{s}'"))?;
        Ok(CriterionKey { category, index })
    }
}

// Keys travel on the wire (and in the session blob) in the original string
// form "resp-0" / "culture-1" / "skill-2".
impl Serialize for CriterionKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CriterionKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

/// Structured output of job-description parsing: three ordered criterion
/// sequences, one per category.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedJobDescription {
    pub responsibilities: Vec<Criterion>,
    pub company_culture: Vec<Criterion>,
    pub technical_skills: Vec<Criterion>,
}

impl ParsedJobDescription {
    /// The ordered criterion sequence for one category.
    pub fn section(&self, category: Category) -> &[Criterion] {
        match category {
            Category::Responsibilities => &self.responsibilities,
            Category::CompanyCulture => &self.company_culture,
            Category::TechnicalSkills => &self.technical_skills,
        }
    }

    /// All criterion keys in fixed category order.
    pub fn keys(&self) -> impl Iterator<Item = CriterionKey> + '_ {
        Category::ALL.into_iter().flat_map(move |category| {
            (0..self.section(category).len()).map(move |index| CriterionKey { category, index })
        })
    }

    pub fn criteria_count(&self) -> usize {
        Category::ALL
            .into_iter()
            .map(|c| self.section(c).len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.criteria_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn criterion(label: &str) -> Criterion {
        Criterion {
            summary: label.to_string(),
            description: format!("{label} description"),
        }
    }

    fn sample_parsed() -> ParsedJobDescription {
        ParsedJobDescription {
            responsibilities: vec![criterion("Ownership"), criterion("Delivery")],
            company_culture: vec![criterion("Collaboration")],
            technical_skills: vec![criterion("Rust")],
        }
    }

    #[test]
    fn test_key_display_uses_original_prefixes() {
        assert_eq!(
            CriterionKey::new(Category::Responsibilities, 0).to_string(),
            "resp-0"
        );
        assert_eq!(
            CriterionKey::new(Category::CompanyCulture, 3).to_string(),
            "culture-3"
        );
        assert_eq!(
            CriterionKey::new(Category::TechnicalSkills, 12).to_string(),
            "skill-12"
        );
    }

    #[test]
    fn test_key_roundtrips_through_from_str() {
        for key in [
            CriterionKey::new(Category::Responsibilities, 0),
            CriterionKey::new(Category::CompanyCulture, 7),
            CriterionKey::new(Category::TechnicalSkills, 2),
        ] {
            assert_eq!(key.to_string().parse::<CriterionKey>().unwrap(), key);
        }
    }

    #[test]
    fn test_key_rejects_unknown_prefix() {
        assert!("bonus-1".parse::<CriterionKey>().is_err());
        assert!("resp".parse::<CriterionKey>().is_err());
        assert!("resp-x".parse::<CriterionKey>().is_err());
    }

    #[test]
    fn test_key_serde_as_string() {
        let key = CriterionKey::new(Category::CompanyCulture, 1);
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"culture-1\"");
        let back: CriterionKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);
    }

    #[test]
    fn test_keys_iterate_in_fixed_category_order() {
        let parsed = sample_parsed();
        let keys: Vec<String> = parsed.keys().map(|k| k.to_string()).collect();
        assert_eq!(keys, vec!["resp-0", "resp-1", "culture-0", "skill-0"]);
    }

    #[test]
    fn test_parsed_jd_deserializes_camel_case() {
        let json = r#"{
            "responsibilities": [{"summary": "APIs", "description": "Build APIs"}],
            "companyCulture": [{"summary": "Remote", "description": "Remote-first team"}],
            "technicalSkills": [{"summary": "Rust", "description": "5+ years Rust"}]
        }"#;
        let parsed: ParsedJobDescription = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.criteria_count(), 3);
        assert_eq!(parsed.section(Category::CompanyCulture)[0].summary, "Remote");
    }
}
