// All LLM prompt constants for the coverage module.

/// System prompt for JD parsing — enforces JSON-only output.
pub const JD_PARSE_SYSTEM: &str =
    "You are an expert at analyzing job descriptions and extracting key information. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// JD parsing prompt template. Replace `{jd_text}` before sending.
pub const JD_PARSE_PROMPT_TEMPLATE: &str = r#"Analyze the following job description and extract key information into three categories:

1. Responsibilities: List 5-8 main job responsibilities and duties
2. Company Culture: List 3-5 cultural values, work environment, or company characteristics mentioned
3. Technical Skills: List 5-8 technical skills, tools, technologies, or qualifications required

Job Description:
{jd_text}

Respond with a JSON object in this EXACT format:
{
  "responsibilities": [
    {
      "summary": "1-2 word summary",
      "description": "full responsibility description"
    }
  ],
  "companyCulture": [
    {
      "summary": "1-2 word summary",
      "description": "full culture point description"
    }
  ],
  "technicalSkills": [
    {
      "summary": "1-2 word summary",
      "description": "full skill description"
    }
  ]
}

For each item:
- "summary": a 1-2 word label that captures the essence (e.g., "React Development", "Team Collaboration", "Python")
- "description": the full, detailed description of the requirement, concise and to the point

Make each item concise but descriptive. Focus on the most important and specific requirements. Do not infer any information that is not explicitly stated in the job description."#;

/// System prompt for coverage scoring.
pub const COVERAGE_SCORE_SYSTEM: &str =
    "You are an experienced hiring manager who evaluates cover letters objectively. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Coverage scoring prompt template. Replace `{section_context}`, `{section}`,
/// `{bullet_points}` (numbered, one per line) and `{cover_letter}` before sending.
pub const COVERAGE_SCORE_PROMPT_TEMPLATE: &str = r#"You are a hiring manager reviewing a cover letter against {section_context} from the job description.

Job Requirements ({section}):
{bullet_points}

Cover Letter:
{cover_letter}

For each requirement above, rate how well the cover letter addresses it on a scale of 0-100, where:
- 0-30: Not addressed at all or very poorly
- 31-60: Partially addressed or mentioned briefly
- 61-80: Well addressed with good examples
- 81-100: Excellently addressed with specific, relevant examples

Respond with JSON in this exact format:
{
  "results": [
    {
      "score": 85,
      "feedback": "The cover letter demonstrates strong experience with React and provides specific examples of projects built using this technology."
    },
    {
      "score": 45,
      "feedback": "The cover letter mentions leadership but doesn't provide specific examples of team management experience."
    }
  ]
}

Provide one result object for each requirement, in the same order as listed above."#;
