// All LLM prompt constants for the sentence rewrite module.

/// System prompt shared by both rewrite modes.
pub const REWRITE_SYSTEM: &str =
    "You are a professional writing assistant specializing in cover letters. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Improve-mode prompt template. Replace `{sentence}` before sending.
pub const IMPROVE_PROMPT_TEMPLATE: &str = r#"Given a sentence, provide exactly 3 different improved versions that sound natural and human, not like generic AI-generated text.

IMPORTANT GUIDELINES:
- Keep suggestions BRIEF and CONCISE - avoid wordy, corporate-speak
- Sound like a real human wrote it, not a robot
- Avoid cliches, buzzwords, and overly formal language
- Make subtle but meaningful improvements
- Change only 1-2 words or short phrases per suggestion
- Focus on clarity and impact, not complexity

Return the response as a JSON object with this exact structure:
{
  "suggestions": [
    "First improved sentence",
    "Second improved sentence",
    "Third improved sentence"
  ],
  "changes": [
    [{"from": "original_word_1", "to": "new_word_1"}, {"from": "original_phrase_1", "to": "new_phrase_1"}],
    [{"from": "original_word_2", "to": "new_word_2"}],
    [{"from": "original_word_3", "to": "new_word_3"}, {"from": "original_phrase_3", "to": "new_phrase_3"}]
  ]
}

Original sentence: "{sentence}""#;

/// Shorten-mode prompt template. Replace `{sentence}` before sending.
pub const SHORTEN_PROMPT_TEMPLATE: &str = r#"Given a sentence, provide exactly 3 different versions that are SHORTER and more direct, cutting out unnecessary words while keeping the meaning.

IMPORTANT GUIDELINES:
- Make sentences SIGNIFICANTLY SHORTER - aim for 20-40% word reduction
- Cut out filler words, redundant phrases, and corporate jargon
- Keep the core meaning and impact
- Sound natural and human, not robotic
- Remove unnecessary qualifiers and weak language
- Make every word count

Return the response as a JSON object with this exact structure:
{
  "suggestions": [
    "First shorter sentence",
    "Second shorter sentence",
    "Third shorter sentence"
  ],
  "changes": [
    [{"from": "original_word_1", "to": "new_word_1"}, {"from": "original_phrase_1", "to": "new_phrase_1"}],
    [{"from": "original_word_2", "to": "new_word_2"}],
    [{"from": "original_word_3", "to": "new_word_3"}, {"from": "original_phrase_3", "to": "new_phrase_3"}]
  ]
}

Original sentence: "{sentence}""#;
