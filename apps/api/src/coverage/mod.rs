// Coverage engine: criteria extracted from a job description, per-criterion
// scoring of a cover letter, weighted aggregation, and the results grid.
// All LLM calls go through llm_client — no direct Anthropic API calls here.

pub mod aggregate;
pub mod criteria;
pub mod grid;
pub mod handlers;
pub mod jd_parser;
pub mod matrix;
pub mod prompts;
pub mod scorer;
pub mod weights;
