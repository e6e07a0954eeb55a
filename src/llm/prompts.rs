//! Fixed instructions and sampling parameters for transcript analysis.

/// System instruction for the summarization call.
pub const SUMMARY_INSTRUCTION: &str = "You are an expert customer service analyst. \
Your task is to read the call transcript and produce a concise summary. \
The summary must be 2–3 sentences long, clear, and professional. \
Do not include any extra commentary.";

pub const SUMMARY_TEMPERATURE: f32 = 0.2;
pub const SUMMARY_MAX_TOKENS: u32 = 150;

/// System instruction for the sentiment call. The user message is the
/// transcript itself, not the summary.
pub const SENTIMENT_INSTRUCTION: &str = "You are an AI sentiment analyzer. \
Classify the customer’s overall sentiment in the transcript. \
Respond with only one word: Positive, Negative, or Neutral. \
Do not include any explanation.";

pub const SENTIMENT_TEMPERATURE: f32 = 0.1;
pub const SENTIMENT_MAX_TOKENS: u32 = 5;
