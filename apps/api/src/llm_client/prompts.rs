// Shared prompt fragments.
// Each resolver defines its own prompts.rs alongside it; this file holds
// the pieces both of them use.

/// Register every answer is written in.
pub const LANGUAGE_INSTRUCTION: &str = "simple Hindi written in English alphabet (Hinglish) \
    mixed with simple English";

/// Appended to guidance prompts; users are not expected to know official terminology.
pub const PLAIN_WORDS_INSTRUCTION: &str = "Do NOT use technical jargon.";
