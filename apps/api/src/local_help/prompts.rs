// Prompt constants for the Local-Reference resolver.

use crate::llm_client::prompts::LANGUAGE_INSTRUCTION;

/// Local help prompt template. Replace `{language_instruction}`, then `{place_query}`.
/// The location itself travels in the request's retrieval config, not in the text.
pub const LOCAL_HELP_PROMPT_TEMPLATE: &str = "Mujhe apne aas-paas ke {place_query} ki jaankari chahiye. \
    Answer in {language_instruction}.";

pub fn build_local_help_prompt(place_query: &str) -> String {
    LOCAL_HELP_PROMPT_TEMPLATE
        .replace("{language_instruction}", LANGUAGE_INSTRUCTION)
        .replace("{place_query}", place_query)
}

/// Preset place queries offered as one-tap searches.
pub const QUICK_SEARCHES: [&str; 4] = ["Police Station", "Hospital", "Govt Office", "CSC Center"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_place_query() {
        let prompt = build_local_help_prompt("Police Station");
        assert!(prompt.contains("aas-paas ke Police Station ki jaankari"));
        assert!(prompt.contains("Hinglish"));
    }

    #[test]
    fn test_prompt_does_not_embed_coordinates() {
        let prompt = build_local_help_prompt("Hospital");
        assert!(!prompt.contains("latitude"));
    }
}
