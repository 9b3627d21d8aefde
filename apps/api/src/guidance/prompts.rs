// Prompt constants for the Guidance resolver.
// Reuses cross-cutting fragments from llm_client::prompts.

use crate::llm_client::prompts::{LANGUAGE_INSTRUCTION, PLAIN_WORDS_INSTRUCTION};

/// One mandatory section of a guidance document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuidanceSection {
    pub heading: &'static str,
    /// Placeholder body shown to the model as the shape to fill in.
    pub body: &'static str,
}

/// Sections every guidance document must contain, in this order.
pub const GUIDANCE_SECTIONS: [GuidanceSection; 7] = [
    GuidanceSection {
        heading: "Kya Problem Hai? (What is the problem?)",
        body: "[Briefly explain the problem and why it happens]",
    },
    GuidanceSection {
        heading: "Kya Documents Lagenge? (Required Documents)",
        body: "- [Document 1]\n- [Document 2]",
    },
    GuidanceSection {
        heading: "Kahan Jaana Hai? (Where to go?)",
        body: "[Mention the exact office, department, or website]",
    },
    GuidanceSection {
        heading: "Online Link (If available)",
        body: "[Provide official website links if any, else say 'Online available nahi hai']",
    },
    GuidanceSection {
        heading: "Time & Cost",
        body: "- **Time:** [Estimated time]\n- **Cost:** [Estimated cost or 'Free']",
    },
    GuidanceSection {
        heading: "Step-by-Step Process",
        body: "1. [Step 1]\n2. [Step 2]\n3. [Step 3]",
    },
    GuidanceSection {
        heading: "Common Mistakes (Dhyan Rakhein)",
        body: "- [Mistake to avoid 1]\n- [Mistake to avoid 2]",
    },
];

/// Guidance prompt template.
/// Replace: {language_instruction}, {plain_words_instruction}, {sections}, then {problem_text}.
pub const GUIDANCE_PROMPT_TEMPLATE: &str = r#"You are an expert helper for Indian citizens. The user has a problem: "{problem_text}".
Provide a step-by-step guide to solve this problem in {language_instruction}.
{plain_words_instruction}

Format the response using Markdown with the following structure:

{sections}"#;

/// Builds the guidance prompt. Pure function of `problem_text`.
pub fn build_guidance_prompt(problem_text: &str) -> String {
    let sections = GUIDANCE_SECTIONS
        .iter()
        .map(|s| format!("## {}\n{}", s.heading, s.body))
        .collect::<Vec<_>>()
        .join("\n\n");

    // problem_text goes in last so user text containing braces is never re-expanded
    GUIDANCE_PROMPT_TEMPLATE
        .replace("{language_instruction}", LANGUAGE_INSTRUCTION)
        .replace("{plain_words_instruction}", PLAIN_WORDS_INSTRUCTION)
        .replace("{sections}", &sections)
        .replace("{problem_text}", problem_text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_contains_problem_verbatim() {
        let prompt = build_guidance_prompt("Bijli bill zyada aa raha hai");
        assert!(prompt.contains("\"Bijli bill zyada aa raha hai\""));
    }

    #[test]
    fn test_sections_appear_in_fixed_order() {
        let prompt = build_guidance_prompt("Aadhaar update kaise kare");
        let positions: Vec<usize> = GUIDANCE_SECTIONS
            .iter()
            .map(|s| {
                prompt
                    .find(&format!("## {}", s.heading))
                    .unwrap_or_else(|| panic!("missing section {}", s.heading))
            })
            .collect();
        assert!(
            positions.windows(2).all(|w| w[0] < w[1]),
            "sections must be in template order"
        );
    }

    #[test]
    fn test_prompt_is_deterministic() {
        assert_eq!(
            build_guidance_prompt("Ration card nahi mila"),
            build_guidance_prompt("Ration card nahi mila")
        );
    }

    #[test]
    fn test_placeholders_in_problem_text_are_not_expanded() {
        let prompt = build_guidance_prompt("my text has {sections} in it");
        assert!(prompt.contains("my text has {sections} in it"));
        assert!(!prompt.contains("{language_instruction}"));
    }

    #[test]
    fn test_online_link_section_requires_explicit_not_available() {
        let online = GUIDANCE_SECTIONS
            .iter()
            .find(|s| s.heading.starts_with("Online Link"))
            .unwrap();
        assert!(online.body.contains("Online available nahi hai"));
    }
}
