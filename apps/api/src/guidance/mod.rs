// Guidance: free-text civic problem → fixed-section markdown guidance document.
// All backend calls go through llm_client; nothing here talks HTTP to Gemini.

pub mod handlers;
pub mod prompts;
pub mod resolver;
