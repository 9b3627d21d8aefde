// Local help: place-type query near the user's coordinate → maps-grounded
// answer plus deduplicated place links.

pub mod handlers;
pub mod prompts;
pub mod references;
pub mod resolver;
