// Local fallback responder: deterministic answers from the resume text alone.
// Used whenever the generative endpoint is unconfigured, out of quota, or failing.

pub mod corpus;
pub mod fallback;
pub mod tokenizer;

pub use fallback::respond;
