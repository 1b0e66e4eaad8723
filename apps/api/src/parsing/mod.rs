// Resume parsing pipeline: LLM-backed structured extraction plus the
// optional content-enhancement pass.
// All LLM calls go through llm_client; no direct provider calls here.

pub mod enhancer;
pub mod parser;
