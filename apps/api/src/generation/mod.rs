// Resume and cover-letter generation: form parsing, the model call and the request pipeline.
// All LLM calls go through llm_client.

pub mod form;
pub mod generator;
pub mod handlers;
pub mod pipeline;
pub mod prompts;
