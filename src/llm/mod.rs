//! Clients for the external model services: the optional embedding API used
//! for vector retrieval and the LLM that writes the answers.

pub mod answer;
pub mod embeddings;
