//! Prompt domain
//!
//! Prompts sent to every model when a problem is solved.

mod template;

pub use template::PromptTemplate;
