//! Prompt templates for solving a math problem

use crate::core::model::Model;

/// Templates for the solve request
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt shared by all models
    pub fn math_system() -> &'static str {
        "You are a math expert. Your task is to solve math problems step-by-step, \
show all work, and clearly state the final answer. Do not include any introductory text. \
Go straight to solving the problem."
    }

    /// User prompt for a prepared problem
    pub fn solve_prompt(problem: &str) -> String {
        format!(
            r#"Please solve this math problem step by step. Show all your work and clearly state the final answer.

PROBLEM:
{}

Begin solving immediately. No introductions needed."#,
            problem
        )
    }

    /// User prompt for models that tend to ask for clarification instead
    /// of answering
    pub fn insistent_solve_prompt(problem: &str) -> String {
        format!(
            r#"Please solve this math problem step by step. Show all your work and clearly state the final answer.
DO NOT respond with "I'm happy to help" or ask for more information.

PROBLEM:
{}

Solve this problem directly. Do not wait for further instructions."#,
            problem
        )
    }

    /// User prompt appropriate for `model`
    pub fn solve_prompt_for(model: &Model, problem: &str) -> String {
        if model.is_deepseek() {
            Self::insistent_solve_prompt(problem)
        } else {
            Self::solve_prompt(problem)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solve_prompt_contains_problem() {
        let prompt = PromptTemplate::solve_prompt("2 + 2 = ?");
        assert!(prompt.contains("PROBLEM:\n2 + 2 = ?"));
        assert!(prompt.contains("clearly state the final answer"));
    }

    #[test]
    fn test_deepseek_gets_insistent_prompt() {
        let prompt = PromptTemplate::solve_prompt_for(&Model::DeepSeek, "x = 1");
        assert!(prompt.contains("Do not wait for further instructions"));

        let prompt = PromptTemplate::solve_prompt_for(&Model::Claude, "x = 1");
        assert!(!prompt.contains("Do not wait"));
    }

    #[test]
    fn test_system_prompt_asks_for_final_answer() {
        assert!(PromptTemplate::math_system().contains("final answer"));
    }
}
