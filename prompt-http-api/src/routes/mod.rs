pub mod get_prompt;
pub mod health;
