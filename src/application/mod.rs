pub mod app_error;
pub mod email_templates;
pub mod priority_score;
pub mod use_cases;
pub mod validators;
