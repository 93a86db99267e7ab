pub mod prompt;
pub mod time;
