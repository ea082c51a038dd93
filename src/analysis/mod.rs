pub mod analyzer;
pub mod stopword;
pub mod token;
