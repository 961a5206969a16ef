pub mod condition;
pub mod lexer;
pub mod parser;
pub mod printer;
pub mod span;
