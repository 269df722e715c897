use crate::parser::NotationError;


#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("Empty input: {0}")]
    EmptyInput(&'static str),

    #[error("Invalid notation - {0}")]
    Notation(#[from] NotationError)
}
