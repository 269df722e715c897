#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NotationError {
    #[error("At position {0} - {1}")]
    AtPosition(usize, Box<NotationError>),

    #[error("Invalid number: {0}")]
    Number(#[from] std::num::ParseIntError),

    #[error("Dice count cannot be negative")]
    NegativeDice,

    #[error("Dice need at least one side")]
    ZeroSides,

    #[error("Input string is empty")]
    Empty,
}

impl NotationError {
    pub fn err(&self) -> &Self {
        match self {
            NotationError::AtPosition(_, err) => err.as_ref(),
            other => other
        }
    }

    pub fn pos(&self) -> Option<&usize> {
        match self {
            NotationError::AtPosition(position, _) => Some(position),
            _ => None
        }
    }

    pub fn at_pos(self, position: usize) -> Self {
        match self {
            NotationError::AtPosition(_, _) => self,
            other => NotationError::AtPosition(position, Box::new(other))
        }
    }
}

pub type Result<T> = std::result::Result<T, NotationError>;
