/// One signed term of a notation string.
///
/// Field text is kept raw; turning it into numbers (and deciding what a
/// malformed field means) is the parser's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token {
    Dice {
        negative: bool,
        count: Option<String>,
        sides: String
    },
    Modifier {
        negative: bool,
        value: String
    },
    /// The empty term in front of a leading `-`, as in `-2d6`.
    Empty,
    Eof,
}


/// Left-to-right scanner splitting notation into signed terms.
///
/// Term text is lowercased as it is read and whitespace is ignored
/// everywhere, so `"2 D6"` scans the same as `"2d6"`. Positions count chars
/// of the input as given. Terms are separated by `+` and `-`; every `-`
/// before a term flips its sign and runs of signs with nothing between them
/// produce no empty terms, except that input starting with `-` yields one
/// [`Token::Empty`] first.
#[derive(Debug)]
pub(crate) struct Lexer {
    input: Vec<char>,
    started: bool,
    pub position: usize,
    pub start: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            started: false,
            position: 0,
            start: 0,
        }
    }

    pub fn next_token(&mut self) -> Token {
        if !self.started {
            self.started = true;
            self.skip_whitespace();

            if self.current() == Some('-') {
                self.start = self.position;
                return Token::Empty;
            }
        }

        let negative = self.read_sign();
        self.start = self.position;

        if self.position >= self.input.len() {
            return Token::Eof;
        }

        let term = self.read_term();

        match term.split_once('d') {
            Some((count, sides)) => Token::Dice {
                negative,
                count: (!count.is_empty()).then(|| count.to_string()),
                sides: sides.to_string()
            },
            None => Token::Modifier { negative, value: term }
        }
    }

    fn current(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn skip_whitespace(&mut self) {
        while self.current().is_some_and(char::is_whitespace) {
            self.position += 1;
        }
    }

    fn read_sign(&mut self) -> bool {
        let mut negative = false;

        loop {
            self.skip_whitespace();

            match self.current() {
                Some('+') => self.position += 1,
                Some('-') => {
                    negative = !negative;
                    self.position += 1;
                }
                _ => return negative
            }
        }
    }

    fn read_term(&mut self) -> String {
        let mut term = String::new();

        while let Some(ch) = self.current() {
            match ch {
                '+' | '-' => break,
                ch if ch.is_whitespace() => {},
                ch => term.extend(ch.to_lowercase())
            }
            self.position += 1;
        }

        term
    }
}
