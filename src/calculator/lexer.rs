//! Tokenizer for canonical expressions.

use std::fmt;

use super::error::EvaluationError;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Number(f64),
    /// A name, possibly dotted (`Math.sin`).
    Ident(String),

    Plus,
    Minus,
    Star,
    StarStar,
    Slash,
    Percent,

    Less,
    LessEq,
    Greater,
    GreaterEq,
    EqEq,
    NotEq,

    LParen,
    RParen,
    Comma,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(n) => write!(f, "number {n}"),
            Token::Ident(name) => write!(f, "name {name}"),
            Token::Plus => write!(f, "`+`"),
            Token::Minus => write!(f, "`-`"),
            Token::Star => write!(f, "`*`"),
            Token::StarStar => write!(f, "`**`"),
            Token::Slash => write!(f, "`/`"),
            Token::Percent => write!(f, "`%`"),
            Token::Less => write!(f, "`<`"),
            Token::LessEq => write!(f, "`<=`"),
            Token::Greater => write!(f, "`>`"),
            Token::GreaterEq => write!(f, "`>=`"),
            Token::EqEq => write!(f, "`==`"),
            Token::NotEq => write!(f, "`!=`"),
            Token::LParen => write!(f, "`(`"),
            Token::RParen => write!(f, "`)`"),
            Token::Comma => write!(f, "`,`"),
        }
    }
}

/// A token with the byte offset where it starts.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
    pub token: Token,
    pub position: usize,
}

/// Split a canonical expression into tokens.
pub fn tokenize(src: &str) -> Result<Vec<Spanned>, EvaluationError> {
    let chars: Vec<(usize, char)> = src.char_indices().collect();
    let char_at = |i: usize| chars.get(i).map(|&(_, c)| c);
    let offset_at = |i: usize| chars.get(i).map_or(src.len(), |&(pos, _)| pos);

    let mut out = Vec::new();
    let mut i = 0;

    while let Some(c) = char_at(i) {
        let position = offset_at(i);

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        // Numbers: 12, 1.5, .5, 5., 1e9, 1.000000e+9
        if c.is_ascii_digit() || (c == '.' && char_at(i + 1).is_some_and(|n| n.is_ascii_digit())) {
            let start = i;
            while char_at(i).is_some_and(|d| d.is_ascii_digit()) {
                i += 1;
            }
            if char_at(i) == Some('.') {
                i += 1;
                while char_at(i).is_some_and(|d| d.is_ascii_digit()) {
                    i += 1;
                }
            }
            if matches!(char_at(i), Some('e' | 'E')) {
                let digits_from = match char_at(i + 1) {
                    Some('+' | '-') => i + 2,
                    _ => i + 1,
                };
                if char_at(digits_from).is_some_and(|d| d.is_ascii_digit()) {
                    i = digits_from;
                    while char_at(i).is_some_and(|d| d.is_ascii_digit()) {
                        i += 1;
                    }
                }
            }

            let literal = &src[offset_at(start)..offset_at(i)];
            let value = literal
                .parse::<f64>()
                .map_err(|_| EvaluationError::MalformedNumber {
                    literal: literal.to_string(),
                    position,
                })?;
            out.push(Spanned {
                token: Token::Number(value),
                position,
            });
            continue;
        }

        // Names: [A-Za-z][A-Za-z0-9]* ( '.' [A-Za-z][A-Za-z0-9]* )*
        if c.is_ascii_alphabetic() {
            let start = i;
            loop {
                while char_at(i).is_some_and(|d| d.is_ascii_alphanumeric()) {
                    i += 1;
                }
                if char_at(i) == Some('.') && char_at(i + 1).is_some_and(|d| d.is_ascii_alphabetic())
                {
                    i += 1;
                    continue;
                }
                break;
            }
            out.push(Spanned {
                token: Token::Ident(src[offset_at(start)..offset_at(i)].to_string()),
                position,
            });
            continue;
        }

        let next = char_at(i + 1);
        let (token, width) = match (c, next) {
            ('*', Some('*')) => (Token::StarStar, 2),
            ('<', Some('=')) => (Token::LessEq, 2),
            ('>', Some('=')) => (Token::GreaterEq, 2),
            ('=', Some('=')) => (Token::EqEq, 2),
            ('!', Some('=')) => (Token::NotEq, 2),
            ('+', _) => (Token::Plus, 1),
            ('-', _) => (Token::Minus, 1),
            ('*', _) => (Token::Star, 1),
            ('/', _) => (Token::Slash, 1),
            ('%', _) => (Token::Percent, 1),
            ('<', _) => (Token::Less, 1),
            ('>', _) => (Token::Greater, 1),
            ('(', _) => (Token::LParen, 1),
            (')', _) => (Token::RParen, 1),
            (',', _) => (Token::Comma, 1),
            _ => {
                return Err(EvaluationError::UnexpectedCharacter {
                    character: c,
                    position,
                });
            }
        };
        out.push(Spanned { token, position });
        i += width;
    }

    Ok(out)
}
