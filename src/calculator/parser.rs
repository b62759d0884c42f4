//! Recursive-descent parser turning a canonical expression into a tree.
//!
//! Precedence, lowest first:
//!
//! ```text
//! equality        ==  !=
//! relational      <  >  <=  >=
//! additive        +  -
//! multiplicative  *  /  %
//! unary           +x  -x
//! exponent        **          (right-associative)
//! primary         number, name, call, ( expression )
//! ```
//!
//! As in the host notation the canonical form comes from, `-2 ** 2` is a
//! syntax error: a unary operand on the left of `**` must be parenthesized.

use std::fmt;

use super::error::EvaluationError;
use super::lexer::{Spanned, Token, tokenize};
use super::vocabulary::{self, Arity, Constant, Function, Name};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Plus,
    Neg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Pow,
    Less,
    LessEq,
    Greater,
    GreaterEq,
    Eq,
    NotEq,
}

impl BinaryOp {
    fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Rem => "%",
            BinaryOp::Pow => "**",
            BinaryOp::Less => "<",
            BinaryOp::LessEq => "<=",
            BinaryOp::Greater => ">",
            BinaryOp::GreaterEq => ">=",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Constant(Constant),
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Call {
        function: Function,
        args: Vec<Expr>,
    },
    Factorial(Box<Expr>),
}

/// Fully parenthesized rendering, handy to inspect precedence.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Number(n) => write!(f, "{n}"),
            Expr::Constant(c) => write!(f, "{}", c.name()),
            Expr::Unary { op, operand } => match op {
                UnaryOp::Plus => write!(f, "(+{operand})"),
                UnaryOp::Neg => write!(f, "(-{operand})"),
            },
            Expr::Binary { op, lhs, rhs } => write!(f, "({lhs} {} {rhs})", op.symbol()),
            Expr::Call { function, args } => {
                write!(f, "{}(", function.name())?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                write!(f, ")")
            }
            Expr::Factorial(arg) => write!(f, "{}({arg})", vocabulary::FACTORIAL),
        }
    }
}

/// Parse a canonical expression. Nesting beyond `max_depth` is refused.
pub fn parse(src: &str, max_depth: usize) -> Result<Expr, EvaluationError> {
    let tokens = tokenize(src)?;
    if tokens.is_empty() {
        return Err(EvaluationError::Empty);
    }

    let mut parser = Parser {
        tokens: &tokens,
        pos: 0,
        depth: 0,
        max_depth,
    };
    let expr = parser.parse_expression()?;

    match parser.peek() {
        Some(extra) => Err(unexpected(extra)),
        None => Ok(expr),
    }
}

struct Parser<'a> {
    tokens: &'a [Spanned],
    pos: usize,
    depth: usize,
    max_depth: usize,
}

fn unexpected(spanned: &Spanned) -> EvaluationError {
    EvaluationError::UnexpectedToken {
        found: spanned.token.to_string(),
        position: spanned.position,
    }
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&'a Spanned> {
        self.tokens.get(self.pos)
    }

    fn peek_token(&self) -> Option<&'a Token> {
        self.peek().map(|s| &s.token)
    }

    fn next(&mut self) -> Result<&'a Spanned, EvaluationError> {
        let spanned = self.peek().ok_or(EvaluationError::UnexpectedEnd)?;
        self.pos += 1;
        Ok(spanned)
    }

    fn eat(&mut self, token: &Token) -> bool {
        if self.peek_token() == Some(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: &Token) -> Result<(), EvaluationError> {
        let spanned = self.next()?;
        if &spanned.token == token {
            Ok(())
        } else {
            Err(unexpected(spanned))
        }
    }

    /// Run `f` one nesting level deeper.
    fn nested<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, EvaluationError>,
    ) -> Result<T, EvaluationError> {
        if self.depth >= self.max_depth {
            return Err(EvaluationError::TooDeep {
                limit: self.max_depth,
            });
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    fn parse_expression(&mut self) -> Result<Expr, EvaluationError> {
        self.parse_equality()
    }

    /// Left-associative chain of binary operators drawn from `ops`.
    fn parse_chain(
        &mut self,
        ops: &[(Token, BinaryOp)],
        operand: fn(&mut Self) -> Result<Expr, EvaluationError>,
    ) -> Result<Expr, EvaluationError> {
        let mut lhs = operand(self)?;
        'chain: loop {
            for (token, op) in ops {
                if self.eat(token) {
                    let rhs = operand(self)?;
                    lhs = Expr::Binary {
                        op: *op,
                        lhs: Box::new(lhs),
                        rhs: Box::new(rhs),
                    };
                    continue 'chain;
                }
            }
            return Ok(lhs);
        }
    }

    fn parse_equality(&mut self) -> Result<Expr, EvaluationError> {
        self.parse_chain(
            &[(Token::EqEq, BinaryOp::Eq), (Token::NotEq, BinaryOp::NotEq)],
            Self::parse_relational,
        )
    }

    fn parse_relational(&mut self) -> Result<Expr, EvaluationError> {
        self.parse_chain(
            &[
                (Token::Less, BinaryOp::Less),
                (Token::LessEq, BinaryOp::LessEq),
                (Token::Greater, BinaryOp::Greater),
                (Token::GreaterEq, BinaryOp::GreaterEq),
            ],
            Self::parse_additive,
        )
    }

    fn parse_additive(&mut self) -> Result<Expr, EvaluationError> {
        self.parse_chain(
            &[(Token::Plus, BinaryOp::Add), (Token::Minus, BinaryOp::Sub)],
            Self::parse_multiplicative,
        )
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, EvaluationError> {
        self.parse_chain(
            &[
                (Token::Star, BinaryOp::Mul),
                (Token::Slash, BinaryOp::Div),
                (Token::Percent, BinaryOp::Rem),
            ],
            Self::parse_unary,
        )
    }

    fn unary_op(&self) -> Option<UnaryOp> {
        match self.peek_token() {
            Some(Token::Plus) => Some(UnaryOp::Plus),
            Some(Token::Minus) => Some(UnaryOp::Neg),
            _ => None,
        }
    }

    fn parse_unary(&mut self) -> Result<Expr, EvaluationError> {
        self.nested(|p| {
            if p.unary_op().is_none() {
                return p.parse_exponent();
            }
            let expr = p.parse_prefixed()?;
            match p.peek() {
                Some(Spanned {
                    token: Token::StarStar,
                    position,
                }) => Err(EvaluationError::UnaryBeforePower {
                    position: *position,
                }),
                _ => Ok(expr),
            }
        })
    }

    /// A run of prefix operators applied to a primary, without `**`.
    fn parse_prefixed(&mut self) -> Result<Expr, EvaluationError> {
        match self.unary_op() {
            Some(op) => {
                self.pos += 1;
                let operand = self.nested(Self::parse_prefixed)?;
                Ok(Expr::Unary {
                    op,
                    operand: Box::new(operand),
                })
            }
            None => self.parse_primary(),
        }
    }

    fn parse_exponent(&mut self) -> Result<Expr, EvaluationError> {
        let base = self.parse_primary()?;
        if !self.eat(&Token::StarStar) {
            return Ok(base);
        }
        let exponent = self.parse_unary()?;
        Ok(Expr::Binary {
            op: BinaryOp::Pow,
            lhs: Box::new(base),
            rhs: Box::new(exponent),
        })
    }

    fn parse_primary(&mut self) -> Result<Expr, EvaluationError> {
        let spanned = self.next()?;
        match &spanned.token {
            Token::Number(n) => Ok(Expr::Number(*n)),
            Token::LParen => {
                let inner = self.parse_expression()?;
                self.expect(&Token::RParen)?;
                Ok(inner)
            }
            Token::Ident(name) => self.parse_name(name),
            _ => Err(unexpected(spanned)),
        }
    }

    fn parse_name(&mut self, name: &str) -> Result<Expr, EvaluationError> {
        let resolved =
            vocabulary::lookup(name).ok_or_else(|| EvaluationError::UnknownName(name.to_string()))?;
        let called = self.peek_token() == Some(&Token::LParen);

        match resolved {
            Name::Constant(c) if called => Err(EvaluationError::NotCallable(c.name().to_string())),
            Name::Constant(c) => Ok(Expr::Constant(c)),
            Name::Function(_) | Name::Factorial if !called => {
                Err(EvaluationError::NotAValue(name.to_string()))
            }
            Name::Function(function) => {
                let args = self.parse_arguments()?;
                if let Arity::Exact(expected) = function.arity()
                    && args.len() != expected
                {
                    return Err(EvaluationError::Arity {
                        name: function.name().to_string(),
                        expected,
                        found: args.len(),
                    });
                }
                Ok(Expr::Call { function, args })
            }
            Name::Factorial => {
                let mut args = self.parse_arguments()?;
                match (args.pop(), args.is_empty()) {
                    (Some(arg), true) => Ok(Expr::Factorial(Box::new(arg))),
                    (popped, _) => Err(EvaluationError::Arity {
                        name: vocabulary::FACTORIAL.to_string(),
                        expected: 1,
                        found: args.len() + usize::from(popped.is_some()),
                    }),
                }
            }
        }
    }

    /// `( [expr {, expr}] )`
    fn parse_arguments(&mut self) -> Result<Vec<Expr>, EvaluationError> {
        self.expect(&Token::LParen)?;
        let mut args = Vec::new();
        if self.eat(&Token::RParen) {
            return Ok(args);
        }
        loop {
            args.push(self.parse_expression()?);
            let spanned = self.next()?;
            match spanned.token {
                Token::Comma => continue,
                Token::RParen => return Ok(args),
                _ => return Err(unexpected(spanned)),
            }
        }
    }
}
