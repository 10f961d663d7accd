//! Integer/decimal arithmetic over entity attributes.
//!
//! Grammar:
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/' | '%') unary)*
//! unary   := ('-' | '+') unary | primary
//! primary := number | identifier | '(' expr ')'
//! ```
//!
//! Identifiers are looked up on the entity at execution time. Integer
//! arithmetic stays integral; any decimal operand promotes the operation.
//! Unknown identifiers, division by zero and null operands evaluate to null.

use std::fmt;

use super::{Formula, FormulaCompiler, FormulaEntity, FormulaError, FormulaValue};

#[derive(Debug, Clone, Copy, Default)]
pub struct ArithmeticCompiler;

impl FormulaCompiler for ArithmeticCompiler {
    fn compile(&self, source: &str) -> Result<Box<dyn Formula>, FormulaError> {
        let tokens = tokenize(source)?;
        if tokens.is_empty() {
            return Err(FormulaError::Empty);
        }

        let mut parser = Parser {
            tokens: &tokens,
            pos: 0,
            depth: 0,
        };
        let expr = parser.expression()?;
        if let Some(token) = parser.peek() {
            return Err(FormulaError::UnexpectedToken {
                token: token.kind.to_string(),
                pos: token.pos,
            });
        }

        Ok(Box::new(ArithmeticFormula { expr }))
    }
}

#[derive(Debug)]
struct ArithmeticFormula {
    expr: Expr,
}

impl Formula for ArithmeticFormula {
    fn execute(&self, entity: &dyn FormulaEntity) -> FormulaValue {
        self.expr.eval(entity)
    }
}

#[derive(Debug, Clone, PartialEq)]
enum TokenKind {
    Int(i64),
    Decimal(f64),
    Ident(String),
    Op(char),
    Open,
    Close,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Int(v) => write!(f, "{v}"),
            TokenKind::Decimal(v) => write!(f, "{v}"),
            TokenKind::Ident(name) => f.write_str(name),
            TokenKind::Op(op) => write!(f, "{op}"),
            TokenKind::Open => f.write_str("("),
            TokenKind::Close => f.write_str(")"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Token {
    kind: TokenKind,
    pos: usize,
}

fn tokenize(source: &str) -> Result<Vec<Token>, FormulaError> {
    let mut tokens = Vec::new();
    let mut chars = source.char_indices().peekable();

    while let Some(&(pos, ch)) = chars.peek() {
        let kind = match ch {
            c if c.is_whitespace() => {
                chars.next();
                continue;
            }
            c if c.is_ascii_digit() || c == '.' => {
                let mut end = pos;
                while let Some(&(i, c)) = chars.peek() {
                    if !(c.is_ascii_digit() || c == '.') {
                        break;
                    }
                    end = i + c.len_utf8();
                    chars.next();
                }
                parse_number(&source[pos..end])?
            }
            c if c.is_alphabetic() || c == '_' => {
                let mut end = pos;
                while let Some(&(i, c)) = chars.peek() {
                    if !(c.is_alphanumeric() || c == '_' || c == '.') {
                        break;
                    }
                    end = i + c.len_utf8();
                    chars.next();
                }
                TokenKind::Ident(source[pos..end].to_string())
            }
            '+' | '-' | '*' | '/' | '%' => {
                chars.next();
                TokenKind::Op(ch)
            }
            '(' => {
                chars.next();
                TokenKind::Open
            }
            ')' => {
                chars.next();
                TokenKind::Close
            }
            _ => return Err(FormulaError::UnexpectedChar { ch, pos }),
        };
        tokens.push(Token { kind, pos });
    }

    Ok(tokens)
}

fn parse_number(text: &str) -> Result<TokenKind, FormulaError> {
    let invalid = || FormulaError::InvalidNumber(text.to_string());
    if text.contains('.') {
        text.parse().map(TokenKind::Decimal).map_err(|_| invalid())
    } else {
        text.parse().map(TokenKind::Int).map_err(|_| invalid())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
}

impl BinOp {
    fn from_char(op: char) -> Option<Self> {
        match op {
            '+' => Some(BinOp::Add),
            '-' => Some(BinOp::Sub),
            '*' => Some(BinOp::Mul),
            '/' => Some(BinOp::Div),
            '%' => Some(BinOp::Rem),
            _ => None,
        }
    }

    fn apply(self, lhs: FormulaValue, rhs: FormulaValue) -> FormulaValue {
        use FormulaValue::*;
        match (lhs, rhs) {
            (Null, _) | (_, Null) => Null,
            (Int(a), Int(b)) => match self {
                BinOp::Add => Int(a.wrapping_add(b)),
                BinOp::Sub => Int(a.wrapping_sub(b)),
                BinOp::Mul => Int(a.wrapping_mul(b)),
                BinOp::Div if b == 0 => Null,
                BinOp::Div => Int(a.wrapping_div(b)),
                BinOp::Rem if b == 0 => Null,
                BinOp::Rem => Int(a.wrapping_rem(b)),
            },
            (a, b) => {
                let (a, b) = (a.as_decimal(), b.as_decimal());
                match self {
                    BinOp::Add => Decimal(a + b),
                    BinOp::Sub => Decimal(a - b),
                    BinOp::Mul => Decimal(a * b),
                    BinOp::Div | BinOp::Rem if b == 0.0 => Null,
                    BinOp::Div => Decimal(a / b),
                    BinOp::Rem => Decimal(a % b),
                }
            }
        }
    }
}

#[derive(Debug)]
enum Expr {
    Value(FormulaValue),
    Ident(String),
    Neg(Box<Expr>),
    Binary(BinOp, Box<Expr>, Box<Expr>),
}

impl Expr {
    fn eval(&self, entity: &dyn FormulaEntity) -> FormulaValue {
        match self {
            Expr::Value(v) => *v,
            Expr::Ident(name) => entity.query_value(name),
            Expr::Neg(inner) => match inner.eval(entity) {
                FormulaValue::Int(v) => FormulaValue::Int(v.wrapping_neg()),
                FormulaValue::Decimal(v) => FormulaValue::Decimal(-v),
                FormulaValue::Null => FormulaValue::Null,
            },
            Expr::Binary(op, lhs, rhs) => op.apply(lhs.eval(entity), rhs.eval(entity)),
        }
    }
}

/// Deepest expression tree the parser builds, counting parentheses, unary
/// signs and chained operators.
const MAX_NESTING: usize = 256;

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn peek_op(&self, accepted: &[char]) -> Option<BinOp> {
        match self.peek() {
            Some(Token {
                kind: TokenKind::Op(op),
                ..
            }) if accepted.contains(op) => BinOp::from_char(*op),
            _ => None,
        }
    }

    fn enter(&mut self) -> Result<(), FormulaError> {
        self.depth += 1;
        if self.depth > MAX_NESTING {
            return Err(FormulaError::TooDeep(MAX_NESTING));
        }
        Ok(())
    }

    fn expression(&mut self) -> Result<Expr, FormulaError> {
        let base = self.depth;
        let mut lhs = self.term()?;
        while let Some(op) = self.peek_op(&['+', '-']) {
            self.pos += 1;
            self.enter()?;
            let rhs = self.term()?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
        self.depth = base;
        Ok(lhs)
    }

    fn term(&mut self) -> Result<Expr, FormulaError> {
        let base = self.depth;
        let mut lhs = self.unary()?;
        while let Some(op) = self.peek_op(&['*', '/', '%']) {
            self.pos += 1;
            self.enter()?;
            let rhs = self.unary()?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
        self.depth = base;
        Ok(lhs)
    }

    fn unary(&mut self) -> Result<Expr, FormulaError> {
        let expr = match self.peek_op(&['-', '+']) {
            Some(op) => {
                self.pos += 1;
                self.enter()?;
                let inner = self.unary()?;
                self.depth -= 1;
                if op == BinOp::Sub {
                    Expr::Neg(Box::new(inner))
                } else {
                    inner
                }
            }
            None => self.primary()?,
        };
        Ok(expr)
    }

    fn primary(&mut self) -> Result<Expr, FormulaError> {
        let token = self.advance().ok_or(FormulaError::UnexpectedEnd)?;
        match &token.kind {
            TokenKind::Int(v) => Ok(Expr::Value(FormulaValue::Int(*v))),
            TokenKind::Decimal(v) => Ok(Expr::Value(FormulaValue::Decimal(*v))),
            TokenKind::Ident(name) => Ok(Expr::Ident(name.clone())),
            TokenKind::Open => {
                self.enter()?;
                let inner = self.expression()?;
                self.depth -= 1;
                match self.advance() {
                    Some(Token {
                        kind: TokenKind::Close,
                        ..
                    }) => Ok(inner),
                    Some(other) => Err(FormulaError::UnexpectedToken {
                        token: other.kind.to_string(),
                        pos: other.pos,
                    }),
                    None => Err(FormulaError::UnexpectedEnd),
                }
            }
            other => Err(FormulaError::UnexpectedToken {
                token: other.to_string(),
                pos: token.pos,
            }),
        }
    }
}
