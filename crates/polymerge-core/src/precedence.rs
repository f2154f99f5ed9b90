//! Dispatch by operator-precedence divergence.
//!
//! A transport-composed file evaluates `[A, B][INDEX]` in both grammars. The
//! index expression is read differently by each grammar because they rank
//! bitwise OR and equality in opposite order:
//!
//! | grammar    | `1\|0==2` parses as | value   | element |
//! |------------|---------------------|---------|---------|
//! | Python     | `(1\|0) == 2`       | `False` | 0       |
//! | JavaScript | `1 \| (0 == 2)`     | `1`     | 1       |
//!
//! Python indexes a list with `False` as 0 because `bool` is an `int`.
//! JavaScript computes a number, so no boolean coercion is involved there.
//!
//! The trick only has two outcomes, so it cannot select among three or more
//! languages. A third grammar would need a different composition (the
//! literal-embedding strategy does not depend on precedence at all).
//!
//! [`DISPATCH_TABLE`] is the single source of truth for the expression and
//! element order. The rest of this module is a small static model of the
//! relevant slice of both grammars, used to verify the table without
//! running an interpreter.

use crate::language::Grammar;

/// A verified mapping from a grammar pair to its selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchRule {
    /// Selector placed between `[` and `]` after the array literal.
    pub index_expr: &'static str,
    /// Grammar whose payload sits at each array position.
    pub order: [Grammar; 2],
}

/// The Python/JavaScript rule.
pub const PYTHON_JAVASCRIPT: DispatchRule = DispatchRule {
    index_expr: "1|0==2",
    order: [Grammar::Python, Grammar::JavaScript],
};

/// Every supported pair. Checked by `tests::test_dispatch_table_is_verified`.
pub const DISPATCH_TABLE: &[DispatchRule] = &[PYTHON_JAVASCRIPT];

/// Find the rule for a grammar pair, in either order.
pub fn dispatch_rule(a: Grammar, b: Grammar) -> Option<&'static DispatchRule> {
    DISPATCH_TABLE
        .iter()
        .find(|rule| rule.order == [a, b] || rule.order == [b, a])
}

/// Error from the expression model.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExprError {
    #[error("unexpected character {0:?} at offset {1}")]
    UnexpectedChar(char, usize),

    #[error("unexpected end of expression")]
    UnexpectedEnd,

    #[error("integer literal out of range at offset {0}")]
    Overflow(usize),
}

/// Binary operators understood by the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    BitOr,
    BitXor,
    BitAnd,
    Eq,
    Ne,
}

impl Op {
    fn is_comparison(self) -> bool {
        matches!(self, Op::Eq | Op::Ne)
    }
}

impl Grammar {
    /// Binding power of a binary operator; higher binds tighter.
    pub fn binding_power(self, op: Op) -> u8 {
        match self {
            // comparisons < | < ^ < &
            Grammar::Python => match op {
                Op::Eq | Op::Ne => 1,
                Op::BitOr => 2,
                Op::BitXor => 3,
                Op::BitAnd => 4,
            },
            // | < ^ < & < equality
            Grammar::JavaScript => match op {
                Op::BitOr => 1,
                Op::BitXor => 2,
                Op::BitAnd => 3,
                Op::Eq | Op::Ne => 4,
            },
        }
    }

    /// Python chains `a == b == c` as `a == b and b == c`.
    fn chains_comparisons(self) -> bool {
        matches!(self, Grammar::Python)
    }
}

/// Parsed selector expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Int(i64),
    Binary(Box<Expr>, Op, Box<Expr>),
    /// Chained comparison: `first op0 rest0 op1 rest1 ...`.
    Compare(Box<Expr>, Vec<(Op, Expr)>),
}

/// Result of evaluating a selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Value {
    Int(i64),
    Bool(bool),
}

impl Value {
    fn as_int(self) -> i64 {
        match self {
            Value::Int(n) => n,
            Value::Bool(b) => b as i64,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Int(i64),
    Op(Op),
    Open,
    Close,
}

fn tokenize(source: &str) -> Result<Vec<(Token, usize)>, ExprError> {
    let mut tokens = Vec::new();
    let mut chars = source.char_indices().peekable();

    while let Some((pos, c)) = chars.next() {
        let token = match c {
            c if c.is_whitespace() => continue,
            '0'..='9' => {
                let mut value = c.to_digit(10).unwrap_or_default() as i64;
                while let Some(&(_, d)) = chars.peek() {
                    let Some(digit) = d.to_digit(10) else { break };
                    value = value
                        .checked_mul(10)
                        .and_then(|v| v.checked_add(digit as i64))
                        .ok_or(ExprError::Overflow(pos))?;
                    chars.next();
                }
                Token::Int(value)
            }
            '|' => Token::Op(Op::BitOr),
            '^' => Token::Op(Op::BitXor),
            '&' => Token::Op(Op::BitAnd),
            '=' | '!' => match chars.next() {
                Some((_, '=')) if c == '=' => Token::Op(Op::Eq),
                Some((_, '=')) => Token::Op(Op::Ne),
                Some((at, other)) => return Err(ExprError::UnexpectedChar(other, at)),
                None => return Err(ExprError::UnexpectedEnd),
            },
            '(' => Token::Open,
            ')' => Token::Close,
            other => return Err(ExprError::UnexpectedChar(other, pos)),
        };
        tokens.push((token, pos));
    }

    Ok(tokens)
}

struct Parser<'a> {
    grammar: Grammar,
    source: &'a str,
    tokens: Vec<(Token, usize)>,
    pos: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).map(|(t, _)| *t)
    }

    fn bump(&mut self) -> Result<(Token, usize), ExprError> {
        let next = *self.tokens.get(self.pos).ok_or(ExprError::UnexpectedEnd)?;
        self.pos += 1;
        Ok(next)
    }

    fn unexpected(&self, at: usize) -> ExprError {
        let c = self.source[at..].chars().next().unwrap_or('?');
        ExprError::UnexpectedChar(c, at)
    }

    fn atom(&mut self) -> Result<Expr, ExprError> {
        match self.bump()? {
            (Token::Int(n), _) => Ok(Expr::Int(n)),
            (Token::Open, _) => {
                let inner = self.expr(0)?;
                match self.bump()? {
                    (Token::Close, _) => Ok(inner),
                    (_, at) => Err(self.unexpected(at)),
                }
            }
            (Token::Op(_) | Token::Close, at) => Err(self.unexpected(at)),
        }
    }

    /// Precedence climbing. Operators of equal power associate to the left.
    fn expr(&mut self, min_bp: u8) -> Result<Expr, ExprError> {
        let mut lhs = self.atom()?;
        // Only comparisons produced in this loop may be extended into a chain;
        // a parenthesized comparison is a closed operand.
        let mut open_chain = false;

        while let Some(Token::Op(op)) = self.peek() {
            let bp = self.grammar.binding_power(op);
            if bp < min_bp {
                break;
            }
            self.pos += 1;
            let rhs = self.expr(bp + 1)?;

            lhs = if op.is_comparison() && self.grammar.chains_comparisons() {
                match lhs {
                    Expr::Compare(first, mut rest) if open_chain => {
                        rest.push((op, rhs));
                        Expr::Compare(first, rest)
                    }
                    other => Expr::Compare(Box::new(other), vec![(op, rhs)]),
                }
            } else {
                Expr::Binary(Box::new(lhs), op, Box::new(rhs))
            };
            open_chain = matches!(lhs, Expr::Compare(..));
        }

        Ok(lhs)
    }
}

/// Parse `source` with the operator table of `grammar`.
pub fn parse(grammar: Grammar, source: &str) -> Result<Expr, ExprError> {
    let mut parser = Parser {
        grammar,
        source,
        tokens: tokenize(source)?,
        pos: 0,
    };
    let expr = parser.expr(0)?;
    match parser.tokens.get(parser.pos) {
        None => Ok(expr),
        Some(&(_, at)) => Err(parser.unexpected(at)),
    }
}

fn apply(grammar: Grammar, op: Op, lhs: Value, rhs: Value) -> Value {
    match op {
        Op::Eq => Value::Bool(lhs.as_int() == rhs.as_int()),
        Op::Ne => Value::Bool(lhs.as_int() != rhs.as_int()),
        Op::BitOr | Op::BitXor | Op::BitAnd => {
            let (a, b) = (lhs.as_int(), rhs.as_int());
            let bits = match op {
                Op::BitOr => a | b,
                Op::BitXor => a ^ b,
                _ => a & b,
            };
            match (grammar, lhs, rhs) {
                // bool | bool stays a bool in Python.
                (Grammar::Python, Value::Bool(_), Value::Bool(_)) => Value::Bool(bits != 0),
                (Grammar::Python, _, _) => Value::Int(bits),
                // JavaScript bitwise operators always produce a 32-bit integer.
                (Grammar::JavaScript, _, _) => Value::Int(bits as i32 as i64),
            }
        }
    }
}

fn eval(grammar: Grammar, expr: &Expr) -> Value {
    match expr {
        Expr::Int(n) => Value::Int(*n),
        Expr::Binary(lhs, op, rhs) => {
            apply(grammar, *op, eval(grammar, lhs), eval(grammar, rhs))
        }
        Expr::Compare(first, rest) => {
            let mut left = eval(grammar, first);
            for (op, operand) in rest {
                let right = eval(grammar, operand);
                if apply(grammar, *op, left, right) == Value::Bool(false) {
                    return Value::Bool(false);
                }
                left = right;
            }
            Value::Bool(true)
        }
    }
}

/// Parse and evaluate `source` under `grammar`.
pub fn evaluate(grammar: Grammar, source: &str) -> Result<Value, ExprError> {
    Ok(eval(grammar, &parse(grammar, source)?))
}

/// Array element selected by `value` in a literal of `len` elements.
///
/// Python accepts booleans and negative indices. JavaScript looks a boolean
/// up as the property `"true"`/`"false"`, which no array element has.
pub fn select_index(grammar: Grammar, value: Value, len: usize) -> Option<usize> {
    let len = i64::try_from(len).ok()?;
    let index = match (grammar, value) {
        (Grammar::JavaScript, Value::Bool(_)) => return None,
        (Grammar::Python, v) if v.as_int() < 0 => v.as_int() + len,
        (_, v) => v.as_int(),
    };
    (0..len).contains(&index).then_some(index as usize)
}

/// Grammar whose payload `grammar` would execute under `rule`.
pub fn selected_payload(rule: &DispatchRule, grammar: Grammar) -> Option<Grammar> {
    let value = evaluate(grammar, rule.index_expr).ok()?;
    select_index(grammar, value, rule.order.len()).map(|i| rule.order[i])
}
