//! Recursive-descent parser over the formula token stream.
//!
//! Precedence, loosest first:
//! `?:` → `||` → `&&` → `== !=` → `< <= > >=` → `+ -` → `* / %` → unary `- + !` → `**` → primary.
//! `?:` and `**` associate to the right; everything else to the left.

use foresight_core::errors::FormulaError;

use crate::ast::{BinaryOp, Expr, LogicalOp, UnaryOp};
use crate::builtins::{self, MathFunction};
use crate::lexer::{self, Spanned, Token};

/// Maximum nesting of parentheses, unary operators and ternaries.
pub const MAX_NESTING_DEPTH: usize = 64;

/// Maximum operator and call nodes in one expression. Left-associative chains
/// grow the tree one level per operator, so this also bounds its depth.
pub const MAX_OPERATORS: usize = 1024;

/// Namespace prefix accepted in front of math builtins.
const MATH_NAMESPACE: &str = "Math";

/// Tokenize and parse a complete expression.
pub fn parse(source: &str) -> Result<Expr, FormulaError> {
    let tokens = lexer::tokenize(source)?;
    let mut parser = Parser {
        tokens: &tokens,
        pos: 0,
        depth: 0,
        operators: 0,
        end_offset: source.len(),
    };
    let expr = parser.conditional()?;
    if let Some(extra) = parser.peek_spanned() {
        return Err(FormulaError::Parse {
            offset: extra.offset,
            message: format!("unexpected {:?} after expression", extra.token),
        });
    }
    Ok(expr)
}

struct Parser<'t> {
    tokens: &'t [Spanned],
    pos: usize,
    depth: usize,
    operators: usize,
    end_offset: usize,
}

impl<'t> Parser<'t> {
    fn peek_spanned(&self) -> Option<&'t Spanned> {
        self.tokens.get(self.pos)
    }

    fn peek(&self) -> Option<&'t Token> {
        self.peek_spanned().map(|s| &s.token)
    }

    fn offset(&self) -> usize {
        self.peek_spanned().map_or(self.end_offset, |s| s.offset)
    }

    fn advance(&mut self) -> Option<&'t Token> {
        let token = self.tokens.get(self.pos).map(|s| &s.token);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, expected: &Token) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: &Token, what: &str) -> Result<(), FormulaError> {
        if self.eat(expected) {
            Ok(())
        } else {
            Err(self.error(format!("expected {what}")))
        }
    }

    fn error(&self, message: String) -> FormulaError {
        let found = match self.peek() {
            Some(token) => format!("{token:?}"),
            None => "end of input".to_string(),
        };
        FormulaError::Parse {
            offset: self.offset(),
            message: format!("{message}, found {found}"),
        }
    }

    fn enter(&mut self) -> Result<(), FormulaError> {
        self.depth += 1;
        if self.depth > MAX_NESTING_DEPTH {
            return Err(FormulaError::TooDeep {
                max: MAX_NESTING_DEPTH,
            });
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn count_operator(&mut self) -> Result<(), FormulaError> {
        self.operators += 1;
        if self.operators > MAX_OPERATORS {
            return Err(FormulaError::TooComplex { max: MAX_OPERATORS });
        }
        Ok(())
    }

    fn conditional(&mut self) -> Result<Expr, FormulaError> {
        let condition = self.logical_or()?;
        if !self.eat(&Token::Question) {
            return Ok(condition);
        }
        self.count_operator()?;
        self.enter()?;
        let then_branch = self.conditional()?;
        self.expect(&Token::Colon, "':' in conditional")?;
        let else_branch = self.conditional()?;
        self.leave();
        Ok(Expr::Conditional {
            condition: Box::new(condition),
            then_branch: Box::new(then_branch),
            else_branch: Box::new(else_branch),
        })
    }

    fn logical_or(&mut self) -> Result<Expr, FormulaError> {
        let mut lhs = self.logical_and()?;
        while self.eat(&Token::OrOr) {
            self.count_operator()?;
            let rhs = self.logical_and()?;
            lhs = Expr::Logical {
                op: LogicalOp::Or,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
        Ok(lhs)
    }

    fn logical_and(&mut self) -> Result<Expr, FormulaError> {
        let mut lhs = self.equality()?;
        while self.eat(&Token::AndAnd) {
            self.count_operator()?;
            let rhs = self.equality()?;
            lhs = Expr::Logical {
                op: LogicalOp::And,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
        Ok(lhs)
    }

    fn equality(&mut self) -> Result<Expr, FormulaError> {
        self.binary_level(Self::relational, |t| match t {
            Token::EqEq => Some(BinaryOp::Eq),
            Token::NotEq => Some(BinaryOp::NotEq),
            _ => None,
        })
    }

    fn relational(&mut self) -> Result<Expr, FormulaError> {
        self.binary_level(Self::additive, |t| match t {
            Token::Lt => Some(BinaryOp::Lt),
            Token::Le => Some(BinaryOp::Le),
            Token::Gt => Some(BinaryOp::Gt),
            Token::Ge => Some(BinaryOp::Ge),
            _ => None,
        })
    }

    fn additive(&mut self) -> Result<Expr, FormulaError> {
        self.binary_level(Self::multiplicative, |t| match t {
            Token::Plus => Some(BinaryOp::Add),
            Token::Minus => Some(BinaryOp::Sub),
            _ => None,
        })
    }

    fn multiplicative(&mut self) -> Result<Expr, FormulaError> {
        self.binary_level(Self::unary, |t| match t {
            Token::Star => Some(BinaryOp::Mul),
            Token::Slash => Some(BinaryOp::Div),
            Token::Percent => Some(BinaryOp::Rem),
            _ => None,
        })
    }

    /// One left-associative precedence level.
    fn binary_level(
        &mut self,
        next: fn(&mut Self) -> Result<Expr, FormulaError>,
        operator: fn(&Token) -> Option<BinaryOp>,
    ) -> Result<Expr, FormulaError> {
        let mut lhs = next(self)?;
        while let Some(op) = self.peek().and_then(operator) {
            self.pos += 1;
            self.count_operator()?;
            let rhs = next(self)?;
            lhs = Expr::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
        Ok(lhs)
    }

    fn unary(&mut self) -> Result<Expr, FormulaError> {
        let op = match self.peek() {
            Some(Token::Minus) => UnaryOp::Neg,
            Some(Token::Plus) => UnaryOp::Plus,
            Some(Token::Bang) => UnaryOp::Not,
            _ => return self.power(),
        };
        self.pos += 1;
        self.count_operator()?;
        self.enter()?;
        let operand = self.unary()?;
        self.leave();
        Ok(Expr::Unary {
            op,
            operand: Box::new(operand),
        })
    }

    fn power(&mut self) -> Result<Expr, FormulaError> {
        let base = self.primary()?;
        if !self.eat(&Token::StarStar) {
            return Ok(base);
        }
        self.count_operator()?;
        self.enter()?;
        let exponent = self.unary()?;
        self.leave();
        Ok(Expr::Binary {
            op: BinaryOp::Pow,
            lhs: Box::new(base),
            rhs: Box::new(exponent),
        })
    }

    fn primary(&mut self) -> Result<Expr, FormulaError> {
        let offset = self.offset();
        match self.advance() {
            Some(Token::Number(n)) => Ok(Expr::Number(*n)),
            Some(Token::Text(text)) => Ok(Expr::Text(text.clone())),
            Some(Token::LParen) => {
                self.enter()?;
                let inner = self.conditional()?;
                self.expect(&Token::RParen, "')'")?;
                self.leave();
                Ok(inner)
            }
            Some(Token::Ident(name)) if name == MATH_NAMESPACE => {
                self.expect(&Token::Dot, "'.' after Math")?;
                let member = match self.peek() {
                    Some(Token::Ident(member)) => member,
                    _ => return Err(self.error("expected member name after 'Math.'".to_string())),
                };
                self.pos += 1;
                if self.peek() == Some(&Token::LParen) {
                    return self.call(member);
                }
                builtins::constant(member)
                    .map(Expr::Number)
                    .ok_or_else(|| FormulaError::UnknownBuiltin {
                        name: format!("{MATH_NAMESPACE}.{member}"),
                    })
            }
            Some(Token::Ident(name)) => {
                if self.peek() == Some(&Token::LParen) {
                    return self.call(name);
                }
                if self.peek() == Some(&Token::Dot) {
                    return Err(self.error(format!("member access on {name:?} is not allowed")));
                }
                Ok(Expr::Ident(name.clone()))
            }
            Some(token) => Err(FormulaError::Parse {
                offset,
                message: format!("unexpected {token:?}"),
            }),
            None => Err(FormulaError::Parse {
                offset,
                message: "unexpected end of input".to_string(),
            }),
        }
    }

    fn call(&mut self, name: &str) -> Result<Expr, FormulaError> {
        let function = MathFunction::lookup(name).ok_or_else(|| FormulaError::UnknownBuiltin {
            name: name.to_string(),
        })?;
        self.expect(&Token::LParen, "'('")?;
        self.count_operator()?;
        self.enter()?;
        let mut args = Vec::new();
        if !self.eat(&Token::RParen) {
            loop {
                args.push(self.conditional()?);
                if self.eat(&Token::RParen) {
                    break;
                }
                self.expect(&Token::Comma, "',' or ')' in argument list")?;
            }
        }
        self.leave();
        let arity = function.arity();
        if !arity.accepts(args.len()) {
            return Err(FormulaError::Arity {
                function: function.name().to_string(),
                expected: arity.describe(),
                actual: args.len(),
            });
        }
        Ok(Expr::Call { function, args })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(n: f64) -> Box<Expr> {
        Box::new(Expr::Number(n))
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        assert_eq!(
            parse("1 + 2 * 3").unwrap(),
            Expr::Binary {
                op: BinaryOp::Add,
                lhs: num(1.0),
                rhs: Box::new(Expr::Binary {
                    op: BinaryOp::Mul,
                    lhs: num(2.0),
                    rhs: num(3.0),
                }),
            }
        );
    }

    #[test]
    fn exponent_is_right_associative() {
        assert_eq!(
            parse("2 ** 3 ** 2").unwrap(),
            Expr::Binary {
                op: BinaryOp::Pow,
                lhs: num(2.0),
                rhs: Box::new(Expr::Binary {
                    op: BinaryOp::Pow,
                    lhs: num(3.0),
                    rhs: num(2.0),
                }),
            }
        );
    }

    #[test]
    fn math_constants_fold_to_numbers() {
        assert_eq!(parse("Math.PI").unwrap(), Expr::Number(std::f64::consts::PI));
    }

    #[test]
    fn unknown_builtins_and_bad_arity_are_rejected() {
        assert!(matches!(
            parse("Math.random()"),
            Err(FormulaError::UnknownBuiltin { .. })
        ));
        assert!(matches!(parse("pow(2)"), Err(FormulaError::Arity { .. })));
    }

    #[test]
    fn member_access_on_plain_identifiers_is_rejected() {
        assert!(matches!(parse("revenue.value"), Err(FormulaError::Parse { .. })));
    }

    #[test]
    fn deep_nesting_is_bounded() {
        let source = format!("{}1{}", "(".repeat(100), ")".repeat(100));
        assert_eq!(
            parse(&source),
            Err(FormulaError::TooDeep {
                max: MAX_NESTING_DEPTH
            })
        );
    }

    #[test]
    fn long_operator_chains_are_bounded() {
        let within = format!("{}a", "a + ".repeat(MAX_OPERATORS));
        assert!(parse(&within).is_ok());
        let beyond = format!("{}a", "a + ".repeat(MAX_OPERATORS + 1));
        assert_eq!(
            parse(&beyond),
            Err(FormulaError::TooComplex { max: MAX_OPERATORS })
        );
    }

    #[test]
    fn trailing_tokens_are_an_error() {
        assert!(matches!(parse("a b"), Err(FormulaError::Parse { offset: 2, .. })));
    }
}
