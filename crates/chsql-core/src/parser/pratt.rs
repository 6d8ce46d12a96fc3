//! Binding powers for the precedence-climbing expression parser.
//!
//! From loosest to tightest: the ternary `?:` (handled outside the loop),
//! lambda `->`, `OR`, `AND`, prefix `NOT`, comparisons and the keyword
//! predicates (`LIKE`, `IN`, `BETWEEN`, `IS`), `||`, additive, multiplicative,
//! unary minus, and the postfix forms (`[...]`, `.n`, `::Type`).

use crate::ast::BinaryOperator;
use crate::lexer::{Keyword, TokenKind};

/// Binding power of prefix `NOT`.
pub const NOT_BP: u8 = 9;

/// Binding power shared by comparisons and the keyword predicates.
pub const COMPARISON_BP: (u8, u8) = (11, 12);

/// Binding power of unary minus and plus.
pub const UNARY_BP: u8 = 19;

/// Binding power of subscripts, tuple access and `::` casts.
pub const POSTFIX_BP: u8 = 21;

/// Returns the infix binding power for a token.
///
/// Returns `(left_bp, right_bp)` where:
/// - Higher binding power = binds tighter
/// - Left associative: `left_bp < right_bp`
/// - Right associative: `left_bp > right_bp`
///
/// Returns `None` if the token is not an infix operator. The keyword
/// predicates that need lookahead (`NOT IN`, `GLOBAL IN`, `IS NULL`,
/// `BETWEEN`) are matched by the parser itself.
#[must_use]
pub const fn infix_binding_power(kind: &TokenKind) -> Option<(u8, u8)> {
    match kind {
        // Lambda, right associative
        TokenKind::Arrow => Some((4, 3)),

        TokenKind::Keyword(Keyword::Or) => Some((5, 6)),

        TokenKind::Keyword(Keyword::And) => Some((7, 8)),

        TokenKind::Eq
        | TokenKind::DoubleEq
        | TokenKind::NotEq
        | TokenKind::Lt
        | TokenKind::LtEq
        | TokenKind::Gt
        | TokenKind::GtEq
        | TokenKind::Keyword(Keyword::Like | Keyword::Ilike | Keyword::In) => Some(COMPARISON_BP),

        TokenKind::Concat => Some((13, 14)),

        TokenKind::Plus | TokenKind::Minus => Some((15, 16)),

        TokenKind::Star | TokenKind::Slash | TokenKind::Percent => Some((17, 18)),

        _ => None,
    }
}

/// Converts a token to a binary operator.
#[must_use]
pub const fn token_to_binary_op(kind: &TokenKind) -> Option<BinaryOperator> {
    match kind {
        TokenKind::Plus => Some(BinaryOperator::Add),
        TokenKind::Minus => Some(BinaryOperator::Sub),
        TokenKind::Star => Some(BinaryOperator::Mul),
        TokenKind::Slash => Some(BinaryOperator::Div),
        TokenKind::Percent => Some(BinaryOperator::Mod),
        TokenKind::Eq => Some(BinaryOperator::Eq),
        TokenKind::DoubleEq => Some(BinaryOperator::DoubleEq),
        TokenKind::NotEq => Some(BinaryOperator::NotEq),
        TokenKind::Lt => Some(BinaryOperator::Lt),
        TokenKind::LtEq => Some(BinaryOperator::LtEq),
        TokenKind::Gt => Some(BinaryOperator::Gt),
        TokenKind::GtEq => Some(BinaryOperator::GtEq),
        TokenKind::Concat => Some(BinaryOperator::Concat),
        TokenKind::Arrow => Some(BinaryOperator::Arrow),
        TokenKind::Keyword(Keyword::And) => Some(BinaryOperator::And),
        TokenKind::Keyword(Keyword::Or) => Some(BinaryOperator::Or),
        TokenKind::Keyword(Keyword::Like) => Some(BinaryOperator::Like),
        TokenKind::Keyword(Keyword::Ilike) => Some(BinaryOperator::ILike),
        TokenKind::Keyword(Keyword::In) => Some(BinaryOperator::In),
        _ => None,
    }
}

/// Keywords that end an expression rather than name a column.
///
/// Any other keyword is accepted as a bare identifier in expression
/// position, and every keyword is accepted as a function name.
#[must_use]
pub const fn is_reserved_in_expression(keyword: Keyword) -> bool {
    matches!(
        keyword,
        Keyword::After
            | Keyword::Alias
            | Keyword::All
            | Keyword::And
            | Keyword::Anti
            | Keyword::Any
            | Keyword::Append
            | Keyword::Array
            | Keyword::As
            | Keyword::Asc
            | Keyword::Asof
            | Keyword::Between
            | Keyword::By
            | Keyword::Codec
            | Keyword::Comment
            | Keyword::Cross
            | Keyword::Deduplicate
            | Keyword::Default
            | Keyword::Delete
            | Keyword::Desc
            | Keyword::Else
            | Keyword::Empty
            | Keyword::End
            | Keyword::Engine
            | Keyword::Except
            | Keyword::Final
            | Keyword::First
            | Keyword::Following
            | Keyword::Format
            | Keyword::From
            | Keyword::Full
            | Keyword::Global
            | Keyword::Granularity
            | Keyword::Group
            | Keyword::Having
            | Keyword::Identified
            | Keyword::Ilike
            | Keyword::In
            | Keyword::Inner
            | Keyword::Interpolate
            | Keyword::Intersect
            | Keyword::Into
            | Keyword::Is
            | Keyword::Join
            | Keyword::Left
            | Keyword::Like
            | Keyword::Limit
            | Keyword::Local
            | Keyword::Materialized
            | Keyword::Nulls
            | Keyword::Offset
            | Keyword::On
            | Keyword::Or
            | Keyword::Order
            | Keyword::Outer
            | Keyword::Over
            | Keyword::Partition
            | Keyword::Paste
            | Keyword::Populate
            | Keyword::Preceding
            | Keyword::Prewhere
            | Keyword::Primary
            | Keyword::Remove
            | Keyword::Right
            | Keyword::Sample
            | Keyword::Semi
            | Keyword::Settings
            | Keyword::Then
            | Keyword::Ties
            | Keyword::To
            | Keyword::Totals
            | Keyword::Ttl
            | Keyword::Union
            | Keyword::Using
            | Keyword::Values
            | Keyword::When
            | Keyword::Where
            | Keyword::Window
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence_ordering() {
        // Multiplication should bind tighter than addition
        let add_bp = infix_binding_power(&TokenKind::Plus).unwrap();
        let mul_bp = infix_binding_power(&TokenKind::Star).unwrap();
        assert!(mul_bp.0 > add_bp.0);

        // AND should bind tighter than OR
        let and_bp = infix_binding_power(&TokenKind::Keyword(Keyword::And)).unwrap();
        let or_bp = infix_binding_power(&TokenKind::Keyword(Keyword::Or)).unwrap();
        assert!(and_bp.0 > or_bp.0);

        // Comparison should bind tighter than NOT, NOT tighter than AND
        let eq_bp = infix_binding_power(&TokenKind::Eq).unwrap();
        assert!(eq_bp.0 > NOT_BP);
        assert!(NOT_BP > and_bp.0);

        // Concatenation sits between comparison and addition
        let concat_bp = infix_binding_power(&TokenKind::Concat).unwrap();
        assert!(concat_bp.0 > eq_bp.0 && concat_bp.0 < add_bp.0);

        assert!(UNARY_BP > mul_bp.0 && POSTFIX_BP > UNARY_BP);
    }

    #[test]
    fn test_left_associativity() {
        let (left, right) = infix_binding_power(&TokenKind::Plus).unwrap();
        assert!(left < right);
    }

    #[test]
    fn test_lambda_is_right_associative() {
        let (left, right) = infix_binding_power(&TokenKind::Arrow).unwrap();
        assert!(left > right);
        let or_bp = infix_binding_power(&TokenKind::Keyword(Keyword::Or)).unwrap();
        assert!(left < or_bp.0);
    }

    #[test]
    fn test_token_to_binary_op() {
        assert_eq!(token_to_binary_op(&TokenKind::Plus), Some(BinaryOperator::Add));
        assert_eq!(token_to_binary_op(&TokenKind::Minus), Some(BinaryOperator::Sub));
        assert_eq!(token_to_binary_op(&TokenKind::Eq), Some(BinaryOperator::Eq));
        assert_eq!(
            token_to_binary_op(&TokenKind::Keyword(Keyword::Ilike)),
            Some(BinaryOperator::ILike)
        );
        assert_eq!(token_to_binary_op(&TokenKind::LeftParen), None);
    }

    #[test]
    fn test_clause_keywords_are_reserved() {
        assert!(is_reserved_in_expression(Keyword::From));
        assert!(is_reserved_in_expression(Keyword::Settings));
        assert!(!is_reserved_in_expression(Keyword::Key));
        assert!(!is_reserved_in_expression(Keyword::Database));
    }
}
