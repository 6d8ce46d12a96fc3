//! Expressions, column types and column definitions.

use super::error::ParseError;
use super::parser::Parser;
use super::pratt::{
    infix_binding_power, is_reserved_in_expression, token_to_binary_op, COMPARISON_BP, NOT_BP,
    POSTFIX_BP, UNARY_BP,
};
use crate::ast::{
    AliasExpr, ArrayParamList, BetweenClause, BinaryOperation, BoolLiteral,
    CaseExpr, CastExpr, CastSyntax, CastTarget, ColumnArgList, ColumnDef, ColumnDefault,
    ColumnExprList, ColumnType, ComplexType, CompressionCodec, EnumType, EnumValue, Expr,
    ExtractExpr, FunctionExpr, Ident, IndexOperation, IntervalExpr, IsNotNullExpr, IsNullExpr,
    JsonOption, JsonOptionKind, JsonType, KeyValue, MapLiteral, NegateExpr, NestedIdentifier,
    NestedType, NotExpr, NotNullLiteral, NullLiteral, ObjectParams, ParamExprList, Path,
    PlaceHolder, QueryParam, ScalarType, SubQuery,
    TernaryOperation, TtlClause, TypeWithParams, UnaryExpr, UnaryOperator, WhenClause,
    WindowFunctionExpr, WindowOver,
};
use crate::lexer::{Keyword, TokenKind};

/// Units accepted after `INTERVAL n`.
const INTERVAL_UNITS: &[&str] = &[
    "NANOSECOND",
    "MICROSECOND",
    "MILLISECOND",
    "SECOND",
    "MINUTE",
    "HOUR",
    "DAY",
    "WEEK",
    "MONTH",
    "QUARTER",
    "YEAR",
];

/// Types whose parameters are themselves types.
const COMPLEX_TYPES: &[&str] = &[
    "ARRAY",
    "NULLABLE",
    "LOWCARDINALITY",
    "MAP",
    "TUPLE",
    "VARIANT",
    "AGGREGATEFUNCTION",
    "SIMPLEAGGREGATEFUNCTION",
];

fn is_interval_unit(word: &str) -> bool {
    let upper = word.to_ascii_uppercase();
    let singular = upper.strip_suffix('S').unwrap_or(&upper);
    INTERVAL_UNITS.contains(&singular)
}

impl Parser {
    /// Parses an expression, including the `cond ? a : b` conditional.
    pub(super) fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        let start = self.start();
        let condition = self.parse_expression(0)?;
        if !self.consume(&TokenKind::Question) {
            return Ok(condition);
        }
        let true_expr = self.parse_expr()?;
        self.expect(&TokenKind::Colon)?;
        let false_expr = self.parse_expr()?;
        Ok(Expr::Ternary(TernaryOperation {
            condition: Box::new(condition),
            true_expr: Box::new(true_expr),
            false_expr: Box::new(false_expr),
            span: self.span_from(start),
        }))
    }

    /// Parses an expression followed by an optional `AS alias`, as allowed
    /// inside argument and tuple lists.
    pub(super) fn parse_expr_with_alias(&mut self) -> Result<Expr, ParseError> {
        let start = self.start();
        let expr = self.parse_expr()?;
        if !self.consume_keyword(Keyword::As) {
            return Ok(expr);
        }
        let alias = self.expect_identifier()?;
        Ok(Expr::Alias(AliasExpr {
            expr: Box::new(expr),
            alias,
            span: self.span_from(start),
        }))
    }

    /// Parses an expression using precedence climbing.
    pub(super) fn parse_expression(&mut self, min_bp: u8) -> Result<Expr, ParseError> {
        let start = self.start();
        let mut left = self.parse_prefix()?;

        loop {
            let kind = self.current().kind;
            left = match kind {
                TokenKind::LeftBracket if POSTFIX_BP >= min_bp => {
                    let params = self.parse_array_param_list()?;
                    Expr::ObjectParams(ObjectParams {
                        object: Box::new(left),
                        params,
                        span: self.span_from(start),
                    })
                }
                TokenKind::DoubleColon if POSTFIX_BP >= min_bp => {
                    self.advance();
                    let column_type = self.parse_column_type()?;
                    Expr::Cast(CastExpr {
                        expr: Box::new(left),
                        target: CastTarget::Type(column_type),
                        syntax: CastSyntax::DoubleColon,
                        span: self.span_from(start),
                    })
                }
                TokenKind::Dot if POSTFIX_BP >= min_bp => {
                    self.advance();
                    let index = if matches!(self.current().kind, TokenKind::Number(_)) {
                        Expr::Number(self.parse_number_literal()?)
                    } else {
                        Expr::Ident(self.expect_identifier()?)
                    };
                    Expr::Index(IndexOperation {
                        object: Box::new(left),
                        index: Box::new(index),
                        span: self.span_from(start),
                    })
                }
                TokenKind::Keyword(Keyword::Is) => {
                    if COMPARISON_BP.0 < min_bp {
                        break;
                    }
                    self.advance();
                    let negated = self.consume_keyword(Keyword::Not);
                    self.expect_keyword(Keyword::Null)?;
                    let expr = Box::new(left);
                    let span = self.span_from(start);
                    if negated {
                        Expr::IsNotNull(IsNotNullExpr { expr, span })
                    } else {
                        Expr::IsNull(IsNullExpr { expr, span })
                    }
                }
                TokenKind::Keyword(Keyword::Between) => {
                    if COMPARISON_BP.0 < min_bp {
                        break;
                    }
                    self.parse_between(left, false, start)?
                }
                TokenKind::Keyword(Keyword::Not) => {
                    if COMPARISON_BP.0 < min_bp {
                        break;
                    }
                    match self.peek().as_keyword() {
                        Some(Keyword::Between) => {
                            self.advance();
                            self.parse_between(left, true, start)?
                        }
                        Some(Keyword::Like | Keyword::Ilike | Keyword::In) => {
                            self.advance();
                            self.parse_binary_rest(left, false, true, start)?
                        }
                        _ => break,
                    }
                }
                TokenKind::Keyword(Keyword::Global) => {
                    if COMPARISON_BP.0 < min_bp {
                        break;
                    }
                    let has_not = self.peek_keyword(1, Keyword::Not);
                    let in_at = if has_not { 2 } else { 1 };
                    if !self.peek_keyword(in_at, Keyword::In) {
                        break;
                    }
                    self.advance();
                    if has_not {
                        self.advance();
                    }
                    self.parse_binary_rest(left, true, has_not, start)?
                }
                // `IN PARTITION` in mutations
                TokenKind::Keyword(Keyword::In) if self.peek_keyword(1, Keyword::Partition) => {
                    break;
                }
                _ => {
                    let Some((l_bp, _)) = infix_binding_power(&kind) else {
                        break;
                    };
                    if l_bp < min_bp {
                        break;
                    }
                    self.parse_binary_rest(left, false, false, start)?
                }
            };
        }

        Ok(left)
    }

    /// Parses an infix operator at the current token and its right operand.
    fn parse_binary_rest(
        &mut self,
        left: Expr,
        has_global: bool,
        has_not: bool,
        start: usize,
    ) -> Result<Expr, ParseError> {
        let kind = self.current().kind;
        let (Some(operator), Some((_, r_bp))) =
            (token_to_binary_op(&kind), infix_binding_power(&kind))
        else {
            return Err(self.unexpected("operator"));
        };
        self.advance();
        let right = self.parse_expression(r_bp)?;
        Ok(Expr::Binary(BinaryOperation {
            left: Box::new(left),
            operator,
            right: Box::new(right),
            has_global,
            has_not,
            span: self.span_from(start),
        }))
    }

    fn parse_between(&mut self, expr: Expr, has_not: bool, start: usize) -> Result<Expr, ParseError> {
        self.expect_keyword(Keyword::Between)?;
        let between = self.parse_expression(COMPARISON_BP.1)?;
        self.expect_keyword(Keyword::And)?;
        let and = self.parse_expression(COMPARISON_BP.1)?;
        Ok(Expr::Between(BetweenClause {
            expr: Box::new(expr),
            has_not,
            between: Box::new(between),
            and: Box::new(and),
            span: self.span_from(start),
        }))
    }

    /// Parses a prefix expression.
    fn parse_prefix(&mut self) -> Result<Expr, ParseError> {
        let start = self.start();
        match self.current().kind {
            TokenKind::Minus => {
                self.advance();
                let expr = self.parse_expression(UNARY_BP)?;
                Ok(Expr::Negate(NegateExpr {
                    expr: Box::new(expr),
                    span: self.span_from(start),
                }))
            }
            TokenKind::Plus => {
                self.advance();
                let expr = self.parse_expression(UNARY_BP)?;
                Ok(Expr::Unary(UnaryExpr {
                    operator: UnaryOperator::Plus,
                    expr: Box::new(expr),
                    span: self.span_from(start),
                }))
            }
            TokenKind::Keyword(Keyword::Not) => {
                self.advance();
                let expr = self.parse_expression(NOT_BP)?;
                Ok(Expr::Not(NotExpr {
                    expr: Box::new(expr),
                    span: self.span_from(start),
                }))
            }
            _ => self.parse_primary(),
        }
    }

    /// Parses a primary expression.
    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let start = self.start();
        let next_is_paren = self.peek().kind == TokenKind::LeftParen;
        match self.current().kind {
            TokenKind::Number(_) => Ok(Expr::Number(self.parse_number_literal()?)),
            TokenKind::String => Ok(Expr::String(self.parse_string_literal()?)),
            TokenKind::Keyword(Keyword::True | Keyword::False) => {
                let token = self.advance();
                Ok(Expr::Bool(BoolLiteral {
                    value: token.kind == TokenKind::Keyword(Keyword::True),
                    span: token.span,
                }))
            }
            TokenKind::Keyword(Keyword::Null) => {
                let token = self.advance();
                Ok(Expr::Null(NullLiteral { span: token.span }))
            }
            TokenKind::Question => {
                let token = self.advance();
                Ok(Expr::PlaceHolder(PlaceHolder { span: token.span }))
            }
            TokenKind::Star => {
                let token = self.advance();
                Ok(Expr::Ident(Ident::new("*", token.span)))
            }
            TokenKind::LeftBrace => self.parse_brace_expr(),
            TokenKind::LeftBracket => Ok(Expr::Array(self.parse_array_param_list()?)),
            TokenKind::LeftParen => self.parse_paren_expr(),
            TokenKind::Keyword(Keyword::Case) => self.parse_case(),
            TokenKind::Keyword(Keyword::Cast) if next_is_paren => self.parse_cast(),
            TokenKind::Keyword(Keyword::Extract)
                if next_is_paren
                    && self.peek_nth(2).is_identifier()
                    && self.peek_keyword(3, Keyword::From) =>
            {
                self.parse_extract()
            }
            TokenKind::Keyword(Keyword::Interval) => self.parse_interval(),
            TokenKind::Keyword(Keyword::Exists) if next_is_paren => {
                self.advance();
                let expr = self.parse_expression(UNARY_BP)?;
                Ok(Expr::Unary(UnaryExpr {
                    operator: UnaryOperator::Exists,
                    expr: Box::new(expr),
                    span: self.span_from(start),
                }))
            }
            TokenKind::Keyword(Keyword::Select | Keyword::With) => {
                Err(self.unexpected("expression"))
            }
            TokenKind::Keyword(keyword) if is_reserved_in_expression(keyword) && !next_is_paren => {
                Err(self.unexpected("expression"))
            }
            TokenKind::Ident | TokenKind::QuotedIdent(_) | TokenKind::Keyword(_) => {
                self.parse_name_expr()
            }
            _ => Err(self.unexpected("expression")),
        }
    }

    /// A column reference (`a`, `t.a`, `db.t.a`, `t.*`) or a function call.
    fn parse_name_expr(&mut self) -> Result<Expr, ParseError> {
        let start = self.start();
        let first = self.expect_identifier()?;
        if self.check(&TokenKind::LeftParen) {
            return self.parse_function_call(first, start);
        }
        self.finish_name_chain(first, start)
    }

    /// A dotted name without function calls, as used for JSON paths.
    pub(super) fn parse_name_chain(&mut self) -> Result<Expr, ParseError> {
        let start = self.start();
        let first = self.expect_identifier()?;
        self.finish_name_chain(first, start)
    }

    fn finish_name_chain(&mut self, first: Ident, start: usize) -> Result<Expr, ParseError> {
        let mut fields = vec![first];
        while self.check(&TokenKind::Dot) {
            let next = self.peek();
            if next.kind == TokenKind::Star {
                self.advance();
                let star = self.advance();
                fields.push(Ident::new("*", star.span));
            } else if next.is_identifier() || next.is_keyword() {
                self.advance();
                fields.push(self.expect_identifier()?);
            } else {
                break;
            }
        }
        let span = self.span_from(start);
        let mut fields = fields.into_iter();
        Ok(match (fields.next(), fields.next(), fields.next()) {
            (Some(ident), None, _) => Expr::Ident(ident),
            (Some(ident), Some(dot_ident), None) => Expr::NestedIdentifier(NestedIdentifier {
                ident,
                dot_ident: Some(dot_ident),
                span,
            }),
            (first, second, third) => Expr::Path(Path {
                fields: first
                    .into_iter()
                    .chain(second)
                    .chain(third)
                    .chain(fields)
                    .collect(),
                span,
            }),
        })
    }

    /// `name(args)[(args)] [OVER window]`
    fn parse_function_call(&mut self, name: Ident, start: usize) -> Result<Expr, ParseError> {
        let params = self.parse_function_params()?;
        let function = FunctionExpr {
            name,
            params,
            span: self.span_from(start),
        };
        if !self.consume_keyword(Keyword::Over) {
            return Ok(Expr::Function(function));
        }
        let over = if self.check(&TokenKind::LeftParen) {
            WindowOver::Window(self.parse_window_expr()?)
        } else {
            WindowOver::Name(self.expect_identifier()?)
        };
        Ok(Expr::WindowFunction(WindowFunctionExpr {
            function,
            over,
            span: self.span_from(start),
        }))
    }

    /// Parses a function's parenthesized arguments, with the second list of
    /// a parametric aggregate when present.
    pub(super) fn parse_function_params(&mut self) -> Result<ParamExprList, ParseError> {
        let start = self.start();
        self.expect(&TokenKind::LeftParen)?;
        let items = self.parse_column_expr_list(&TokenKind::RightParen)?;
        self.expect(&TokenKind::RightParen)?;
        let column_arg_list = if self.check(&TokenKind::LeftParen) {
            let args_start = self.start();
            self.advance();
            let args = self.parse_column_expr_list(&TokenKind::RightParen)?;
            self.expect(&TokenKind::RightParen)?;
            Some(ColumnArgList {
                distinct: args.has_distinct,
                items: args.items,
                span: self.span_from(args_start),
            })
        } else {
            None
        };
        Ok(ParamExprList {
            items,
            column_arg_list,
            span: self.span_from(start),
        })
    }

    /// `[DISTINCT] expr [AS alias], ...` up to, not including, `close`.
    pub(super) fn parse_column_expr_list(
        &mut self,
        close: &TokenKind,
    ) -> Result<ColumnExprList, ParseError> {
        let start = self.start();
        let has_distinct = self.consume_keyword(Keyword::Distinct);
        let items = if self.check(close) {
            Vec::new()
        } else {
            self.parse_comma_separated(Self::parse_expr_with_alias)?
        };
        Ok(ColumnExprList {
            items,
            has_distinct,
            span: self.span_from(start),
        })
    }

    /// `expr, expr, ...` without aliases, as used by `GROUP BY`-style lists.
    pub(super) fn parse_expr_list(&mut self) -> Result<ColumnExprList, ParseError> {
        let start = self.start();
        let items = self.parse_comma_separated(Self::parse_expr)?;
        Ok(ColumnExprList {
            items,
            has_distinct: false,
            span: self.span_from(start),
        })
    }

    /// A parenthesized list without a second argument list.
    pub(super) fn parse_param_expr_list(&mut self) -> Result<ParamExprList, ParseError> {
        let start = self.start();
        self.expect(&TokenKind::LeftParen)?;
        let items = self.parse_column_expr_list(&TokenKind::RightParen)?;
        self.expect(&TokenKind::RightParen)?;
        Ok(ParamExprList {
            items,
            column_arg_list: None,
            span: self.span_from(start),
        })
    }

    fn parse_array_param_list(&mut self) -> Result<ArrayParamList, ParseError> {
        let start = self.start();
        self.expect(&TokenKind::LeftBracket)?;
        let items = self.parse_column_expr_list(&TokenKind::RightBracket)?;
        self.expect(&TokenKind::RightBracket)?;
        Ok(ArrayParamList {
            items,
            span: self.span_from(start),
        })
    }

    /// A parenthesized subquery or a tuple. Parentheses around a single
    /// expression are kept as a one-element tuple.
    fn parse_paren_expr(&mut self) -> Result<Expr, ParseError> {
        if self.peek_keyword(1, Keyword::Select) || self.peek_keyword(1, Keyword::With) {
            return Ok(Expr::SubQuery(self.parse_paren_subquery()?));
        }
        Ok(Expr::Tuple(self.parse_param_expr_list()?))
    }

    /// `(SELECT ...)`
    pub(super) fn parse_paren_subquery(&mut self) -> Result<SubQuery, ParseError> {
        let start = self.start();
        self.expect(&TokenKind::LeftParen)?;
        let select = self.parse_select_query()?;
        self.expect(&TokenKind::RightParen)?;
        Ok(SubQuery {
            has_paren: true,
            select: Box::new(select),
            span: self.span_from(start),
        })
    }

    /// `{name: Type}` query parameter or `{key: value, ...}` map literal.
    fn parse_brace_expr(&mut self) -> Result<Expr, ParseError> {
        let start = self.start();
        let next = self.peek();
        let is_param = (next.is_identifier() || next.is_keyword())
            && self.peek_nth(2).kind == TokenKind::Colon;
        self.expect(&TokenKind::LeftBrace)?;
        if is_param {
            let name = self.expect_identifier()?;
            self.expect(&TokenKind::Colon)?;
            let param_type = self.parse_column_type()?;
            self.expect(&TokenKind::RightBrace)?;
            return Ok(Expr::QueryParam(QueryParam {
                name,
                param_type,
                span: self.span_from(start),
            }));
        }
        let entries = if self.check(&TokenKind::RightBrace) {
            Vec::new()
        } else {
            self.parse_comma_separated(|parser| {
                let entry_start = parser.start();
                let key = parser.parse_expr()?;
                parser.expect(&TokenKind::Colon)?;
                let value = parser.parse_expr()?;
                Ok(KeyValue {
                    key,
                    value,
                    span: parser.span_from(entry_start),
                })
            })?
        };
        self.expect(&TokenKind::RightBrace)?;
        Ok(Expr::Map(MapLiteral {
            entries,
            span: self.span_from(start),
        }))
    }

    /// `CASE [expr] WHEN ... THEN ... [ELSE ...] END`
    fn parse_case(&mut self) -> Result<Expr, ParseError> {
        let start = self.start();
        self.expect_keyword(Keyword::Case)?;
        let expr = if self.check_keyword(Keyword::When) {
            None
        } else {
            Some(Box::new(self.parse_expr()?))
        };
        let mut whens = Vec::new();
        while self.check_keyword(Keyword::When) {
            let when_start = self.start();
            self.advance();
            let when = self.parse_expr()?;
            self.expect_keyword(Keyword::Then)?;
            let then = self.parse_expr()?;
            whens.push(WhenClause {
                when,
                then,
                span: self.span_from(when_start),
            });
        }
        if whens.is_empty() {
            return Err(self.unexpected(Keyword::When.as_str()));
        }
        let else_expr = if self.consume_keyword(Keyword::Else) {
            Some(Box::new(self.parse_expr()?))
        } else {
            None
        };
        self.expect_keyword(Keyword::End)?;
        Ok(Expr::Case(CaseExpr {
            expr,
            whens,
            else_expr,
            span: self.span_from(start),
        }))
    }

    /// `CAST(expr AS Type)` or `CAST(expr, 'Type')`
    fn parse_cast(&mut self) -> Result<Expr, ParseError> {
        let start = self.start();
        self.expect_keyword(Keyword::Cast)?;
        self.expect(&TokenKind::LeftParen)?;
        let expr = self.parse_expr()?;
        let (target, syntax) = if self.consume_keyword(Keyword::As) {
            (CastTarget::Type(self.parse_column_type()?), CastSyntax::As)
        } else {
            self.expect(&TokenKind::Comma)?;
            (CastTarget::Expr(Box::new(self.parse_expr()?)), CastSyntax::Comma)
        };
        self.expect(&TokenKind::RightParen)?;
        Ok(Expr::Cast(CastExpr {
            expr: Box::new(expr),
            target,
            syntax,
            span: self.span_from(start),
        }))
    }

    /// `EXTRACT(unit FROM expr)`
    fn parse_extract(&mut self) -> Result<Expr, ParseError> {
        let start = self.start();
        self.expect_keyword(Keyword::Extract)?;
        self.expect(&TokenKind::LeftParen)?;
        let unit = self.expect_identifier()?;
        self.expect_keyword(Keyword::From)?;
        let from = self.parse_expr()?;
        self.expect(&TokenKind::RightParen)?;
        Ok(Expr::Extract(ExtractExpr {
            unit,
            from: Box::new(from),
            span: self.span_from(start),
        }))
    }

    /// `INTERVAL expr [unit]`
    fn parse_interval(&mut self) -> Result<Expr, ParseError> {
        let start = self.start();
        self.expect_keyword(Keyword::Interval)?;
        let expr = self.parse_expression(UNARY_BP)?;
        let unit = if self.current().kind == TokenKind::Ident && is_interval_unit(&self.current().text)
        {
            Some(self.expect_identifier()?)
        } else {
            None
        };
        Ok(Expr::Interval(IntervalExpr {
            expr: Box::new(expr),
            unit,
            span: self.span_from(start),
        }))
    }

    // Column types

    /// Parses a column type such as `UInt64`, `Decimal(10, 2)`,
    /// `Array(Nullable(String))`, `Enum8('a' = 1)` or `JSON(SKIP a.b)`.
    pub(super) fn parse_column_type(&mut self) -> Result<ColumnType, ParseError> {
        let start = self.start();
        let name = self.expect_identifier()?;
        let upper = name.name.to_ascii_uppercase();
        if !self.check(&TokenKind::LeftParen) {
            if upper == "JSON" {
                return Ok(ColumnType::Json(JsonType {
                    name,
                    options: Vec::new(),
                    span: self.span_from(start),
                }));
            }
            return Ok(ColumnType::Scalar(ScalarType {
                name,
                span: self.span_from(start),
            }));
        }

        let named_tuple = {
            let first = self.peek();
            let second = self.peek_nth(2);
            (first.is_identifier() || first.is_keyword())
                && (second.is_identifier() || second.is_keyword())
        };

        self.advance();
        let column_type = if upper.starts_with("ENUM") {
            let values = self.parse_comma_separated(Self::parse_enum_value)?;
            self.expect(&TokenKind::RightParen)?;
            ColumnType::Enum(EnumType {
                name,
                values,
                span: self.span_from(start),
            })
        } else if upper == "NESTED" || (upper == "TUPLE" && named_tuple) {
            let columns = self.parse_comma_separated(Self::parse_column_def)?;
            self.expect(&TokenKind::RightParen)?;
            ColumnType::Nested(NestedType {
                name,
                columns,
                span: self.span_from(start),
            })
        } else if upper == "JSON" {
            let options = if self.check(&TokenKind::RightParen) {
                Vec::new()
            } else {
                self.parse_comma_separated(Self::parse_json_option)?
            };
            self.expect(&TokenKind::RightParen)?;
            ColumnType::Json(JsonType {
                name,
                options,
                span: self.span_from(start),
            })
        } else if COMPLEX_TYPES.contains(&upper.as_str()) {
            let params = self.parse_comma_separated(Self::parse_column_type)?;
            self.expect(&TokenKind::RightParen)?;
            ColumnType::Complex(ComplexType {
                name,
                params,
                span: self.span_from(start),
            })
        } else {
            let params = if self.check(&TokenKind::RightParen) {
                Vec::new()
            } else {
                self.parse_comma_separated(Self::parse_expr)?
            };
            self.expect(&TokenKind::RightParen)?;
            ColumnType::WithParams(TypeWithParams {
                name,
                params,
                span: self.span_from(start),
            })
        };
        Ok(column_type)
    }

    fn parse_enum_value(&mut self) -> Result<EnumValue, ParseError> {
        let start = self.start();
        let name = self.parse_string_literal()?;
        let value = if self.consume(&TokenKind::Eq) {
            Some(self.parse_expr()?)
        } else {
            None
        };
        Ok(EnumValue {
            name,
            value,
            span: self.span_from(start),
        })
    }

    fn parse_json_option(&mut self) -> Result<JsonOption, ParseError> {
        let start = self.start();
        let kind = if self.consume_word("SKIP") {
            if self.consume_word("REGEXP") {
                JsonOptionKind::SkipRegexp(self.parse_string_literal()?)
            } else {
                JsonOptionKind::SkipPath(self.parse_name_chain()?)
            }
        } else if self.peek().kind == TokenKind::Eq {
            let name = self.expect_identifier()?;
            self.advance();
            JsonOptionKind::Setting {
                name,
                value: self.parse_expr()?,
            }
        } else {
            let path = self.parse_name_chain()?;
            JsonOptionKind::TypeHint {
                path,
                column_type: self.parse_column_type()?,
            }
        };
        Ok(JsonOption {
            kind,
            span: self.span_from(start),
        })
    }

    // Column definitions

    /// True when the current token starts a column type rather than a
    /// column property.
    fn at_column_type(&self) -> bool {
        match self.current().kind {
            TokenKind::Ident | TokenKind::QuotedIdent(_) => true,
            TokenKind::Keyword(keyword) => {
                matches!(keyword, Keyword::Array | Keyword::Uuid | Keyword::Interval)
            }
            _ => false,
        }
    }

    /// `name [type] [NOT NULL|NULL] [DEFAULT|MATERIALIZED|ALIAS expr]
    /// [CODEC(...)] [TTL expr] [COMMENT 'text']`; properties in any order.
    pub(super) fn parse_column_def(&mut self) -> Result<ColumnDef, ParseError> {
        let start = self.start();
        let name = self.parse_nested_identifier()?;
        let column_type = if self.at_column_type() {
            Some(self.parse_column_type()?)
        } else {
            None
        };
        let mut column = ColumnDef {
            name,
            column_type,
            not_null: None,
            nullable: None,
            default: None,
            codec: None,
            ttl: None,
            comment: None,
            span: self.span_from(start),
        };
        loop {
            let property_start = self.start();
            match self.current().as_keyword() {
                Some(Keyword::Not) if self.peek_keyword(1, Keyword::Null) => {
                    self.advance();
                    self.advance();
                    column.not_null = Some(NotNullLiteral {
                        span: self.span_from(property_start),
                    });
                }
                Some(Keyword::Null) => {
                    let token = self.advance();
                    column.nullable = Some(NullLiteral { span: token.span });
                }
                Some(Keyword::Default) => {
                    self.advance();
                    column.default = Some(ColumnDefault::Default(self.parse_expr()?));
                }
                Some(Keyword::Materialized) => {
                    self.advance();
                    column.default = Some(ColumnDefault::Materialized(self.parse_expr()?));
                }
                Some(Keyword::Alias) => {
                    self.advance();
                    column.default = Some(ColumnDefault::Alias(self.parse_expr()?));
                }
                Some(Keyword::Codec) => column.codec = Some(self.parse_codec()?),
                Some(Keyword::Ttl) => {
                    self.advance();
                    let item = self.parse_ttl_expr()?;
                    column.ttl = Some(TtlClause {
                        items: vec![item],
                        span: self.span_from(property_start),
                    });
                }
                Some(Keyword::Comment) => column.comment = self.parse_comment()?,
                _ => break,
            }
        }
        column.span = self.span_from(start);
        Ok(column)
    }

    /// `CODEC(codec, ...)`
    pub(super) fn parse_codec(&mut self) -> Result<CompressionCodec, ParseError> {
        let start = self.start();
        self.expect_keyword(Keyword::Codec)?;
        self.expect(&TokenKind::LeftParen)?;
        let codecs = self.parse_comma_separated(Self::parse_expr)?;
        self.expect(&TokenKind::RightParen)?;
        Ok(CompressionCodec {
            codecs,
            span: self.span_from(start),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::{parse, Parser};
    use crate::ast::{Expr, Node, Statement};
    use crate::format::format_compact;

    fn expr(sql: &str) -> Expr {
        let statements = parse(&format!("SELECT {sql}")).into_result().unwrap();
        let Some(Statement::Select(select)) = statements.into_iter().next() else {
            panic!("Expected SELECT statement");
        };
        select.select_items.into_iter().next().unwrap().expr
    }

    #[test]
    fn test_arithmetic_precedence() {
        let e = expr("1 + 2 * 3");
        if let Expr::Binary(binary) = &e {
            assert!(matches!(*binary.right, Expr::Binary(_)));
        } else {
            panic!("Expected binary expression");
        }
        assert_eq!(format_compact(&e), "1 + 2 * 3");
    }

    #[test]
    fn test_and_binds_tighter_than_or() {
        let e = expr("a OR b AND c");
        let Expr::Binary(or) = &e else {
            panic!("Expected binary expression");
        };
        assert_eq!(or.operator.as_str(), "OR");
        assert!(matches!(*or.right, Expr::Binary(_)));
    }

    #[test]
    fn test_not_wraps_comparison() {
        let e = expr("NOT a = 1");
        let Expr::Not(not) = &e else {
            panic!("Expected NOT");
        };
        assert!(matches!(*not.expr, Expr::Binary(_)));
    }

    #[test]
    fn test_keyword_predicates() {
        assert!(matches!(expr("a NOT IN (1, 2)"), Expr::Binary(b) if b.has_not));
        assert!(matches!(expr("a GLOBAL NOT IN t"), Expr::Binary(b) if b.has_global && b.has_not));
        assert!(matches!(expr("a NOT BETWEEN 1 AND 2"), Expr::Between(b) if b.has_not));
        assert!(matches!(expr("a IS NOT NULL"), Expr::IsNotNull(_)));
        assert!(matches!(expr("a ILIKE '%x'"), Expr::Binary(_)));
    }

    #[test]
    fn test_between_stops_at_and() {
        let e = expr("a BETWEEN 1 AND 2 AND b");
        let Expr::Binary(and) = &e else {
            panic!("Expected AND");
        };
        assert!(matches!(*and.left, Expr::Between(_)));
    }

    #[test]
    fn test_names() {
        assert!(matches!(expr("a"), Expr::Ident(_)));
        assert!(matches!(expr("t.a"), Expr::NestedIdentifier(_)));
        assert!(matches!(expr("db.t.a"), Expr::Path(p) if p.fields.len() == 3));
        assert!(matches!(expr("t.*"), Expr::NestedIdentifier(n) if n.dot_ident.as_ref().is_some_and(|i| i.is_star())));
        assert!(matches!(expr("`my col`"), Expr::Ident(_)));
    }

    #[test]
    fn test_postfix_forms() {
        assert!(matches!(expr("arr[1]"), Expr::ObjectParams(_)));
        assert!(matches!(expr("tuple(1, 2).1"), Expr::Index(_)));
        assert!(matches!(expr("x::UInt8"), Expr::Cast(_)));
        assert_eq!(format_compact(&expr("-x::Nullable(String)")), "-x::Nullable(String)");
    }

    #[test]
    fn test_function_forms() {
        assert_eq!(format_compact(&expr("count(DISTINCT x)")), "count(DISTINCT x)");
        assert_eq!(format_compact(&expr("quantile(0.9)(x)")), "quantile(0.9)(x)");
        assert_eq!(
            format_compact(&expr("arrayMap(x -> x * 2, arr)")),
            "arrayMap(x -> x * 2, arr)"
        );
        assert!(matches!(expr("if(a, b, c)"), Expr::Function(_)));
        assert!(matches!(expr("left(s, 2)"), Expr::Function(_)));
    }

    #[test]
    fn test_window_function() {
        let e = expr("sum(x) OVER (PARTITION BY a ORDER BY b ROWS BETWEEN UNBOUNDED PRECEDING AND CURRENT ROW)");
        assert!(matches!(e, Expr::WindowFunction(_)));
        assert_eq!(
            format_compact(&e),
            "sum(x) OVER (PARTITION BY a ORDER BY b ROWS BETWEEN UNBOUNDED PRECEDING AND CURRENT ROW)"
        );
    }

    #[test]
    fn test_special_forms() {
        assert_eq!(format_compact(&expr("CAST(x AS UInt8)")), "CAST(x AS UInt8)");
        assert_eq!(format_compact(&expr("CAST(x, 'UInt8')")), "CAST(x, 'UInt8')");
        assert_eq!(format_compact(&expr("EXTRACT(DAY FROM d)")), "EXTRACT(DAY FROM d)");
        assert_eq!(format_compact(&expr("INTERVAL 1 DAY")), "INTERVAL 1 DAY");
        assert_eq!(
            format_compact(&expr("CASE WHEN a THEN 1 ELSE 2 END")),
            "CASE WHEN a THEN 1 ELSE 2 END"
        );
        assert_eq!(format_compact(&expr("a ? 1 : 2")), "a ? 1 : 2");
        assert_eq!(format_compact(&expr("{id: UInt32}")), "{id: UInt32}");
        assert_eq!(format_compact(&expr("{'a': 1, 'b': 2}")), "{'a': 1, 'b': 2}");
        assert_eq!(format_compact(&expr("[1, 2]")), "[1, 2]");
        assert_eq!(format_compact(&expr("(1, 'a')")), "(1, 'a')");
    }

    #[test]
    fn test_column_type_names() {
        let type_name = |sql: &str| {
            let column_type = Parser::new(sql).parse_column_type().unwrap();
            column_type.type_name().to_string()
        };
        assert_eq!(type_name("UInt64"), "UInt64");
        assert_eq!(type_name("Nullable(String)"), "Nullable");
        assert_eq!(type_name("Decimal(10, 2)"), "Decimal");
        assert_eq!(type_name("Enum8('a' = 1, 'b' = 2)"), "Enum8");
        assert_eq!(type_name("Nested(a UInt8, b String)"), "Nested");
    }

    #[test]
    fn test_parentheses_are_preserved() {
        let e = expr("(a + b) * c");
        assert_eq!(format_compact(&e), "(a + b) * c");
    }

    #[test]
    fn test_expression_spans() {
        let e = expr("a + b * 2");
        assert_eq!(e.span().start, 7);
        assert_eq!(e.span().end, 16);
    }

    #[test]
    fn test_incomplete_expression() {
        let error = parse("SELECT 1 +").into_result().unwrap_err();
        assert_eq!(error.offset, 10);
        assert!(error.expected.contains("expression"));
        assert_eq!(error.found, "end of input");
    }
}
