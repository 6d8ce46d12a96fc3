//! `SELECT`, `INSERT` and `DELETE`.

use super::error::ParseError;
use super::parser::Parser;
use super::pratt::UNARY_BP;
use crate::ast::{
    AssignmentValues, ColumnNamesExpr, CteStmt, DeleteClause, DistinctOn, Expr, Fill,
    FormatClause, FrameDirection, FrameType, FromClause, FunctionExpr, GroupByAggregate,
    GroupByClause, HavingClause, Ident, InsertSource, InsertStmt, InterpolateClause,
    InterpolateItem, JoinConstraint, JoinConstraintClause, JoinExpr, JoinItem, JoinTableExpr,
    LimitByClause, LimitClause, NamedParameter, NullsOrder, OrderByClause, OrderDirection,
    OrderExpr, PartitionByClause, PrewhereClause, RatioExpr, SampleClause, SelectItem,
    SelectQuery, SelectUnion, SetOperator, SettingExpr, SettingsClause, TableArgListExpr,
    TableExpr, TableFunctionExpr, TableSource, TopClause, TypedPlaceholder, WhereClause,
    WindowClause, WindowDefinition, WindowExpr, WindowFrameBetween, WindowFrameBound,
    WindowFrameClause, WindowFrameCurrentRow, WindowFrameExtend, WindowFrameNumber,
    WindowFrameUnbounded, WithClause,
};
use crate::lexer::{Keyword, TokenKind};

/// Keywords that may appear between a table and `JOIN`.
const JOIN_MODIFIERS: &[Keyword] = &[
    Keyword::Global,
    Keyword::Local,
    Keyword::Any,
    Keyword::All,
    Keyword::Asof,
    Keyword::Inner,
    Keyword::Left,
    Keyword::Right,
    Keyword::Full,
    Keyword::Outer,
    Keyword::Semi,
    Keyword::Anti,
    Keyword::Cross,
    Keyword::Array,
    Keyword::Paste,
];

impl Parser {
    /// Parses a `SELECT`, with its leading `WITH` and any trailing set
    /// operation.
    pub(super) fn parse_select_query(&mut self) -> Result<SelectQuery, ParseError> {
        let start = self.start();
        let mut query = SelectQuery::empty(self.current().span);

        query.with = self.parse_with_clause()?;
        self.expect_keyword(Keyword::Select)?;

        if self.consume_keyword(Keyword::Distinct) {
            query.has_distinct = true;
            if self.check_keyword(Keyword::On) && self.peek().kind == TokenKind::LeftParen {
                let on_start = self.start();
                self.advance();
                self.advance();
                let exprs = self.parse_comma_separated(Self::parse_expr)?;
                self.expect(&TokenKind::RightParen)?;
                query.distinct_on = Some(DistinctOn {
                    exprs,
                    span: self.span_from(on_start),
                });
            }
        }

        if self.check_keyword(Keyword::Top) {
            let top_start = self.start();
            self.advance();
            let number = self.parse_number_literal()?;
            let with_ties = self.consume_keywords(&[Keyword::With, Keyword::Ties]);
            query.top = Some(TopClause {
                number,
                with_ties,
                span: self.span_from(top_start),
            });
        }

        query.select_items = self.parse_comma_separated(Self::parse_select_item)?;

        if self.check_keyword(Keyword::From) {
            let from_start = self.start();
            self.advance();
            let expr = self.parse_join_item()?;
            query.from = Some(FromClause {
                expr,
                span: self.span_from(from_start),
            });
        }
        if self.check_keyword(Keyword::Prewhere) {
            let clause_start = self.start();
            self.advance();
            let expr = self.parse_expr()?;
            query.prewhere = Some(PrewhereClause {
                expr,
                span: self.span_from(clause_start),
            });
        }
        query.where_clause = self.parse_where_clause()?;
        if self.check_keyword(Keyword::Group) && self.peek_keyword(1, Keyword::By) {
            query.group_by = Some(self.parse_group_by()?);
        }
        if self.check_keyword(Keyword::Having) {
            let clause_start = self.start();
            self.advance();
            let expr = self.parse_expr()?;
            query.having = Some(HavingClause {
                expr,
                span: self.span_from(clause_start),
            });
        }
        if self.check_keyword(Keyword::Window) {
            query.window = Some(self.parse_window_clause()?);
        }
        if self.check_keyword(Keyword::Order) && self.peek_keyword(1, Keyword::By) {
            query.order_by = Some(self.parse_order_by()?);
        }
        if self.check_keyword(Keyword::Limit) {
            let limit = self.parse_limit()?;
            if self.check_keyword(Keyword::By) {
                let limit_start = limit.span.start;
                self.advance();
                let by = self.parse_expr_list()?;
                query.limit_by = Some(LimitByClause {
                    limit,
                    by,
                    span: self.span_from(limit_start),
                });
                if self.check_keyword(Keyword::Limit) {
                    query.limit = Some(self.parse_limit()?);
                }
            } else {
                query.limit = Some(limit);
            }
        }
        query.settings = self.parse_settings()?;
        query.format = self.parse_format()?;

        if let Some(operator) = self.parse_set_operator() {
            let rest = self.parse_select_query()?;
            query.union = Some(SelectUnion {
                operator,
                query: Box::new(rest),
            });
        }

        query.span = self.span_from(start);
        Ok(query)
    }

    fn parse_set_operator(&mut self) -> Option<SetOperator> {
        if self.consume_keyword(Keyword::Union) {
            return Some(if self.consume_keyword(Keyword::All) {
                SetOperator::UnionAll
            } else if self.consume_keyword(Keyword::Distinct) {
                SetOperator::UnionDistinct
            } else {
                SetOperator::Union
            });
        }
        if self.consume_keyword(Keyword::Except) {
            return Some(SetOperator::Except);
        }
        if self.consume_keyword(Keyword::Intersect) {
            return Some(SetOperator::Intersect);
        }
        None
    }

    /// `WITH expr AS name, name AS (subquery), ...`
    pub(super) fn parse_with_clause(&mut self) -> Result<Option<WithClause>, ParseError> {
        if !self.check_keyword(Keyword::With) {
            return Ok(None);
        }
        let start = self.start();
        self.advance();
        let ctes = self.parse_comma_separated(|parser| {
            let cte_start = parser.start();
            let expr = parser.parse_expr()?;
            parser.expect_keyword(Keyword::As)?;
            let alias = if parser.check(&TokenKind::LeftParen)
                && (parser.peek_keyword(1, Keyword::Select) || parser.peek_keyword(1, Keyword::With))
            {
                Expr::SubQuery(parser.parse_paren_subquery()?)
            } else {
                Expr::Ident(parser.expect_identifier()?)
            };
            Ok(CteStmt {
                expr,
                alias,
                span: parser.span_from(cte_start),
            })
        })?;
        Ok(Some(WithClause {
            ctes,
            span: self.span_from(start),
        }))
    }

    fn parse_select_item(&mut self) -> Result<SelectItem, ParseError> {
        let start = self.start();
        let expr = self.parse_expr()?;
        let mut modifiers = Vec::new();
        while self.peek().kind == TokenKind::LeftParen
            && matches!(
                self.current().as_keyword(),
                Some(Keyword::Except | Keyword::Replace | Keyword::Apply)
            )
        {
            let modifier_start = self.start();
            let token = self.advance();
            let name = Ident::new(token.text, token.span);
            let params = self.parse_function_params()?;
            modifiers.push(FunctionExpr {
                name,
                params,
                span: self.span_from(modifier_start),
            });
        }
        let alias = self.parse_alias()?;
        Ok(SelectItem {
            expr,
            modifiers,
            alias,
            span: self.span_from(start),
        })
    }

    /// `AS name`, or a bare identifier that cannot be a keyword.
    fn parse_alias(&mut self) -> Result<Option<Ident>, ParseError> {
        if self.consume_keyword(Keyword::As) {
            return Ok(Some(self.expect_identifier()?));
        }
        if matches!(
            self.current().kind,
            TokenKind::Ident | TokenKind::QuotedIdent(_)
        ) {
            return Ok(Some(self.expect_identifier()?));
        }
        Ok(None)
    }

    // FROM and joins

    fn parse_join_item(&mut self) -> Result<JoinItem, ParseError> {
        let start = self.start();
        let mut item = JoinItem::Table(self.parse_join_table_expr(false)?);
        loop {
            if self.consume(&TokenKind::Comma) {
                let right = self.parse_join_table_expr(false)?;
                item = JoinItem::Join(Box::new(JoinExpr {
                    left: item,
                    modifiers: Vec::new(),
                    right,
                    constraint: None,
                    span: self.span_from(start),
                }));
                continue;
            }
            let Some(modifiers) = self.parse_join_modifiers() else {
                break;
            };
            let is_array = modifiers.contains(&Keyword::Array);
            let right = self.parse_join_table_expr(is_array)?;
            let constraint = self.parse_join_constraint()?;
            item = JoinItem::Join(Box::new(JoinExpr {
                left: item,
                modifiers,
                right,
                constraint,
                span: self.span_from(start),
            }));
        }
        Ok(item)
    }

    /// Consumes `[modifiers] JOIN`, returning the keywords in order and
    /// ending with `JOIN`.
    fn parse_join_modifiers(&mut self) -> Option<Vec<Keyword>> {
        let mut n = 0;
        while self
            .peek_nth(n)
            .as_keyword()
            .is_some_and(|keyword| JOIN_MODIFIERS.contains(&keyword))
        {
            n += 1;
        }
        if !self.peek_keyword(n, Keyword::Join) {
            return None;
        }
        let mut modifiers = Vec::with_capacity(n + 1);
        for _ in 0..=n {
            if let Some(keyword) = self.advance().as_keyword() {
                modifiers.push(keyword);
            }
        }
        Some(modifiers)
    }

    fn parse_join_constraint(&mut self) -> Result<Option<JoinConstraintClause>, ParseError> {
        let start = self.start();
        let constraint = if self.consume_keyword(Keyword::On) {
            JoinConstraint::On(self.parse_expr()?)
        } else if self.consume_keyword(Keyword::Using) {
            if self.consume(&TokenKind::LeftParen) {
                let columns = self.parse_expr_list()?;
                self.expect(&TokenKind::RightParen)?;
                JoinConstraint::Using {
                    columns,
                    has_paren: true,
                }
            } else {
                JoinConstraint::Using {
                    columns: self.parse_expr_list()?,
                    has_paren: false,
                }
            }
        } else {
            return Ok(None);
        };
        Ok(Some(JoinConstraintClause {
            constraint,
            span: self.span_from(start),
        }))
    }

    fn parse_join_table_expr(&mut self, array_join: bool) -> Result<JoinTableExpr, ParseError> {
        let start = self.start();
        let table = if array_join {
            let expr = self.parse_expr()?;
            let alias = self.parse_alias()?;
            TableExpr {
                expr: TableSource::Expr(expr),
                alias,
                span: self.span_from(start),
            }
        } else {
            self.parse_table_expr()?
        };
        let has_final = self.consume_keyword(Keyword::Final);
        let sample = self.parse_sample()?;
        Ok(JoinTableExpr {
            table,
            has_final,
            sample,
            span: self.span_from(start),
        })
    }

    /// A table, table function, subquery or placeholder with an optional
    /// alias.
    fn parse_table_expr(&mut self) -> Result<TableExpr, ParseError> {
        let start = self.start();
        let expr = self.parse_table_source()?;
        let alias = self.parse_alias()?;
        Ok(TableExpr {
            expr,
            alias,
            span: self.span_from(start),
        })
    }

    pub(super) fn parse_table_source(&mut self) -> Result<TableSource, ParseError> {
        match self.current().kind {
            TokenKind::LeftParen => Ok(TableSource::SubQuery(self.parse_paren_subquery()?)),
            TokenKind::LeftBrace => {
                let start = self.start();
                self.advance();
                let name = self.expect_identifier()?;
                self.expect(&TokenKind::Colon)?;
                let param_type = self.parse_column_type()?;
                self.expect(&TokenKind::RightBrace)?;
                Ok(TableSource::Placeholder(TypedPlaceholder {
                    name,
                    param_type,
                    span: self.span_from(start),
                }))
            }
            _ if self.peek().kind == TokenKind::LeftParen => {
                Ok(TableSource::Function(self.parse_table_function()?))
            }
            _ => Ok(TableSource::Table(self.parse_table_identifier()?)),
        }
    }

    /// `name(arg, key = value, ...)`
    pub(super) fn parse_table_function(&mut self) -> Result<TableFunctionExpr, ParseError> {
        let start = self.start();
        let name = self.expect_identifier()?;
        let args_start = self.start();
        self.expect(&TokenKind::LeftParen)?;
        let args = if self.check(&TokenKind::RightParen) {
            Vec::new()
        } else {
            self.parse_comma_separated(Self::parse_table_arg)?
        };
        self.expect(&TokenKind::RightParen)?;
        Ok(TableFunctionExpr {
            name,
            args: TableArgListExpr {
                args,
                span: self.span_from(args_start),
            },
            span: self.span_from(start),
        })
    }

    fn parse_table_arg(&mut self) -> Result<Expr, ParseError> {
        let is_named = matches!(
            self.current().kind,
            TokenKind::Ident | TokenKind::QuotedIdent(_) | TokenKind::Keyword(_)
        ) && self.peek().kind == TokenKind::Eq;
        if !is_named {
            return self.parse_expr();
        }
        let start = self.start();
        let name = self.expect_identifier()?;
        self.advance();
        let value = self.parse_expr()?;
        Ok(Expr::NamedParameter(NamedParameter {
            name,
            value: Box::new(value),
            span: self.span_from(start),
        }))
    }

    /// `SAMPLE ratio [OFFSET ratio]`
    fn parse_sample(&mut self) -> Result<Option<SampleClause>, ParseError> {
        if !self.check_keyword(Keyword::Sample) {
            return Ok(None);
        }
        let start = self.start();
        self.advance();
        let ratio = self.parse_ratio()?;
        let offset = if self.consume_keyword(Keyword::Offset) {
            Some(self.parse_ratio()?)
        } else {
            None
        };
        Ok(Some(SampleClause {
            ratio,
            offset,
            span: self.span_from(start),
        }))
    }

    fn parse_ratio(&mut self) -> Result<RatioExpr, ParseError> {
        let start = self.start();
        let numerator = self.parse_number_literal()?;
        let denominator = if self.consume(&TokenKind::Slash) {
            Some(self.parse_number_literal()?)
        } else {
            None
        };
        Ok(RatioExpr {
            numerator,
            denominator,
            span: self.span_from(start),
        })
    }

    // Clauses

    pub(super) fn parse_where_clause(&mut self) -> Result<Option<WhereClause>, ParseError> {
        if !self.check_keyword(Keyword::Where) {
            return Ok(None);
        }
        let start = self.start();
        self.advance();
        let expr = self.parse_expr()?;
        Ok(Some(WhereClause {
            expr,
            span: self.span_from(start),
        }))
    }

    /// `GROUP BY [ROLLUP|CUBE|GROUPING SETS](items) [WITH CUBE|ROLLUP|TOTALS]`
    pub(super) fn parse_group_by(&mut self) -> Result<GroupByClause, ParseError> {
        let start = self.start();
        self.expect_keyword(Keyword::Group)?;
        self.expect_keyword(Keyword::By)?;

        let aggregate = match self.current().as_keyword() {
            Some(Keyword::Rollup) if self.peek().kind == TokenKind::LeftParen => {
                self.advance();
                Some(GroupByAggregate::Rollup)
            }
            Some(Keyword::Cube) if self.peek().kind == TokenKind::LeftParen => {
                self.advance();
                Some(GroupByAggregate::Cube)
            }
            Some(Keyword::Grouping)
                if self.peek().is_word("SETS") && self.peek_nth(2).kind == TokenKind::LeftParen =>
            {
                self.advance();
                self.advance();
                Some(GroupByAggregate::GroupingSets)
            }
            _ => None,
        };
        let items = if aggregate.is_some() {
            self.expect(&TokenKind::LeftParen)?;
            let items = self.parse_expr_list()?;
            self.expect(&TokenKind::RightParen)?;
            items
        } else {
            self.parse_expr_list()?
        };

        let mut clause = GroupByClause {
            aggregate,
            items,
            with_cube: false,
            with_rollup: false,
            with_totals: false,
            span: self.span_from(start),
        };
        while self.check_keyword(Keyword::With) {
            match self.peek().as_keyword() {
                Some(Keyword::Cube) => clause.with_cube = true,
                Some(Keyword::Rollup) => clause.with_rollup = true,
                Some(Keyword::Totals) => clause.with_totals = true,
                _ => break,
            }
            self.advance();
            self.advance();
        }
        clause.span = self.span_from(start);
        Ok(clause)
    }

    fn parse_window_clause(&mut self) -> Result<WindowClause, ParseError> {
        let start = self.start();
        self.expect_keyword(Keyword::Window)?;
        let windows = self.parse_comma_separated(|parser| {
            let definition_start = parser.start();
            let name = parser.expect_identifier()?;
            parser.expect_keyword(Keyword::As)?;
            let window = parser.parse_window_expr()?;
            Ok(WindowDefinition {
                name,
                window,
                span: parser.span_from(definition_start),
            })
        })?;
        Ok(WindowClause {
            windows,
            span: self.span_from(start),
        })
    }

    /// `(PARTITION BY ... ORDER BY ... ROWS|RANGE ...)`
    pub(super) fn parse_window_expr(&mut self) -> Result<WindowExpr, ParseError> {
        let start = self.start();
        self.expect(&TokenKind::LeftParen)?;
        let partition_by = if self.check_keyword(Keyword::Partition) {
            Some(self.parse_partition_by()?)
        } else {
            None
        };
        let order_by = if self.check_keyword(Keyword::Order) {
            Some(self.parse_order_by()?)
        } else {
            None
        };
        let frame = match self.current().as_keyword() {
            Some(Keyword::Rows | Keyword::Range) => Some(self.parse_window_frame()?),
            _ => None,
        };
        self.expect(&TokenKind::RightParen)?;
        Ok(WindowExpr {
            partition_by,
            order_by,
            frame,
            span: self.span_from(start),
        })
    }

    fn parse_window_frame(&mut self) -> Result<WindowFrameClause, ParseError> {
        let start = self.start();
        let frame_type = if self.consume_keyword(Keyword::Rows) {
            FrameType::Rows
        } else {
            self.expect_keyword(Keyword::Range)?;
            FrameType::Range
        };
        let extend = if self.check_keyword(Keyword::Between) {
            let between_start = self.start();
            self.advance();
            let low = self.parse_frame_bound()?;
            self.expect_keyword(Keyword::And)?;
            let high = self.parse_frame_bound()?;
            WindowFrameExtend::Between(WindowFrameBetween {
                start: low,
                end: high,
                span: self.span_from(between_start),
            })
        } else {
            WindowFrameExtend::Bound(self.parse_frame_bound()?)
        };
        Ok(WindowFrameClause {
            frame_type,
            extend,
            span: self.span_from(start),
        })
    }

    fn parse_frame_bound(&mut self) -> Result<WindowFrameBound, ParseError> {
        let start = self.start();
        if self.consume_keyword(Keyword::Current) {
            self.expect_keyword(Keyword::Row)?;
            return Ok(WindowFrameBound::CurrentRow(WindowFrameCurrentRow {
                span: self.span_from(start),
            }));
        }
        if self.consume_keyword(Keyword::Unbounded) {
            let direction = self.parse_frame_direction()?;
            return Ok(WindowFrameBound::Unbounded(WindowFrameUnbounded {
                direction,
                span: self.span_from(start),
            }));
        }
        let number = self.parse_expression(UNARY_BP)?;
        let direction = self.parse_frame_direction()?;
        Ok(WindowFrameBound::Number(WindowFrameNumber {
            number: Box::new(number),
            direction,
            span: self.span_from(start),
        }))
    }

    fn parse_frame_direction(&mut self) -> Result<FrameDirection, ParseError> {
        if self.consume_keyword(Keyword::Preceding) {
            Ok(FrameDirection::Preceding)
        } else if self.consume_keyword(Keyword::Following) {
            Ok(FrameDirection::Following)
        } else {
            Err(self.unexpected("PRECEDING or FOLLOWING"))
        }
    }

    /// `PARTITION BY expr, ...`
    pub(super) fn parse_partition_by(&mut self) -> Result<PartitionByClause, ParseError> {
        let start = self.start();
        self.expect_keyword(Keyword::Partition)?;
        self.expect_keyword(Keyword::By)?;
        let items = self.parse_expr_list()?;
        Ok(PartitionByClause {
            items,
            span: self.span_from(start),
        })
    }

    /// `ORDER BY item, ... [INTERPOLATE [(col [AS expr], ...)]]`
    pub(super) fn parse_order_by(&mut self) -> Result<OrderByClause, ParseError> {
        let start = self.start();
        self.expect_keyword(Keyword::Order)?;
        self.expect_keyword(Keyword::By)?;
        let items = self.parse_comma_separated(Self::parse_order_expr)?;
        let interpolate = if self.check_keyword(Keyword::Interpolate) {
            let interpolate_start = self.start();
            self.advance();
            let items = if self.consume(&TokenKind::LeftParen) {
                let items = if self.check(&TokenKind::RightParen) {
                    Vec::new()
                } else {
                    self.parse_comma_separated(|parser| {
                        let item_start = parser.start();
                        let column = parser.expect_identifier()?;
                        let expr = if parser.consume_keyword(Keyword::As) {
                            Some(parser.parse_expr()?)
                        } else {
                            None
                        };
                        Ok(InterpolateItem {
                            column,
                            expr,
                            span: parser.span_from(item_start),
                        })
                    })?
                };
                self.expect(&TokenKind::RightParen)?;
                items
            } else {
                Vec::new()
            };
            Some(InterpolateClause {
                items,
                span: self.span_from(interpolate_start),
            })
        } else {
            None
        };
        Ok(OrderByClause {
            items,
            interpolate,
            span: self.span_from(start),
        })
    }

    fn parse_order_expr(&mut self) -> Result<OrderExpr, ParseError> {
        let start = self.start();
        let expr = self.parse_expr()?;
        let direction = if self.consume_keyword(Keyword::Asc) {
            Some(OrderDirection::Asc)
        } else if self.consume_keyword(Keyword::Desc) {
            Some(OrderDirection::Desc)
        } else {
            None
        };
        let nulls = if self.consume_keyword(Keyword::Nulls) {
            if self.consume_keyword(Keyword::First) {
                Some(NullsOrder::First)
            } else {
                self.expect_keyword(Keyword::Last)?;
                Some(NullsOrder::Last)
            }
        } else {
            None
        };
        let fill = if self.check_keyword(Keyword::With) && self.peek_keyword(1, Keyword::Fill) {
            let fill_start = self.start();
            self.advance();
            self.advance();
            let mut fill = Fill {
                from: None,
                to: None,
                step: None,
                staleness: None,
                span: self.span_from(fill_start),
            };
            if self.consume_keyword(Keyword::From) {
                fill.from = Some(self.parse_expr()?);
            }
            if self.consume_keyword(Keyword::To) {
                fill.to = Some(self.parse_expr()?);
            }
            if self.consume_word("STEP") {
                fill.step = Some(self.parse_expr()?);
            }
            if self.consume_word("STALENESS") {
                fill.staleness = Some(self.parse_expr()?);
            }
            fill.span = self.span_from(fill_start);
            Some(fill)
        } else {
            None
        };
        Ok(OrderExpr {
            expr,
            direction,
            nulls,
            fill,
            span: self.span_from(start),
        })
    }

    /// `LIMIT n [OFFSET m] [WITH TIES]` or `LIMIT m, n`
    fn parse_limit(&mut self) -> Result<LimitClause, ParseError> {
        let start = self.start();
        self.expect_keyword(Keyword::Limit)?;
        let first = self.parse_expr()?;
        let (limit, offset) = if self.consume(&TokenKind::Comma) {
            (self.parse_expr()?, Some(first))
        } else if self.consume_keyword(Keyword::Offset) {
            (first, Some(self.parse_expr()?))
        } else {
            (first, None)
        };
        let with_ties = self.consume_keywords(&[Keyword::With, Keyword::Ties]);
        Ok(LimitClause {
            limit,
            offset,
            with_ties,
            span: self.span_from(start),
        })
    }

    /// `SETTINGS name = value, ...`
    pub(super) fn parse_settings(&mut self) -> Result<Option<SettingsClause>, ParseError> {
        if !self.check_keyword(Keyword::Settings) {
            return Ok(None);
        }
        let start = self.start();
        self.advance();
        let items = self.parse_clause_list(Self::parse_setting_expr)?;
        Ok(Some(SettingsClause {
            items,
            span: self.span_from(start),
        }))
    }

    /// `name = value`
    pub(super) fn parse_setting_expr(&mut self) -> Result<SettingExpr, ParseError> {
        let start = self.start();
        let name = self.expect_identifier()?;
        self.expect(&TokenKind::Eq)?;
        let value = self.parse_expr()?;
        Ok(SettingExpr {
            name,
            value,
            span: self.span_from(start),
        })
    }

    /// `FORMAT name`
    pub(super) fn parse_format(&mut self) -> Result<Option<FormatClause>, ParseError> {
        if !self.check_keyword(Keyword::Format) {
            return Ok(None);
        }
        let start = self.start();
        self.advance();
        let format = self.expect_identifier()?;
        Ok(Some(FormatClause {
            format,
            span: self.span_from(start),
        }))
    }

    // INSERT and DELETE

    /// `INSERT INTO [TABLE|FUNCTION] target [(cols)] [FORMAT f]
    /// [SELECT ... | VALUES (...), ...]`
    pub(super) fn parse_insert(&mut self) -> Result<InsertStmt, ParseError> {
        let start = self.start();
        self.expect_keyword(Keyword::Insert)?;
        self.expect_keyword(Keyword::Into)?;
        let has_table_keyword = self.consume_keyword(Keyword::Table);
        let has_function_keyword = !has_table_keyword && self.consume_keyword(Keyword::Function);
        let table = if has_function_keyword {
            TableSource::Function(self.parse_table_function()?)
        } else {
            TableSource::Table(self.parse_table_identifier()?)
        };

        let column_names = if self.check(&TokenKind::LeftParen) {
            let names_start = self.start();
            self.advance();
            let column_names = self.parse_comma_separated(Self::parse_nested_identifier)?;
            self.expect(&TokenKind::RightParen)?;
            Some(ColumnNamesExpr {
                column_names,
                span: self.span_from(names_start),
            })
        } else {
            None
        };
        let format = self.parse_format()?;

        let source = match self.current().as_keyword() {
            Some(Keyword::Select | Keyword::With) => {
                Some(InsertSource::Select(Box::new(self.parse_select_query()?)))
            }
            Some(Keyword::Values) => {
                self.advance();
                let rows = self.parse_comma_separated(|parser| {
                    let row_start = parser.start();
                    parser.expect(&TokenKind::LeftParen)?;
                    let values = if parser.check(&TokenKind::RightParen) {
                        Vec::new()
                    } else {
                        parser.parse_comma_separated(Self::parse_expr)?
                    };
                    parser.expect(&TokenKind::RightParen)?;
                    Ok(AssignmentValues {
                        values,
                        span: parser.span_from(row_start),
                    })
                })?;
                Some(InsertSource::Values(rows))
            }
            _ => None,
        };

        Ok(InsertStmt {
            has_table_keyword,
            has_function_keyword,
            table,
            column_names,
            format,
            source,
            span: self.span_from(start),
        })
    }

    /// `DELETE FROM t [ON CLUSTER c] [WHERE expr]`
    pub(super) fn parse_delete(&mut self) -> Result<DeleteClause, ParseError> {
        let start = self.start();
        self.expect_keyword(Keyword::Delete)?;
        self.expect_keyword(Keyword::From)?;
        let table = self.parse_table_identifier()?;
        let on_cluster = self.parse_on_cluster()?;
        let where_expr = if self.consume_keyword(Keyword::Where) {
            Some(self.parse_expr()?)
        } else {
            None
        };
        Ok(DeleteClause {
            table,
            on_cluster,
            where_expr,
            span: self.span_from(start),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::parse;
    use crate::ast::{
        Expr, InsertSource, JoinItem, Node, SelectQuery, SetOperator, Statement, TableSource,
    };
    use crate::format::format_compact;
    use crate::lexer::Keyword;

    fn select(sql: &str) -> SelectQuery {
        let statements = parse(sql).into_result().unwrap();
        let Some(Statement::Select(select)) = statements.into_iter().next() else {
            panic!("Expected SELECT statement");
        };
        select
    }

    #[test]
    fn test_simple_select() {
        let query = select("SELECT a, b FROM t WHERE a > 1 AND b < 2");
        assert_eq!(query.select_items.len(), 2);
        assert!(query.from.is_some());
        assert!(query.where_clause.is_some());
        assert_eq!(query.span.start, 0);
        assert_eq!(query.span.end, 40);
    }

    #[test]
    fn test_select_distinct_top() {
        let query = select("SELECT DISTINCT ON (a) a, b FROM t");
        assert!(query.has_distinct);
        assert!(query.distinct_on.is_some());
        let query = select("SELECT TOP 10 WITH TIES a FROM t");
        assert!(query.top.is_some_and(|top| top.with_ties));
    }

    #[test]
    fn test_select_item_alias_and_modifiers() {
        let query = select("SELECT a AS x, b y, * EXCEPT (c) REPLACE (d + 1 AS d) FROM t");
        assert_eq!(query.select_items[0].alias.as_ref().unwrap().name, "x");
        assert_eq!(query.select_items[1].alias.as_ref().unwrap().name, "y");
        assert_eq!(query.select_items[2].modifiers.len(), 2);
        assert_eq!(query.select_items[2].modifiers[0].name.name, "EXCEPT");
    }

    #[test]
    fn test_with_clause_forms() {
        let query = select("WITH 1 AS one, cte AS (SELECT 2) SELECT one FROM cte");
        let with = query.with.unwrap();
        assert!(matches!(with.ctes[0].alias, Expr::Ident(_)));
        assert!(matches!(with.ctes[1].alias, Expr::SubQuery(_)));
    }

    #[test]
    fn test_joins() {
        let query = select(
            "SELECT * FROM a AS x GLOBAL ANY LEFT JOIN b USING (id) INNER JOIN c ON a.id = c.id, d",
        );
        let JoinItem::Join(comma) = query.from.unwrap().expr else {
            panic!("Expected join");
        };
        assert!(comma.is_comma());
        let JoinItem::Join(inner) = &comma.left else {
            panic!("Expected join");
        };
        assert_eq!(inner.modifiers, vec![Keyword::Inner, Keyword::Join]);
        let JoinItem::Join(left) = &inner.left else {
            panic!("Expected join");
        };
        assert_eq!(
            left.modifiers,
            vec![Keyword::Global, Keyword::Any, Keyword::Left, Keyword::Join]
        );
    }

    #[test]
    fn test_array_join_takes_expressions() {
        let query = select("SELECT x FROM t ARRAY JOIN arr AS x");
        let JoinItem::Join(join) = query.from.unwrap().expr else {
            panic!("Expected join");
        };
        assert!(matches!(join.right.table.expr, TableSource::Expr(_)));
    }

    #[test]
    fn test_table_sources() {
        let query = select("SELECT * FROM numbers(10) FINAL SAMPLE 1/10 OFFSET 1/2");
        let JoinItem::Table(table) = query.from.unwrap().expr else {
            panic!("Expected table");
        };
        assert!(matches!(table.table.expr, TableSource::Function(_)));
        assert!(table.has_final);
        assert!(table.sample.is_some());

        let query = select("SELECT * FROM {tbl:Identifier}");
        let JoinItem::Table(table) = query.from.unwrap().expr else {
            panic!("Expected table");
        };
        assert!(matches!(table.table.expr, TableSource::Placeholder(_)));
    }

    #[test]
    fn test_table_function_keyword_named_argument() {
        let sql = "SELECT * FROM s3('http://x', format = 'CSV')";
        let query = select(sql);
        let JoinItem::Table(table) = query.from.as_ref().unwrap().expr.clone() else {
            panic!("Expected table");
        };
        let TableSource::Function(function) = table.table.expr else {
            panic!("Expected table function");
        };
        let Expr::NamedParameter(named) = &function.args.args[1] else {
            panic!("Expected named argument");
        };
        assert_eq!(named.name.name, "format");
        assert!(matches!(*named.value, Expr::String(_)));

        let statements = parse(sql).into_result().unwrap();
        assert_eq!(format_compact(&statements[0]), sql);
    }

    #[test]
    fn test_group_by_forms() {
        let query = select("SELECT a FROM t GROUP BY ROLLUP(a, b) WITH TOTALS");
        let group_by = query.group_by.unwrap();
        assert!(group_by.aggregate.is_some());
        assert!(group_by.with_totals);
        assert_eq!(format_compact(&group_by), "GROUP BY ROLLUP(a, b) WITH TOTALS");
    }

    #[test]
    fn test_order_by_fill_and_interpolate() {
        let query = select(
            "SELECT d FROM t ORDER BY d DESC NULLS LAST WITH FILL FROM 1 TO 10 STEP 1 INTERPOLATE (v AS v + 1)",
        );
        let order_by = query.order_by.unwrap();
        assert!(order_by.items[0].fill.is_some());
        assert!(order_by.interpolate.is_some());
    }

    #[test]
    fn test_limit_forms() {
        let query = select("SELECT a FROM t LIMIT 5, 10");
        let limit = query.limit.unwrap();
        assert_eq!(format_compact(&limit), "LIMIT 10 OFFSET 5");

        let query = select("SELECT a FROM t LIMIT 1 BY a LIMIT 10");
        assert!(query.limit_by.is_some());
        assert!(query.limit.is_some());
    }

    #[test]
    fn test_trailing_clauses_and_union() {
        let query = select("SELECT 1 SETTINGS max_threads = 1 FORMAT JSON UNION ALL SELECT 2");
        assert!(query.settings.is_some());
        assert!(query.format.is_some());
        let union = query.union.unwrap();
        assert_eq!(union.operator, SetOperator::UnionAll);
    }

    #[test]
    fn test_window_clause() {
        let query = select("SELECT sum(x) OVER w FROM t WINDOW w AS (PARTITION BY a ORDER BY b)");
        assert_eq!(query.window.unwrap().windows.len(), 1);
    }

    #[test]
    fn test_insert_values() {
        let statements = parse("INSERT INTO db.t (a, b) VALUES (1, 'x'), (2, 'y')")
            .into_result()
            .unwrap();
        let Statement::Insert(insert) = &statements[0] else {
            panic!("Expected INSERT statement");
        };
        assert_eq!(insert.column_names.as_ref().unwrap().column_names.len(), 2);
        assert!(matches!(&insert.source, Some(InsertSource::Values(rows)) if rows.len() == 2));
    }

    #[test]
    fn test_insert_select_and_function() {
        let statements = parse("INSERT INTO FUNCTION remote('host', db, t) SELECT * FROM src")
            .into_result()
            .unwrap();
        let Statement::Insert(insert) = &statements[0] else {
            panic!("Expected INSERT statement");
        };
        assert!(insert.has_function_keyword);
        assert!(matches!(insert.source, Some(InsertSource::Select(_))));
    }

    #[test]
    fn test_delete() {
        let statements = parse("DELETE FROM t ON CLUSTER c WHERE id = 1")
            .into_result()
            .unwrap();
        let Statement::Delete(delete) = &statements[0] else {
            panic!("Expected DELETE statement");
        };
        assert!(delete.on_cluster.is_some());
        assert_eq!(delete.span().end, 39);
    }
}
