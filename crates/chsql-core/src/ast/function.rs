//! Function calls and window specifications.

use super::{Expr, Ident, Node, OrderByClause, ParamExprList, PartitionByClause};
use crate::format::Formatter;
use crate::lexer::Span;
use crate::visitor::{self, Visitor};

/// `name(args)` or the parametric form `name(params)(args)`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FunctionExpr {
    /// Function name.
    pub name: Ident,
    /// Arguments, including parametric ones.
    pub params: ParamExprList,
    /// Source span.
    pub span: Span,
}

impl Node for FunctionExpr {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_node(&self.name);
        f.write_node(&self.params);
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.name.accept(&mut *scope)?;
        self.params.accept(&mut *scope)?;
        scope.visit_function_expr(self)
    }
}

/// What follows `OVER`: an inline window or the name of one defined in the
/// `WINDOW` clause.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum WindowOver {
    /// Inline `(...)` window.
    Window(WindowExpr),
    /// Name of a `WINDOW` definition.
    Name(Ident),
}

forward_node!(WindowOver { Window, Name });

/// `function OVER window`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct WindowFunctionExpr {
    /// Function being windowed.
    pub function: FunctionExpr,
    /// Window after `OVER`.
    pub over: WindowOver,
    /// Source span.
    pub span: Span,
}

impl Node for WindowFunctionExpr {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_node(&self.function);
        f.write_str(" OVER ");
        f.write_node(&self.over);
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.function.accept(&mut *scope)?;
        self.over.accept(&mut *scope)?;
        scope.visit_window_function_expr(self)
    }
}

/// `([PARTITION BY ...] [ORDER BY ...] [frame])`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct WindowExpr {
    /// `PARTITION BY` clause.
    pub partition_by: Option<PartitionByClause>,
    /// `ORDER BY` clause.
    pub order_by: Option<OrderByClause>,
    /// Frame clause.
    pub frame: Option<WindowFrameClause>,
    /// Source span.
    pub span: Span,
}

impl Node for WindowExpr {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_char('(');
        let mut needs_space = false;
        if let Some(partition_by) = &self.partition_by {
            f.write_node(partition_by);
            needs_space = true;
        }
        if let Some(order_by) = &self.order_by {
            if needs_space {
                f.write_char(' ');
            }
            f.write_node(order_by);
            needs_space = true;
        }
        if let Some(frame) = &self.frame {
            if needs_space {
                f.write_char(' ');
            }
            f.write_node(frame);
        }
        f.write_char(')');
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        visitor::accept_opt(self.partition_by.as_ref(), &mut *scope)?;
        visitor::accept_opt(self.order_by.as_ref(), &mut *scope)?;
        visitor::accept_opt(self.frame.as_ref(), &mut *scope)?;
        scope.visit_window_expr(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum FrameType {
    Rows,
    Range,
}

impl FrameType {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Rows => "ROWS",
            Self::Range => "RANGE",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum FrameDirection {
    Preceding,
    Following,
}

impl FrameDirection {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Preceding => "PRECEDING",
            Self::Following => "FOLLOWING",
        }
    }
}

/// One end of a window frame.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum WindowFrameBound {
    /// `CURRENT ROW`
    CurrentRow(WindowFrameCurrentRow),
    /// `UNBOUNDED PRECEDING|FOLLOWING`
    Unbounded(WindowFrameUnbounded),
    /// `n PRECEDING|FOLLOWING`
    Number(WindowFrameNumber),
}

forward_node!(WindowFrameBound {
    CurrentRow,
    Unbounded,
    Number,
});

/// The extent of a frame: a single start bound or `BETWEEN a AND b`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum WindowFrameExtend {
    /// Start bound only.
    Bound(WindowFrameBound),
    /// `BETWEEN a AND b`
    Between(WindowFrameBetween),
}

forward_node!(WindowFrameExtend { Bound, Between });

/// `ROWS|RANGE extent`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct WindowFrameClause {
    /// `ROWS` or `RANGE`.
    pub frame_type: FrameType,
    /// Frame extent.
    pub extend: WindowFrameExtend,
    /// Source span.
    pub span: Span,
}

impl Node for WindowFrameClause {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str(self.frame_type.as_str());
        f.write_char(' ');
        f.write_node(&self.extend);
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.extend.accept(&mut *scope)?;
        scope.visit_window_frame_clause(self)
    }
}

/// `BETWEEN start AND end`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct WindowFrameBetween {
    /// Start bound.
    pub start: WindowFrameBound,
    /// End bound.
    pub end: WindowFrameBound,
    /// Source span.
    pub span: Span,
}

impl Node for WindowFrameBetween {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("BETWEEN ");
        f.write_node(&self.start);
        f.write_str(" AND ");
        f.write_node(&self.end);
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.start.accept(&mut *scope)?;
        self.end.accept(&mut *scope)?;
        scope.visit_window_frame_between(self)
    }
}

/// `CURRENT ROW`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct WindowFrameCurrentRow {
    /// Source span.
    pub span: Span,
}

impl Node for WindowFrameCurrentRow {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("CURRENT ROW");
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        scope.visit_window_frame_current_row(self)
    }
}

/// `UNBOUNDED PRECEDING|FOLLOWING`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct WindowFrameUnbounded {
    /// `PRECEDING` or `FOLLOWING`.
    pub direction: FrameDirection,
    /// Source span.
    pub span: Span,
}

impl Node for WindowFrameUnbounded {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("UNBOUNDED ");
        f.write_str(self.direction.as_str());
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        scope.visit_window_frame_unbounded(self)
    }
}

/// `n PRECEDING|FOLLOWING`; `n` is a number or a query parameter.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct WindowFrameNumber {
    /// Row or range offset.
    pub number: Box<Expr>,
    /// `PRECEDING` or `FOLLOWING`.
    pub direction: FrameDirection,
    /// Source span.
    pub span: Span,
}

impl Node for WindowFrameNumber {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_node(&self.number);
        f.write_char(' ');
        f.write_str(self.direction.as_str());
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.number.accept(&mut *scope)?;
        scope.visit_window_frame_number(self)
    }
}
