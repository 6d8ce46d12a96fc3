//! ClickHouse keywords.
//!
//! Only the words that drive the grammar are keywords. Contextual words such as
//! interval units, `ID`, `HOST` or dictionary attribute flags are lexed as plain
//! identifiers and matched by spelling in the parser.

macro_rules! define_keywords {
    ($($variant:ident => $text:literal,)*) => {
        /// SQL keywords.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize))]
        pub enum Keyword {
            $(
                #[doc = concat!("`", $text, "`")]
                $variant,
            )*
        }

        impl Keyword {
            /// Every keyword, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant,)*];

            /// Attempts to parse a keyword from a string (case-insensitive).
            #[must_use]
            #[allow(clippy::should_implement_trait)]
            pub fn from_str(s: &str) -> Option<Self> {
                match s.to_ascii_uppercase().as_str() {
                    $($text => Some(Self::$variant),)*
                    _ => None,
                }
            }

            /// Returns the canonical (upper-case) spelling of the keyword.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)*
                }
            }
        }
    };
}

define_keywords! {
    Add => "ADD",
    After => "AFTER",
    Alias => "ALIAS",
    All => "ALL",
    Alter => "ALTER",
    And => "AND",
    Anti => "ANTI",
    Any => "ANY",
    Append => "APPEND",
    Apply => "APPLY",
    Array => "ARRAY",
    As => "AS",
    Asc => "ASC",
    Asof => "ASOF",
    Assume => "ASSUME",
    Attach => "ATTACH",
    Between => "BETWEEN",
    By => "BY",
    Case => "CASE",
    Cast => "CAST",
    Check => "CHECK",
    Clear => "CLEAR",
    Cluster => "CLUSTER",
    Codec => "CODEC",
    Collection => "COLLECTION",
    Column => "COLUMN",
    Comment => "COMMENT",
    Constraint => "CONSTRAINT",
    Create => "CREATE",
    Cross => "CROSS",
    Cube => "CUBE",
    Current => "CURRENT",
    Database => "DATABASE",
    Databases => "DATABASES",
    Deduplicate => "DEDUPLICATE",
    Default => "DEFAULT",
    Definer => "DEFINER",
    Delete => "DELETE",
    Depends => "DEPENDS",
    Desc => "DESC",
    Describe => "DESCRIBE",
    Detach => "DETACH",
    Detached => "DETACHED",
    Dictionary => "DICTIONARY",
    Distinct => "DISTINCT",
    Drop => "DROP",
    Else => "ELSE",
    Empty => "EMPTY",
    End => "END",
    Engine => "ENGINE",
    Except => "EXCEPT",
    Exists => "EXISTS",
    Explain => "EXPLAIN",
    Extract => "EXTRACT",
    False => "FALSE",
    Fill => "FILL",
    Final => "FINAL",
    First => "FIRST",
    Following => "FOLLOWING",
    Format => "FORMAT",
    Freeze => "FREEZE",
    From => "FROM",
    Full => "FULL",
    Function => "FUNCTION",
    Global => "GLOBAL",
    Grant => "GRANT",
    Granularity => "GRANULARITY",
    Group => "GROUP",
    Grouping => "GROUPING",
    Having => "HAVING",
    Identified => "IDENTIFIED",
    If => "IF",
    Ilike => "ILIKE",
    In => "IN",
    Index => "INDEX",
    Inner => "INNER",
    Insert => "INSERT",
    Interpolate => "INTERPOLATE",
    Intersect => "INTERSECT",
    Interval => "INTERVAL",
    Into => "INTO",
    Is => "IS",
    Join => "JOIN",
    Key => "KEY",
    Last => "LAST",
    Left => "LEFT",
    Like => "LIKE",
    Limit => "LIMIT",
    Live => "LIVE",
    Local => "LOCAL",
    Materialize => "MATERIALIZE",
    Materialized => "MATERIALIZED",
    Modify => "MODIFY",
    Named => "NAMED",
    Not => "NOT",
    Null => "NULL",
    Nulls => "NULLS",
    Offset => "OFFSET",
    On => "ON",
    Optimize => "OPTIMIZE",
    Option => "OPTION",
    Or => "OR",
    Order => "ORDER",
    Outer => "OUTER",
    Over => "OVER",
    Partition => "PARTITION",
    Paste => "PASTE",
    Populate => "POPULATE",
    Preceding => "PRECEDING",
    Prewhere => "PREWHERE",
    Primary => "PRIMARY",
    Projection => "PROJECTION",
    Query => "QUERY",
    Randomize => "RANDOMIZE",
    Range => "RANGE",
    Refresh => "REFRESH",
    Remove => "REMOVE",
    Rename => "RENAME",
    Replace => "REPLACE",
    Reset => "RESET",
    Right => "RIGHT",
    Role => "ROLE",
    Rollup => "ROLLUP",
    Row => "ROW",
    Rows => "ROWS",
    Sample => "SAMPLE",
    Security => "SECURITY",
    Select => "SELECT",
    Semi => "SEMI",
    Set => "SET",
    Setting => "SETTING",
    Settings => "SETTINGS",
    Show => "SHOW",
    Sql => "SQL",
    Sync => "SYNC",
    System => "SYSTEM",
    Table => "TABLE",
    Tables => "TABLES",
    Temporary => "TEMPORARY",
    Then => "THEN",
    Ties => "TIES",
    To => "TO",
    Top => "TOP",
    Totals => "TOTALS",
    True => "TRUE",
    Truncate => "TRUNCATE",
    Ttl => "TTL",
    Unbounded => "UNBOUNDED",
    Union => "UNION",
    Update => "UPDATE",
    Use => "USE",
    User => "USER",
    Using => "USING",
    Uuid => "UUID",
    Values => "VALUES",
    View => "VIEW",
    When => "WHEN",
    Where => "WHERE",
    Window => "WINDOW",
    With => "WITH",
}

impl Keyword {
    /// Returns true if the keyword opens a primary expression, so it can never
    /// be read back as a plain identifier in expression position.
    #[must_use]
    pub const fn starts_expression(self) -> bool {
        matches!(
            self,
            Self::Case
                | Self::Cast
                | Self::Extract
                | Self::Interval
                | Self::Not
                | Self::Null
                | Self::True
                | Self::False
                | Self::Select
                | Self::With
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_from_str() {
        assert_eq!(Keyword::from_str("SELECT"), Some(Keyword::Select));
        assert_eq!(Keyword::from_str("select"), Some(Keyword::Select));
        assert_eq!(Keyword::from_str("SeLeCt"), Some(Keyword::Select));
        assert_eq!(Keyword::from_str("not_a_keyword"), None);
    }

    #[test]
    fn test_keyword_as_str() {
        assert_eq!(Keyword::Prewhere.as_str(), "PREWHERE");
        assert_eq!(Keyword::Ttl.as_str(), "TTL");
        assert_eq!(Keyword::Uuid.as_str(), "UUID");
    }

    #[test]
    fn test_keyword_table_round_trips() {
        for keyword in Keyword::ALL {
            assert_eq!(Keyword::from_str(keyword.as_str()), Some(*keyword));
        }
    }

    #[test]
    fn test_contextual_words_are_not_keywords() {
        for word in ["id", "day", "host", "source", "layout", "type", "name"] {
            assert_eq!(Keyword::from_str(word), None, "{word}");
        }
    }
}
