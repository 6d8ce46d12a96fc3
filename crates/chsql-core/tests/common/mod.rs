#![allow(dead_code)]

use chsql_core::ast::{SelectQuery, Statement};
use chsql_core::{format_beautify, format_compact, parse, ParseError};

pub fn parse_one(sql: &str) -> Statement {
    let mut statements = parse(sql)
        .into_result()
        .unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e:?}"));
    assert_eq!(statements.len(), 1, "Expected one statement in: {sql}");
    statements.remove(0)
}

pub fn parse_err(sql: &str) -> ParseError {
    parse(sql)
        .error
        .unwrap_or_else(|| panic!("Expected parse error for: {sql}"))
}

pub fn parse_select(sql: &str) -> SelectQuery {
    match parse_one(sql) {
        Statement::Select(s) => s,
        other => panic!("Expected SELECT, got {other:?}"),
    }
}

/// Verifies that compact output is a fixed point:
/// format(parse(format(parse(sql)))) equals format(parse(sql)).
pub fn round_trip(sql: &str) -> String {
    let rendered1 = format_compact(&parse_one(sql));
    let rendered2 = format_compact(&parse_one(&rendered1));
    assert_eq!(
        rendered1, rendered2,
        "Round-trip failed.\n  Input:    {sql}\n  First:    {rendered1}\n  Second:   {rendered2}"
    );
    rendered1
}

pub fn beautify(sql: &str) -> String {
    format_beautify(&parse_one(sql), "  ")
}

/// One or more statements of every kind, and every ALTER TABLE clause.
pub const CORPUS: &[&str] = &[
    // SELECT
    "SELECT a, b FROM t WHERE a > 1 AND b < 2",
    "SELECT DISTINCT ON (a) a, b FROM t",
    "SELECT TOP 10 WITH TIES a FROM t",
    "SELECT a AS x, b y, * EXCEPT (c) FROM t",
    "WITH 1 AS one, cte AS (SELECT 2) SELECT one FROM cte",
    "SELECT * FROM a AS x GLOBAL ANY LEFT JOIN b USING (id) INNER JOIN c ON a.id = c.id, d",
    "SELECT x FROM t ARRAY JOIN arr AS x",
    "SELECT * FROM numbers(10) FINAL SAMPLE 1/10 OFFSET 1/2",
    "SELECT * FROM s3('http://x/data.csv', format = 'CSV')",
    "SELECT a FROM url('http://x', format = 'TSV', structure = 'a UInt8')",
    "SELECT a FROM t GROUP BY ROLLUP(a, b) WITH TOTALS HAVING count() > 1",
    "SELECT d FROM t ORDER BY d DESC NULLS LAST WITH FILL FROM 1 TO 10 STEP 1",
    "SELECT a FROM t LIMIT 1 BY a LIMIT 10",
    "SELECT a FROM t LIMIT 5, 10",
    "SELECT 1 SETTINGS max_threads = 1 FORMAT JSON UNION ALL SELECT 2",
    "SELECT sum(x) OVER w FROM t WINDOW w AS (PARTITION BY a ORDER BY b)",
    "SELECT a FROM t PREWHERE b = 1 WHERE c IN (1, 2) OR d NOT LIKE 'x%'",
    "SELECT CASE WHEN a THEN 1 ELSE 2 END, CAST(x AS UInt8), x::Nullable(String)",
    "SELECT arrayMap(x -> x * 2, arr), quantile(0.9)(x), count(DISTINCT y)",
    "SELECT a ? 1 : 2, [1, 2], (1, 'a'), {'k': 1}, INTERVAL 1 DAY",
    "SELECT (a + b) * c, -x, NOT y, a - -b, x BETWEEN 1 AND 10",
    "SELECT x IS NULL, y IS NOT NULL, arr[1], EXTRACT(DAY FROM d)",
    "SELECT * FROM t WHERE id = {id:UInt32}",
    // INSERT / DELETE
    "INSERT INTO db.t (a, b) VALUES (1, 'x'), (2, 'y')",
    "INSERT INTO FUNCTION remote('host', db, t) SELECT * FROM src",
    "DELETE FROM t ON CLUSTER c WHERE id = 1",
    // CREATE
    "CREATE DATABASE IF NOT EXISTS db ENGINE = Atomic COMMENT 'x'",
    "CREATE TABLE t (id UInt64, name String) ENGINE = MergeTree() ORDER BY id",
    "CREATE TABLE IF NOT EXISTS db.t ON CLUSTER c (\
     id UInt64 CODEC(Delta, ZSTD) COMMENT 'key', \
     d Date DEFAULT today() TTL d + INTERVAL 1 MONTH, \
     INDEX idx id TYPE minmax GRANULARITY 1, \
     PROJECTION p (SELECT id ORDER BY d), \
     CONSTRAINT positive CHECK id > 0, \
     PRIMARY KEY id\
     ) ENGINE = ReplacingMergeTree(d) PARTITION BY toYYYYMM(d) SAMPLE BY id \
     TTL d + INTERVAL 1 YEAR TO VOLUME 'cold', d + INTERVAL 2 YEAR DELETE \
     SETTINGS index_granularity = 8192 COMMENT 'events'",
    "CREATE TABLE t2 AS t1 ENGINE = Memory",
    "CREATE TABLE t ENGINE = Log AS SELECT 1",
    "CREATE OR REPLACE VIEW v AS SELECT a FROM t",
    "CREATE MATERIALIZED VIEW mv REFRESH EVERY 1 HOUR OFFSET 5 MINUTE \
     RANDOMIZE FOR 10 MINUTE DEPENDS ON a, b APPEND TO dest (x UInt8) \
     DEFINER = alice SQL SECURITY DEFINER AS SELECT x FROM src",
    "CREATE MATERIALIZED VIEW mv ENGINE = Memory POPULATE AS SELECT 1",
    "CREATE LIVE VIEW lv WITH TIMEOUT 15 AS SELECT 1",
    "CREATE DICTIONARY d (id UInt64, parent UInt64 DEFAULT 0 HIERARCHICAL, name String EXPRESSION upper(raw)) \
     PRIMARY KEY id SOURCE(CLICKHOUSE(host 'localhost' port 9000 db default table src)) \
     LIFETIME(MIN 0 MAX 300) LAYOUT(HASHED()) SETTINGS(max_threads = 2)",
    "CREATE FUNCTION linear AS (x, k, b) -> k * x + b",
    "CREATE NAMED COLLECTION conn AS host = 'h' OVERRIDABLE, port = 9000 NOT OVERRIDABLE",
    "CREATE OR REPLACE ROLE r ON CLUSTER c",
    "CREATE USER u IDENTIFIED WITH ldap SERVER 'main'",
    "CREATE USER u@'%' IDENTIFIED WITH sha256_password BY 'secret' HOST IP '10.0.0.0/8', LOCAL \
     DEFAULT ROLE r1 DEFAULT DATABASE db GRANTEES ANY EXCEPT r2",
    // ALTER
    "ALTER TABLE t ADD COLUMN x UInt8 AFTER y, DROP COLUMN z",
    "ALTER TABLE t ON CLUSTER c ADD COLUMN x UInt8 FIRST, DROP INDEX IF EXISTS i",
    "ALTER TABLE t ADD INDEX IF NOT EXISTS idx a TYPE minmax GRANULARITY 4, \
     ADD PROJECTION p (SELECT a, count() GROUP BY a), MATERIALIZE INDEX idx IN PARTITION 1",
    "ALTER TABLE t DROP PROJECTION p, CLEAR COLUMN c IN PARTITION 1, CLEAR PROJECTION p, \
     MATERIALIZE PROJECTION p",
    "ALTER TABLE t DROP PARTITION ID '2024', DETACH PARTITION ALL, \
     ATTACH PARTITION 202401 FROM other, REPLACE PARTITION tuple() FROM src, FREEZE",
    "ALTER TABLE t MODIFY SETTING a = 1, b = 2, RESET SETTING c, d",
    "ALTER TABLE t MODIFY COLUMN x REMOVE TTL, MODIFY TTL d + INTERVAL 1 DAY DELETE, REMOVE TTL",
    "ALTER TABLE t MODIFY COLUMN IF EXISTS x Nullable(String) DEFAULT 'n'",
    "ALTER TABLE t MODIFY QUERY SELECT a FROM src",
    "ALTER TABLE t UPDATE a = 1, b = b + 1 IN PARTITION 2 WHERE c > 0, DELETE WHERE a = 0",
    "ALTER TABLE db.t ON CLUSTER c RENAME COLUMN IF EXISTS a TO b, CLEAR INDEX idx IN PARTITION ALL",
    "ALTER ROLE IF EXISTS r1 RENAME TO r2, r3 SETTINGS readonly = 1",
    "CREATE ROLE r SETTINGS max_threads = 4 READONLY, format = 'JSON'",
    // Access control
    "GRANT SELECT(a, b), ALTER UPDATE ON db.* TO r1, r2 WITH GRANT OPTION",
    "GRANT admin TO alice",
    "DROP ROW POLICY IF EXISTS p ON db.t FROM local_directory",
    "DROP SETTINGS PROFILE p1, p2",
    "DROP QUOTA q",
    // Other statements
    "DROP TEMPORARY TABLE IF EXISTS db.t ON CLUSTER c SYNC",
    "DROP DICTIONARY d NO DELAY",
    "DROP DATABASE IF EXISTS db",
    "RENAME TABLE a TO b, db.c TO db.d ON CLUSTER x",
    "TRUNCATE TABLE t",
    "OPTIMIZE TABLE t PARTITION 202401 FINAL DEDUPLICATE BY a, b EXCEPT c",
    "SYSTEM FLUSH LOGS",
    "SYSTEM FLUSH DISTRIBUTED t",
    "SYSTEM SYNC REPLICA t STRICT",
    "SYSTEM START MERGES",
    "SYSTEM STOP TTL MERGES db.t",
    "SYSTEM RELOAD DICTIONARY d",
    "SYSTEM DROP COMPILED EXPRESSION CACHE",
    "SHOW CREATE DICTIONARY db.d",
    "SHOW TABLES FROM db NOT ILIKE '%tmp%' LIMIT 10 INTO OUTFILE 'out.tsv' FORMAT TSV",
    "DESC TABLE t",
    "EXPLAIN QUERY TREE SELECT 1",
    "SET max_threads = 8, readonly = 1",
    "USE db",
    "CHECK TABLE t PARTITION ID '1'",
];
