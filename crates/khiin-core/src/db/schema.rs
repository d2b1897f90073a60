//! Table, index and view definitions plus the insert templates.

/// Objects from any previous build, dropped before the tables are created.
const DROP_ALL: &str = r#"
DROP VIEW IF EXISTS "conversion_lookups";
DROP VIEW IF EXISTS "ngrams";
DROP TABLE IF EXISTS "metadata";
DROP TABLE IF EXISTS "key_sequences";
DROP TABLE IF EXISTS "conversions";
DROP TABLE IF EXISTS "frequency";
DROP TABLE IF EXISTS "syllables";
DROP TABLE IF EXISTS "unigram_freq";
DROP TABLE IF EXISTS "bigram_freq";
DROP TABLE IF EXISTS "symbols";
DROP TABLE IF EXISTS "emoji";
"#;

const CREATE_TABLES: &str = r#"
CREATE TABLE "metadata" (
    "key"       TEXT,
    "value"     INTEGER
);

CREATE TABLE "frequency" (
    "id"        INTEGER PRIMARY KEY,
    "input"     TEXT NOT NULL,
    "freq"      INTEGER,
    "priority"  INTEGER,
    UNIQUE("input")
);

CREATE TABLE "conversions" (
    "input_id"      INTEGER,
    "output"        TEXT NOT NULL,
    "weight"        INTEGER,
    "category"      INTEGER,
    "annotation"    TEXT,
    UNIQUE("input_id", "output"),
    FOREIGN KEY("input_id") REFERENCES "frequency"("id")
);

CREATE TABLE "key_sequences" (
    "input_id"      INTEGER,
    "numeric"       TEXT NOT NULL,
    "telex"         TEXT NOT NULL,
    "n_syls"        INTEGER,
    "fuzzy_tone"    INTEGER NOT NULL DEFAULT 0,
    "p"             REAL,
    UNIQUE("input_id", "numeric"),
    FOREIGN KEY("input_id") REFERENCES "frequency"("id")
);

CREATE TABLE "syllables" (
    "input"     TEXT NOT NULL UNIQUE
);

CREATE TABLE "unigram_freq" (
    "gram"      TEXT NOT NULL UNIQUE,
    "n"         INTEGER NOT NULL
);

CREATE TABLE "bigram_freq" (
    "lgram"     TEXT,
    "rgram"     TEXT,
    "n"         INTEGER NOT NULL,
    UNIQUE("lgram", "rgram")
);

CREATE INDEX "conversions_input_id_covering_index" ON "conversions" (
    "input_id",
    "output",
    "weight",
    "category",
    "annotation"
);

CREATE INDEX "key_sequences_numeric_covering_index" ON "key_sequences" (
    "numeric",
    "input_id"
);

CREATE INDEX "key_sequences_telex_covering_index" ON "key_sequences" (
    "telex",
    "input_id"
);

CREATE INDEX "unigram_gram_index" ON "unigram_freq" (
    "gram"
);

CREATE INDEX "bigram_gram_index" ON "bigram_freq" (
    "rgram",
    "lgram"
);

CREATE VIEW "conversion_lookups" (
    numeric,
    telex,
    fuzzy_tone,
    p,
    input,
    input_id,
    output,
    weight,
    category,
    annotation
) AS SELECT
    k.numeric,
    k.telex,
    k.fuzzy_tone,
    k.p,
    f.input,
    k.input_id,
    c.output,
    c.weight,
    c.category,
    c.annotation
FROM key_sequences AS k
JOIN frequency AS f ON f.id = k.input_id
JOIN conversions AS c ON f.id = c.input_id;

CREATE VIEW "ngrams" (
    lgram,
    rgram,
    rgram_count,
    bigram_count
) AS SELECT
    b.lgram,
    u.gram,
    u.n,
    b.n
FROM unigram_freq AS u
LEFT JOIN bigram_freq AS b ON u.gram = b.rgram;
"#;

const CREATE_SYMBOLS: &str = r#"
CREATE TABLE "symbols" (
    "id"            INTEGER PRIMARY KEY,
    "input"         TEXT NOT NULL,
    "output"        TEXT NOT NULL,
    "category"      INTEGER,
    "annotation"    TEXT
);
"#;

const CREATE_EMOJI: &str = r#"
CREATE TABLE "emoji" (
    "id"            INTEGER PRIMARY KEY,
    "emoji"         TEXT NOT NULL,
    "short_name"    TEXT NOT NULL,
    "category"      INTEGER NOT NULL,
    "code"          TEXT NOT NULL
);
"#;

pub const INSERT_FREQUENCY: &str =
    r#"INSERT INTO "frequency" ("id", "input", "freq", "priority") VALUES (?1, ?2, ?3, ?4);"#;

pub const INSERT_CONVERSION: &str = r#"INSERT INTO "conversions" ("input_id", "output", "weight", "category", "annotation") VALUES (?1, ?2, ?3, ?4, ?5);"#;

pub const INSERT_KEY_SEQUENCE: &str = r#"INSERT INTO "key_sequences" ("input_id", "numeric", "telex", "n_syls", "fuzzy_tone", "p") VALUES (?1, ?2, ?3, ?4, ?5, ?6);"#;

pub const INSERT_SYLLABLE: &str = r#"INSERT INTO "syllables" ("input") VALUES (?1);"#;

pub const INSERT_SYMBOL: &str =
    r#"INSERT INTO "symbols" ("input", "output", "category") VALUES (?1, ?2, ?3);"#;

pub const INSERT_EMOJI: &str = r#"INSERT INTO "emoji" ("id", "emoji", "short_name", "category", "code") VALUES (?1, ?2, ?3, ?4, ?5);"#;

/// DDL for a fresh build. The passthrough tables are only created when the
/// build has data for them.
pub fn create_script(with_symbols: bool, with_emoji: bool) -> String {
    let mut sql = String::from(DROP_ALL);
    sql.push_str(CREATE_TABLES);
    if with_symbols {
        sql.push_str(CREATE_SYMBOLS);
    }
    if with_emoji {
        sql.push_str(CREATE_EMOJI);
    }
    sql
}

/// Substitute `?N` placeholders in `template` with the literal form of
/// `values[N - 1]`.
///
/// Templates are the constants in this module, which contain no `?` other
/// than placeholders. Every placeholder must have a value; debug builds
/// panic otherwise.
pub fn bind(template: &str, values: &[super::SqlValue]) -> String {
    let mut out = String::with_capacity(template.len() + values.len() * 8);
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '?' {
            out.push(c);
            continue;
        }
        let mut index = 0usize;
        while let Some(&d) = chars.peek() {
            let Some(digit) = d.to_digit(10) else { break };
            index = index * 10 + digit as usize;
            chars.next();
        }
        match index.checked_sub(1).and_then(|i| values.get(i)) {
            Some(value) => out.push_str(&value.to_literal()),
            None => {
                debug_assert!(false, "placeholder ?{index} has no value");
                out.push_str("NULL");
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::super::SqlValue;
    use super::*;

    #[test]
    fn test_bind() {
        let sql = bind(
            INSERT_SYMBOL,
            &[SqlValue::from("'"), SqlValue::from("、"), SqlValue::Null],
        );
        assert_eq!(
            sql,
            r#"INSERT INTO "symbols" ("input", "output", "category") VALUES ('''', '、', NULL);"#
        );
    }

    #[test]
    fn test_bind_two_digit_placeholder() {
        let values: Vec<SqlValue> = (1..=12).map(SqlValue::Integer).collect();
        assert_eq!(bind("?12, ?1", &values), "12, 1");
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "placeholder ?3 has no value")]
    fn test_bind_missing_value() {
        bind(INSERT_SYMBOL, &[SqlValue::from("."), SqlValue::from("。")]);
    }

    #[test]
    fn test_ngrams_view() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        conn.execute_batch(&create_script(false, false)).unwrap();
        conn.execute_batch(
            r#"INSERT INTO "unigram_freq" VALUES ('a', 3), ('b', 2);
               INSERT INTO "bigram_freq" VALUES ('a', 'b', 1);"#,
        )
        .unwrap();
        let rows: Vec<(Option<String>, String, i64, Option<i64>)> = conn
            .prepare("SELECT lgram, rgram, rgram_count, bigram_count FROM ngrams ORDER BY rgram")
            .unwrap()
            .query_map([], |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?)))
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(
            rows,
            vec![
                (None, "a".to_string(), 3, None),
                (Some("a".to_string()), "b".to_string(), 2, Some(1)),
            ]
        );
    }

    #[test]
    fn test_create_script_optional_tables() {
        let base = create_script(false, false);
        assert!(base.contains(r#"CREATE TABLE "frequency""#));
        assert!(!base.contains(r#"CREATE TABLE "symbols""#));
        let full = create_script(true, true);
        assert!(full.contains(r#"CREATE TABLE "symbols""#));
        assert!(full.contains(r#"CREATE TABLE "emoji""#));
    }
}
