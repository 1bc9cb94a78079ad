//! Static description of the relational schema.
//!
//! Each table is a [`TableDef`]: its DDL plus the column lists the upsert
//! engine needs. The bootstrap (`apply_schema`) and the synchronizer read the
//! same definitions, so the natural keys used by `ON CONFLICT` always match the
//! `UNIQUE` constraints created here.

use tracing::debug;

use crate::CourseDb;
use crate::error::DatabaseError;

/// A table, its identifying columns, and the statements that create it.
#[derive(Debug)]
pub struct TableDef {
    pub name: &'static str,
    /// Column returned by the upsert engine as the surrogate (or primary) key.
    pub id_column: &'static str,
    /// Columns of the `UNIQUE` constraint used as the upsert conflict target.
    /// Empty for tables that are never upserted.
    pub natural_key: &'static [&'static str],
    /// Non-key columns overwritten on conflict.
    pub attributes: &'static [&'static str],
    /// `CREATE TABLE` followed by its indexes, all `IF NOT EXISTS`.
    pub ddl: &'static [&'static str],
}

impl TableDef {
    /// `INSERT ... ON CONFLICT(<natural key>) DO UPDATE SET <attributes>`.
    ///
    /// Parameters are bound as `?1..?n`, natural key first.
    #[must_use]
    pub fn upsert_sql(&self) -> String {
        let columns: Vec<&str> = self
            .natural_key
            .iter()
            .chain(self.attributes)
            .copied()
            .collect();
        let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("?{i}")).collect();
        let mut assignments: Vec<String> = self
            .attributes
            .iter()
            .map(|col| format!("{col} = excluded.{col}"))
            .collect();
        assignments.push("updated_at = datetime('now')".to_string());

        format!(
            "INSERT INTO {} ({}) VALUES ({})\n ON CONFLICT({}) DO UPDATE SET {}",
            self.name,
            columns.join(", "),
            placeholders.join(", "),
            self.natural_key.join(", "),
            assignments.join(", "),
        )
    }

    /// `SELECT <id> FROM <table> WHERE <natural key> = ?..`.
    #[must_use]
    pub fn select_id_sql(&self) -> String {
        let predicate: Vec<String> = self
            .natural_key
            .iter()
            .enumerate()
            .map(|(i, col)| format!("{col} = ?{}", i + 1))
            .collect();
        format!(
            "SELECT {} FROM {} WHERE {}",
            self.id_column,
            self.name,
            predicate.join(" AND ")
        )
    }
}

pub const COURSES: TableDef = TableDef {
    name: "courses",
    id_column: "course_id",
    natural_key: &["course_id"],
    attributes: &[
        "title",
        "description",
        "language",
        "cover_image_url",
        "target_students_json",
        "published",
    ],
    ddl: &["CREATE TABLE IF NOT EXISTS courses (
    course_id TEXT PRIMARY KEY NOT NULL,
    title TEXT NOT NULL,
    description TEXT,
    language TEXT,
    cover_image_url TEXT,
    target_students_json TEXT,
    published INTEGER NOT NULL DEFAULT 1,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
)"],
};

pub const COURSE_CHAPTERS: TableDef = TableDef {
    name: "course_chapters",
    id_column: "id",
    natural_key: &["course_id", "chapter_number"],
    attributes: &["chapter_uid", "name"],
    ddl: &[
        "CREATE TABLE IF NOT EXISTS course_chapters (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    course_id TEXT NOT NULL REFERENCES courses(course_id) ON DELETE CASCADE,
    chapter_uid TEXT,
    chapter_number INTEGER NOT NULL,
    name TEXT NOT NULL,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now')),
    UNIQUE (course_id, chapter_number),
    UNIQUE (course_id, chapter_uid)
)",
        "CREATE INDEX IF NOT EXISTS idx_course_chapters_course_id ON course_chapters(course_id)",
    ],
};

pub const COURSE_SUBCHAPTERS: TableDef = TableDef {
    name: "course_subchapters",
    id_column: "id",
    natural_key: &["chapter_id", "subchapter_number"],
    attributes: &["subchapter_uid", "name", "markdown"],
    ddl: &[
        "CREATE TABLE IF NOT EXISTS course_subchapters (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    chapter_id INTEGER NOT NULL REFERENCES course_chapters(id) ON DELETE CASCADE,
    subchapter_uid TEXT,
    subchapter_number INTEGER NOT NULL,
    name TEXT NOT NULL,
    markdown TEXT NOT NULL,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now')),
    UNIQUE (chapter_id, subchapter_number),
    UNIQUE (chapter_id, subchapter_uid)
)",
        "CREATE INDEX IF NOT EXISTS idx_subchapters_chapter_id ON course_subchapters(chapter_id)",
    ],
};

pub const COURSE_QUESTIONS: TableDef = TableDef {
    name: "course_questions",
    id_column: "id",
    natural_key: &["chapter_id", "question_number"],
    attributes: &["question_uid", "question_markdown", "explanation_markdown"],
    ddl: &[
        "CREATE TABLE IF NOT EXISTS course_questions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    chapter_id INTEGER NOT NULL REFERENCES course_chapters(id) ON DELETE CASCADE,
    question_uid TEXT,
    question_number INTEGER NOT NULL,
    question_markdown TEXT NOT NULL,
    explanation_markdown TEXT NOT NULL,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now')),
    UNIQUE (chapter_id, question_number),
    UNIQUE (chapter_id, question_uid)
)",
        "CREATE INDEX IF NOT EXISTS idx_questions_chapter_id ON course_questions(chapter_id)",
    ],
};

pub const COURSE_QUESTION_OPTIONS: TableDef = TableDef {
    name: "course_question_options",
    id_column: "id",
    natural_key: &["question_id", "option_index"],
    attributes: &["option_content", "is_correct"],
    ddl: &[
        "CREATE TABLE IF NOT EXISTS course_question_options (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    question_id INTEGER NOT NULL REFERENCES course_questions(id) ON DELETE CASCADE,
    option_index INTEGER NOT NULL,
    option_content TEXT NOT NULL,
    is_correct INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now')),
    UNIQUE (question_id, option_index)
)",
        "CREATE INDEX IF NOT EXISTS idx_question_options_question_id ON course_question_options(question_id)",
    ],
};

pub const COURSE_QUESTION_SLOTS: TableDef = TableDef {
    name: "course_question_slots",
    id_column: "id",
    natural_key: &["question_id", "slot_index"],
    attributes: &[],
    ddl: &[
        "CREATE TABLE IF NOT EXISTS course_question_slots (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    question_id INTEGER NOT NULL REFERENCES course_questions(id) ON DELETE CASCADE,
    slot_index INTEGER NOT NULL,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now')),
    UNIQUE (question_id, slot_index)
)",
        "CREATE INDEX IF NOT EXISTS idx_question_slots_question_id ON course_question_slots(question_id)",
    ],
};

pub const COURSE_QUESTION_SLOT_OPTIONS: TableDef = TableDef {
    name: "course_question_slot_options",
    id_column: "id",
    natural_key: &["question_slot_id", "option_index"],
    attributes: &["option_content", "is_correct"],
    ddl: &[
        "CREATE TABLE IF NOT EXISTS course_question_slot_options (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    question_slot_id INTEGER NOT NULL REFERENCES course_question_slots(id) ON DELETE CASCADE,
    option_index INTEGER NOT NULL,
    option_content TEXT NOT NULL,
    is_correct INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now')),
    UNIQUE (question_slot_id, option_index)
)",
        "CREATE INDEX IF NOT EXISTS idx_slot_options_slot_id ON course_question_slot_options(question_slot_id)",
    ],
};

// Account tables. Only the cleanup plan touches their rows; child tables
// reference members without cascading, so delete order matters.

pub const MEMBERS: TableDef = TableDef {
    name: "members",
    id_column: "id",
    natural_key: &[],
    attributes: &[],
    ddl: &["CREATE TABLE IF NOT EXISTS members (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id TEXT NOT NULL UNIQUE,
    email TEXT,
    display_name TEXT,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
)"],
};

pub const ROLES: TableDef = TableDef {
    name: "roles",
    id_column: "id",
    natural_key: &[],
    attributes: &[],
    ddl: &[
        "CREATE TABLE IF NOT EXISTS roles (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id TEXT NOT NULL REFERENCES members(user_id),
    role TEXT NOT NULL,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now')),
    UNIQUE (user_id, role)
)",
        "CREATE INDEX IF NOT EXISTS idx_roles_user_id ON roles(user_id)",
    ],
};

pub const OTP_VERIFICATIONS: TableDef = TableDef {
    name: "otp_verifications",
    id_column: "id",
    natural_key: &[],
    attributes: &[],
    ddl: &[
        "CREATE TABLE IF NOT EXISTS otp_verifications (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id TEXT NOT NULL REFERENCES members(user_id),
    code TEXT NOT NULL,
    expires_at TEXT NOT NULL,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
)",
        "CREATE INDEX IF NOT EXISTS idx_otp_verifications_user_id ON otp_verifications(user_id)",
    ],
};

pub const PASSWORD_RESET_TOKEN: TableDef = TableDef {
    name: "password_reset_token",
    id_column: "id",
    natural_key: &[],
    attributes: &[],
    ddl: &["CREATE TABLE IF NOT EXISTS password_reset_token (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    member_id INTEGER NOT NULL REFERENCES members(id),
    token TEXT NOT NULL UNIQUE,
    expires_at TEXT NOT NULL,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
)"],
};

pub const LOGIN_ATTEMPTS: TableDef = TableDef {
    name: "login_attempts",
    id_column: "id",
    natural_key: &[],
    attributes: &[],
    ddl: &["CREATE TABLE IF NOT EXISTS login_attempts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    email TEXT NOT NULL,
    succeeded INTEGER NOT NULL DEFAULT 0,
    attempted_at TEXT NOT NULL DEFAULT (datetime('now'))
)"],
};

pub const ASSESSMENT_SCORES: TableDef = TableDef {
    name: "assessment_scores",
    id_column: "id",
    natural_key: &[],
    attributes: &[],
    ddl: &[
        "CREATE TABLE IF NOT EXISTS assessment_scores (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id TEXT NOT NULL REFERENCES members(user_id),
    course_id TEXT REFERENCES courses(course_id) ON DELETE SET NULL,
    score INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
)",
        "CREATE INDEX IF NOT EXISTS idx_assessment_scores_user_id ON assessment_scores(user_id)",
    ],
};

/// Every table in creation order: parents before children.
pub static SCHEMA: &[&TableDef] = &[
    &COURSES,
    &COURSE_CHAPTERS,
    &COURSE_SUBCHAPTERS,
    &COURSE_QUESTIONS,
    &COURSE_QUESTION_OPTIONS,
    &COURSE_QUESTION_SLOTS,
    &COURSE_QUESTION_SLOT_OPTIONS,
    &MEMBERS,
    &ROLES,
    &OTP_VERIFICATIONS,
    &PASSWORD_RESET_TOKEN,
    &LOGIN_ATTEMPTS,
    &ASSESSMENT_SCORES,
];

/// All bootstrap statements in execution order.
#[must_use]
pub fn statements() -> Vec<&'static str> {
    SCHEMA
        .iter()
        .flat_map(|table| table.ddl.iter().copied())
        .collect()
}

impl CourseDb {
    /// Create every table and index that does not exist yet.
    ///
    /// Returns the number of statements executed.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Schema` naming the table whose statement failed.
    pub async fn apply_schema(&self) -> Result<usize, DatabaseError> {
        let mut executed = 0;
        for table in SCHEMA {
            for statement in table.ddl {
                self.conn
                    .execute(statement, ())
                    .await
                    .map_err(|e| DatabaseError::Schema(format!("{}: {e}", table.name)))?;
                executed += 1;
            }
            debug!(table = table.name, "schema: table verified");
        }
        Ok(executed)
    }
}
