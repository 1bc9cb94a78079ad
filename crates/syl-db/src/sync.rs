//! Course synchronizer: projects a loaded `CourseModel` onto the schema.
//!
//! Entities are upserted top-down (course, chapters, subchapters, questions,
//! slots, slot options, flat options) so every foreign key resolves to a row
//! written earlier in the same transaction. The whole run commits or rolls
//! back as one unit.

use std::collections::HashMap;

use chrono::Utc;
use libsql::Connection;
use syl_core::entities::{AnswerOption, Chapter, Course, CourseModel, Question};
use syl_core::ids::{chapter_uid, fallback_chapter_name};
use syl_core::responses::SyncReport;
use tracing::{debug, info, warn};

use crate::CourseDb;
use crate::error::DatabaseError;
use crate::helpers::{flag, int, opt_text, text};
use crate::schema::{
    COURSE_CHAPTERS, COURSE_QUESTION_OPTIONS, COURSE_QUESTION_SLOT_OPTIONS,
    COURSE_QUESTION_SLOTS, COURSE_QUESTIONS, COURSE_SUBCHAPTERS, COURSES, TableDef,
};
use crate::upsert::{upsert_id, upsert_key};

impl CourseDb {
    /// Apply `model` inside a single transaction.
    ///
    /// Re-running with an unchanged model updates rows in place: surrogate ids
    /// and row counts stay the same.
    ///
    /// # Errors
    ///
    /// Returns the first `DatabaseError` raised by any statement. The
    /// transaction is rolled back first, so nothing from the run is visible.
    pub async fn sync_course(&self, model: &CourseModel) -> Result<SyncReport, DatabaseError> {
        let course_id = &model.course.course_id;
        info!(course_id = %course_id, "sync: starting");

        let tx = self.conn.transaction().await?;
        match apply_model(&tx, model).await {
            Ok(mut report) => {
                tx.commit().await?;
                report.completed_at = Some(Utc::now());
                info!(
                    course_id = %course_id,
                    chapters = report.chapters,
                    questions = report.questions,
                    "sync: committed"
                );
                Ok(report)
            }
            Err(error) => {
                warn!(course_id = %course_id, %error, "sync: rolling back");
                if let Err(rollback_error) = tx.rollback().await {
                    warn!(%rollback_error, "sync: rollback failed");
                }
                Err(error)
            }
        }
    }
}

async fn apply_model(conn: &Connection, model: &CourseModel) -> Result<SyncReport, DatabaseError> {
    let mut report = SyncReport {
        course_id: upsert_course(conn, &model.course).await?,
        ..SyncReport::default()
    };

    let mut chapter_ids: HashMap<i64, i64> = HashMap::new();
    for chapter in &model.chapters {
        let chapter_id = upsert_chapter(conn, &report.course_id, chapter).await?;
        chapter_ids.insert(chapter.chapter_number, chapter_id);
        report.chapters += 1;

        for sub in &chapter.subchapters {
            upsert_id(
                conn,
                &COURSE_SUBCHAPTERS,
                vec![int(chapter_id), int(sub.subchapter_number)],
                vec![text(&sub.subchapter_uid), text(&sub.name), text(&sub.markdown)],
            )
            .await?;
            report.subchapters += 1;
        }
    }

    for question in &model.questions {
        let chapter_id = if let Some(id) = chapter_ids.get(&question.chapter_number) {
            *id
        } else {
            // Questions may reference chapters the manifest never lists; give
            // them a placeholder chapter rather than dropping them.
            let placeholder = Chapter {
                chapter_number: question.chapter_number,
                chapter_uid: chapter_uid(question.chapter_number),
                name: fallback_chapter_name(question.chapter_number),
                subchapters: Vec::new(),
            };
            let id = upsert_chapter(conn, &report.course_id, &placeholder).await?;
            debug!(
                chapter_number = question.chapter_number,
                question_uid = %question.question_uid,
                "sync: synthesized chapter for question"
            );
            chapter_ids.insert(question.chapter_number, id);
            report.chapters += 1;
            report.synthesized_chapters += 1;
            id
        };

        let question_id = upsert_question(conn, chapter_id, question).await?;
        report.questions += 1;

        for (position, slot) in question.slots.iter().enumerate() {
            let slot_index = i64::try_from(position)
                .map_err(|_| DatabaseError::InvalidState(format!("slot position {position}")))?;
            let slot_id = upsert_id(
                conn,
                &COURSE_QUESTION_SLOTS,
                vec![int(question_id), int(slot_index)],
                vec![],
            )
            .await?;
            report.slots += 1;

            for option in &slot.options {
                upsert_option(conn, &COURSE_QUESTION_SLOT_OPTIONS, slot_id, option).await?;
                report.slot_options += 1;
            }
        }

        for option in &question.options {
            upsert_option(conn, &COURSE_QUESTION_OPTIONS, question_id, option).await?;
            report.question_options += 1;
        }
    }

    Ok(report)
}

async fn upsert_course(conn: &Connection, course: &Course) -> Result<String, DatabaseError> {
    upsert_key(
        conn,
        &COURSES,
        vec![text(&course.course_id)],
        vec![
            text(&course.title),
            opt_text(course.description.as_deref()),
            opt_text(course.language.as_deref()),
            opt_text(course.cover_image_url.as_deref()),
            opt_text(course.target_students_json.as_deref()),
            flag(course.published),
        ],
    )
    .await
}

async fn upsert_chapter(
    conn: &Connection,
    course_id: &str,
    chapter: &Chapter,
) -> Result<i64, DatabaseError> {
    upsert_id(
        conn,
        &COURSE_CHAPTERS,
        vec![text(course_id), int(chapter.chapter_number)],
        vec![text(&chapter.chapter_uid), text(&chapter.name)],
    )
    .await
}

async fn upsert_question(
    conn: &Connection,
    chapter_id: i64,
    question: &Question,
) -> Result<i64, DatabaseError> {
    upsert_id(
        conn,
        &COURSE_QUESTIONS,
        vec![int(chapter_id), int(question.question_number)],
        vec![
            text(&question.question_uid),
            text(&question.question_markdown),
            text(&question.explanation_markdown),
        ],
    )
    .await
}

async fn upsert_option(
    conn: &Connection,
    table: &TableDef,
    owner_id: i64,
    option: &AnswerOption,
) -> Result<i64, DatabaseError> {
    upsert_id(
        conn,
        table,
        vec![int(owner_id), int(option.option_index)],
        vec![text(&option.content), flag(option.is_correct)],
    )
    .await
}
