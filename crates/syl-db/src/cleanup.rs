//! Account data cleanup.
//!
//! A fixed, dependency-ordered list of bulk deletes over the account tables,
//! either scoped to one `user_id` or global. Foreign-key enforcement is
//! switched off around the batch; the batch itself is one transaction.

use libsql::{Connection, params_from_iter};
use syl_core::responses::CleanupOutcome;
use tracing::{debug, info, warn};

use crate::CourseDb;
use crate::error::DatabaseError;

/// One planned `DELETE` and its bound parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupStatement {
    pub sql: &'static str,
    pub params: Vec<String>,
}

impl CleanupStatement {
    /// `sql`, followed by `params=[...]` when there are any.
    #[must_use]
    pub fn preview(&self) -> String {
        if self.params.is_empty() {
            self.sql.to_string()
        } else {
            format!("{}  params={:?}", self.sql, self.params)
        }
    }
}

/// Delete statements ordered from most- to least-dependent table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupPlan {
    pub statements: Vec<CleanupStatement>,
}

const SCOPED: &[&str] = &[
    "DELETE FROM assessment_scores WHERE user_id = ?1",
    "DELETE FROM otp_verifications WHERE user_id = ?1",
    "DELETE FROM roles WHERE user_id = ?1",
    "DELETE FROM members WHERE user_id = ?1",
];

const GLOBAL: &[&str] = &[
    "DELETE FROM assessment_scores",
    "DELETE FROM otp_verifications",
    "DELETE FROM password_reset_token",
    "DELETE FROM login_attempts",
    "DELETE FROM roles",
    "DELETE FROM members",
];

impl CleanupPlan {
    /// Scoped plan when `user_id` is given and non-blank, global otherwise.
    #[must_use]
    pub fn new(user_id: Option<&str>) -> Self {
        match user_id.map(str::trim) {
            Some(id) if !id.is_empty() => Self::for_user(id),
            _ => Self::global(),
        }
    }

    #[must_use]
    pub fn for_user(user_id: &str) -> Self {
        Self {
            statements: SCOPED
                .iter()
                .map(|sql| CleanupStatement {
                    sql,
                    params: vec![user_id.to_string()],
                })
                .collect(),
        }
    }

    #[must_use]
    pub fn global() -> Self {
        Self {
            statements: GLOBAL
                .iter()
                .map(|sql| CleanupStatement {
                    sql,
                    params: Vec::new(),
                })
                .collect(),
        }
    }
}

impl CourseDb {
    /// Execute `plan` and report the rows each statement removed.
    ///
    /// Foreign keys are turned off before the transaction starts and turned
    /// back on after it ends, whether it committed or rolled back.
    ///
    /// # Errors
    ///
    /// Returns the first statement failure (after rolling back), or a failure
    /// to toggle foreign-key enforcement.
    pub async fn run_cleanup(
        &self,
        plan: &CleanupPlan,
    ) -> Result<Vec<CleanupOutcome>, DatabaseError> {
        self.conn.execute("PRAGMA foreign_keys = OFF", ()).await?;

        let result = run_in_transaction(&self.conn, plan).await;

        let restored = self.conn.execute("PRAGMA foreign_keys = ON", ()).await;
        match (result, restored) {
            (Ok(outcomes), Ok(_)) => {
                info!(statements = outcomes.len(), "cleanup: committed");
                Ok(outcomes)
            }
            (Err(error), restored) => {
                if let Err(pragma_error) = restored {
                    warn!(%pragma_error, "cleanup: could not re-enable foreign keys");
                }
                Err(error)
            }
            (Ok(_), Err(pragma_error)) => Err(pragma_error.into()),
        }
    }
}

async fn run_in_transaction(
    conn: &Connection,
    plan: &CleanupPlan,
) -> Result<Vec<CleanupOutcome>, DatabaseError> {
    let tx = conn.transaction().await?;
    let mut outcomes = Vec::with_capacity(plan.statements.len());

    for statement in &plan.statements {
        match tx
            .execute(statement.sql, params_from_iter(statement.params.clone()))
            .await
        {
            Ok(affected_rows) => {
                debug!(sql = statement.sql, affected_rows, "cleanup: statement");
                outcomes.push(CleanupOutcome {
                    statement: statement.sql.to_string(),
                    params: statement.params.clone(),
                    affected_rows,
                });
            }
            Err(error) => {
                warn!(sql = statement.sql, %error, "cleanup: rolling back");
                if let Err(rollback_error) = tx.rollback().await {
                    warn!(%rollback_error, "cleanup: rollback failed");
                }
                return Err(error.into());
            }
        }
    }

    tx.commit().await?;
    Ok(outcomes)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::test_support::helpers::{count_rows, seed_member, test_db};

    #[test]
    fn blank_user_id_means_global() {
        assert_eq!(CleanupPlan::new(Some("  ")), CleanupPlan::global());
        assert_eq!(CleanupPlan::new(None).statements.len(), 6);
        assert_eq!(CleanupPlan::new(Some("u1")), CleanupPlan::for_user("u1"));
    }

    #[test]
    fn scoped_plan_deletes_children_before_members() {
        let plan = CleanupPlan::for_user("u1");
        let tables: Vec<&str> = plan
            .statements
            .iter()
            .map(|s| s.sql.split_whitespace().nth(2).unwrap())
            .collect();
        assert_eq!(
            tables,
            vec!["assessment_scores", "otp_verifications", "roles", "members"]
        );
        assert!(plan.statements.iter().all(|s| s.params == vec!["u1"]));
    }

    #[test]
    fn preview_includes_params() {
        let plan = CleanupPlan::for_user("u1");
        assert_eq!(
            plan.statements[3].preview(),
            r#"DELETE FROM members WHERE user_id = ?1  params=["u1"]"#
        );
        assert_eq!(
            CleanupPlan::global().statements[0].preview(),
            "DELETE FROM assessment_scores"
        );
    }

    #[tokio::test]
    async fn scoped_cleanup_only_touches_that_user() {
        let db = test_db().await;
        seed_member(&db, "u1").await;
        seed_member(&db, "u2").await;

        let outcomes = db.run_cleanup(&CleanupPlan::for_user("u1")).await.unwrap();
        let affected: Vec<u64> = outcomes.iter().map(|o| o.affected_rows).collect();
        assert_eq!(affected, vec![1, 1, 1, 1]);

        assert_eq!(count_rows(&db, "members").await, 1);
        assert_eq!(count_rows(&db, "roles").await, 1);
        assert_eq!(count_rows(&db, "otp_verifications").await, 1);
        assert_eq!(count_rows(&db, "assessment_scores").await, 1);
        assert_eq!(count_rows(&db, "password_reset_token").await, 2);
        assert_eq!(count_rows(&db, "login_attempts").await, 2);
    }

    #[tokio::test]
    async fn unknown_user_affects_nothing() {
        let db = test_db().await;
        seed_member(&db, "u1").await;
        let outcomes = db.run_cleanup(&CleanupPlan::for_user("ghost")).await.unwrap();
        assert!(outcomes.iter().all(|o| o.affected_rows == 0));
        assert_eq!(count_rows(&db, "members").await, 1);
    }

    #[tokio::test]
    async fn global_cleanup_empties_account_tables() {
        let db = test_db().await;
        seed_member(&db, "u1").await;
        seed_member(&db, "u2").await;

        let outcomes = db.run_cleanup(&CleanupPlan::global()).await.unwrap();
        assert_eq!(outcomes.len(), 6);
        for table in [
            "assessment_scores",
            "otp_verifications",
            "password_reset_token",
            "login_attempts",
            "roles",
            "members",
        ] {
            assert_eq!(count_rows(&db, table).await, 0, "{table}");
        }
    }

    #[tokio::test]
    async fn failing_statement_rolls_back_and_restores_foreign_keys() {
        let db = test_db().await;
        seed_member(&db, "u1").await;
        let plan = CleanupPlan {
            statements: vec![
                CleanupStatement {
                    sql: "DELETE FROM roles",
                    params: Vec::new(),
                },
                CleanupStatement {
                    sql: "DELETE FROM no_such_table",
                    params: Vec::new(),
                },
            ],
        };

        let err = db.run_cleanup(&plan).await.unwrap_err();
        assert!(matches!(err, DatabaseError::LibSql(_)), "{err}");
        assert_eq!(count_rows(&db, "roles").await, 1);

        let mut rows = db.conn().query("PRAGMA foreign_keys", ()).await.unwrap();
        let row = rows.next().await.unwrap().unwrap();
        assert_eq!(row.get::<i64>(0).unwrap(), 1);
    }
}
