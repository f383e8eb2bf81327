use sea_orm::sea_query::{Expr, ExprTrait};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::{DaoLayerError, DaoResult};
use crate::db::entities::prelude::Todo;
use crate::db::entities::todo;

const ENTITY: &str = "Todo";

#[derive(Clone)]
pub struct TodoDao {
    db: DatabaseConnection,
}

impl TodoDao {
    pub fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    /// Newest first. `id` breaks ties between rows stamped in the same instant.
    pub async fn list_newest_first(&self) -> DaoResult<Vec<todo::Model>> {
        let todos = Todo::find()
            .order_by_desc(todo::Column::CreatedAt)
            .order_by_desc(todo::Column::Id)
            .all(&self.db)
            .await?;
        Ok(todos)
    }

    /// `id` and `created_at` are left to the store.
    pub async fn create(&self, title: &str) -> DaoResult<todo::Model> {
        let model = todo::ActiveModel {
            title: Set(title.to_string()),
            completed: Set(false),
            ..Default::default()
        };
        Ok(model.insert(&self.db).await?)
    }

    /// Single `UPDATE .. SET completed = NOT completed .. RETURNING *`, so two
    /// concurrent toggles of one row always net out.
    pub async fn toggle_completed(&self, id: i64) -> DaoResult<todo::Model> {
        let updated = Todo::update_many()
            .col_expr(
                todo::Column::Completed,
                Expr::col(todo::Column::Completed).not(),
            )
            .filter(todo::Column::Id.eq(id))
            .exec_with_returning(&self.db)
            .await?;
        first_or_not_found(updated, id)
    }

    /// Hard delete. Returns the row as it was right before removal.
    pub async fn delete(&self, id: i64) -> DaoResult<todo::Model> {
        let deleted = Todo::delete_many()
            .filter(todo::Column::Id.eq(id))
            .exec_with_returning(&self.db)
            .await?;
        first_or_not_found(deleted, id)
    }
}

fn first_or_not_found(rows: Vec<todo::Model>, id: i64) -> DaoResult<todo::Model> {
    rows.into_iter()
        .next()
        .ok_or(DaoLayerError::NotFound { entity: ENTITY, id })
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, TimeZone};
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase};

    use super::TodoDao;
    use crate::db::dao::DaoLayerError;
    use crate::db::entities::todo;

    fn ts(minute: u32) -> chrono::DateTime<chrono::FixedOffset> {
        FixedOffset::east_opt(0)
            .expect("offset should be valid")
            .with_ymd_and_hms(2026, 1, 1, 0, minute, 0)
            .single()
            .expect("timestamp should be valid")
    }

    fn todo_model(id: i64, title: &str, completed: bool) -> todo::Model {
        todo::Model {
            id,
            title: title.to_string(),
            completed,
            created_at: ts(id as u32 % 60),
        }
    }

    #[tokio::test]
    async fn create_returns_the_row_assigned_by_the_store() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[todo_model(7, "Buy milk", false)]])
            .into_connection();
        let dao = TodoDao::new(&db);

        let created = dao.create("Buy milk").await.expect("insert should succeed");

        assert_eq!(created.id, 7);
        assert_eq!(created.title, "Buy milk");
        assert!(!created.completed);
    }

    #[tokio::test]
    async fn list_returns_rows_in_store_order() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[
                todo_model(3, "newest", false),
                todo_model(2, "middle", true),
                todo_model(1, "oldest", false),
            ]])
            .into_connection();
        let dao = TodoDao::new(&db);

        let todos = dao.list_newest_first().await.expect("query should succeed");
        let ids: Vec<i64> = todos.iter().map(|todo| todo.id).collect();

        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[tokio::test]
    async fn list_orders_by_creation_time_descending() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<todo::Model>::new()])
            .into_connection();
        let dao = TodoDao::new(&db);

        dao.list_newest_first().await.expect("query should succeed");

        let log = format!("{:?}", db.into_transaction_log());
        assert!(log.contains(r#"ORDER BY \"todos\".\"created_at\" DESC"#), "{log}");
    }

    #[tokio::test]
    async fn toggle_flips_in_a_single_statement() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[todo_model(4, "walk", true)]])
            .into_connection();
        let dao = TodoDao::new(&db);

        let toggled = dao.toggle_completed(4).await.expect("update should succeed");
        assert!(toggled.completed);

        let log = db.into_transaction_log();
        assert_eq!(log.len(), 1, "toggle must not read before writing");
        let sql = format!("{:?}", log[0]);
        assert!(sql.contains("NOT"), "{sql}");
    }

    #[tokio::test]
    async fn toggle_reports_not_found_when_no_row_matches() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<todo::Model>::new()])
            .into_connection();
        let dao = TodoDao::new(&db);

        let err = dao
            .toggle_completed(999_999)
            .await
            .expect_err("missing row should fail");
        assert!(matches!(
            err,
            DaoLayerError::NotFound {
                entity: "Todo",
                id: 999_999
            }
        ));
    }

    #[tokio::test]
    async fn delete_returns_prior_state() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[todo_model(5, "done already", true)]])
            .into_connection();
        let dao = TodoDao::new(&db);

        let deleted = dao.delete(5).await.expect("delete should succeed");
        assert_eq!(deleted, todo_model(5, "done already", true));
    }

    #[tokio::test]
    async fn delete_reports_not_found_when_no_row_matches() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<todo::Model>::new()])
            .into_connection();
        let dao = TodoDao::new(&db);

        let err = dao.delete(12).await.expect_err("missing row should fail");
        assert!(matches!(err, DaoLayerError::NotFound { id: 12, .. }));
    }

    #[tokio::test]
    async fn list_maps_database_errors() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("connection reset".to_string())])
            .into_connection();
        let dao = TodoDao::new(&db);

        let err = dao
            .list_newest_first()
            .await
            .expect_err("list should fail");
        assert!(matches!(err, DaoLayerError::Db(_)));
    }
}
