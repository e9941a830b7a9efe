use crate::{
    db::dao::TodoDao,
    resource::{FieldDescriptor, FieldKind, ResourceDescriptor, RestRepository},
    routes::todos::TodoPayload,
    services::crud_service::{CrudErrors, CrudService},
};

pub const TODO_RESOURCE: ResourceDescriptor = ResourceDescriptor {
    path: "todos",
    collection_rel: "todos",
    item_rel: "todos",
    fields: &[
        FieldDescriptor::identifier("id"),
        FieldDescriptor::writable("title", FieldKind::String, "Title for the TODO item"),
        FieldDescriptor::writable(
            "description",
            FieldKind::String,
            "Details about the TODO item",
        ),
        FieldDescriptor::writable("completed", FieldKind::Boolean, "Is it completed?"),
    ],
};

#[derive(Clone)]
pub struct TodoService {
    todo_dao: TodoDao,
}

impl TodoService {
    pub fn new(todo_dao: TodoDao) -> Self {
        Self { todo_dao }
    }
}

impl CrudService for TodoService {
    type Dao = TodoDao;

    fn dao(&self) -> &Self::Dao {
        &self.todo_dao
    }

    fn errors(&self) -> CrudErrors {
        CrudErrors {
            create_failed: "Create todo failed",
            find_failed: "Todo fetch failed",
            update_failed: "Update todo failed",
            delete_failed: "Delete todo failed",
        }
    }
}

impl RestRepository for TodoService {
    type Payload = TodoPayload;

    fn resource() -> &'static ResourceDescriptor {
        &TODO_RESOURCE
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use axum::http::StatusCode;
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult, Value};

    use super::TodoService;
    use crate::{
        db::{dao::DaoContext, entities::todo::NewTodo},
        error::AppError,
        services::crud_service::CrudService,
    };

    fn count_row(n: i64) -> BTreeMap<&'static str, Value> {
        BTreeMap::from([("num_items", Value::BigInt(Some(n)))])
    }

    fn service(db: MockDatabase) -> TodoService {
        let db = db.into_connection();
        TodoService::new(DaoContext::new(&db).todo())
    }

    #[tokio::test]
    async fn database_failures_become_internal_errors_with_context() {
        let service = service(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_errors([DbErr::Custom("disk full".to_string())]),
        );

        let err = service
            .create(NewTodo::new("Buy milk"))
            .await
            .expect_err("insert should fail");
        assert!(matches!(err, AppError::Internal { .. }));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Create todo failed");
    }

    #[tokio::test]
    async fn missing_rows_become_not_found() {
        let service = service(MockDatabase::new(DatabaseBackend::Postgres).append_exec_results([
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            },
        ]));

        let err = service.delete(11).await.expect_err("delete should miss");
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Todo not found (id=11)");
    }

    #[tokio::test]
    async fn exists_and_count_read_the_table() {
        let service = service(MockDatabase::new(DatabaseBackend::Postgres).append_query_results([
            [count_row(1)],
            [count_row(0)],
            [count_row(3)],
        ]));

        assert!(service.exists(1).await.expect("exists should succeed"));
        assert!(!service.exists(2).await.expect("exists should succeed"));
        assert_eq!(service.count().await.expect("count should succeed"), 3);
    }

    #[tokio::test]
    async fn bad_pages_become_bad_requests() {
        let service = service(MockDatabase::new(DatabaseBackend::Postgres));

        let err = service.find(0, 20).await.expect_err("page 0 is invalid");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Invalid pagination: page=0 page_size=20");
    }
}
