use sea_orm::DatabaseConnection;

pub mod base;
pub mod error;
pub mod todo_dao;

pub use base::{DaoBase, PaginatedResponse};
pub use error::{DaoLayerError, DaoResult};
pub use todo_dao::TodoDao;

#[derive(Clone)]
pub struct DaoContext {
    db: DatabaseConnection,
}

impl DaoContext {
    pub fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    pub fn todo(&self) -> TodoDao {
        DaoBase::new(&self.db)
    }
}
