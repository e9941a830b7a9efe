use sea_orm::DatabaseConnection;

use super::DaoBase;
use crate::db::entities::prelude::Todo;
use crate::db::entities::todo;

#[derive(Clone)]
pub struct TodoDao {
    db: DatabaseConnection,
}

impl DaoBase for TodoDao {
    type Entity = Todo;
    type Model = todo::Model;
    type ActiveModel = todo::ActiveModel;

    const ENTITY_NAME: &'static str = "Todo";

    fn from_db(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    fn id_of(model: &todo::Model) -> i64 {
        model.id
    }
}
