use sea_orm::{ActiveValue::NotSet, IntoActiveModel, Set, entity::prelude::*};
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, DeriveEntityModel)]
#[sea_orm(table_name = "todo")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    #[sea_orm(default_value = false)]
    pub completed: bool,
}

impl ActiveModelBehavior for ActiveModel {}

/// A todo that has not been persisted yet and therefore has no identity.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NewTodo {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: bool,
}

impl NewTodo {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }
}

impl IntoActiveModel<ActiveModel> for NewTodo {
    fn into_active_model(self) -> ActiveModel {
        ActiveModel {
            id: NotSet,
            title: Set(self.title),
            description: Set(self.description),
            completed: Set(self.completed),
        }
    }
}
