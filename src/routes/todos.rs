use std::sync::Arc;

use axum::Router;
use sea_orm::IntoActiveModel;
use serde::{Deserialize, Deserializer};

use super::crud_router::CrudApiRouter;
use crate::{
    db::entities::todo::{self, NewTodo},
    resource::ResourcePayload,
    services::ServiceContext,
    state::AppState,
};

/// Write body of `/todos`. The outer `Option` of a text field tells an absent
/// key apart from an explicit `null`.
#[derive(Debug, Default, Deserialize)]
pub struct TodoPayload {
    #[serde(default, deserialize_with = "present")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
    #[serde(default)]
    pub completed: Option<bool>,
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl ResourcePayload<todo::ActiveModel> for TodoPayload {
    fn into_active(self) -> todo::ActiveModel {
        NewTodo {
            title: self.title.flatten(),
            description: self.description.flatten(),
            completed: self.completed.unwrap_or(false),
        }
        .into_active_model()
    }

    fn replace(self, active: &mut todo::ActiveModel) {
        active.title.set_if_not_equals(self.title.flatten());
        active
            .description
            .set_if_not_equals(self.description.flatten());
        active
            .completed
            .set_if_not_equals(self.completed.unwrap_or(false));
    }

    fn merge(self, active: &mut todo::ActiveModel) {
        if let Some(title) = self.title {
            active.title.set_if_not_equals(title);
        }
        if let Some(description) = self.description {
            active.description.set_if_not_equals(description);
        }
        if let Some(completed) = self.completed {
            active.completed.set_if_not_equals(completed);
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    let todos = ServiceContext::from_state(&state).todo();
    CrudApiRouter::new(todos, &state.config.rest).router()
}
