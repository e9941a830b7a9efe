//! Explicit REST exposure of repositories.
//!
//! A repository is surfaced over HTTP by implementing [`RestRepository`]: it
//! names the collection path, the relation names used in collection bodies and
//! the field metadata served under `/profile`. The routing table itself lives
//! in [`crate::routes::crud_router`].

use serde::{Serialize, de::DeserializeOwned};

use crate::services::crud_service::{CrudActiveModel, CrudService};

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Integer,
    String,
    Boolean,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct FieldDescriptor {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    pub read_only: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'static str>,
}

impl FieldDescriptor {
    pub const fn identifier(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Integer,
            read_only: true,
            description: None,
        }
    }

    pub const fn writable(name: &'static str, kind: FieldKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            read_only: false,
            description: Some(description),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ResourceDescriptor {
    /// Path segment of the collection, relative to the REST base path.
    pub path: &'static str,
    /// Key of the embedded list in collection responses.
    pub collection_rel: &'static str,
    pub item_rel: &'static str,
    pub fields: &'static [FieldDescriptor],
}

impl ResourceDescriptor {
    pub fn collection_path(&self, base_path: &str) -> String {
        format!("{base_path}/{}", self.path)
    }

    pub fn profile_path(&self, base_path: &str) -> String {
        format!("{base_path}/profile/{}", self.path)
    }
}

/// Request body accepted by a resource's write endpoints.
pub trait ResourcePayload<A>: DeserializeOwned + Send + 'static {
    /// Builds the row inserted by `POST`.
    fn into_active(self) -> A;

    /// `PUT`: every writable field takes the payload value, absent fields fall
    /// back to their empty value.
    fn replace(self, active: &mut A);

    /// `PATCH`: only fields present in the payload change.
    fn merge(self, active: &mut A);
}

pub trait RestRepository: CrudService + Clone + 'static {
    type Payload: ResourcePayload<CrudActiveModel<Self::Dao>>;

    fn resource() -> &'static ResourceDescriptor;
}
