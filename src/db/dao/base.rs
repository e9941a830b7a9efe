use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait,
    FromQueryResult, IntoActiveModel, Iterable, PaginatorTrait, PrimaryKeyToColumn,
    PrimaryKeyTrait, QueryOrder, Select,
};

use super::error::{DaoLayerError, DaoResult};

#[derive(Debug, serde::Serialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub page: u64,
    pub page_size: u64,
    pub has_next: bool,
    pub total: u64,
}

/// CRUD over a single entity keyed by a database-assigned `i64`.
///
/// Implementors only name the entity and hand over a connection; every
/// operation is provided. Rows are always returned in primary key order so
/// listings and pages are stable between calls.
#[async_trait::async_trait]
pub trait DaoBase: Clone + Send + Sync + Sized {
    type Entity: EntityTrait<
            Model = Self::Model,
            ActiveModel = Self::ActiveModel,
            PrimaryKey: PrimaryKeyTrait<ValueType = i64>,
        > + Send
        + Sync;
    type Model: FromQueryResult
        + IntoActiveModel<Self::ActiveModel>
        + serde::Serialize
        + Clone
        + Send
        + Sync
        + 'static;
    type ActiveModel: ActiveModelTrait<Entity = Self::Entity>
        + ActiveModelBehavior
        + Send
        + Sync
        + 'static;

    const ENTITY_NAME: &'static str;
    const MAX_PAGE_SIZE: u64 = 1000;

    fn from_db(db: DatabaseConnection) -> Self;

    fn new(db: &DatabaseConnection) -> Self {
        Self::from_db(db.clone())
    }

    fn db(&self) -> &DatabaseConnection;

    fn id_of(model: &Self::Model) -> i64;

    fn ordered(select: Select<Self::Entity>) -> Select<Self::Entity> {
        <Self::Entity as EntityTrait>::PrimaryKey::iter()
            .fold(select, |select, key| select.order_by_asc(key.into_column()))
    }

    fn not_found(id: i64) -> DaoLayerError {
        DaoLayerError::NotFound {
            entity: Self::ENTITY_NAME,
            id,
        }
    }

    /// Inserts a new row. Any primary key carried by `data` is discarded so the
    /// database sequence is the only source of identifiers.
    async fn create(
        &self,
        data: impl IntoActiveModel<Self::ActiveModel> + Send,
    ) -> DaoResult<Self::Model> {
        let mut active = data.into_active_model();
        for key in <Self::Entity as EntityTrait>::PrimaryKey::iter() {
            active.not_set(key.into_column());
        }

        let model = active.insert(self.db()).await?;
        tracing::debug!(entity = Self::ENTITY_NAME, id = Self::id_of(&model), "row created");
        Ok(model)
    }

    async fn find_by_id(&self, id: i64) -> DaoResult<Self::Model> {
        Self::Entity::find_by_id(id)
            .one(self.db())
            .await?
            .ok_or_else(|| Self::not_found(id))
    }

    async fn exists(&self, id: i64) -> DaoResult<bool> {
        let matches = Self::Entity::find_by_id(id).count(self.db()).await?;
        Ok(matches > 0)
    }

    async fn find_all(&self) -> DaoResult<Vec<Self::Model>> {
        Ok(Self::ordered(Self::Entity::find()).all(self.db()).await?)
    }

    /// Fetches one page; `page` is 1-based. Pages past the last row are empty.
    async fn find(&self, page: u64, page_size: u64) -> DaoResult<PaginatedResponse<Self::Model>> {
        let invalid = DaoLayerError::InvalidPagination { page, page_size };
        if page == 0 || page_size == 0 || page_size > Self::MAX_PAGE_SIZE {
            return Err(invalid);
        }
        // offsets must fit the i64 the database binds
        let offset = (page - 1)
            .checked_mul(page_size)
            .filter(|offset| i64::try_from(*offset).is_ok())
            .ok_or(invalid)?;

        let paginator = Self::ordered(Self::Entity::find()).paginate(self.db(), page_size);
        let total = paginator.num_items().await?;
        let data = if offset < total {
            paginator.fetch_page(page - 1).await?
        } else {
            Vec::new()
        };
        let has_next = offset + page_size < total;

        Ok(PaginatedResponse {
            data,
            page,
            page_size,
            has_next,
            total,
        })
    }

    async fn count(&self) -> DaoResult<u64> {
        Ok(Self::Entity::find().count(self.db()).await?)
    }

    async fn update<F>(&self, id: i64, apply: F) -> DaoResult<Self::Model>
    where
        F: FnOnce(&mut Self::ActiveModel) + Send,
    {
        let model = self.find_by_id(id).await?;
        let mut active = model.clone().into_active_model();
        apply(&mut active);
        if !active.is_changed() {
            return Ok(model);
        }

        match active.update(self.db()).await {
            Ok(updated) => {
                tracing::debug!(entity = Self::ENTITY_NAME, id, "row updated");
                Ok(updated)
            }
            Err(DbErr::RecordNotUpdated) => Err(Self::not_found(id)),
            Err(err) => Err(err.into()),
        }
    }

    async fn delete(&self, id: i64) -> DaoResult<i64> {
        let result = Self::Entity::delete_by_id(id).exec(self.db()).await?;
        if result.rows_affected == 0 {
            return Err(Self::not_found(id));
        }

        tracing::debug!(entity = Self::ENTITY_NAME, id, "row deleted");
        Ok(id)
    }
}
