use sea_orm::IntoActiveModel;

use crate::db::dao::{DaoBase, DaoLayerError, PaginatedResponse};
use crate::error::AppError;

type CrudModel<D> = <D as DaoBase>::Model;
pub(crate) type CrudActiveModel<D> = <D as DaoBase>::ActiveModel;

#[derive(Clone, Copy)]
pub struct CrudErrors {
    pub create_failed: &'static str,
    pub find_failed: &'static str,
    pub update_failed: &'static str,
    pub delete_failed: &'static str,
}

impl Default for CrudErrors {
    fn default() -> Self {
        Self {
            create_failed: "Create failed",
            find_failed: "Find failed",
            update_failed: "Update failed",
            delete_failed: "Delete failed",
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub enum CrudOp {
    Create,
    Find,
    List,
    Update,
    Delete,
}

/// The CRUD capability set of a repository, with DAO failures translated
/// into HTTP-facing errors.
#[async_trait::async_trait]
pub trait CrudService: Send + Sync {
    type Dao: DaoBase;

    fn dao(&self) -> &Self::Dao;

    fn errors(&self) -> CrudErrors {
        CrudErrors::default()
    }

    fn map_error(&self, op: CrudOp, err: DaoLayerError) -> AppError {
        let errors = self.errors();
        match err {
            DaoLayerError::Db(_) => {
                let context = match op {
                    CrudOp::Create => errors.create_failed,
                    CrudOp::Find | CrudOp::List => errors.find_failed,
                    CrudOp::Update => errors.update_failed,
                    CrudOp::Delete => errors.delete_failed,
                };
                AppError::internal_with_source(context, err)
            }
            DaoLayerError::NotFound { .. } | DaoLayerError::InvalidPagination { .. } => {
                err.into()
            }
        }
    }

    async fn create<T>(&self, data: T) -> Result<CrudModel<Self::Dao>, AppError>
    where
        T: IntoActiveModel<CrudActiveModel<Self::Dao>> + Send,
    {
        self.dao()
            .create(data)
            .await
            .map_err(|err| self.map_error(CrudOp::Create, err))
    }

    async fn find_by_id(&self, id: i64) -> Result<CrudModel<Self::Dao>, AppError> {
        self.dao()
            .find_by_id(id)
            .await
            .map_err(|err| self.map_error(CrudOp::Find, err))
    }

    async fn exists(&self, id: i64) -> Result<bool, AppError> {
        self.dao()
            .exists(id)
            .await
            .map_err(|err| self.map_error(CrudOp::Find, err))
    }

    async fn find_all(&self) -> Result<Vec<CrudModel<Self::Dao>>, AppError> {
        self.dao()
            .find_all()
            .await
            .map_err(|err| self.map_error(CrudOp::List, err))
    }

    async fn find(
        &self,
        page: u64,
        page_size: u64,
    ) -> Result<PaginatedResponse<CrudModel<Self::Dao>>, AppError> {
        self.dao()
            .find(page, page_size)
            .await
            .map_err(|err| self.map_error(CrudOp::List, err))
    }

    async fn count(&self) -> Result<u64, AppError> {
        self.dao()
            .count()
            .await
            .map_err(|err| self.map_error(CrudOp::List, err))
    }

    async fn update<F>(&self, id: i64, apply: F) -> Result<CrudModel<Self::Dao>, AppError>
    where
        F: FnOnce(&mut CrudActiveModel<Self::Dao>) + Send,
    {
        self.dao()
            .update(id, apply)
            .await
            .map_err(|err| self.map_error(CrudOp::Update, err))
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.dao()
            .delete(id)
            .await
            .map(|_| ())
            .map_err(|err| self.map_error(CrudOp::Delete, err))
    }
}
