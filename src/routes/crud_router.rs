use axum::{
    Json, Router,
    extract::{Path, Query, rejection::QueryRejection},
    http::{StatusCode, header},
    routing::get,
};

use super::representation::{CollectionResponse, Link, Links};
use crate::{
    config::RestConfig,
    db::dao::DaoBase,
    error::AppError,
    resource::{ResourcePayload, RestRepository},
    services::crud_service::CrudService,
};

type ModelOf<R> = <<R as CrudService>::Dao as DaoBase>::Model;

#[derive(Clone, Debug, Default, serde::Deserialize)]
pub struct ListQuery {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

const INVALID_QUERY_MESSAGE: &str = "Invalid query";

/// Maps the CRUD capability set of a [`RestRepository`] onto HTTP verbs:
///
/// | route                 | verb   | operation            |
/// |-----------------------|--------|----------------------|
/// | `{collection}`        | GET    | `find_all` / `find`  |
/// | `{collection}`        | POST   | `create`             |
/// | `{collection}/{id}`   | GET    | `find_by_id`         |
/// | `{collection}/{id}`   | PUT    | `update` (replace)   |
/// | `{collection}/{id}`   | PATCH  | `update` (merge)     |
/// | `{collection}/{id}`   | DELETE | `delete`             |
#[derive(Clone)]
pub struct CrudApiRouter<R: RestRepository> {
    repository: R,
    base_path: String,
    default_page_size: u64,
}

impl<R: RestRepository> CrudApiRouter<R> {
    pub fn new(repository: R, rest: &RestConfig) -> Self {
        Self {
            repository,
            base_path: rest.base_path.clone(),
            default_page_size: rest.default_page_size,
        }
    }

    pub fn collection_path(&self) -> String {
        R::resource().collection_path(&self.base_path)
    }

    fn collection_links(&self, page: Option<(u64, u64, bool)>) -> Links {
        let resource = R::resource();
        let collection = self.collection_path();
        let mut links = Links::from([
            ("self", Link::new(collection.clone())),
            ("profile", Link::new(resource.profile_path(&self.base_path))),
        ]);

        if let Some((page, page_size, has_next)) = page {
            let page_href = |page: u64| format!("{collection}?page={page}&page_size={page_size}");
            links.insert("self", Link::new(page_href(page)));
            links.insert("first", Link::new(page_href(1)));
            if page > 1 {
                links.insert("prev", Link::new(page_href(page - 1)));
            }
            if has_next {
                links.insert("next", Link::new(page_href(page + 1)));
            }
        }
        links
    }

    pub fn router<S>(&self) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        let collection = self.collection_path();
        let item = format!("{collection}/{{id}}");
        let rel = R::resource().collection_rel;

        let list = {
            let this = self.clone();
            move |query: Result<Query<ListQuery>, QueryRejection>| async move {
                let Query(query) = query.map_err(|err| {
                    AppError::bad_request(format!("{INVALID_QUERY_MESSAGE}: {err}"))
                })?;

                let body = if query.page.is_none() && query.page_size.is_none() {
                    let rows: Vec<ModelOf<R>> = this.repository.find_all().await?;
                    CollectionResponse::all(rel, rows, this.collection_links(None))
                } else {
                    let page = query.page.unwrap_or(1);
                    let page_size = query.page_size.unwrap_or(this.default_page_size);
                    let rows = this.repository.find(page, page_size).await?;
                    let links = this.collection_links(Some((page, page_size, rows.has_next)));
                    CollectionResponse::paged(rel, rows, links)
                };
                Ok::<_, AppError>(Json(body))
            }
        };

        let create = {
            let repository = self.repository.clone();
            let collection = collection.clone();
            move |Json(payload): Json<R::Payload>| async move {
                let model: ModelOf<R> = repository.create(payload.into_active()).await?;
                let location = format!("{collection}/{}", <R::Dao as DaoBase>::id_of(&model));
                Ok::<_, AppError>((
                    StatusCode::CREATED,
                    [(header::LOCATION, location)],
                    Json(model),
                ))
            }
        };

        let find_one = {
            let repository = self.repository.clone();
            move |Path(id): Path<i64>| async move {
                let model: ModelOf<R> = repository.find_by_id(id).await?;
                Ok::<_, AppError>(Json(model))
            }
        };

        let replace = {
            let repository = self.repository.clone();
            move |Path(id): Path<i64>, Json(payload): Json<R::Payload>| async move {
                let model: ModelOf<R> = repository
                    .update(id, move |active| payload.replace(active))
                    .await?;
                Ok::<_, AppError>(Json(model))
            }
        };

        let merge = {
            let repository = self.repository.clone();
            move |Path(id): Path<i64>, Json(payload): Json<R::Payload>| async move {
                let model: ModelOf<R> = repository
                    .update(id, move |active| payload.merge(active))
                    .await?;
                Ok::<_, AppError>(Json(model))
            }
        };

        let remove = {
            let repository = self.repository.clone();
            move |Path(id): Path<i64>| async move {
                repository.delete(id).await?;
                Ok::<_, AppError>(StatusCode::NO_CONTENT)
            }
        };

        Router::<S>::new()
            .route(&collection, get(list).post(create))
            .route(&item, get(find_one).put(replace).patch(merge).delete(remove))
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{DatabaseBackend, MockDatabase};

    use super::CrudApiRouter;
    use crate::{
        config::RestConfig,
        services::{ServiceContext, todo_service::TodoService},
    };

    fn router_with_base(base_path: &str) -> CrudApiRouter<TodoService> {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let rest = RestConfig {
            base_path: base_path.to_string(),
            ..RestConfig::default()
        };
        CrudApiRouter::new(ServiceContext::new(&db).todo(), &rest)
    }

    #[test]
    fn collection_path_follows_base_path() {
        assert_eq!(router_with_base("").collection_path(), "/todos");
        assert_eq!(router_with_base("/api").collection_path(), "/api/todos");
    }

    #[test]
    fn paged_links_point_at_neighbouring_pages() {
        let links = router_with_base("").collection_links(Some((2, 5, true)));
        assert_eq!(links["self"].href, "/todos?page=2&page_size=5");
        assert_eq!(links["first"].href, "/todos?page=1&page_size=5");
        assert_eq!(links["prev"].href, "/todos?page=1&page_size=5");
        assert_eq!(links["next"].href, "/todos?page=3&page_size=5");
        assert_eq!(links["profile"].href, "/profile/todos");
    }

    #[test]
    fn first_page_has_no_prev_link() {
        let links = router_with_base("").collection_links(Some((1, 5, false)));
        assert!(!links.contains_key("prev"));
        assert!(!links.contains_key("next"));
    }
}
