use axum::{Json, Router, extract::Path, routing::get};

use super::representation::{Link, Links, LinksResponse};
use crate::{error::AppError, resource::ResourceDescriptor};

/// Root index plus `/profile` metadata for every exported resource.
pub fn router<S>(base_path: &str, resources: &'static [&'static ResourceDescriptor]) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let root = if base_path.is_empty() {
        "/".to_string()
    } else {
        base_path.to_string()
    };
    let profile = format!("{base_path}/profile");

    let index = {
        let base_path = base_path.to_string();
        let profile = profile.clone();
        move || async move {
            let mut links: Links = resources
                .iter()
                .map(|resource| {
                    (
                        resource.collection_rel,
                        Link::new(resource.collection_path(&base_path)),
                    )
                })
                .collect();
            links.insert("profile", Link::new(profile));
            Json(LinksResponse { links })
        }
    };

    let profiles = {
        let base_path = base_path.to_string();
        let profile = profile.clone();
        move || async move {
            let mut links: Links = resources
                .iter()
                .map(|resource| {
                    (
                        resource.collection_rel,
                        Link::new(resource.profile_path(&base_path)),
                    )
                })
                .collect();
            links.insert("self", Link::new(profile));
            Json(LinksResponse { links })
        }
    };

    let describe = move |Path(name): Path<String>| async move {
        resources
            .iter()
            .find(|resource| resource.path == name)
            .map(|resource| Json(**resource))
            .ok_or_else(|| AppError::not_found(format!("No resource named '{name}'")))
    };

    Router::<S>::new()
        .route(&root, get(index))
        .route(&profile, get(profiles))
        .route(&format!("{profile}/{{resource}}"), get(describe))
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{self, Body},
        http::{Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::{resource::ResourceDescriptor, services::todo_service::TODO_RESOURCE};

    static RESOURCES: &[&ResourceDescriptor] = &[&TODO_RESOURCE];

    async fn get_json(base_path: &str, uri: &str) -> (StatusCode, Value) {
        let response = super::router::<()>(base_path, RESOURCES)
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn index_links_every_resource_under_the_base_path() {
        let (status, body) = get_json("/api", "/api").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["_links"]["todos"]["href"], "/api/todos");
        assert_eq!(body["_links"]["profile"]["href"], "/api/profile");
    }

    #[tokio::test]
    async fn profile_describes_fields() {
        let (status, body) = get_json("", "/profile/todos").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["collection_rel"], "todos");
        assert_eq!(body["fields"][0]["name"], "id");
        assert_eq!(body["fields"][0]["read_only"], true);
        assert_eq!(body["fields"][3]["type"], "boolean");
        assert_eq!(body["fields"][3]["description"], "Is it completed?");
    }

    #[tokio::test]
    async fn unknown_profiles_are_not_found() {
        let (status, body) = get_json("", "/profile/widgets").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["status"], 404);
        assert_eq!(body["message"], "No resource named 'widgets'");
    }
}
