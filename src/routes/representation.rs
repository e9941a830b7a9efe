use std::collections::BTreeMap;

use serde::Serialize;

use crate::db::dao::PaginatedResponse;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Link {
    pub href: String,
}

impl Link {
    pub fn new(href: impl Into<String>) -> Self {
        Self { href: href.into() }
    }
}

pub type Links = BTreeMap<&'static str, Link>;

#[derive(Debug, Serialize)]
pub struct PageMeta {
    pub page: u64,
    pub page_size: u64,
    pub has_next: bool,
    pub total: u64,
}

/// Collection body: the rows embedded under the resource's relation name.
#[derive(Debug, Serialize)]
pub struct CollectionResponse<T> {
    #[serde(rename = "_embedded")]
    pub embedded: BTreeMap<&'static str, Vec<T>>,
    #[serde(rename = "_links")]
    pub links: Links,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<PageMeta>,
}

impl<T> CollectionResponse<T> {
    pub fn all(rel: &'static str, items: Vec<T>, links: Links) -> Self {
        Self {
            embedded: BTreeMap::from([(rel, items)]),
            links,
            page: None,
        }
    }

    pub fn paged(rel: &'static str, page: PaginatedResponse<T>, links: Links) -> Self {
        let PaginatedResponse {
            data,
            page,
            page_size,
            has_next,
            total,
        } = page;
        Self {
            embedded: BTreeMap::from([(rel, data)]),
            links,
            page: Some(PageMeta {
                page,
                page_size,
                has_next,
                total,
            }),
        }
    }
}

/// Body of index-style endpoints that only carry links.
#[derive(Debug, Serialize)]
pub struct LinksResponse {
    #[serde(rename = "_links")]
    pub links: Links,
}
