//! In-process catalog with the same semantics as the Postgres store
//!
//! Each operation holds the lock for its whole duration, which gives the
//! same single-statement atomicity the SQL repositories rely on.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::repos::{CategoryWithCount, Link};
use super::{CatalogStore, DbError};
use crate::models::{CategoryName, CategoryRef, LinkFilter, NewLink};

#[derive(Debug, Clone)]
struct CategoryRow {
    id: i64,
    name: String,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct Tables {
    categories: Vec<CategoryRow>,
    links: Vec<Link>,
    last_category_id: i64,
    last_link_id: i64,
}

impl Tables {
    fn resolve(&self, category: &CategoryRef) -> Option<&CategoryRow> {
        match category {
            CategoryRef::Id(id) => self.categories.iter().find(|c| c.id == *id),
            CategoryRef::Name(name) => self.categories.iter().find(|c| c.name == name.as_str()),
        }
    }

    fn link_mut(&mut self, id: i64) -> Result<&mut Link, DbError> {
        self.links
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| DbError::link_not_found(id))
    }
}

/// Catalog stored in memory, lost on drop
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    tables: RwLock<Tables>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CatalogStore for MemoryCatalog {
    async fn list_links(&self, filter: &LinkFilter) -> Result<Vec<Link>, DbError> {
        let tables = self.tables.read().await;
        let mut links: Vec<Link> = tables
            .links
            .iter()
            .filter(|l| filter.matches(l.category_id, &l.category_name))
            .cloned()
            .collect();

        links.sort_by(|a, b| b.visit_count.cmp(&a.visit_count).then(a.id.cmp(&b.id)));
        Ok(links)
    }

    async fn get_link(&self, id: i64) -> Result<Link, DbError> {
        let tables = self.tables.read().await;
        tables
            .links
            .iter()
            .find(|l| l.id == id)
            .cloned()
            .ok_or_else(|| DbError::link_not_found(id))
    }

    async fn create_link(&self, link: NewLink) -> Result<Link, DbError> {
        let mut tables = self.tables.write().await;
        let category = tables
            .resolve(link.category())
            .map(|c| (c.id, c.name.clone()))
            .ok_or_else(|| DbError::category_not_found(link.category()))?;

        tables.last_link_id += 1;
        let created = Link {
            id: tables.last_link_id,
            name: link.name().to_owned(),
            image: link.image().to_owned(),
            url: link.url().to_owned(),
            description: link.description().to_owned(),
            category_id: category.0,
            category_name: category.1,
            visit_count: 0,
            created_at: Utc::now(),
        };
        tables.links.push(created.clone());
        Ok(created)
    }

    async fn delete_link(&self, id: i64) -> Result<(), DbError> {
        let mut tables = self.tables.write().await;
        let before = tables.links.len();
        tables.links.retain(|l| l.id != id);

        if tables.links.len() == before {
            return Err(DbError::link_not_found(id));
        }
        Ok(())
    }

    async fn record_visit(&self, id: i64) -> Result<i64, DbError> {
        let mut tables = self.tables.write().await;
        let link = tables.link_mut(id)?;
        link.visit_count += 1;
        Ok(link.visit_count)
    }

    async fn list_categories(&self) -> Result<Vec<CategoryWithCount>, DbError> {
        let tables = self.tables.read().await;
        let categories = tables
            .categories
            .iter()
            .map(|c| CategoryWithCount {
                id: c.id,
                name: c.name.clone(),
                created_at: c.created_at,
                link_count: tables
                    .links
                    .iter()
                    .filter(|l| l.category_id == c.id)
                    .count() as i64,
            })
            .collect();
        Ok(categories)
    }

    async fn seed_categories(&self, names: &[CategoryName]) -> Result<u64, DbError> {
        let mut tables = self.tables.write().await;
        let mut inserted = 0;

        for name in names {
            if tables.categories.iter().any(|c| c.name == name.as_str()) {
                continue;
            }
            tables.last_category_id += 1;
            let row = CategoryRow {
                id: tables.last_category_id,
                name: name.as_str().to_owned(),
                created_at: Utc::now(),
            };
            tables.categories.push(row);
            inserted += 1;
        }

        Ok(inserted)
    }
}
