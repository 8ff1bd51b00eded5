use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use roofline_catalog::{
    BlogPost, BlogRepository, Location, LocationRepository, PricingRecord, PricingRepository,
    RepositoryError, same_city,
};

use super::seed;

/// In-memory catalog for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    pricing: RwLock<Vec<PricingRecord>>,
    locations: RwLock<Vec<Location>>,
    posts: RwLock<Vec<BlogPost>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog preloaded with the demo pricing tiers, branches and posts.
    pub fn seeded() -> Self {
        Self {
            pricing: RwLock::new(seed::pricing()),
            locations: RwLock::new(seed::locations()),
            posts: RwLock::new(seed::posts()),
        }
    }

    pub fn insert_pricing(&self, record: PricingRecord) -> Result<(), RepositoryError> {
        let mut rows = self.pricing.write().map_err(|_| poisoned())?;
        rows.push(record);
        Ok(())
    }

    pub fn insert_location(&self, location: Location) -> Result<(), RepositoryError> {
        let mut rows = self.locations.write().map_err(|_| poisoned())?;
        rows.retain(|l| l.slug != location.slug);
        rows.push(location);
        Ok(())
    }

    pub fn insert_post(&self, post: BlogPost) -> Result<(), RepositoryError> {
        let mut rows = self.posts.write().map_err(|_| poisoned())?;
        rows.retain(|p| p.slug != post.slug);
        rows.push(post);
        Ok(())
    }
}

fn poisoned() -> RepositoryError {
    RepositoryError::Unavailable("in-memory catalog lock poisoned".to_string())
}

#[async_trait]
impl PricingRepository for InMemoryCatalog {
    async fn pricing_for_city(&self, city: &str) -> Result<Vec<PricingRecord>, RepositoryError> {
        let rows = self.pricing.read().map_err(|_| poisoned())?;

        let mut matching: Vec<PricingRecord> = rows
            .iter()
            .filter(|r| r.active && same_city(&r.city, city))
            .cloned()
            .collect();
        matching.sort_by_key(|r| r.order_rank);

        Ok(matching)
    }
}

#[async_trait]
impl LocationRepository for InMemoryCatalog {
    async fn list_active(&self) -> Result<Vec<Location>, RepositoryError> {
        let rows = self.locations.read().map_err(|_| poisoned())?;

        let mut active: Vec<Location> = rows.iter().filter(|l| l.active).cloned().collect();
        active.sort_by_key(Location::sort_key);

        Ok(active)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Location>, RepositoryError> {
        let rows = self.locations.read().map_err(|_| poisoned())?;
        Ok(rows.iter().find(|l| l.active && l.slug == slug).cloned())
    }
}

#[async_trait]
impl BlogRepository for InMemoryCatalog {
    async fn list_published(
        &self,
        now: DateTime<Utc>,
        limit: usize,
    ) -> Result<Vec<BlogPost>, RepositoryError> {
        let rows = self.posts.read().map_err(|_| poisoned())?;

        let mut published: Vec<BlogPost> = rows
            .iter()
            .filter(|p| p.is_published_at(now))
            .cloned()
            .collect();
        published.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        published.truncate(limit);

        Ok(published)
    }

    async fn find_published(
        &self,
        slug: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<BlogPost>, RepositoryError> {
        let rows = self.posts.read().map_err(|_| poisoned())?;
        Ok(rows
            .iter()
            .find(|p| p.slug == slug && p.is_published_at(now))
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use roofline_catalog::{Category, SolutionId};

    fn tier(id: &str, city: &str, rank: i32, active: bool) -> PricingRecord {
        PricingRecord {
            internal_id: SolutionId::parse(id).unwrap(),
            title: id.to_uppercase(),
            category: Category::Concrete,
            price_per_area_cash: 100.0,
            price_per_area_installments: 120.0,
            order_rank: rank,
            city: city.to_string(),
            description: None,
            warranty_years: None,
            active,
        }
    }

    #[tokio::test]
    async fn pricing_is_filtered_by_city_and_sorted_by_rank() {
        let catalog = InMemoryCatalog::new();
        catalog.insert_pricing(tier("c", "Campinas", 3, true)).unwrap();
        catalog.insert_pricing(tier("a", "campinas ", 1, true)).unwrap();
        catalog.insert_pricing(tier("x", "Sorocaba", 1, true)).unwrap();
        catalog.insert_pricing(tier("b", "Campinas", 2, true)).unwrap();

        let rows = catalog.pricing_for_city("CAMPINAS").await.unwrap();
        let ids: Vec<&str> = rows.iter().map(|r| r.internal_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn inactive_tiers_are_hidden() {
        let catalog = InMemoryCatalog::new();
        catalog.insert_pricing(tier("old", "Campinas", 1, false)).unwrap();

        assert!(catalog.pricing_for_city("Campinas").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_city_returns_no_rows() {
        let catalog = InMemoryCatalog::seeded();
        assert!(catalog.pricing_for_city("Manaus").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn locations_are_ordered_by_state_then_city() {
        let catalog = InMemoryCatalog::seeded();
        let locations = catalog.list_active().await.unwrap();

        let keys: Vec<(String, String)> = locations.iter().map(Location::sort_key).collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
        assert!(locations.iter().all(|l| l.active));
    }

    #[tokio::test]
    async fn inactive_location_is_not_found_by_slug() {
        let catalog = InMemoryCatalog::seeded();
        let mut closed = catalog.find_by_slug("campinas").await.unwrap().unwrap();
        closed.active = false;
        catalog.insert_location(closed).unwrap();

        assert!(catalog.find_by_slug("campinas").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn posts_are_newest_first_and_limited() {
        let now = Utc::now();
        let catalog = InMemoryCatalog::new();
        for (slug, age_days) in [("old", 30), ("new", 1), ("mid", 10)] {
            catalog.insert_post(BlogPost {
                slug: slug.to_string(),
                title: slug.to_string(),
                excerpt: String::new(),
                body: String::new(),
                cover_url: None,
                published_at: Some(now - Duration::days(age_days)),
                tags: vec![],
            })
            .unwrap();
        }
        catalog.insert_post(BlogPost {
            slug: "draft".to_string(),
            title: "draft".to_string(),
            excerpt: String::new(),
            body: String::new(),
            cover_url: None,
            published_at: None,
            tags: vec![],
        })
        .unwrap();

        let posts = catalog.list_published(now, 2).await.unwrap();
        let slugs: Vec<&str> = posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["new", "mid"]);

        assert!(catalog.find_published("draft", now).await.unwrap().is_none());
        assert!(catalog.find_published("old", now).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn inserts_into_a_poisoned_catalog_fail_loudly() {
        let catalog = std::sync::Arc::new(InMemoryCatalog::new());
        let poisoner = std::sync::Arc::clone(&catalog);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.pricing.write().unwrap();
            panic!("poison the pricing lock");
        })
        .join();

        let err = catalog.insert_pricing(tier("a", "Campinas", 1, true)).unwrap_err();
        assert!(matches!(err, RepositoryError::Unavailable(_)));
        assert!(catalog.pricing_for_city("Campinas").await.is_err());

        let branch = crate::catalog::seed::locations().remove(0);
        assert!(catalog.insert_location(branch).is_ok());
    }
}
