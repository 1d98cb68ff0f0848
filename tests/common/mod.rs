// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use mensal::application::ExpenseService;
use mensal::domain::{CategoryId, MonthKey};
use tempfile::TempDir;

/// Helper to create a test service with a temporary database
pub async fn test_service() -> Result<(ExpenseService, TempDir)> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("test.db");
    let service = ExpenseService::init(db_path.to_str().unwrap()).await?;
    Ok((service, temp_dir))
}

/// Helper to build a month key from a literal
pub fn month(key: &str) -> MonthKey {
    MonthKey::parse(key).unwrap()
}

/// Helper to create a category and return its id
pub async fn seed_category(service: &ExpenseService, name: &str) -> Result<CategoryId> {
    Ok(service.add_category(name).await?.id)
}

/// Test fixture: standard household categories
pub struct StandardCategories {
    pub housing: CategoryId,
    pub groceries: CategoryId,
    pub leisure: CategoryId,
}

impl StandardCategories {
    /// Create the basic category set: Moradia, Mercado, Lazer
    pub async fn create_basic(service: &ExpenseService) -> Result<Self> {
        Ok(Self {
            housing: seed_category(service, "Moradia").await?,
            groceries: seed_category(service, "Mercado").await?,
            leisure: seed_category(service, "Lazer").await?,
        })
    }
}
