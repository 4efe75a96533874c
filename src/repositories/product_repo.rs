use chrono::Utc;
use rusqlite::OptionalExtension;
use uuid::Uuid;

use crate::db::DbPool;
use crate::error::{AppError, Result};
use crate::models::{FromSqliteRow, Product, ProductCategory, ProductForm};

#[derive(Clone)]
pub struct ProductRepository {
    pool: DbPool,
}

impl ProductRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Product>> {
        let pool = self.pool.clone();
        let id = id.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let mut stmt = conn.prepare("SELECT * FROM products WHERE id = ?")?;
            let result = stmt.query_row([&id], Product::from_row).optional()?;
            Ok(result)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn find_all(&self) -> Result<Vec<Product>> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let mut stmt = conn.prepare("SELECT * FROM products ORDER BY name")?;
            let products = stmt
                .query_map([], Product::from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(products)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// The inventory filter: substring match on the name, combined with an
    /// optional category.
    pub async fn search(
        &self,
        query: &str,
        category: Option<ProductCategory>,
    ) -> Result<Vec<Product>> {
        let pool = self.pool.clone();
        let pattern = format!("%{}%", query.trim());
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let products = match category {
                Some(category) => {
                    let mut stmt = conn.prepare(
                        "SELECT * FROM products WHERE name LIKE ?1 AND category = ?2
                         ORDER BY name",
                    )?;
                    let rows = stmt
                        .query_map(
                            rusqlite::params![pattern, category.as_str()],
                            Product::from_row,
                        )?
                        .collect::<rusqlite::Result<Vec<_>>>()?;
                    rows
                }
                None => {
                    let mut stmt =
                        conn.prepare("SELECT * FROM products WHERE name LIKE ?1 ORDER BY name")?;
                    let rows = stmt
                        .query_map([&pattern], Product::from_row)?
                        .collect::<rusqlite::Result<Vec<_>>>()?;
                    rows
                }
            };
            Ok(products)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Storefront listing: active products only, optionally one category.
    pub async fn find_active(&self, category: Option<ProductCategory>) -> Result<Vec<Product>> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let products = match category {
                Some(category) => {
                    let mut stmt = conn.prepare(
                        "SELECT * FROM products WHERE is_active = 1 AND category = ?
                         ORDER BY name",
                    )?;
                    let rows = stmt
                        .query_map([category.as_str()], Product::from_row)?
                        .collect::<rusqlite::Result<Vec<_>>>()?;
                    rows
                }
                None => {
                    let mut stmt =
                        conn.prepare("SELECT * FROM products WHERE is_active = 1 ORDER BY name")?;
                    let rows = stmt
                        .query_map([], Product::from_row)?
                        .collect::<rusqlite::Result<Vec<_>>>()?;
                    rows
                }
            };
            Ok(products)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn create(&self, form: &ProductForm) -> Result<Product> {
        let now = Utc::now();
        let product = Product {
            id: Uuid::new_v4().to_string(),
            name: form.name.trim().to_string(),
            description: form.description.trim().to_string(),
            price_cents: form.price_cents,
            category: form.category,
            stock: form.stock,
            is_active: form.active(),
            created_at: now,
            updated_at: now,
        };
        let product_clone = product.clone();

        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || -> Result<()> {
            let conn = pool.get()?;
            conn.execute(
                "INSERT INTO products (id, name, description, price_cents, category, stock,
                     is_active, created_at, updated_at)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
                rusqlite::params![
                    product_clone.id,
                    product_clone.name,
                    product_clone.description,
                    product_clone.price_cents,
                    product_clone.category.as_str(),
                    product_clone.stock,
                    product_clone.is_active,
                    product_clone.created_at,
                    product_clone.updated_at
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

        Ok(product)
    }

    pub async fn update(&self, id: &str, form: &ProductForm) -> Result<bool> {
        let pool = self.pool.clone();
        let id = id.to_string();
        let name = form.name.trim().to_string();
        let description = form.description.trim().to_string();
        let price_cents = form.price_cents;
        let category = form.category;
        let stock = form.stock;
        let is_active = form.active();
        let now = Utc::now();

        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let rows = conn.execute(
                "UPDATE products SET name = ?, description = ?, price_cents = ?, category = ?,
                     stock = ?, is_active = ?, updated_at = ?
                 WHERE id = ?",
                rusqlite::params![
                    name,
                    description,
                    price_cents,
                    category.as_str(),
                    stock,
                    is_active,
                    now,
                    id
                ],
            )?;
            Ok(rows > 0)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn delete(&self, id: &str) -> Result<bool> {
        let pool = self.pool.clone();
        let id = id.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let rows = conn.execute("DELETE FROM products WHERE id = ?", [&id])?;
            Ok(rows > 0)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn count(&self) -> Result<i64> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let count: i64 =
                conn.query_row("SELECT COUNT(*) FROM products", [], |row| row.get(0))?;
            Ok(count)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Dashboard alert count: products running low (but not out).
    pub async fn count_low_stock(&self) -> Result<i64> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let count: i64 = conn.query_row(
                "SELECT COUNT(*) FROM products WHERE stock > 0 AND stock < 10",
                [],
                |row| row.get(0),
            )?;
            Ok(count)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_memory_pool;
    use crate::migrations::run_migrations_for_tests;

    fn setup_test_db() -> DbPool {
        let pool = create_memory_pool().expect("Failed to create test database");
        run_migrations_for_tests(&pool).expect("Failed to run migrations");
        pool
    }

    fn product_form(name: &str, category: ProductCategory, stock: i64, active: bool) -> ProductForm {
        ProductForm {
            name: name.to_string(),
            description: String::new(),
            price_cents: 4999,
            category,
            stock,
            is_active: active.then(|| "on".to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let pool = setup_test_db();
        let repo = ProductRepository::new(pool);

        let product = repo
            .create(&product_form("Whey Isolate", ProductCategory::Protein, 25, true))
            .await
            .unwrap();
        assert!(product.is_active);

        let found = repo.find_by_id(&product.id).await.unwrap().unwrap();
        assert_eq!(found.name, "Whey Isolate");
        assert_eq!(found.category, ProductCategory::Protein);
    }

    #[tokio::test]
    async fn test_search_by_name_and_category() {
        let pool = setup_test_db();
        let repo = ProductRepository::new(pool);

        repo.create(&product_form("Whey Isolate", ProductCategory::Protein, 25, true))
            .await
            .unwrap();
        repo.create(&product_form("Casein Blend", ProductCategory::Protein, 12, true))
            .await
            .unwrap();
        repo.create(&product_form("Lifting Straps", ProductCategory::Accessories, 40, true))
            .await
            .unwrap();

        let whey = repo.search("whey", None).await.unwrap();
        assert_eq!(whey.len(), 1);

        let protein = repo
            .search("", Some(ProductCategory::Protein))
            .await
            .unwrap();
        assert_eq!(protein.len(), 2);

        let no_match = repo
            .search("straps", Some(ProductCategory::Protein))
            .await
            .unwrap();
        assert!(no_match.is_empty());
    }

    #[tokio::test]
    async fn test_find_active_hides_inactive() {
        let pool = setup_test_db();
        let repo = ProductRepository::new(pool);

        repo.create(&product_form("Whey Isolate", ProductCategory::Protein, 25, true))
            .await
            .unwrap();
        repo.create(&product_form("Old Shaker", ProductCategory::Accessories, 3, false))
            .await
            .unwrap();

        let storefront = repo.find_active(None).await.unwrap();
        assert_eq!(storefront.len(), 1);
        assert_eq!(storefront[0].name, "Whey Isolate");

        let accessories = repo
            .find_active(Some(ProductCategory::Accessories))
            .await
            .unwrap();
        assert!(accessories.is_empty());
    }

    #[tokio::test]
    async fn test_update_product() {
        let pool = setup_test_db();
        let repo = ProductRepository::new(pool);

        let product = repo
            .create(&product_form("Whey Isolate", ProductCategory::Protein, 25, true))
            .await
            .unwrap();

        let mut form = product_form("Whey Isolate 2lb", ProductCategory::Protein, 8, true);
        form.price_cents = 5999;
        assert!(repo.update(&product.id, &form).await.unwrap());

        let updated = repo.find_by_id(&product.id).await.unwrap().unwrap();
        assert_eq!(updated.name, "Whey Isolate 2lb");
        assert_eq!(updated.price_cents, 5999);
        assert!(updated.low_stock());
    }

    #[tokio::test]
    async fn test_count_low_stock() {
        let pool = setup_test_db();
        let repo = ProductRepository::new(pool);

        repo.create(&product_form("Whey Isolate", ProductCategory::Protein, 25, true))
            .await
            .unwrap();
        repo.create(&product_form("Energy Shot", ProductCategory::EnergyDrinks, 4, true))
            .await
            .unwrap();
        repo.create(&product_form("Gym Towel", ProductCategory::Accessories, 0, true))
            .await
            .unwrap();

        assert_eq!(repo.count().await.unwrap(), 3);
        // Only the 4-in-stock energy shot counts; zero stock is "out", not "low"
        assert_eq!(repo.count_low_stock().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_delete_product() {
        let pool = setup_test_db();
        let repo = ProductRepository::new(pool);

        let product = repo
            .create(&product_form("Whey Isolate", ProductCategory::Protein, 25, true))
            .await
            .unwrap();
        assert!(repo.delete(&product.id).await.unwrap());
        assert!(repo.find_by_id(&product.id).await.unwrap().is_none());
    }
}
