//! Brand product catalogue.

use crate::error::{AppError, AppResult};
use crate::models::{NewProduct, Product, UpdateProduct};
use crate::repositories::{ProductFilter, ProductRepository};

#[derive(Clone)]
pub struct ProductService {
    repo: ProductRepository,
}

impl ProductService {
    pub fn new(repo: ProductRepository) -> Self {
        Self { repo }
    }

    pub async fn get(&self, product_id: i32) -> AppResult<Product> {
        self.repo
            .find_by_id(product_id)
            .await?
            .ok_or_else(|| AppError::not_found("product", "id", product_id))
    }

    async fn get_owned(&self, product_id: i32, brand_id: i32) -> AppResult<Product> {
        let product = self.get(product_id).await?;
        if product.brand_id != brand_id {
            return Err(AppError::forbidden("Only the owning brand can modify this product"));
        }
        Ok(product)
    }

    pub async fn list(
        &self,
        filter: &ProductFilter,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Product>, i64)> {
        self.repo.list(filter, offset, limit).await
    }

    pub async fn create(&self, new_product: NewProduct) -> AppResult<Product> {
        let product = self.repo.create(new_product).await?;
        tracing::info!(product_id = product.id, brand_id = product.brand_id, "product created");
        Ok(product)
    }

    pub async fn update(
        &self,
        product_id: i32,
        brand_id: i32,
        changes: UpdateProduct,
    ) -> AppResult<Product> {
        self.get_owned(product_id, brand_id).await?;
        self.repo.update(product_id, changes).await
    }

    /// Orders that referenced the product keep their amount and lose the link.
    pub async fn delete(&self, product_id: i32, brand_id: i32) -> AppResult<()> {
        self.get_owned(product_id, brand_id).await?;
        self.repo.delete(product_id).await?;
        tracing::info!(product_id, brand_id, "product deleted");
        Ok(())
    }
}
