//! Product catalogue persistence.

use diesel::dsl::now;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{NewProduct, Product, UpdateProduct};
use crate::schema::products;

#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub brand_id: Option<i32>,
    pub category: Option<String>,
    pub active: Option<bool>,
}

impl ProductFilter {
    fn query(&self) -> products::BoxedQuery<'static, Pg> {
        let mut query = products::table.into_boxed();

        if let Some(brand_id) = self.brand_id {
            query = query.filter(products::brand_id.eq(brand_id));
        }
        if let Some(category) = &self.category {
            query = query.filter(products::category.eq(category.clone()));
        }
        if let Some(active) = self.active {
            query = query.filter(products::is_active.eq(active));
        }

        query
    }
}

#[derive(Clone)]
pub struct ProductRepository {
    pool: AsyncDbPool,
}

impl ProductRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new_product: NewProduct) -> AppResult<Product> {
        let mut conn = self.pool.get().await?;

        diesel::insert_into(products::table)
            .values(&new_product)
            .returning(Product::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    pub async fn find_by_id(&self, product_id: i32) -> AppResult<Option<Product>> {
        let mut conn = self.pool.get().await?;

        products::table
            .find(product_id)
            .select(Product::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    pub async fn update(&self, product_id: i32, changes: UpdateProduct) -> AppResult<Product> {
        let mut conn = self.pool.get().await?;

        diesel::update(products::table.find(product_id))
            .set((&changes, products::updated_at.eq(now)))
            .returning(Product::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    pub async fn delete(&self, product_id: i32) -> AppResult<usize> {
        let mut conn = self.pool.get().await?;

        diesel::delete(products::table.find(product_id))
            .execute(&mut conn)
            .await
            .map_err(AppError::from)
    }

    pub async fn list(
        &self,
        filter: &ProductFilter,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Product>, i64)> {
        let mut conn = self.pool.get().await?;

        let total = filter.query().count().get_result(&mut conn).await?;
        let items = filter
            .query()
            .order((products::created_at.desc(), products::id.desc()))
            .offset(offset)
            .limit(limit)
            .select(Product::as_select())
            .load(&mut conn)
            .await?;

        Ok((items, total))
    }
}
