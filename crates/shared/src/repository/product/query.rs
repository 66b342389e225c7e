use crate::{
    abstract_trait::ProductQueryRepositoryTrait, config::ConnectionPool, errors::RepositoryError,
    model::ProductDetail,
};
use async_trait::async_trait;

pub struct ProductQueryRepository {
    db: ConnectionPool,
}

impl ProductQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductQueryRepositoryTrait for ProductQueryRepository {
    async fn find_all(&self) -> Result<Vec<ProductDetail>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let products = sqlx::query_as::<_, ProductDetail>(
            r#"
            SELECT
                products.id,
                products.name,
                categories.name AS category,
                products.quantity,
                locations.name AS location
            FROM products
            LEFT JOIN categories ON products.category_id = categories.id
            LEFT JOIN locations ON products.location_id = locations.id
            ORDER BY products.id
            "#,
        )
        .fetch_all(&mut *conn)
        .await
        .map_err(RepositoryError::from)?;

        Ok(products)
    }
}
