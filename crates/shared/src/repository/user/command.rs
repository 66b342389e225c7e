use crate::{
    abstract_trait::UserCommandRepositoryTrait, config::ConnectionPool, errors::RepositoryError,
    model::User as UserModel,
};
use async_trait::async_trait;

pub struct UserCommandRepository {
    db: ConnectionPool,
}

impl UserCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserCommandRepositoryTrait for UserCommandRepository {
    async fn create_user(
        &self,
        username: &str,
        hashed_password: &str,
    ) -> Result<UserModel, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let id = sqlx::query(
            r#"
            INSERT INTO users (username, password)
            VALUES (?, ?)
            "#,
        )
        .bind(username)
        .bind(hashed_password)
        .execute(&mut *conn)
        .await
        .map_err(RepositoryError::from)?
        .last_insert_rowid();

        Ok(UserModel {
            id,
            username: username.to_string(),
            password: hashed_password.to_string(),
        })
    }
}
