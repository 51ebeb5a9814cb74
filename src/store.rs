use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DatabaseTransaction, EntityTrait, ModelTrait, QueryOrder,
    QuerySelect, TransactionTrait,
};

use crate::{entities::filme, error::AppResult};

const MAX_BINDABLE: u64 = i64::MAX as u64;

/// Shared handle to the filmes table. Cheap to clone.
#[derive(Clone)]
pub struct FilmeStore {
    db: DatabaseConnection,
}

impl FilmeStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Opens a unit of work. Writes made through the context become visible to
    /// other contexts only after [`FilmeContext::commit`]; dropping it discards them.
    pub async fn context(&self) -> AppResult<FilmeContext> {
        Ok(FilmeContext { txn: self.db.begin().await? })
    }
}

pub struct FilmeContext {
    txn: DatabaseTransaction,
}

impl FilmeContext {
    /// Stages an insert and returns the row with its generated id.
    pub async fn add(&self, novo: filme::ActiveModel) -> AppResult<filme::Model> {
        Ok(novo.insert(&self.txn).await?)
    }

    pub async fn update(&self, alterado: filme::ActiveModel) -> AppResult<filme::Model> {
        Ok(alterado.update(&self.txn).await?)
    }

    pub async fn remove(&self, filme: filme::Model) -> AppResult<()> {
        filme.delete(&self.txn).await?;
        Ok(())
    }

    pub async fn all(&self) -> AppResult<Vec<filme::Model>> {
        Ok(filme::Entity::find().order_by_asc(filme::Column::Id).all(&self.txn).await?)
    }

    /// Linear scan over every row.
    pub async fn filter<P>(&self, predicate: P) -> AppResult<Vec<filme::Model>>
    where
        P: FnMut(&filme::Model) -> bool,
    {
        let mut rows = self.all().await?;
        rows.retain(predicate);
        Ok(rows)
    }

    /// `skip` and `take` are clamped to `i64::MAX`, the largest value SQLite binds.
    pub async fn page(&self, skip: u64, take: u64) -> AppResult<Vec<filme::Model>> {
        Ok(filme::Entity::find()
            .order_by_asc(filme::Column::Id)
            .offset(skip.min(MAX_BINDABLE))
            .limit(take.min(MAX_BINDABLE))
            .all(&self.txn)
            .await?)
    }

    /// First-or-default by identity. Ids outside the column's range match nothing.
    pub async fn find(&self, id: i64) -> AppResult<Option<filme::Model>> {
        let Ok(id) = i32::try_from(id) else {
            return Ok(None);
        };
        Ok(filme::Entity::find_by_id(id).one(&self.txn).await?)
    }

    pub async fn commit(self) -> AppResult<()> {
        self.txn.commit().await?;
        Ok(())
    }
}
