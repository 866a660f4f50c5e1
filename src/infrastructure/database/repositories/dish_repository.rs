//! SeaORM implementation of DishRepository

use async_trait::async_trait;
use log::{debug, info};
use sea_orm::sea_query::{Expr, SimpleExpr};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseBackend, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use crate::domain::dish::{Dish, DishFilter, DishRepository, NewDish};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::dish;
use crate::shared::PageInfo;

// ── Conversion helpers ──────────────────────────────────────────

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Storage(e.to_string())
}

fn entity_to_domain(m: dish::Model) -> Dish {
    let canteen = m.canteens();
    Dish {
        id: m.id,
        name: m.name,
        tag: m.tag,
        canteen,
    }
}

fn domain_to_active(d: NewDish) -> dish::ActiveModel {
    dish::ActiveModel {
        id: Set(Uuid::now_v7()),
        name: Set(d.name),
        tag: Set(d.tag),
        canteen: Set(serde_json::Value::from(d.canteen)),
    }
}

/// JSON-array membership test on `dishes.canteen`, per backend.
fn canteen_contains(backend: DatabaseBackend, canteen: &str) -> SimpleExpr {
    match backend {
        DatabaseBackend::Postgres => {
            Expr::cust_with_values("canteen @> jsonb_build_array(?::text)", [canteen])
        }
        DatabaseBackend::MySql => {
            Expr::cust_with_values("JSON_CONTAINS(canteen, JSON_QUOTE(?))", [canteen])
        }
        DatabaseBackend::Sqlite => Expr::cust_with_values(
            "EXISTS (SELECT 1 FROM json_each(dishes.canteen) WHERE json_each.value = ?)",
            [canteen],
        ),
    }
}

// ── SeaOrmDishRepository ────────────────────────────────────────

pub struct SeaOrmDishRepository {
    db: DatabaseConnection,
}

impl SeaOrmDishRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl DishRepository for SeaOrmDishRepository {
    async fn list(&self, filter: &DishFilter, page: PageInfo) -> DomainResult<(Vec<Dish>, u64)> {
        let mut query = dish::Entity::find();

        if let Some(name) = &filter.name {
            query = query.filter(dish::Column::Name.contains(name));
        }
        if let Some(canteen) = &filter.canteen {
            query = query.filter(canteen_contains(self.db.get_database_backend(), canteen));
        }
        if let Some(tag) = &filter.tag {
            query = query.filter(dish::Column::Tag.contains(tag));
        }

        let total = query.clone().count(&self.db).await.map_err(db_err)?;

        let (offset, limit) = page.offset_limit();
        debug!("Listing dishes: filter={:?} offset={} limit={}", filter, offset, limit);

        let models = query
            .order_by_asc(dish::Column::Id)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok((models.into_iter().map(entity_to_domain).collect(), total))
    }

    async fn insert_many(&self, dishes: Vec<NewDish>, batch_size: usize) -> DomainResult<u64> {
        let batch_size = batch_size.max(1);
        let mut inserted = 0u64;
        let mut rows = dishes.into_iter().peekable();

        while rows.peek().is_some() {
            let batch: Vec<dish::ActiveModel> =
                rows.by_ref().take(batch_size).map(domain_to_active).collect();
            let len = batch.len() as u64;
            dish::Entity::insert_many(batch)
                .exec(&self.db)
                .await
                .map_err(db_err)?;
            inserted += len;
        }

        info!("Inserted {} dishes", inserted);
        Ok(inserted)
    }
}

// ── Tests ──────────────────────────────────────────────────────
