//! `PostgreSQL` catalog backend.
//!
//! Queries are checked at runtime (`query_as` + `FromRow`) so the crate builds
//! without a live database.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool, Postgres, Transaction};
use tracing::instrument;

use cafeconnect_core::{
    Cafe, CafeId, GeoPoint, MenuItem, MenuItemId, MenuItemWithCafe, NewCafe, NewMenuItem,
};

use super::{CatalogStore, RepositoryError};

macro_rules! cafe_columns {
    () => {
        "id, name, address, lat, lng, nearby_colleges, rating, image, phone, open_hours"
    };
}

macro_rules! menu_columns {
    () => {
        "id, name, description, price, category, image, cafe_id"
    };
}

/// Catalog stored in `PostgreSQL`.
#[derive(Clone)]
pub struct PgCatalog {
    pool: PgPool,
}

impl PgCatalog {
    /// Create a catalog over an existing pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct CafeRow {
    id: CafeId,
    name: String,
    address: String,
    lat: f64,
    lng: f64,
    nearby_colleges: Vec<String>,
    rating: f64,
    image: Option<String>,
    phone: Option<String>,
    open_hours: Option<String>,
}

impl From<CafeRow> for Cafe {
    fn from(row: CafeRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            address: row.address,
            location: GeoPoint::new(row.lat, row.lng),
            nearby_colleges: row.nearby_colleges,
            rating: row.rating,
            image: row.image,
            phone: row.phone,
            open_hours: row.open_hours,
        }
    }
}

#[derive(FromRow)]
struct MenuItemRow {
    id: MenuItemId,
    name: String,
    description: String,
    price: Decimal,
    category: String,
    image: Option<String>,
    cafe_id: Option<CafeId>,
}

impl From<MenuItemRow> for MenuItem {
    fn from(row: MenuItemRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            price: row.price,
            category: row.category,
            image: row.image,
            cafe_id: row.cafe_id,
        }
    }
}

/// Menu item joined with its (possibly missing) cafe.
#[derive(FromRow)]
struct MenuJoinRow {
    #[sqlx(flatten)]
    item: MenuItemRow,
    c_id: Option<CafeId>,
    c_name: Option<String>,
    c_address: Option<String>,
    c_lat: Option<f64>,
    c_lng: Option<f64>,
    c_nearby_colleges: Option<Vec<String>>,
    c_rating: Option<f64>,
    c_image: Option<String>,
    c_phone: Option<String>,
    c_open_hours: Option<String>,
}

impl MenuJoinRow {
    fn into_domain(self) -> Result<MenuItemWithCafe, RepositoryError> {
        let cafe = match self.c_id {
            None => None,
            Some(id) => {
                let corrupt =
                    |col: &str| RepositoryError::DataCorruption(format!("cafe {id}: {col} is null"));
                Some(Cafe {
                    id,
                    name: self.c_name.ok_or_else(|| corrupt("name"))?,
                    address: self.c_address.ok_or_else(|| corrupt("address"))?,
                    location: GeoPoint::new(
                        self.c_lat.ok_or_else(|| corrupt("lat"))?,
                        self.c_lng.ok_or_else(|| corrupt("lng"))?,
                    ),
                    nearby_colleges: self.c_nearby_colleges.unwrap_or_default(),
                    rating: self.c_rating.ok_or_else(|| corrupt("rating"))?,
                    image: self.c_image,
                    phone: self.c_phone,
                    open_hours: self.c_open_hours,
                })
            }
        };
        Ok(MenuItemWithCafe {
            item: self.item.into(),
            cafe,
        })
    }
}

/// Escape `LIKE` wildcards so the query matches literally.
fn escape_like(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len());
    for c in query.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

async fn insert_cafe_with<'e, E>(executor: E, cafe: NewCafe) -> Result<Cafe, RepositoryError>
where
    E: sqlx::Executor<'e, Database = Postgres>,
{
    let row: CafeRow = sqlx::query_as(concat!(
        "INSERT INTO cafe (name, address, lat, lng, nearby_colleges, rating, image, phone, open_hours) ",
        "VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING ",
        cafe_columns!()
    ))
    .bind(cafe.name)
    .bind(cafe.address)
    .bind(cafe.location.lat)
    .bind(cafe.location.lng)
    .bind(cafe.nearby_colleges)
    .bind(cafe.rating)
    .bind(cafe.image)
    .bind(cafe.phone)
    .bind(cafe.open_hours)
    .fetch_one(executor)
    .await?;
    Ok(row.into())
}

#[async_trait]
impl CatalogStore for PgCatalog {
    #[instrument(skip(self))]
    async fn list_cafes(&self) -> Result<Vec<Cafe>, RepositoryError> {
        let rows: Vec<CafeRow> =
            sqlx::query_as(concat!("SELECT ", cafe_columns!(), " FROM cafe ORDER BY id"))
                .fetch_all(&self.pool)
                .await?;
        Ok(rows.into_iter().map(Cafe::from).collect())
    }

    #[instrument(skip(self))]
    async fn search_cafes(&self, college: &str) -> Result<Vec<Cafe>, RepositoryError> {
        let rows: Vec<CafeRow> = sqlx::query_as(concat!(
            "SELECT ",
            cafe_columns!(),
            r" FROM cafe
              WHERE EXISTS (
                  SELECT 1 FROM unnest(nearby_colleges) AS college
                  WHERE college ILIKE '%' || $1 || '%' ESCAPE '\'
              )
              ORDER BY id"
        ))
        .bind(escape_like(college))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Cafe::from).collect())
    }

    #[instrument(skip(self, cafe), fields(name = %cafe.name))]
    async fn insert_cafe(&self, cafe: NewCafe) -> Result<Cafe, RepositoryError> {
        insert_cafe_with(&self.pool, cafe).await
    }

    #[instrument(skip(self, cafes), fields(count = cafes.len()))]
    async fn replace_cafes(&self, cafes: Vec<NewCafe>) -> Result<Vec<Cafe>, RepositoryError> {
        let mut tx: Transaction<'_, Postgres> = self.pool.begin().await?;

        sqlx::query("DELETE FROM cafe").execute(&mut *tx).await?;

        let mut inserted = Vec::with_capacity(cafes.len());
        for cafe in cafes {
            inserted.push(insert_cafe_with(&mut *tx, cafe).await?);
        }

        tx.commit().await?;
        Ok(inserted)
    }

    #[instrument(skip(self))]
    async fn list_menu(&self) -> Result<Vec<MenuItemWithCafe>, RepositoryError> {
        let rows: Vec<MenuJoinRow> = sqlx::query_as(
            r"SELECT m.id, m.name, m.description, m.price, m.category, m.image, m.cafe_id,
                     c.id AS c_id, c.name AS c_name, c.address AS c_address,
                     c.lat AS c_lat, c.lng AS c_lng,
                     c.nearby_colleges AS c_nearby_colleges, c.rating AS c_rating,
                     c.image AS c_image, c.phone AS c_phone, c.open_hours AS c_open_hours
              FROM menu_item m
              LEFT JOIN cafe c ON c.id = m.cafe_id
              ORDER BY m.id",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(MenuJoinRow::into_domain).collect()
    }

    #[instrument(skip(self, ids), fields(count = ids.len()))]
    async fn find_menu_items(
        &self,
        ids: &[MenuItemId],
    ) -> Result<Vec<MenuItem>, RepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let raw: Vec<i32> = ids.iter().map(MenuItemId::as_i32).collect();
        let rows: Vec<MenuItemRow> = sqlx::query_as(concat!(
            "SELECT ",
            menu_columns!(),
            " FROM menu_item WHERE id = ANY($1) ORDER BY id"
        ))
        .bind(raw)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(MenuItem::from).collect())
    }

    #[instrument(skip(self, item), fields(name = %item.name, category = %item.category))]
    async fn insert_menu_item(&self, item: NewMenuItem) -> Result<MenuItem, RepositoryError> {
        let row: MenuItemRow = sqlx::query_as(concat!(
            "INSERT INTO menu_item (name, description, price, category, image, cafe_id) ",
            "VALUES ($1, $2, $3, $4, $5, $6) RETURNING ",
            menu_columns!()
        ))
        .bind(item.name)
        .bind(item.description)
        .bind(item.price)
        .bind(item.category)
        .bind(item.image)
        .bind(item.cafe_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
