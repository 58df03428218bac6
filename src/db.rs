use std::str::FromStr;

use anyhow::Context;
use serde::Deserialize;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions},
    QueryBuilder, Sqlite,
};

use crate::data::{flag_forms, Dish, Restaurant};

/// Open the catalog database. Every connection refuses writes through `query_only`.
pub async fn connect(url: &str, max_connections: u32) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(url)
        .with_context(|| format!("invalid database url {url}"))?
        .pragma("query_only", "ON");

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
        .with_context(|| format!("fail to open database {url}"))?;

    tracing::info!(url, max_connections, "catalog database opened");
    Ok(pool)
}

/// Equality filters over the restaurant flags. Unset fields are not filtered on.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantFilter {
    pub is_veg: Option<bool>,
    pub has_outdoor_seating: Option<bool>,
    pub is_luxury: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DishFilter {
    pub is_veg: Option<bool>,
}

#[derive(Debug, Clone)]
pub enum RestaurantSearchProps {
    All,
    Id(i64),
    Cuisine(String),
    Filter(RestaurantFilter),
    SortedByRating,
}

#[derive(Debug, Clone)]
pub enum DishSearchProps {
    All,
    Id(i64),
    Filter(DishFilter),
    SortedByPrice,
}

// Appends `WHERE a IN (?, ?, ?) AND ...` for every flag that is set, matching
// each form a flag can be stored in.
fn push_flags(query: &mut QueryBuilder<'_, Sqlite>, flags: &[(&str, Option<bool>)]) {
    let mut first = true;
    for (column, value) in flags {
        let Some(value) = value else { continue };
        let (text, digit, int) = flag_forms(*value);
        query.push(if first { " WHERE " } else { " AND " });
        query
            .push(column)
            .push(" IN (")
            .push_bind(text)
            .push(", ")
            .push_bind(digit)
            .push(", ")
            .push_bind(int)
            .push(")");
        first = false;
    }
}

fn restaurant_query(props: &RestaurantSearchProps) -> QueryBuilder<'_, Sqlite> {
    let mut query = QueryBuilder::new("SELECT * FROM restaurants");
    match props {
        RestaurantSearchProps::All => {}
        RestaurantSearchProps::Id(id) => {
            query.push(" WHERE id = ").push_bind(*id);
        }
        RestaurantSearchProps::Cuisine(cuisine) => {
            query.push(" WHERE cuisine = ").push_bind(cuisine.as_str());
        }
        RestaurantSearchProps::Filter(filter) => push_flags(
            &mut query,
            &[
                ("isVeg", filter.is_veg),
                ("hasOutdoorSeating", filter.has_outdoor_seating),
                ("isLuxury", filter.is_luxury),
            ],
        ),
        RestaurantSearchProps::SortedByRating => {
            query.push(" ORDER BY rating DESC");
        }
    }
    query
}

fn dish_query(props: &DishSearchProps) -> QueryBuilder<'_, Sqlite> {
    let mut query = QueryBuilder::new("SELECT * FROM dishes");
    match props {
        DishSearchProps::All => {}
        DishSearchProps::Id(id) => {
            query.push(" WHERE id = ").push_bind(*id);
        }
        DishSearchProps::Filter(filter) => push_flags(&mut query, &[("isVeg", filter.is_veg)]),
        DishSearchProps::SortedByPrice => {
            query.push(" ORDER BY price ASC");
        }
    }
    query
}

#[tracing::instrument(skip(db_conn))]
pub async fn get_restaurant(
    db_conn: &SqlitePool,
    props: RestaurantSearchProps,
) -> Result<Vec<Restaurant>, sqlx::Error> {
    let mut query = restaurant_query(&props);
    let rows = query.build_query_as::<Restaurant>().fetch_all(db_conn).await?;
    tracing::debug!(count = rows.len(), "restaurants fetched");
    Ok(rows)
}

#[tracing::instrument(skip(db_conn))]
pub async fn get_dish(db_conn: &SqlitePool, props: DishSearchProps) -> Result<Vec<Dish>, sqlx::Error> {
    let mut query = dish_query(&props);
    let rows = query.build_query_as::<Dish>().fetch_all(db_conn).await?;
    tracing::debug!(count = rows.len(), "dishes fetched");
    Ok(rows)
}

/// In-memory catalog seeded from the fixture, shared by the unit tests.
#[cfg(test)]
pub(crate) async fn seeded_pool() -> SqlitePool {
    use sqlx::Executor;

    // a single connection keeps every query on the same in-memory database
    let db = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    db.execute(include_str!("../tests/fixtures/catalog.sql"))
        .await
        .unwrap();
    db
}
