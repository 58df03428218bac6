use serde::Serialize;
use sqlx::{sqlite::SqliteRow, FromRow, Row};

/// A `restaurants` row. Every column but `id` may be NULL and is served as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub id: i64,
    pub name: Option<String>,
    pub cuisine: Option<String>,
    pub is_veg: Option<bool>,
    pub rating: Option<f64>,
    pub price_for_two: Option<i64>,
    pub location: Option<String>,
    pub has_outdoor_seating: Option<bool>,
    pub is_luxury: Option<bool>,
}

impl<'r> FromRow<'r, SqliteRow> for Restaurant {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            cuisine: row.try_get("cuisine")?,
            is_veg: flag(row, "isVeg")?,
            rating: row.try_get_unchecked("rating")?,
            price_for_two: row.try_get("priceForTwo")?,
            location: row.try_get("location")?,
            has_outdoor_seating: flag(row, "hasOutdoorSeating")?,
            is_luxury: flag(row, "isLuxury")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dish {
    pub id: i64,
    pub name: Option<String>,
    pub price: Option<f64>,
    pub rating: Option<f64>,
    pub is_veg: Option<bool>,
}

impl<'r> FromRow<'r, SqliteRow> for Dish {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            // unchecked so INTEGER prices read as floats, Option keeps NULL as None
            price: row.try_get_unchecked("price")?,
            rating: row.try_get_unchecked("rating")?,
            is_veg: flag(row, "isVeg")?,
        })
    }
}

/// Every stored value a flag may take: canonical text, digit text and integer.
pub fn flag_forms(value: bool) -> (&'static str, &'static str, i64) {
    if value {
        ("true", "1", 1)
    } else {
        ("false", "0", 0)
    }
}

// Flags are stored as 'true'/'false' text, older dumps use 1/0.
fn flag(row: &SqliteRow, column: &str) -> Result<Option<bool>, sqlx::Error> {
    let raw: Option<String> = row.try_get_unchecked(column)?;
    let Some(raw) = raw else { return Ok(None) };
    match raw.as_str() {
        "true" | "1" => Ok(Some(true)),
        "false" | "0" => Ok(Some(false)),
        other => Err(sqlx::Error::ColumnDecode {
            index: column.to_string(),
            source: format!("expected a boolean flag, found {other:?}").into(),
        }),
    }
}

/// A named collection of rows, serialized as `{"<name>": [...]}`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Listing {
    Restaurants(Vec<Restaurant>),
    Dishes(Vec<Dish>),
    /// Dishes wrapped under the `restaurants` key, as `/dishes` always answered.
    #[serde(rename = "restaurants")]
    LegacyDishes(Vec<Dish>),
}

impl Listing {
    pub fn len(&self) -> usize {
        match self {
            Self::Restaurants(rows) => rows.len(),
            Self::Dishes(rows) | Self::LegacyDishes(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_uses_collection_name_as_key() {
        let dish = Dish {
            id: 1,
            name: Some("Paneer Tikka".to_string()),
            price: Some(250.0),
            rating: None,
            is_veg: Some(true),
        };

        let value = serde_json::to_value(Listing::Dishes(vec![dish.clone()])).unwrap();
        assert_eq!(value["dishes"][0]["isVeg"], serde_json::json!(true));

        let value = serde_json::to_value(Listing::LegacyDishes(vec![dish])).unwrap();
        assert!(value.get("dishes").is_none());
        assert_eq!(value["restaurants"][0]["name"], "Paneer Tikka");
        assert!(value["restaurants"][0]["rating"].is_null());
    }

    #[test]
    fn empty_listing() {
        assert!(Listing::Restaurants(Vec::new()).is_empty());
        assert_eq!(Listing::LegacyDishes(Vec::new()).len(), 0);
    }
}
