use actix_web::{error::InternalError, web, HttpResponse, ResponseError};
use derive_builder::Builder;
use sqlx::SqlitePool;

use crate::{
    data::Listing,
    db::{self as db_api, DishFilter, DishSearchProps, RestaurantFilter, RestaurantSearchProps},
    error::{ApiError, ErrJsonResp},
};

#[derive(Builder)]
#[builder(pattern = "owned")]
pub struct ApiState {
    db_pool: SqlitePool,
    /// Wrap `/dishes` under `restaurants`, as existing clients expect.
    #[builder(default = "true")]
    legacy_dishes_key: bool,
}

type ApiResult = Result<web::Json<Listing>, ApiError>;

fn found(listing: Listing, not_found: impl Into<String>) -> ApiResult {
    if listing.is_empty() {
        return Err(ApiError::NotFound(not_found.into()));
    }
    Ok(web::Json(listing))
}

/// Register the catalog routes along with JSON rejections for malformed parameters.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::PathConfig::default().error_handler(|err, _| {
        let resp = ApiError::BadRequest(err.to_string()).error_response();
        InternalError::from_response(err, resp).into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _| {
        let resp = ApiError::BadRequest(err.to_string()).error_response();
        InternalError::from_response(err, resp).into()
    }))
    .service(restaurants)
    .service(restaurant_details)
    .service(restaurants_by_cuisine)
    .service(restaurants_by_filter)
    .service(restaurants_by_rating)
    .service(dishes)
    .service(dish_details)
    .service(dishes_by_filter)
    .service(dishes_by_price);
}

pub async fn route_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrJsonResp {
        message: "Route not found".to_string(),
    })
}

#[actix_web::get("/restaurants")]
async fn restaurants(data: web::Data<ApiState>) -> ApiResult {
    let rows = db_api::get_restaurant(&data.db_pool, RestaurantSearchProps::All).await?;
    found(Listing::Restaurants(rows), "No Restaurants Found.")
}

#[actix_web::get("/restaurants/details/{id}")]
async fn restaurant_details(data: web::Data<ApiState>, path: web::Path<i64>) -> ApiResult {
    let id = path.into_inner();
    let rows = db_api::get_restaurant(&data.db_pool, RestaurantSearchProps::Id(id)).await?;
    found(
        Listing::Restaurants(rows),
        format!("No Restaurants Found for the id {id}"),
    )
}

#[actix_web::get("/restaurants/cuisine/{cuisine}")]
async fn restaurants_by_cuisine(data: web::Data<ApiState>, path: web::Path<String>) -> ApiResult {
    let cuisine = path.into_inner();
    let props = RestaurantSearchProps::Cuisine(cuisine.clone());
    let rows = db_api::get_restaurant(&data.db_pool, props).await?;
    found(
        Listing::Restaurants(rows),
        format!("No Restaurants Found for this cuisine {cuisine}"),
    )
}

#[actix_web::get("/restaurants/filter")]
async fn restaurants_by_filter(
    data: web::Data<ApiState>,
    query: web::Query<RestaurantFilter>,
) -> ApiResult {
    let props = RestaurantSearchProps::Filter(query.into_inner());
    let rows = db_api::get_restaurant(&data.db_pool, props).await?;
    found(
        Listing::Restaurants(rows),
        "No Restaurants Found for the passed filters.",
    )
}

#[actix_web::get("/restaurants/sort-by-rating")]
async fn restaurants_by_rating(data: web::Data<ApiState>) -> ApiResult {
    let rows = db_api::get_restaurant(&data.db_pool, RestaurantSearchProps::SortedByRating).await?;
    found(Listing::Restaurants(rows), "No Restaurants Found")
}

#[actix_web::get("/dishes")]
async fn dishes(data: web::Data<ApiState>) -> ApiResult {
    let rows = db_api::get_dish(&data.db_pool, DishSearchProps::All).await?;
    let listing = if data.legacy_dishes_key {
        Listing::LegacyDishes(rows)
    } else {
        Listing::Dishes(rows)
    };
    found(listing, "No Dishes Found.")
}

#[actix_web::get("/dishes/details/{id}")]
async fn dish_details(data: web::Data<ApiState>, path: web::Path<i64>) -> ApiResult {
    let id = path.into_inner();
    let rows = db_api::get_dish(&data.db_pool, DishSearchProps::Id(id)).await?;
    found(Listing::Dishes(rows), format!("No Dishes Found for the id {id}"))
}

#[actix_web::get("/dishes/filter")]
async fn dishes_by_filter(data: web::Data<ApiState>, query: web::Query<DishFilter>) -> ApiResult {
    let props = DishSearchProps::Filter(query.into_inner());
    let rows = db_api::get_dish(&data.db_pool, props).await?;
    found(Listing::Dishes(rows), "No Dishes Found for the filter.")
}

#[actix_web::get("/dishes/sort-by-price")]
async fn dishes_by_price(data: web::Data<ApiState>) -> ApiResult {
    let rows = db_api::get_dish(&data.db_pool, DishSearchProps::SortedByPrice).await?;
    found(Listing::Dishes(rows), "No Dishes Found")
}
