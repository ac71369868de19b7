//! Nearby-shop discovery: distance, category filter, ordering.

use serde::Serialize;

use crate::catalog::{Catalog, Shop};
use crate::geo::{round_km, Coordinate};

/// A catalog shop annotated with its distance from the requesting user.
///
/// Serializes flat, matching the wire shape
/// `{id, name, category, lat, lng, distance, price, savings, address}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearbyShop {
    pub id: String,
    pub name: String,
    pub category: String,
    pub lat: f64,
    pub lng: f64,
    /// Kilometers, rounded to two decimal places.
    pub distance: f64,
    pub price: f64,
    pub savings: f64,
    pub address: String,
}

impl NearbyShop {
    fn from_shop(shop: &Shop, distance: f64) -> Self {
        Self {
            id: shop.id.clone(),
            name: shop.name.clone(),
            category: shop.category.clone(),
            lat: shop.lat,
            lng: shop.lng,
            distance,
            price: shop.price,
            savings: shop.savings,
            address: shop.address.clone(),
        }
    }
}

/// Shops from `catalog` ordered nearest-first from `user`.
///
/// When `category` is given only shops whose category matches it
/// case-insensitively are returned; an unknown category yields an empty list.
/// Ordering uses the rounded distance and is stable, so equal distances keep
/// catalog order.
#[must_use]
pub fn query_shops(catalog: &Catalog, user: Coordinate, category: Option<&str>) -> Vec<NearbyShop> {
    let mut shops: Vec<NearbyShop> = catalog
        .shops()
        .iter()
        .filter(|shop| category.is_none_or(|c| shop.in_category(c)))
        .map(|shop| NearbyShop::from_shop(shop, round_km(user.distance_to(&shop.coordinate()))))
        .collect();

    shops.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    shops
}
