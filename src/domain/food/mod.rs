//! Food Context - 食物 listing 限界上下文

mod listing_query;
mod value_objects;

pub use listing_query::{ListingQuery, NameFilter, SortOrder};
pub use value_objects::{ExpiryTime, FoodName, ListingId};
