//! Filter implementations for the movie table.
//!
//! One filter per filterable dimension; `crate::table::filter_for` picks
//! the right one from a dimension and a raw value.

pub mod attribute;
pub mod credits;
pub mod favorite;
pub mod media_type;
pub mod release;
pub mod user_rating;

// Re-export for convenience
pub use attribute::{Attribute, AttributeFilter};
pub use credits::CreditFilter;
pub use favorite::FavoriteFilter;
pub use media_type::MediaTypeFilter;
pub use release::{DecadeFilter, ReleaseYearFilter};
pub use user_rating::UserRatingFilter;
