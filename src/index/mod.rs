pub mod posting;
pub mod unique;
pub mod substring;
pub mod attribute;
pub mod name_cache;
