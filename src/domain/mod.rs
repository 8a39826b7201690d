pub mod pagination;
pub mod resource;
pub mod stats;
