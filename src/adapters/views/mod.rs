//! Server-rendered HTML: one component library shared by every screen.

pub mod clinic;
pub mod components;
pub mod dashboard;
pub mod layout;
pub mod resource;
pub mod resources;
pub mod saas;
