pub mod appointments;
pub mod auth;
pub mod blogs;
pub mod cart;
pub mod dashboard;
pub mod health_profile;
pub mod orders;
pub mod partners;
pub mod products;
