pub mod appointment_service;
pub mod auth_service;
pub mod blog_service;
pub mod cart_service;
pub mod dashboard_service;
pub mod health_profile_service;
pub mod order_service;
pub mod partner_service;
pub mod payment_service;
pub mod product_service;
