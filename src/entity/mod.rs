pub mod appointments;
pub mod audit_logs;
pub mod blogs;
pub mod cart_items;
pub mod gi_histories;
pub mod goals_motivations;
pub mod health_profiles;
pub mod medications;
pub mod nutrition_profiles;
pub mod orders;
pub mod partners;
pub mod products;
pub mod users;

pub use appointments::Entity as Appointments;
pub use audit_logs::Entity as AuditLogs;
pub use blogs::Entity as Blogs;
pub use cart_items::Entity as CartItems;
pub use gi_histories::Entity as GiHistories;
pub use goals_motivations::Entity as GoalsMotivations;
pub use health_profiles::Entity as HealthProfiles;
pub use medications::Entity as Medications;
pub use nutrition_profiles::Entity as NutritionProfiles;
pub use orders::Entity as Orders;
pub use partners::Entity as Partners;
pub use products::Entity as Products;
pub use users::Entity as Users;
