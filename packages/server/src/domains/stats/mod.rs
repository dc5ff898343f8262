pub mod models;

pub use models::DashboardStats;
