pub mod data;
pub mod models;

pub use data::types::{CreateOrderInput, OrderData, OrderStatusPatch};
pub use models::order::{Order, OrderStatus};
