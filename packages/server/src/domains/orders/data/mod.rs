pub mod types;

pub use types::{CreateOrderInput, OrderData, OrderStatusPatch};
