pub mod purchase;
pub mod units;

pub use crate::domain::model::{
    AmountField, BalanceRecord, FulfillmentOrder, FulfillmentResult, PurchaseRequest,
};
pub use crate::domain::ports::{BalanceOracle, FulfillmentProvider};
pub use crate::utils::error::Result;
