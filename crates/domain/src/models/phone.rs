//! Phone domain model.

use serde::{Deserialize, Serialize};

/// A phone number owned by exactly one customer.
///
/// The pair (cus_id, phone_num) is unique; the same number may belong to
/// several customers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Phone {
    pub phone_id: i32,
    pub cus_id: i32,
    pub phone_num: String,
}
