//! Phone entity (database row mapping).

use domain::models::Phone;
use sqlx::FromRow;

/// Database row mapping for the phones table.
#[derive(Debug, Clone, FromRow)]
pub struct PhoneEntity {
    pub phone_id: i32,
    pub cus_id: i32,
    pub phone_num: String,
}

impl From<PhoneEntity> for Phone {
    fn from(entity: PhoneEntity) -> Self {
        Self {
            phone_id: entity.phone_id,
            cus_id: entity.cus_id,
            phone_num: entity.phone_num,
        }
    }
}
