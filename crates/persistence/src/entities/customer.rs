//! Customer entity (database row mapping).

use domain::models::Customer;
use sqlx::FromRow;

/// Database row mapping for the customers table.
#[derive(Debug, Clone, FromRow)]
pub struct CustomerEntity {
    pub cus_id: i32,
    pub name: String,
    pub surname: String,
    pub e_mail: String,
}

impl From<CustomerEntity> for Customer {
    fn from(entity: CustomerEntity) -> Self {
        Self {
            cus_id: entity.cus_id,
            name: entity.name,
            surname: entity.surname,
            e_mail: entity.e_mail,
        }
    }
}
