use sea_orm::{entity::prelude::*, ConnectionTrait, PaginatorTrait, QueryOrder, Set};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "enrollment")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    #[sea_orm(unique)]
    pub email: String,
    pub course: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Reject values that are empty once surrounding whitespace is removed.
pub fn validate_required(field: &str, value: &str) -> Result<(), ModelError> {
    if value.trim().is_empty() {
        return Err(ModelError::Validation(format!("{field} is required")));
    }
    Ok(())
}

/// Insert a new enrollment. The id and timestamp are generated here and never
/// touched again; a duplicate email surfaces as `ModelError::Duplicate`.
pub async fn create<C: ConnectionTrait>(
    db: &C,
    first_name: &str,
    last_name: &str,
    phone: &str,
    email: &str,
    course: &str,
) -> Result<Model, ModelError> {
    validate_required("firstName", first_name)?;
    validate_required("lastName", last_name)?;
    validate_required("phone", phone)?;
    validate_required("email", email)?;
    validate_required("course", course)?;

    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        first_name: Set(first_name.to_string()),
        last_name: Set(last_name.to_string()),
        phone: Set(phone.to_string()),
        email: Set(email.to_string()),
        course: Set(course.to_string()),
        created_at: Set(Utc::now().into()),
    };
    let created = am.insert(db).await?;
    Ok(created)
}

/// All enrollments, oldest first.
pub async fn list_all<C: ConnectionTrait>(db: &C) -> Result<Vec<Model>, ModelError> {
    let rows = Entity::find().order_by_asc(Column::CreatedAt).all(db).await?;
    Ok(rows)
}

pub async fn count<C: ConnectionTrait>(db: &C) -> Result<u64, ModelError> {
    let n = Entity::find().count(db).await?;
    Ok(n)
}
