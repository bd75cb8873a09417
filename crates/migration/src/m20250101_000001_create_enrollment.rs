//! Create `enrollment` table.
//! Email uniqueness is enforced by the database so concurrent inserts cannot
//! both succeed.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Enrollment::Table)
                    .if_not_exists()
                    .col(uuid(Enrollment::Id).primary_key())
                    .col(string_len(Enrollment::FirstName, 128).not_null())
                    .col(string_len(Enrollment::LastName, 128).not_null())
                    .col(string_len(Enrollment::Phone, 64).not_null())
                    .col(string_len(Enrollment::Email, 320).not_null())
                    .col(string_len(Enrollment::Course, 128).not_null())
                    .col(timestamp_with_time_zone(Enrollment::CreatedAt).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_enrollment_email")
                    .table(Enrollment::Table)
                    .col(Enrollment::Email)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Enrollment::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Enrollment {
    Table,
    Id,
    FirstName,
    LastName,
    Phone,
    Email,
    Course,
    CreatedAt,
}
