use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Rows are inserted by the sign-up flow, which supplies the id.
        manager
            .create_table(
                Table::create()
                    .table(Profiles::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Profiles::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Profiles::Username).text().null().unique_key())
                    .col(ColumnDef::new(Profiles::Email).text().null())
                    .col(ColumnDef::new(Profiles::FullName).text().null())
                    .col(ColumnDef::new(Profiles::Bio).text().null())
                    .col(
                        ColumnDef::new(Profiles::Role)
                            .text()
                            .not_null()
                            .default("user")
                            .check(Expr::col(Profiles::Role).is_in(["user", "admin"])),
                    )
                    .col(
                        ColumnDef::new(Profiles::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Profiles::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Admin member listing is newest first
        manager
            .create_index(
                Index::create()
                    .name("idx_profiles_created_at")
                    .table(Profiles::Table)
                    .col((Profiles::CreatedAt, IndexOrder::Desc))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Profiles::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub(crate) enum Profiles {
    Table,
    Id,
    Username,
    Email,
    FullName,
    Bio,
    Role,
    CreatedAt,
    UpdatedAt,
}
