use sea_orm_migration::{prelude::*, schema::*};

use crate::m20250301_000001_create_users::Users;
use crate::m20250301_000002_create_categories::Categories;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Products::Table)
                    .if_not_exists()
                    .col(pk_auto(Products::Id))
                    .col(integer(Products::SellerId))
                    .col(integer_null(Products::CategoryId))
                    .col(string_len(Products::Name, 255))
                    .col(text(Products::Description))
                    .col(decimal_len(Products::Price, 10, 2))
                    .col(decimal_len_null(Products::CompareAtPrice, 10, 2))
                    .col(string_len(Products::Condition, 16).default("good"))
                    .col(string_len_null(Products::Size, 100))
                    .col(string_len_null(Products::Brand, 100))
                    .col(integer(Products::StockQuantity).default(1))
                    .col(boolean(Products::IsActive).default(true))
                    .col(boolean(Products::IsSold).default(false))
                    .col(
                        timestamp_with_time_zone(Products::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Products::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_products_seller")
                            .from(Products::Table, Products::SellerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_products_category")
                            .from(Products::Table, Products::CategoryId)
                            .to(Categories::Table, Categories::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Listing: WHERE is_active AND NOT is_sold ORDER BY created_at DESC, id DESC
        manager
            .create_index(
                Index::create()
                    .name("idx_products_listing")
                    .table(Products::Table)
                    .col(Products::IsActive)
                    .col(Products::IsSold)
                    .col(Products::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_products_category_id")
                    .table(Products::Table)
                    .col(Products::CategoryId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_products_seller_id")
                    .table(Products::Table)
                    .col(Products::SellerId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Products::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Products {
    Table,
    Id,
    SellerId,
    CategoryId,
    Name,
    Description,
    Price,
    CompareAtPrice,
    Condition,
    Size,
    Brand,
    StockQuantity,
    IsActive,
    IsSold,
    CreatedAt,
    UpdatedAt,
}
