use sea_orm_migration::{prelude::*, schema::*};

use crate::m20250301_000003_create_products::Products;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ProductVariants::Table)
                    .if_not_exists()
                    .col(pk_auto(ProductVariants::Id))
                    .col(integer(ProductVariants::ProductId))
                    .col(string_len(ProductVariants::Name, 100))
                    .col(string_len(ProductVariants::Value, 100))
                    .col(decimal_len(ProductVariants::PriceAdjustment, 10, 2).default(0))
                    .col(integer(ProductVariants::StockQuantity).default(0))
                    .col(string_len_null(ProductVariants::Sku, 100))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_product_variants_product")
                            .from(ProductVariants::Table, ProductVariants::ProductId)
                            .to(Products::Table, Products::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_product_variants_product_id")
                    .table(ProductVariants::Table)
                    .col(ProductVariants::ProductId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ProductVariants::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ProductVariants {
    Table,
    Id,
    ProductId,
    Name,
    Value,
    PriceAdjustment,
    StockQuantity,
    Sku,
}
