use sea_orm_migration::prelude::*;

use crate::m20250301_000002_create_categories::Categories;

/// (name, slug, description), inserted in this order so ids 1-5 are stable.
const CATEGORIES: [(&str, &str, &str); 5] = [
    ("Tops", "tops", "Shirts, tees, blouses and knitwear"),
    ("Bottoms", "bottoms", "Jeans, trousers, shorts and skirts"),
    ("Dresses", "dresses", "Day, evening and slip dresses"),
    ("Outerwear", "outerwear", "Coats, jackets and windbreakers"),
    ("Accessories", "accessories", "Bags, shoes, belts and jewelry"),
];

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let mut insert = Query::insert();
        insert.into_table(Categories::Table).columns([
            Categories::Name,
            Categories::Slug,
            Categories::Description,
        ]);

        for (name, slug, description) in CATEGORIES {
            insert
                .values([name.into(), slug.into(), description.into()])
                .map_err(|e| DbErr::Migration(e.to_string()))?;
        }

        manager.exec_stmt(insert).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let delete = Query::delete()
            .from_table(Categories::Table)
            .and_where(Expr::col(Categories::Slug).is_in(CATEGORIES.map(|(_, slug, _)| slug)))
            .to_owned();

        manager.exec_stmt(delete).await
    }
}
