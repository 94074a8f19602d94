pub use sea_orm_migration::prelude::*;

mod m20250301_000001_create_users;
mod m20250301_000002_create_categories;
mod m20250301_000003_create_products;
mod m20250301_000004_create_product_images;
mod m20250301_000005_create_product_variants;
mod m20250301_000006_seed_categories;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_users::Migration),
            Box::new(m20250301_000002_create_categories::Migration),
            Box::new(m20250301_000003_create_products::Migration),
            Box::new(m20250301_000004_create_product_images::Migration),
            Box::new(m20250301_000005_create_product_variants::Migration),
            Box::new(m20250301_000006_seed_categories::Migration),
        ]
    }
}
