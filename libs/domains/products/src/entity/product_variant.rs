use crate::models::{ProductVariant, money};
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "product_variants")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub product_id: i32,
    pub name: String,
    pub value: String,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub price_adjustment: Decimal,
    pub stock_quantity: i32,
    pub sku: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id",
        on_delete = "Cascade"
    )]
    Product,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for ProductVariant {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            value: model.value,
            price_adjustment: money(model.price_adjustment),
            stock_quantity: model.stock_quantity,
            sku: model.sku,
        }
    }
}
