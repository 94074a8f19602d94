//! Demo catalog for local development
//!
//! Replaces every `@thrift.ivy` account (and, through the cascade, their
//! listings) with a fresh set of sellers and listings in one transaction.

use chrono::Utc;
use domain_products::entity::{product, product_image};
use domain_products::{money, Condition};
use domain_users::{entity as user, hash_password, Role};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use tracing::info;

pub const DEMO_EMAIL_DOMAIN: &str = "@thrift.ivy";
pub const DEMO_PASSWORD: &str = "password123";

struct DemoSeller {
    email: &'static str,
    first_name: &'static str,
    last_name: &'static str,
}

struct DemoListing {
    seller: usize,
    category_id: i32,
    name: &'static str,
    description: &'static str,
    /// Whole currency units
    price: u32,
    compare_at_price: Option<u32>,
    condition: Condition,
    size: &'static str,
    brand: &'static str,
    image: &'static str,
}

const SELLERS: [DemoSeller; 4] = [
    DemoSeller { email: "emma@thrift.ivy", first_name: "Emma", last_name: "Chen" },
    DemoSeller { email: "noah@thrift.ivy", first_name: "Noah", last_name: "Martinez" },
    DemoSeller { email: "sophia@thrift.ivy", first_name: "Sophia", last_name: "Kim" },
    DemoSeller { email: "liam@thrift.ivy", first_name: "Liam", last_name: "Johnson" },
];

const LISTINGS: [DemoListing; 10] = [
    DemoListing {
        seller: 0,
        category_id: 2,
        name: "Vintage Levi's 501 Jeans",
        description: "Classic vintage 501s with a worn-in feel. Size 28 waist.",
        price: 45,
        compare_at_price: None,
        condition: Condition::Good,
        size: "28",
        brand: "Levi's",
        image: "https://images.unsplash.com/photo-1542272604-787c3835535d?w=800",
    },
    DemoListing {
        seller: 0,
        category_id: 1,
        name: "Oversized Vintage Band Tee",
        description: "Soft band t-shirt with a natural fade. Oversized fit.",
        price: 28,
        compare_at_price: None,
        condition: Condition::Good,
        size: "L",
        brand: "Vintage",
        image: "https://images.unsplash.com/photo-1583743814966-8936f5b7be1a?w=800",
    },
    DemoListing {
        seller: 0,
        category_id: 4,
        name: "Wool Blend Coat",
        description: "Camel wool coat, barely worn. Ready for fall.",
        price: 85,
        compare_at_price: Some(140),
        condition: Condition::LikeNew,
        size: "M",
        brand: "J.Crew",
        image: "https://images.unsplash.com/photo-1539533018447-63fcce2678e3?w=800",
    },
    DemoListing {
        seller: 1,
        category_id: 4,
        name: "Nike Windbreaker Jacket",
        description: "90s windbreaker in a rare colorway. Excellent shape.",
        price: 55,
        compare_at_price: None,
        condition: Condition::Good,
        size: "M",
        brand: "Nike",
        image: "https://images.unsplash.com/photo-1551028719-00167b16eac5?w=800",
    },
    DemoListing {
        seller: 1,
        category_id: 1,
        name: "White Linen Button-Up",
        description: "Crisp white linen shirt for summer. Barely worn.",
        price: 32,
        compare_at_price: None,
        condition: Condition::LikeNew,
        size: "L",
        brand: "Uniqlo",
        image: "https://images.unsplash.com/photo-1596755094514-f87e34085b2c?w=800",
    },
    DemoListing {
        seller: 1,
        category_id: 5,
        name: "Leather Chelsea Boots",
        description: "Some wear on the soles but plenty of life left. Size 10.",
        price: 75,
        compare_at_price: Some(180),
        condition: Condition::Good,
        size: "10",
        brand: "Thursday Boot Co.",
        image: "https://images.unsplash.com/photo-1608256246200-53e635b5b65f?w=800",
    },
    DemoListing {
        seller: 2,
        category_id: 3,
        name: "Silk Slip Dress",
        description: "Champagne silk slip dress, worn once to a wedding.",
        price: 68,
        compare_at_price: Some(150),
        condition: Condition::LikeNew,
        size: "S",
        brand: "Reformation",
        image: "https://images.unsplash.com/photo-1566174053879-31528523f8ae?w=800",
    },
    DemoListing {
        seller: 2,
        category_id: 2,
        name: "High-Waisted Wide Leg Pants",
        description: "Cream wide leg pants in perfect condition.",
        price: 42,
        compare_at_price: None,
        condition: Condition::LikeNew,
        size: "S",
        brand: "Zara",
        image: "https://images.unsplash.com/photo-1594633312681-425c7b97ccd1?w=800",
    },
    DemoListing {
        seller: 2,
        category_id: 5,
        name: "Leather Crossbody Bag",
        description: "Tan leather crossbody with minor wear. Very practical.",
        price: 48,
        compare_at_price: None,
        condition: Condition::Good,
        size: "One Size",
        brand: "Madewell",
        image: "https://images.unsplash.com/photo-1590874103328-eac38a683ce7?w=800",
    },
    DemoListing {
        seller: 3,
        category_id: 4,
        name: "Knit Cardigan",
        description: "Cozy oversized cardigan in a neutral beige.",
        price: 38,
        compare_at_price: None,
        condition: Condition::Fair,
        size: "M",
        brand: "H&M",
        image: "https://images.unsplash.com/photo-1434389677669-e08b4cac3105?w=800",
    },
];

/// Counts of what the seed inserted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub sellers: usize,
    pub products: usize,
}

/// Load the demo sellers and listings, replacing earlier demo data.
pub async fn seed_demo_data(db: &DatabaseConnection) -> eyre::Result<SeedSummary> {
    let password_hash = hash_password(DEMO_PASSWORD)?;
    let txn = db.begin().await?;

    let removed = user::Entity::delete_many()
        .filter(user::Column::Email.ends_with(DEMO_EMAIL_DOMAIN))
        .exec(&txn)
        .await?;
    info!(removed = removed.rows_affected, "Removed previous demo sellers");

    let mut seller_ids = Vec::with_capacity(SELLERS.len());
    for seller in &SELLERS {
        let now = Utc::now().fixed_offset();
        let created = user::ActiveModel {
            email: Set(seller.email.to_string()),
            password_hash: Set(password_hash.clone()),
            first_name: Set(seller.first_name.to_string()),
            last_name: Set(seller.last_name.to_string()),
            phone: Set(None),
            role: Set(Role::Seller),
            is_verified: Set(true),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        seller_ids.push(created.id);
    }

    for listing in &LISTINGS {
        let now = Utc::now().fixed_offset();
        let created = product::ActiveModel {
            seller_id: Set(seller_ids[listing.seller]),
            category_id: Set(Some(listing.category_id)),
            name: Set(listing.name.to_string()),
            description: Set(listing.description.to_string()),
            price: Set(money(Decimal::from(listing.price))),
            compare_at_price: Set(listing.compare_at_price.map(|p| money(Decimal::from(p)))),
            condition: Set(listing.condition),
            size: Set(Some(listing.size.to_string())),
            brand: Set(Some(listing.brand.to_string())),
            stock_quantity: Set(1),
            is_active: Set(true),
            is_sold: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        product_image::ActiveModel {
            product_id: Set(created.id),
            image_url: Set(listing.image.to_string()),
            is_primary: Set(true),
            display_order: Set(0),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
    }

    txn.commit().await?;

    let summary = SeedSummary {
        sellers: SELLERS.len(),
        products: LISTINGS.len(),
    };
    info!(?summary, "Demo data loaded");
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::TestDatabase;

    #[tokio::test]
    async fn test_seed_loads_demo_catalog() {
        let db = TestDatabase::new().await;

        let summary = seed_demo_data(&db.connection).await.unwrap();

        assert_eq!(summary, SeedSummary { sellers: 4, products: 10 });
        assert_eq!(db.count("SELECT COUNT(*) FROM users").await, 4);
        assert_eq!(db.count("SELECT COUNT(*) FROM products").await, 10);
        assert_eq!(
            db.count("SELECT COUNT(*) FROM product_images WHERE is_primary").await,
            10
        );
        assert_eq!(
            db.count("SELECT COUNT(*) FROM products WHERE compare_at_price IS NOT NULL")
                .await,
            3
        );
    }

    #[tokio::test]
    async fn test_seed_replaces_previous_demo_data_only() {
        let db = TestDatabase::new().await;
        db.create_test_user("keeper@example.com").await;

        seed_demo_data(&db.connection).await.unwrap();
        seed_demo_data(&db.connection).await.unwrap();

        assert_eq!(db.count("SELECT COUNT(*) FROM users").await, 5);
        assert_eq!(db.count("SELECT COUNT(*) FROM products").await, 10);
        assert_eq!(db.count("SELECT COUNT(*) FROM product_images").await, 10);
    }
}
