//! Seeds a demo account, a spread of medicines across all lifecycle
//! states, and the donation-center reference list. Safe to re-run: each
//! section is skipped when its data already exists.

use chrono::{Duration, NaiveDate, Utc};
use dotenvy::dotenv;
use envconfig::Envconfig;
use sqlx::PgPool;
use uuid::Uuid;

use meditrack::{config::Config, db};

const DEMO_EMAIL: &str = "demo@meditrack.local";
const DEMO_PASSWORD: &str = "demo-password";

struct SeedMedicine {
    name: &'static str,
    expiry_offset_days: i64,
    barcode: Option<&'static str>,
    quantity: i32,
    category: Option<&'static str>,
    marked_for_donation: bool,
}

fn seed_medicines() -> Vec<SeedMedicine> {
    vec![
        SeedMedicine {
            name: "Aspirin",
            expiry_offset_days: -30,
            barcode: Some("8901234567890"),
            quantity: 20,
            category: Some("tablets"),
            marked_for_donation: false,
        },
        SeedMedicine {
            name: "Amoxicillin",
            expiry_offset_days: -2,
            barcode: None,
            quantity: 12,
            category: Some("capsules"),
            marked_for_donation: false,
        },
        SeedMedicine {
            name: "Paracetamol Syrup",
            expiry_offset_days: 0,
            barcode: Some("8900987654321"),
            quantity: 1,
            category: Some("liquid"),
            marked_for_donation: false,
        },
        SeedMedicine {
            name: "Salbutamol Inhaler",
            expiry_offset_days: 3,
            barcode: None,
            quantity: 2,
            category: Some("inhaler"),
            marked_for_donation: true,
        },
        SeedMedicine {
            name: "Eye Drops",
            expiry_offset_days: 7,
            barcode: None,
            quantity: 1,
            category: Some("drops"),
            marked_for_donation: false,
        },
        SeedMedicine {
            name: "Insulin",
            expiry_offset_days: 45,
            barcode: Some("8905550001112"),
            quantity: 5,
            category: Some("injection"),
            marked_for_donation: false,
        },
        SeedMedicine {
            name: "Hydrocortisone Cream",
            expiry_offset_days: 180,
            barcode: None,
            quantity: 1,
            category: Some("topical"),
            marked_for_donation: true,
        },
        SeedMedicine {
            name: "Multivitamin",
            expiry_offset_days: 365,
            barcode: None,
            quantity: 60,
            category: Some("other"),
            marked_for_donation: false,
        },
    ]
}

const SEED_CENTERS: &[(&str, &str, &str, &str)] = &[
    (
        "Hope Community Pharmacy",
        "12 Riverside Avenue, Springfield",
        "+1-555-0142",
        "donations@hopepharmacy.example",
    ),
    (
        "Red Cross Medicine Bank",
        "88 Elm Street, Springfield",
        "+1-555-0178",
        "medbank@redcross.example",
    ),
    (
        "St. Mary's Clinic",
        "5 Hilltop Road, Shelbyville",
        "+1-555-0199",
        "intake@stmarys.example",
    ),
];

async fn ensure_demo_user(pool: &PgPool) -> Result<Uuid, sqlx::Error> {
    sqlx::query(
        "INSERT INTO users (email, password_hash)
         VALUES ($1, crypt($2, gen_salt('bf')))
         ON CONFLICT (email) DO NOTHING",
    )
    .bind(DEMO_EMAIL)
    .bind(DEMO_PASSWORD)
    .execute(pool)
    .await?;

    sqlx::query_scalar("SELECT id FROM users WHERE email = $1")
        .bind(DEMO_EMAIL)
        .fetch_one(pool)
        .await
}

async fn seed_inventory(pool: &PgPool, user_id: Uuid, today: NaiveDate) -> Result<(), sqlx::Error> {
    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM medicines WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(pool)
        .await?;
    if existing > 0 {
        log::info!("Demo inventory already present, skipping");
        return Ok(());
    }

    for medicine in seed_medicines() {
        sqlx::query(
            "INSERT INTO medicines
                (user_id, name, expiry_date, barcode, quantity, category, marked_for_donation)
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(user_id)
        .bind(medicine.name)
        .bind(today + Duration::days(medicine.expiry_offset_days))
        .bind(medicine.barcode)
        .bind(medicine.quantity)
        .bind(medicine.category)
        .bind(medicine.marked_for_donation)
        .execute(pool)
        .await?;
    }
    Ok(())
}

async fn seed_centers(pool: &PgPool) -> Result<(), sqlx::Error> {
    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM donation_centers")
        .fetch_one(pool)
        .await?;
    if existing > 0 {
        log::info!("Donation centers already present, skipping");
        return Ok(());
    }

    for (name, address, phone, email) in SEED_CENTERS {
        sqlx::query(
            "INSERT INTO donation_centers (name, address, phone, email)
             VALUES ($1, $2, $3, $4)",
        )
        .bind(name)
        .bind(address)
        .bind(phone)
        .bind(email)
        .execute(pool)
        .await?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    dotenv().ok();

    let config = Config::init_from_env()?;
    let pool = db::init_db(&config.database_url).await?;

    let user_id = ensure_demo_user(&pool).await?;
    let today = Utc::now().date_naive();
    seed_inventory(&pool, user_id, today).await?;
    seed_centers(&pool).await?;

    log::info!("Seed complete; demo account is {DEMO_EMAIL}");
    Ok(())
}
