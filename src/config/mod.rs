use serde::Deserialize;
use std::env;

// Container for all runtime settings, filled from the environment
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub booking: BookingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub rust_log: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub pool_size: u32,
}

// The identity provider signs tokens with this secret; the service only
// verifies them
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
}

// Knobs of the reservation core
#[derive(Debug, Clone, Deserialize)]
pub struct BookingConfig {
    pub tier_seat_cap: usize,
    pub max_cas_retries: u32,
}

impl Config {
    pub fn from_env() -> Self {
        Config {
            app: AppConfig {
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("PORT")
                    .unwrap_or_else(|_| "8000".to_string())
                    .parse()
                    .expect("PORT must be a valid number"),
                rust_log: env::var("RUST_LOG")
                    .unwrap_or_else(|_| "cinema_booking=debug,tower_http=debug".to_string()),
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
                pool_size: env::var("DB_POOL_SIZE")
                    .unwrap_or_else(|_| "20".to_string())
                    .parse()
                    .expect("DB_POOL_SIZE must be a valid number"),
            },
            jwt: JwtConfig {
                secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
            },
            booking: BookingConfig {
                tier_seat_cap: env::var("BOOKING_TIER_SEAT_CAP")
                    .unwrap_or_else(|_| "5".to_string())
                    .parse()
                    .expect("BOOKING_TIER_SEAT_CAP must be a valid number"),
                max_cas_retries: env::var("BOOKING_MAX_CAS_RETRIES")
                    .unwrap_or_else(|_| "3".to_string())
                    .parse()
                    .expect("BOOKING_MAX_CAS_RETRIES must be a valid number"),
            },
        }
    }
}
