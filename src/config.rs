use std::env;

use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    DynamoDb,
    Memory,
}

impl StoreBackend {
    fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "dynamodb" | "dynamo" => Some(Self::DynamoDb),
            "memory" | "mem" => Some(Self::Memory),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Name of the posts table. Absence is reported per request, not at startup.
    pub table_name: Option<String>,
    pub user_pool_id: Option<String>,
    pub store_backend: StoreBackend,
    pub port: u16,
    pub cors_enabled: bool,
}

impl Config {
    pub fn init() -> Config {
        dotenv::dotenv().ok();

        let store_backend = match env::var("STORE_BACKEND") {
            Ok(value) => StoreBackend::parse(&value).unwrap_or_else(|| {
                warn!("Unknown STORE_BACKEND {:?}, falling back to dynamodb", value);
                StoreBackend::DynamoDb
            }),
            Err(_) => StoreBackend::DynamoDb,
        };

        Config {
            table_name: non_empty_var("TABLE_NAME"),
            user_pool_id: non_empty_var("USER_POOL_ID"),
            store_backend,
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            cors_enabled: env::var("CORS_ENABLED")
                .map(|v| !matches!(v.to_ascii_lowercase().as_str(), "false" | "0" | "no"))
                .unwrap_or(true),
        }
    }

    /// In-memory configuration used by tests and local runs.
    pub fn in_memory(table_name: Option<&str>) -> Config {
        Config {
            table_name: table_name.map(str::to_string),
            user_pool_id: None,
            store_backend: StoreBackend::Memory,
            port: 8080,
            cors_enabled: true,
        }
    }
}

pub(crate) fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
