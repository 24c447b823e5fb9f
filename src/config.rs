use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    /// Optional JSON file of translation key -> label overrides.
    pub translations_path: Option<String>,
    /// Drop out-of-stock targets from related-product reads.
    pub hide_out_of_stock: bool,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL")?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        let translations_path = env::var("TRANSLATIONS_PATH")
            .ok()
            .filter(|p| !p.trim().is_empty());
        let hide_out_of_stock = env::var("RELATED_HIDE_OUT_OF_STOCK")
            .ok()
            .map(|v| parse_flag(&v))
            .unwrap_or(false);
        Ok(Self {
            port,
            database_url,
            host,
            translations_path,
            hide_out_of_stock,
        })
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::parse_flag;

    #[test]
    fn flags_accept_common_truthy_values() {
        for v in ["1", "true", "TRUE", " yes ", "on"] {
            assert!(parse_flag(v), "{v} should be truthy");
        }
        for v in ["", "0", "false", "off", "nope"] {
            assert!(!parse_flag(v), "{v} should be falsy");
        }
    }
}
