use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub mongodb_uri: String,
    pub database_name: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            mongodb_uri: std::env::var("MONGO_URI")
                .or_else(|_| std::env::var("MONGODB_URI"))
                .map_err(|_| {
                    anyhow::anyhow!("MONGO_URI or MONGODB_URI environment variable required")
                })
                .and_then(|uri| {
                    if uri.trim().is_empty() {
                        anyhow::bail!("MONGO_URI cannot be empty");
                    }
                    if !uri.starts_with("mongodb://") && !uri.starts_with("mongodb+srv://") {
                        anyhow::bail!("MONGO_URI must start with mongodb:// or mongodb+srv://");
                    }
                    Ok(uri)
                })?,
            database_name: std::env::var("MONGO_DB")
                .unwrap_or_else(|_| "enquiries".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
        };

        // Log successful configuration load (without credentials)
        tracing::debug!("Database name: {}", config.database_name);
        tracing::debug!("Server Port: {}", config.port);

        Ok(config)
    }
}
