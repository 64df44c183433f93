use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_path: String,
    pub server_port: u16,
    pub log_level: String,
    pub frontend_dir: String,
    /// When true, PATCH applies the same title-case/upper-case normalization
    /// as POST and PUT. Off by default, so PATCH stores values verbatim.
    pub normalize_patch: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Config {
            database_path: env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "data/cars.db".to_string()),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            log_level: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            frontend_dir: env::var("FRONTEND_DIR").unwrap_or_else(|_| "frontend".to_string()),
            normalize_patch: env::var("NORMALIZE_PATCH")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
        })
    }
}
