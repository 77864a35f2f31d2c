use crate::helper;

/// Service configuration, read once from environment variables at startup
/// and immutable afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    pub redis_addr: String,
    /// Namespace for the counter record in the store, the equivalent of a
    /// table name in a document database.
    pub table: String,
    /// Origin echoed in `Access-Control-Allow-Origin` on success responses.
    pub allowed_origin: String,
    pub listen_addr: String,
    pub health_check_port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            redis_addr: helper::env_get_var_or("REDIS_ADDR", &redis_addr_default()),
            table: helper::env_get_var_or("COUNTER_TABLE", &table_default()),
            allowed_origin: helper::env_get_var_or("ALLOWED_ORIGIN", &allowed_origin_default()),
            listen_addr: helper::env_get_var_or("LISTEN_ADDR", &listen_addr_default()),
            health_check_port: helper::parse_from_env_or(
                "HEALTH_CHECK_PORT",
                health_check_port_default(),
            ),
        }
    }
}

fn redis_addr_default() -> String {
    "redis://localhost:6379".to_string()
}

fn table_default() -> String {
    "visitor-counter".to_string()
}

fn allowed_origin_default() -> String {
    "*".to_string()
}

fn listen_addr_default() -> String {
    "0.0.0.0:8080".to_string()
}

fn health_check_port_default() -> u16 {
    11451
}

#[test]
fn validate_env_correctness() {
    // defaults apply when nothing is set
    for key in [
        "REDIS_ADDR",
        "COUNTER_TABLE",
        "ALLOWED_ORIGIN",
        "LISTEN_ADDR",
        "HEALTH_CHECK_PORT",
    ] {
        std::env::remove_var(key);
    }
    let config = Config::from_env();
    assert_eq!(config.redis_addr, "redis://localhost:6379");
    assert_eq!(config.table, "visitor-counter");
    assert_eq!(config.allowed_origin, "*");
    assert_eq!(config.listen_addr, "0.0.0.0:8080");
    assert_eq!(config.health_check_port, 11451);

    std::env::set_var("COUNTER_TABLE", "VisitorCounter");
    std::env::set_var("ALLOWED_ORIGIN", "https://example.com");
    std::env::set_var("HEALTH_CHECK_PORT", "19000");
    let config = Config::from_env();
    assert_eq!(config.table, "VisitorCounter");
    assert_eq!(config.allowed_origin, "https://example.com");
    assert_eq!(config.health_check_port, 19000);

    std::env::remove_var("COUNTER_TABLE");
    std::env::remove_var("ALLOWED_ORIGIN");
    std::env::remove_var("HEALTH_CHECK_PORT");
}
