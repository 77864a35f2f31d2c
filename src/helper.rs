use std::str::FromStr;

/// Read an environment variable, falling back to the given default when the
/// variable is not set.
pub fn env_get_var_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Read and parse an environment variable, falling back to the given default
/// when the variable is not set. An unparseable value is a startup error.
pub fn parse_from_env_or<T: FromStr>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(value) => value.parse::<T>().unwrap_or_else(|_| {
            panic!(
                "invalid value {value} for ${key}, expect type: {}",
                std::any::type_name::<T>()
            )
        }),
        Err(_) => default,
    }
}
