use crate::error::ConfigError;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{ApplicationSettings, Config};

/// Loads the application configuration from the `config.toml` file.
///
/// This function is the primary entry point for this crate. It reads the
/// configuration file, applies any `TRADELOG_`-prefixed environment variable
/// overrides (e.g. `TRADELOG_APPLICATION__PORT=8080`), and deserializes the
/// result into our strongly-typed `Config` struct.
pub fn load_config() -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        // Tells the builder to look for a file named `config.toml`
        .add_source(config::File::with_name("config.toml"))
        .add_source(config::Environment::with_prefix("TRADELOG").separator("__"))
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_full_config_file() {
        let raw = r#"
            [application]
            host = "127.0.0.1"
            port = 3000
        "#;
        let config: Config = config::Config::builder()
            .add_source(config::File::from_str(raw, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.application.host, "127.0.0.1");
        assert_eq!(config.application.port, 3000);
    }
}
