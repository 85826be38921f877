use serde::Deserialize;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub application: ApplicationSettings,
}

/// Settings for the HTTP server.
#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationSettings {
    /// The interface the server binds to (e.g., "0.0.0.0").
    pub host: String,
    /// The port the server listens on.
    pub port: u16,
}
