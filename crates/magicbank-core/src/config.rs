use serde::de::DeserializeOwned;

/// Service configuration deserialized from environment variables.
///
/// Implementors derive `serde::Deserialize`; field names map to upper-case
/// variable names (`visit_minutes` <- `VISIT_MINUTES`).
pub trait Config: Sized + DeserializeOwned {
    /// Load from the process environment. A `.env` file in the working
    /// directory is read first if present; real env vars take precedence.
    ///
    /// # Panics
    ///
    /// Panics if a required variable is missing or cannot be deserialized.
    fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self::from_vars(std::env::vars())
            .unwrap_or_else(|e| panic!("failed to load config from environment: {e}"))
    }

    /// Deserialize from an explicit set of `(NAME, value)` pairs.
    fn from_vars<I>(vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter(vars)
    }
}
