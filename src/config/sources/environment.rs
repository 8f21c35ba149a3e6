//! Environment variable source: PHOTOADMIN prefix with __ separator

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;

/// Prefix shared by every configuration variable
pub const ENV_PREFIX: &str = "PHOTOADMIN";

/// Add environment variable overlay to builder.
///
/// `PHOTOADMIN__TREE__BASE_PATH=/mnt/photos` sets `tree.base_path`.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true),
    );
    Ok(builder)
}
