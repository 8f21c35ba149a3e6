//! Local config file source: `photoadmin.toml` in the working directory

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, File, FileFormat};
use std::path::Path;

/// File name looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "photoadmin.toml";

pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    working_dir: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Ok(builder.add_source(
        File::from(working_dir.join(LOCAL_CONFIG_FILE))
            .format(FileFormat::Toml)
            .required(false),
    ))
}
