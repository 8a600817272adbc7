mod content;
mod reader;

use std::io::Error as IoError;
use std::path::Path;
use std::sync::Arc;

pub use content::{Configuration, WorkoutContent};
pub use reader::ReadContentError;

use snafu::prelude::*;
use toml::de::Error as DeError;
use xdg::{BaseDirectories, BaseDirectoriesError};

use reader::ContentReader;

/// Name of the configuration file inside the XDG configuration directory.
pub const CONFIG_FILE: &str = "config.toml";

/// An error type for loading configuraton from files.
#[derive(Debug, Snafu, Clone)]
#[non_exhaustive]
pub enum LoadConfigurationError {
    #[snafu(display("Could not get XDG settings"))]
    Xdg {
        #[snafu(source(from(BaseDirectoriesError, Arc::new)))]
        source: Arc<BaseDirectoriesError>,
    },
    #[snafu(display("Could not create XDG configuration directory"))]
    Place {
        #[snafu(source(from(IoError, Arc::new)))]
        source: Arc<IoError>,
    },
    #[snafu(display("Could not read content from file"))]
    Read { source: ReadContentError },
    #[snafu(display("Could not parse invalid configurations"))]
    Parse { source: DeError },
}

/// Read configuration from given path. Optionally create one from default
/// template if it doesn't exists.
///
/// # Errors
///
/// This function will return an error if reading content from file fails or
/// parsing configuration fails.
pub fn load<P: AsRef<Path>>(
    path: P,
    create_new: bool,
) -> Result<Configuration, LoadConfigurationError> {
    let content = ContentReader::new(path.as_ref(), create_new)
        .read()
        .context(ReadSnafu)?;
    let configuration: Configuration = toml::from_str(&content).context(ParseSnafu)?;
    tracing::debug!(
        path = %path.as_ref().display(),
        workouts = configuration.workout.len(),
        "Configuration loaded"
    );
    Ok(configuration)
}

/// Read configuration from a custom path. This won't create any new file by
/// default.
///
/// # Errors
///
/// This function will return an error if reading content from file fails or
/// parsing configuration fails.
pub fn load_with_path<P: AsRef<Path>>(path: P) -> Result<Configuration, LoadConfigurationError> {
    load(path, false)
}

/// Read configuration from XDG configuration directory. Create one from default
/// template if it doesn't exists.
///
/// # Errors
///
/// This function will return an error if reading content from file fails or
/// parsing configuration fails.
pub fn load_with_xdg(app_name: &str) -> Result<Configuration, LoadConfigurationError> {
    let path = BaseDirectories::with_prefix(app_name)
        .context(XdgSnafu)?
        .place_config_file(CONFIG_FILE)
        .context(PlaceSnafu)?;
    load(path, true)
}
