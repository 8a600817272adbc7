use std::fs::File;
use std::io::{Error as IoError, ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use snafu::prelude::*;

pub const DEFAULT_CONTENT: &str = r#"
# This workout catalog is generated automatically. Add, remove or tweak
# workouts freely; run one with `wod-timer run <name>`.
#
# Every `[[workout]]` table needs a `name` and a `kind`. Supported kinds are
# EMOM, AMRAP, ForTime and Tabata (HIIT is accepted as Tabata). Durations
# are in seconds. Omitted parameters fall back to defaults:
#
#   EMOM     rounds = 10, interval_duration = 60
#   AMRAP    total_duration = 300
#   ForTime  time_cap = 3600 (only scales the progress ring)
#   Tabata   rounds = 8, work_duration = 20, rest_duration = 10

[[workout]]
name = "death-by-burpees"
kind = "EMOM"
description = "Add one burpee every minute until you can't keep up"
rounds = 10
interval_duration = 60

[[workout]]
name = "cindy"
kind = "AMRAP"
description = "5 pull-ups, 10 push-ups, 15 air squats"
total_duration = 1200

[[workout]]
name = "fran"
kind = "ForTime"
description = "21-15-9 thrusters and pull-ups"
time_cap = 600

[[workout]]
name = "classic-tabata"
kind = "Tabata"
description = "Eight rounds of all-out effort"
rounds = 8
work_duration = 20
rest_duration = 10
"#;

/// A reader which reads the configuration content and creates a default
/// configuration file if it is missing.
pub struct ContentReader {
    path: PathBuf,
    create_new: bool,
}

impl ContentReader {
    /// Creates a new [`ContentReader`].
    pub fn new<P: AsRef<Path>>(path: P, create_new: bool) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            create_new,
        }
    }

    /// Read content from the file.
    ///
    /// # Errors
    ///
    /// This function will return an error if file doesn't exist or it fails to
    /// create a configuration file.
    pub fn read(self) -> Result<String, ReadContentError> {
        let mut file = self.open()?;
        let mut content = String::new();
        file.read_to_string(&mut content).context(FileSystemSnafu {
            when: "Reading configuration",
        })?;
        Ok(content)
    }

    fn open(&self) -> Result<File, ReadContentError> {
        match File::open(&self.path) {
            Ok(file) => Ok(file),
            Err(err) if err.kind() == ErrorKind::NotFound && self.create_new => {
                tracing::info!(path = %self.path.display(), "Writing default workout catalog");
                Self::create(&self.path)
            }
            Err(err) if err.kind() == ErrorKind::NotFound => NotFoundSnafu {
                path: self.path.clone(),
            }
            .fail(),
            Err(err) => Err(err).context(FileSystemSnafu {
                when: "Opening configuration file",
            }),
        }
    }

    fn create(path: &Path) -> Result<File, ReadContentError> {
        let mut file = File::options()
            .read(true)
            .write(true)
            .create_new(true)
            .open(path)
            .context(FileSystemSnafu {
                when: "Creating configuration file",
            })?;

        file.write_all(DEFAULT_CONTENT.as_bytes())
            .context(FileSystemSnafu {
                when: "Writing default configuration content",
            })?;

        file.seek(SeekFrom::Start(0)).context(FileSystemSnafu {
            when: "Reseting file cursor position to start",
        })?;

        Ok(file)
    }
}

/// An error type for reading content from the configuration file.
#[derive(Debug, Snafu, Clone)]
#[non_exhaustive]
pub enum ReadContentError {
    #[snafu(display("Could not open inexistent file {}", path.display()))]
    NotFound { path: PathBuf },
    #[snafu(display("Could not access configuration: {when}"))]
    FileSystem {
        when: String,
        #[snafu(source(from(IoError, Arc::new)))]
        source: Arc<IoError>,
    },
}
