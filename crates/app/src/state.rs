//! Application state management

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use directories::ProjectDirs;
use edulog_core::{AppConfig, Database, Error, Result};

/// Database handle shared by settings and the record store
pub type SharedDatabase = Arc<Mutex<Database>>;

/// Process-wide resources opened at startup
pub struct AppState {
    pub db: SharedDatabase,
    pub config: AppConfig,
    data_dir: PathBuf,
}

impl AppState {
    pub fn new() -> Result<Self> {
        let data_dir = Self::data_path()?;
        let config = AppConfig::load()?;
        Self::open(data_dir, config)
    }

    /// Open the database under `data_dir`, creating the directory if needed
    pub fn open(data_dir: PathBuf, config: AppConfig) -> Result<Self> {
        std::fs::create_dir_all(&data_dir)?;
        let db = Database::open(data_dir.join("edulog.db"))?;

        Ok(Self {
            db: Arc::new(Mutex::new(db)),
            config,
            data_dir,
        })
    }

    fn data_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("app", "edulog", "edulog").ok_or_else(|| {
            Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Could not determine data directory",
            ))
        })?;

        Ok(dirs.data_dir().to_path_buf())
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
