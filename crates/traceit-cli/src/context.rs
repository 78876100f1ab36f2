use crate::args::OutputFormat;
use anyhow::{anyhow, Result};
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use traceit_api::{Backend, HttpBackend};
use traceit_runtime::{Config, Session, SessionStore};

pub struct ExecutionContext {
    data_dir: PathBuf,
    api_url_override: Option<String>,
    pub format: OutputFormat,
    config: OnceCell<Config>,
    backend: OnceCell<Arc<dyn Backend>>,
    session_store: SessionStore,
}

impl ExecutionContext {
    pub fn new(
        data_dir: PathBuf,
        api_url_override: Option<String>,
        format: OutputFormat,
    ) -> Result<Self> {
        let session_store = SessionStore::new(&data_dir);

        Ok(Self {
            data_dir,
            api_url_override,
            format,
            config: OnceCell::new(),
            backend: OnceCell::new(),
            session_store,
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn config(&self) -> Result<&Config> {
        self.config.get_or_try_init(|| {
            let config_path = self.data_dir.join("config.toml");
            Config::load_from(&config_path).map_err(Into::into)
        })
    }

    /// The backend origin, --api-url flag winning over the config file.
    pub fn api_url(&self) -> Result<String> {
        if let Some(url) = &self.api_url_override {
            return Ok(url.clone());
        }
        Ok(self.config()?.api_url.clone())
    }

    pub fn backend(&self) -> Result<&Arc<dyn Backend>> {
        self.backend.get_or_try_init(|| {
            let url = self.api_url()?;
            let http = HttpBackend::new(&url)?;
            Ok(Arc::new(http) as Arc<dyn Backend>)
        })
    }

    pub fn session_store(&self) -> &SessionStore {
        &self.session_store
    }

    /// The stored session, or a sign-in hint when there is none.
    pub fn require_session(&self) -> Result<Session> {
        self.session_store
            .load()?
            .ok_or_else(|| anyhow!("Not signed in. Run 'traceit auth login' first."))
    }
}
