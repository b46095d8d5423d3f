use std::path::Path;
use std::sync::Arc;

use crate::app::error::Result;
use crate::classifier::ScrapeClassifier;
use crate::config::AppConfig;
use crate::orchestrator::{IsolationMode, Orchestrator};
use crate::scraper::{ChromeLauncher, ScrapeSession};
use crate::supervisor::{Isolation, ProcessIsolation, Supervisor, TaskIsolation};

/// Wires configuration into the components a command needs.
pub struct AppContext {
    pub config: AppConfig,
}

impl AppContext {
    pub fn new(config_path: Option<&Path>) -> Result<Self> {
        Ok(Self::from_config(AppConfig::load(config_path)?))
    }

    pub fn from_config(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn classifier(&self) -> Result<ScrapeClassifier> {
        ScrapeClassifier::new(self.config.classifier.clone())
    }

    pub fn session(&self) -> Result<ScrapeSession> {
        ScrapeSession::new(self.config.scraper.clone())
    }

    pub fn launcher(&self) -> ChromeLauncher {
        ChromeLauncher::new(self.config.scraper.clone())
    }

    /// Supervisor over the configured isolation mode.
    pub fn supervisor(&self) -> Result<Supervisor> {
        let isolation: Arc<dyn Isolation> = match self.config.run.isolation {
            IsolationMode::Process => Arc::new(ProcessIsolation::new(self.config.scraper.clone())?),
            IsolationMode::Task => Arc::new(TaskIsolation::new(self.session()?, self.launcher())),
        };
        Ok(Supervisor::new(isolation, self.config.run.process_timeout()))
    }

    pub fn orchestrator(&self) -> Result<Orchestrator> {
        Ok(Orchestrator::new(
            self.classifier()?,
            self.supervisor()?,
            self.config.run.clone(),
            self.config.scraper.min_content_length,
        ))
    }
}
