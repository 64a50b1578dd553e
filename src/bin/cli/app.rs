use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use uuid::Uuid;

use melete_lib::config::AppConfig;
use melete_lib::planner::{Goal, PlanStore, StoreError, StudyPlan};
use melete_lib::storage::FileKvStore;
use melete_lib::study_tools::StudyToolsClient;

/// Shared application state for CLI commands
pub struct App {
    pub config: AppConfig,
    pub store: PlanStore,
}

impl App {
    /// Initialize from config with CLI overrides applied
    pub fn new(data_dir: Option<PathBuf>, user: Option<String>) -> Result<Self> {
        let config = AppConfig::load_with_overrides(data_dir, user)
            .context("Failed to load configuration")?;

        let data_dir = match &config.data_dir {
            Some(dir) => dir.clone(),
            None => FileKvStore::default_data_dir().context("Failed to get data directory")?,
        };

        let backend = FileKvStore::new(data_dir).context("Failed to initialize storage")?;
        let store = PlanStore::open(Box::new(backend), &config.user_id);

        if let Some(err) = store.load_error() {
            eprintln!("warning: {}", err);
        }

        Ok(Self { config, store })
    }

    /// Build a client for the configured study tool endpoints
    pub fn study_tools(&self) -> Result<StudyToolsClient> {
        StudyToolsClient::new(
            self.config.study_tools.base_url.clone(),
            self.config.study_tools.timeout(),
        )
        .context("Failed to create study tools client")
    }

    /// Find a goal by id prefix (must be unambiguous)
    pub fn find_goal(&self, id_prefix: &str) -> Result<Goal> {
        let plan = self.store.plan();
        let prefix = id_prefix.to_lowercase();

        // Exact match first
        if let Ok(id) = Uuid::parse_str(&prefix) {
            if let Some(goal) = plan.goals.iter().find(|g| g.id == id) {
                return Ok(goal.clone());
            }
        }

        let matches: Vec<&Goal> = plan
            .goals
            .iter()
            .filter(|g| g.id.to_string().starts_with(&prefix))
            .collect();

        match matches.len() {
            0 => bail!(
                "No goal matching '{}'. Run 'melete goal list' to see ids.",
                id_prefix
            ),
            1 => Ok(matches[0].clone()),
            _ => bail!(
                "Ambiguous goal id '{}'. Matches:\n{}",
                id_prefix,
                matches
                    .iter()
                    .map(|g| format!("  - {} {}", &g.id.to_string()[..8], g.description))
                    .collect::<Vec<_>>()
                    .join("\n")
            ),
        }
    }

    /// Unwrap a mutation result, downgrading save failures to a warning.
    ///
    /// The in-memory plan keeps the change either way; the warning tells the
    /// user the stored copy was not updated.
    pub fn tolerate_save_failure(
        &self,
        result: std::result::Result<StudyPlan, StoreError>,
    ) -> StudyPlan {
        match result {
            Ok(plan) => plan,
            Err(e) => {
                eprintln!("warning: {}", e);
                self.store.plan()
            }
        }
    }
}
