use crate::model::{Dataset, PlanResult};
use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub trait Storage {
    /// Charge le jeu de données depuis un support.
    fn load(&self) -> anyhow::Result<Dataset>;
    /// Sauvegarde de manière atomique.
    fn save(&self, dataset: &Dataset) -> anyhow::Result<()>;
}

pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    pub fn open<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        Ok(Self { path: path.as_ref().to_path_buf() })
    }
}

impl Storage for JsonStorage {
    fn load(&self) -> anyhow::Result<Dataset> {
        let data = fs::read(&self.path).with_context(|| format!("reading {}", self.path.display()))?;
        let dataset: Dataset = serde_json::from_slice(&data).with_context(|| "parsing dataset json")?;
        Ok(dataset)
    }

    fn save(&self, dataset: &Dataset) -> anyhow::Result<()> {
        let json = serde_json::to_vec_pretty(dataset)?;
        write_atomic(&self.path, &json)
    }
}

/// Plan verrouillé : résultat figé, les dispos du mois sont gelées.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockedPlan {
    pub locked_at: DateTime<Utc>,
    pub plan: PlanResult,
}

/// Répertoire de plans verrouillés, un fichier par (année, mois).
/// L'écriture est idempotente sur la clé année+mois.
#[derive(Debug, Clone)]
pub struct PlanStore {
    base_dir: PathBuf,
}

impl PlanStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            base_dir: dir.as_ref().to_path_buf(),
        }
    }

    fn plan_path(&self, year: i32, month: u32) -> PathBuf {
        self.base_dir.join(format!("plan-{year}-{month:02}.json"))
    }

    pub fn is_locked(&self, year: i32, month: u32) -> bool {
        self.plan_path(year, month).exists()
    }

    /// Verrouille un plan. Le plan est écrit tel quel, jamais recalculé.
    pub fn lock(&self, plan: &PlanResult) -> anyhow::Result<LockedPlan> {
        fs::create_dir_all(&self.base_dir)
            .with_context(|| format!("creating plan directory {}", self.base_dir.display()))?;
        let locked = LockedPlan {
            locked_at: Utc::now(),
            plan: plan.clone(),
        };
        let json = serde_json::to_vec_pretty(&locked)?;
        write_atomic(&self.plan_path(plan.year, plan.month), &json)?;
        Ok(locked)
    }

    pub fn load(&self, year: i32, month: u32) -> anyhow::Result<Option<LockedPlan>> {
        let path = self.plan_path(year, month);
        if !path.exists() {
            return Ok(None);
        }
        let data = fs::read(&path).with_context(|| format!("reading {}", path.display()))?;
        let locked: LockedPlan = serde_json::from_slice(&data)
            .with_context(|| format!("parsing locked plan {}", path.display()))?;
        Ok(Some(locked))
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    let mut tmp = NamedTempFile::new_in(path.parent().unwrap_or_else(|| Path::new(".")))
        .with_context(|| "creating temp file")?;
    tmp.write_all(bytes)?;
    tmp.flush()?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).with_context(|| "atomic rename")?;
    Ok(())
}
