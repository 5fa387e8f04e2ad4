use crate::model::{BlockKind, PersonKey};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Options d'affectation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignOptions {
    /// Plafond dur de jours affectés par mois et par personne.
    pub monthly_day_cap: u32,
    /// Plafond dur d'heures, optionnel (variante héritée, désactivée par défaut).
    pub monthly_hour_cap: Option<u32>,
    /// Interdit aussi les deux blocs d'une même semaine à la même personne.
    /// Avec le découpage canonique, la règle d'adjacence couvre déjà ce cas.
    pub forbid_same_week: bool,
}

impl Default for AssignOptions {
    fn default() -> Self {
        Self {
            monthly_day_cap: 7,
            monthly_hour_cap: None,
            forbid_same_week: false,
        }
    }
}

/// Alerte issue d'une génération : donnée de résultat, jamais une erreur.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Warning {
    /// Aucun candidat éligible pour ce bloc.
    Uncovered {
        index: usize,
        block_kind: BlockKind,
        start: NaiveDate,
        end: NaiveDate,
    },
    /// Heures affectées au-delà du contrat (purement consultatif).
    ContractOverrun {
        person: PersonKey,
        contract_hours: u32,
        assigned_hours: u32,
    },
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Warning::Uncovered {
                block_kind,
                start,
                end,
                ..
            } => write!(f, "Bloc {block_kind} du {start} au {end} non couvert"),
            Warning::ContractOverrun {
                person,
                contract_hours,
                assigned_hours,
            } => write!(
                f,
                "{person} : {assigned_hours} h affectées pour {contract_hours} h au contrat (+{} h)",
                assigned_hours - contract_hours
            ),
        }
    }
}

#[derive(Error, Debug)]
pub enum PlanError {
    #[error("invalid month: {year}-{month:02}")]
    InvalidMonth { year: i32, month: u32 },
    #[error("block {index} has no days")]
    EmptyBlock { index: usize },
    #[error("blocks out of chronological order at index {index}")]
    OutOfOrder { index: usize },
    #[error("unknown person key: {0}")]
    UnknownPerson(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
