#![forbid(unsafe_code)]
//! Planning — bibliothèque de planification mensuelle par blocs (sans BD).
//!
//! - Découpage du mois en blocs semaine (Lun→Jeu) et week-end (Ven→Dim).
//! - Affectation gloutonne déterministe sous contraintes
//!   (dispos complètes, pas deux blocs consécutifs, plafond de jours).
//! - Alertes RH : blocs non couverts, dépassements contractuels.
//! - Stockage fichiers (JSON/CSV), verrouillage par mois.

pub mod calendar;
pub mod engine;
pub mod io;
pub mod model;
pub mod notification;
pub mod report;
pub mod storage;

pub use calendar::{partition, HOURS_PER_DAY};
pub use engine::{assign, generate_plan, AssignOptions, AvailabilityMap, PlanError, Warning};
pub use model::{
    Availability, Block, BlockKind, BlockStatus, Dataset, Person, PersonKey, PersonStats,
    PlanResult,
};
pub use notification::{prepare_notice, Notice, NoticeRenderer, TextNotice};
pub use report::{monthly_table, person_recap};
pub use storage::{JsonStorage, LockedPlan, PlanStore, Storage};
