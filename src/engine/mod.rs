mod assignment;
mod stats;
mod types;
mod util;

pub use types::{AssignOptions, PlanError, Warning};

use crate::calendar;
use crate::model::{Availability, Block, Person, PersonKey, PlanResult};
use std::collections::BTreeMap;

/// Disponibilités de l'équipe, indexées par clé de personne.
pub type AvailabilityMap = BTreeMap<PersonKey, Availability>;

/// Affecte des blocs déjà découpés. Passe gloutonne unique : blocs en
/// ordre chronologique, candidats dans l'ordre fourni (cet ordre EST la
/// politique de départage). Les blocs non couverts sont un résultat
/// normal, pas une erreur.
pub fn assign(
    year: i32,
    month: u32,
    blocks: Vec<Block>,
    people: &[Person],
    availability: &AvailabilityMap,
    opts: AssignOptions,
) -> Result<PlanResult, PlanError> {
    util::validate_blocks(&blocks)?;
    assignment::run(year, month, blocks, people, availability, opts)
}

/// Découpe le mois puis affecte : l'enchaînement complet d'une génération.
pub fn generate_plan(
    year: i32,
    month: u32,
    people: &[Person],
    availability: &AvailabilityMap,
    opts: AssignOptions,
) -> Result<PlanResult, PlanError> {
    let blocks = calendar::partition(year, month)?;
    assign(year, month, blocks, people, availability, opts)
}
