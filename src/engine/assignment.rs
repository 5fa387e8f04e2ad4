use super::types::{AssignOptions, PlanError, Warning};
use super::{stats, AvailabilityMap};
use crate::model::{Block, BlockStatus, Person, PersonKey, PlanResult};
use std::collections::HashMap;

/// Compteurs d'une personne pendant UNE passe d'affectation.
/// État strictement local à l'appel, jeté à la fin.
#[derive(Debug, Default, Clone, Copy)]
struct RunState {
    last_index: Option<usize>,
    last_week: Option<u32>,
    days: u32,
    hours: u32,
}

pub(super) fn run(
    year: i32,
    month: u32,
    mut blocks: Vec<Block>,
    people: &[Person],
    availability: &AvailabilityMap,
    opts: AssignOptions,
) -> Result<PlanResult, PlanError> {
    let mut state: HashMap<PersonKey, RunState> = HashMap::new();
    let mut warnings = Vec::new();

    for block in blocks.iter_mut() {
        let chosen = people.iter().find(|person| {
            let run = state.get(&person.key).copied().unwrap_or_default();
            candidate_ok(person, block, run, availability, opts)
        });

        match chosen {
            Some(person) => {
                let run = state.entry(person.key.clone()).or_default();
                run.last_index = Some(block.index);
                run.last_week = Some(block.week);
                run.days += block.day_count() as u32;
                run.hours += block.hours;
                block.assigned = Some(person.key.clone());
                block.status = BlockStatus::Assigned;
            }
            None => {
                block.status = BlockStatus::Uncovered;
                warnings.push(Warning::Uncovered {
                    index: block.index,
                    block_kind: block.kind,
                    start: block.start(),
                    end: block.end(),
                });
            }
        }
    }

    let stats = stats::fold_stats(&blocks);

    // Dépassements contractuels : consultatifs, après la passe.
    for person in people {
        if person.contract_hours == 0 {
            continue;
        }
        let assigned_hours = stats.get(&person.key).map_or(0, |s| s.hours);
        if assigned_hours > person.contract_hours {
            warnings.push(Warning::ContractOverrun {
                person: person.key.clone(),
                contract_hours: person.contract_hours,
                assigned_hours,
            });
        }
    }

    Ok(PlanResult {
        year,
        month,
        blocks,
        stats,
        warnings,
    })
}

/// Règles de rejet d'un candidat pour un bloc, dans l'ordre :
/// bloc immédiatement consécutif, même semaine (option), disponibilité
/// complète, plafond jours, plafond heures (option).
fn candidate_ok(
    person: &Person,
    block: &Block,
    run: RunState,
    availability: &AvailabilityMap,
    opts: AssignOptions,
) -> bool {
    if run.last_index.is_some_and(|last| last + 1 == block.index) {
        return false;
    }

    if opts.forbid_same_week && run.last_week == Some(block.week) {
        return false;
    }

    let available = availability
        .get(&person.key)
        .is_some_and(|avail| avail.covers_all(&block.days));
    if !available {
        return false;
    }

    if run.days + block.day_count() as u32 > opts.monthly_day_cap {
        return false;
    }

    if let Some(cap) = opts.monthly_hour_cap {
        if run.hours + block.hours > cap {
            return false;
        }
    }

    true
}
