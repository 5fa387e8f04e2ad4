use crate::model::{Block, BlockKind, BlockStatus, PersonKey, PersonStats};
use std::collections::BTreeMap;

/// Replie les totaux par personne sur la liste finale des blocs.
/// Recalcul indépendant des compteurs de la passe, donc vérifiable
/// directement contre l'invariant de couverture.
pub(super) fn fold_stats(blocks: &[Block]) -> BTreeMap<PersonKey, PersonStats> {
    blocks
        .iter()
        .filter(|b| b.status == BlockStatus::Assigned)
        .filter_map(|b| b.assigned.as_ref().map(|key| (key, b)))
        .fold(BTreeMap::new(), |mut acc, (key, block)| {
            let entry = acc.entry(key.clone()).or_insert_with(PersonStats::default);
            let day_count = block.day_count() as u32;
            entry.days += day_count;
            entry.hours += block.hours;
            if block.kind == BlockKind::Weekend {
                entry.weekend_days += day_count;
            }
            acc
        })
}
