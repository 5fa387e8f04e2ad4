use super::types::PlanError;
use crate::model::Block;

/// Préconditions d'`assign` : blocs non vides, index et dates croissants.
pub(super) fn validate_blocks(blocks: &[Block]) -> Result<(), PlanError> {
    for block in blocks {
        if block.days.is_empty() {
            return Err(PlanError::EmptyBlock { index: block.index });
        }
    }

    for pair in blocks.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        if b.index <= a.index || b.start() <= a.end() {
            return Err(PlanError::OutOfOrder { index: b.index });
        }
    }

    Ok(())
}
