//! Ancestor chain resolution for the division tree.

use std::collections::HashSet;

use tracing::error;
use uuid::Uuid;

use clubhub_core::error::AppError;
use clubhub_core::result::AppResult;
use clubhub_database::repositories::DivisionRepository;

/// Resolves ancestor chains in the division tree.
///
/// Authority granted on a division applies to its whole subtree, so the
/// permission engine checks a member's role on every division from the
/// target up to the root.
#[derive(Debug, Clone)]
pub struct HierarchyResolver {
    divisions: DivisionRepository,
}

impl HierarchyResolver {
    /// Create a new hierarchy resolver.
    pub fn new(divisions: DivisionRepository) -> Self {
        Self { divisions }
    }

    /// Return the chain from a division up to its root, target first.
    ///
    /// A visited set guards against corrupt parent links; a cycle is a data
    /// integrity failure and fails the walk instead of looping forever.
    pub async fn chain_of(&self, division_id: Uuid) -> AppResult<Vec<Uuid>> {
        let mut chain = Vec::new();
        let mut visited = HashSet::new();
        let mut current = Some(division_id);

        while let Some(id) = current {
            if !visited.insert(id) {
                error!(division_id = %id, "Cycle detected in division hierarchy");
                return Err(AppError::internal(format!(
                    "Division hierarchy contains a cycle through {id}"
                )));
            }
            chain.push(id);
            current = self.divisions.parent_of(id).await?;
        }

        Ok(chain)
    }

    /// Check whether re-parenting a division would close a cycle.
    ///
    /// True when the proposed parent is the division itself or one of its
    /// descendants.
    pub async fn would_create_cycle(
        &self,
        division_id: Uuid,
        new_parent_id: Uuid,
    ) -> AppResult<bool> {
        if division_id == new_parent_id {
            return Ok(true);
        }
        Ok(self.chain_of(new_parent_id).await?.contains(&division_id))
    }
}
