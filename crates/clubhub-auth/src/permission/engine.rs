//! The permission predicates the API enforces.

use uuid::Uuid;

use clubhub_core::result::AppResult;
use clubhub_database::repositories::{DivisionRepository, RoleRepository, TeamRepository};
use clubhub_entity::user::GlobalRole;

use crate::hierarchy::HierarchyResolver;

/// Answers authorization questions about users, divisions, teams and
/// persons.
///
/// Every predicate returns plain `true`/`false`; errors are reserved for
/// infrastructure failures. Unknown ids simply answer `false`.
#[derive(Debug, Clone)]
pub struct PermissionEngine {
    roles: RoleRepository,
    divisions: DivisionRepository,
    teams: TeamRepository,
    hierarchy: HierarchyResolver,
}

impl PermissionEngine {
    /// Create a new permission engine.
    pub fn new(
        roles: RoleRepository,
        divisions: DivisionRepository,
        teams: TeamRepository,
    ) -> Self {
        let hierarchy = HierarchyResolver::new(divisions.clone());
        Self {
            roles,
            divisions,
            teams,
            hierarchy,
        }
    }

    /// Whether a user holds the given organization-wide role.
    pub async fn has_global_role(&self, user_id: Uuid, role: GlobalRole) -> AppResult<bool> {
        self.roles.user_has_role(user_id, role.as_str()).await
    }

    /// Whether a user holds an elevated global role (admin or superuser).
    ///
    /// Elevated users pass every other predicate unconditionally.
    pub async fn is_elevated(&self, user_id: Uuid) -> AppResult<bool> {
        if self.has_global_role(user_id, GlobalRole::Admin).await? {
            return Ok(true);
        }
        self.has_global_role(user_id, GlobalRole::Superuser).await
    }

    /// Whether a user may manage a division.
    ///
    /// Management authority is inherited downward: a managing role on any
    /// ancestor grants management of the whole subtree.
    pub async fn can_manage_division(&self, user_id: Uuid, division_id: Uuid) -> AppResult<bool> {
        if self.is_elevated(user_id).await? {
            return Ok(true);
        }
        for ancestor in self.hierarchy.chain_of(division_id).await? {
            if let Some(role) = self.divisions.member_role(ancestor, user_id).await?
                && role.is_managing()
            {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Whether a user may view a division.
    ///
    /// Any membership on the division or one of its ancestors suffices.
    pub async fn can_view_division(&self, user_id: Uuid, division_id: Uuid) -> AppResult<bool> {
        if self.is_elevated(user_id).await? {
            return Ok(true);
        }
        for ancestor in self.hierarchy.chain_of(division_id).await? {
            if self.divisions.member_role(ancestor, user_id).await?.is_some() {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Whether a user may manage a team.
    ///
    /// Granted to elevated users, managing team members (manager or coach),
    /// and anyone who can manage the owning division.
    pub async fn can_manage_team(&self, user_id: Uuid, team_id: Uuid) -> AppResult<bool> {
        if self.is_elevated(user_id).await? {
            return Ok(true);
        }
        if let Some(role) = self.teams.member_role(team_id, user_id).await?
            && role.is_managing()
        {
            return Ok(true);
        }
        let Some(team) = self.teams.find_by_id(team_id).await? else {
            return Ok(false);
        };
        match team.division_id {
            Some(division_id) => self.can_manage_division(user_id, division_id).await,
            None => Ok(false),
        }
    }

    /// Whether a user may view a team.
    pub async fn can_view_team(&self, user_id: Uuid, team_id: Uuid) -> AppResult<bool> {
        if self.is_elevated(user_id).await? {
            return Ok(true);
        }
        if self.teams.member_role(team_id, user_id).await?.is_some() {
            return Ok(true);
        }
        let Some(team) = self.teams.find_by_id(team_id).await? else {
            return Ok(false);
        };
        match team.division_id {
            Some(division_id) => self.can_view_division(user_id, division_id).await,
            None => Ok(false),
        }
    }

    /// Whether a user may manage a person's record.
    ///
    /// A person always manages themselves. Otherwise the user must be
    /// elevated or manage some division or team the person belongs to.
    pub async fn can_manage_person(&self, user_id: Uuid, person_id: Uuid) -> AppResult<bool> {
        if user_id == person_id {
            return Ok(true);
        }
        if self.is_elevated(user_id).await? {
            return Ok(true);
        }
        for membership in self.divisions.memberships_of_person(person_id).await? {
            if self
                .can_manage_division(user_id, membership.division_id)
                .await?
            {
                return Ok(true);
            }
        }
        for membership in self.teams.memberships_of_person(person_id).await? {
            if self.can_manage_team(user_id, membership.team_id).await? {
                return Ok(true);
            }
        }
        Ok(false)
    }
}
