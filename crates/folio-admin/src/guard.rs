//! Access guards run before any admin operation.

use folio_core::models::User;
use folio_core::AppError;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    User,
    Admin,
}

/// The signed-in user a request acts on behalf of.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub id: Uuid,
    pub name: String,
    pub roles: Vec<Role>,
}

impl Actor {
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}

impl From<&User> for Actor {
    fn from(user: &User) -> Self {
        let mut roles = vec![Role::User];
        if user.is_admin {
            roles.push(Role::Admin);
        }
        Self {
            id: user.id,
            name: user.name.clone(),
            roles,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub actor: Option<Actor>,
}

impl RequestContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn for_actor(actor: Actor) -> Self {
        Self { actor: Some(actor) }
    }
}

pub fn require_authenticated(ctx: &RequestContext) -> Result<&Actor, AppError> {
    ctx.actor
        .as_ref()
        .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))
}

pub fn require_role(ctx: &RequestContext, role: Role) -> Result<&Actor, AppError> {
    let actor = require_authenticated(ctx)?;
    if !actor.has_role(role) {
        tracing::warn!(actor_id = %actor.id, required = ?role, "Access denied");
        return Err(AppError::Forbidden(format!("{:?} role required", role)));
    }
    Ok(actor)
}
