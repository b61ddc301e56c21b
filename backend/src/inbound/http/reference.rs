//! Summary shape used wherever one registry entity embeds another.

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{PublicId, RegistryRef};

/// `{uuid, name}` summary of a department or directorate.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReferenceResponse {
    #[schema(value_type = String, format = Uuid)]
    pub uuid: PublicId,
    pub name: String,
}

impl From<&RegistryRef> for ReferenceResponse {
    fn from(reference: &RegistryRef) -> Self {
        Self {
            uuid: reference.public_id,
            name: reference.name.clone(),
        }
    }
}
