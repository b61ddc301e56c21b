//! Query parameters shared by several endpoints.

use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::DeleteMode;

/// Query string accepted by every `DELETE` endpoint.
///
/// `?soft=false` requests a hard delete; anything else keeps the record and
/// flags it as deleted.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DeleteParams {
    /// Soft delete when true or absent.
    pub soft: Option<bool>,
}

impl DeleteParams {
    /// Deletion mode requested by the caller.
    #[must_use]
    pub fn mode(&self) -> DeleteMode {
        DeleteMode::from_soft_flag(self.soft.unwrap_or(true))
    }
}
