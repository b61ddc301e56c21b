//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    DepartmentRegistry, DirectorateRegistry, LoginService, ProgramCatalogue, UserDirectory,
};

/// Default cap on a multipart upload, in bytes.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub login: Arc<dyn LoginService>,
    pub users: Arc<dyn UserDirectory>,
    pub departments: Arc<dyn DepartmentRegistry>,
    pub directorates: Arc<dyn DirectorateRegistry>,
    pub programs: Arc<dyn ProgramCatalogue>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub users: Arc<dyn UserDirectory>,
    pub departments: Arc<dyn DepartmentRegistry>,
    pub directorates: Arc<dyn DirectorateRegistry>,
    pub programs: Arc<dyn ProgramCatalogue>,
    /// Largest accepted artifact upload.
    pub max_upload_bytes: usize,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle with the default upload limit.
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            login,
            users,
            departments,
            directorates,
            programs,
        } = ports;
        Self {
            login,
            users,
            departments,
            directorates,
            programs,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }

    /// Override the multipart upload limit.
    #[must_use]
    pub fn with_max_upload_bytes(mut self, limit: usize) -> Self {
        self.max_upload_bytes = limit;
        self
    }
}
