//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::http::header::AUTHORIZATION;

use crate::domain::ports::{
    MockDepartmentRegistry, MockDirectorateRegistry, MockLoginService, MockProgramCatalogue,
    MockUserDirectory,
};
use crate::domain::{AuthClaims, PublicId};

use super::state::{HttpState, HttpStatePorts};

/// Token accepted by [`authorising_login`].
pub const VALID_TOKEN: &str = "valid-token";

/// Mock ports with no expectations; any unexpected call fails the test.
#[derive(Default)]
pub struct MockPorts {
    pub login: MockLoginService,
    pub users: MockUserDirectory,
    pub departments: MockDepartmentRegistry,
    pub directorates: MockDirectorateRegistry,
    pub programs: MockProgramCatalogue,
}

impl MockPorts {
    /// Start from a login double that accepts [`VALID_TOKEN`].
    pub fn authorised() -> Self {
        Self {
            login: authorising_login(),
            ..Self::default()
        }
    }

    pub fn into_state(self) -> HttpState {
        HttpState::new(HttpStatePorts {
            login: Arc::new(self.login),
            users: Arc::new(self.users),
            departments: Arc::new(self.departments),
            directorates: Arc::new(self.directorates),
            programs: Arc::new(self.programs),
        })
    }
}

/// State whose only configured port is `login`.
pub fn state_with_login(login: MockLoginService) -> HttpState {
    MockPorts {
        login,
        ..MockPorts::default()
    }
    .into_state()
}

/// Login double that accepts [`VALID_TOKEN`] and rejects everything else.
pub fn authorising_login() -> MockLoginService {
    let mut login = MockLoginService::new();
    login.expect_authenticate().returning(|token| {
        if token == VALID_TOKEN {
            Ok(AuthClaims {
                sub: PublicId::generate(),
                username: "admin".to_owned(),
                iat: 0,
                exp: i64::MAX,
            })
        } else {
            Err(crate::domain::Error::unauthorized("Invalid or expired token"))
        }
    });
    login
}

/// `Authorization` header carrying [`VALID_TOKEN`].
pub fn bearer_header() -> (actix_web::http::header::HeaderName, String) {
    (AUTHORIZATION, format!("Bearer {VALID_TOKEN}"))
}
