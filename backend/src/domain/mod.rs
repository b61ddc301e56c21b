//! Domain primitives, aggregates, services and ports.
//!
//! Purpose: Define strongly typed registry entities (users, departments,
//! directorates, programs) and the services enforcing their rules. Adapters
//! talk to the domain only through the traits in [`ports`].
//!
//! Public surface:
//! - Error (alias to `error::Error`): transport-agnostic failure payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - Department, Directorate, Program, User: registry aggregates.
//! - DirectorateTree: arena-indexed view of the directorate forest.
//! - next_program_code: pure program-code allocation.

pub mod auth;
pub mod auth_service;
pub mod code_allocator;
pub mod deletion;
pub mod department;
pub mod department_service;
pub mod directorate;
pub mod directorate_service;
pub mod error;
pub mod ids;
pub mod name;
pub mod ports;
pub mod program;
pub mod program_service;
pub mod reference;
pub mod trace_id;
pub mod user;
pub mod user_service;

pub use self::auth::{AccessToken, AuthClaims, LoginCredentials, LoginValidationError};
pub use self::auth_service::{AdminSeeder, AuthService, SeedOutcome};
pub use self::code_allocator::{
    CODE_DIGITS, CategoryLocks, CodeAllocationError, next_program_code,
};
pub use self::deletion::DeleteMode;
pub use self::department::Department;
pub use self::department_service::DepartmentService;
pub use self::directorate::{
    Directorate, DirectorateNode, DirectorateTree, DirectorateTreeError,
};
pub use self::directorate_service::DirectorateService;
pub use self::error::{Error, ErrorCode};
pub use self::ids::{EntityId, PublicId};
pub use self::name::{ENTITY_NAME_MAX, EntityName, NameValidationError};
pub use self::program::{NewProgram, Program, ProgramCategory, ProgramCode};
pub use self::program_service::ProgramService;
pub use self::reference::RegistryRef;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    NewPassword, PASSWORD_MIN, PasswordHash, USERNAME_MAX, User, UserValidationError, Username,
};
pub use self::user_service::UserService;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use org_registry::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::unauthorized("missing bearer token"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
