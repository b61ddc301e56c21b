//! Test utilities for the registry crate.
//!
//! Shared by unit tests (in `src/`) and integration tests (in `tests/`).
//! Compiled for tests and when the `test-support` feature is enabled.

pub mod cap_fs {
    //! Capability-safe filesystem helpers for tests.
    //!
    //! The crate avoids direct `std::fs` calls; these helpers read artifact
    //! directories through `cap_std::fs::Dir`.

    use std::io;
    use std::path::Path;

    use cap_std::{ambient_authority, fs::Dir};

    /// List the file names in `dir`, sorted.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use org_registry::test_support::cap_fs::file_names;
    ///
    /// let dir = tempfile::tempdir()?;
    /// assert!(file_names(dir.path())?.is_empty());
    /// # Ok::<(), std::io::Error>(())
    /// ```
    pub fn file_names(dir: &Path) -> io::Result<Vec<String>> {
        let directory = Dir::open_ambient_dir(dir, ambient_authority())?;
        let mut names = Vec::new();
        for entry in directory.entries()? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();
        Ok(names)
    }

    /// Read a stored artifact as bytes.
    pub fn read_file(dir: &Path, name: &str) -> io::Result<Vec<u8>> {
        let directory = Dir::open_ambient_dir(dir, ambient_authority())?;
        directory.read(name)
    }
}

pub mod multipart {
    //! Hand-built `multipart/form-data` bodies for upload tests.

    use actix_web::http::header::{CONTENT_TYPE, HeaderName};

    const BOUNDARY: &str = "registry-test-boundary";

    /// Builder for a multipart body.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use org_registry::test_support::multipart::MultipartBody;
    ///
    /// let body = MultipartBody::new()
    ///     .text("name", "Payroll")
    ///     .file("brief.pdf", b"%PDF")
    ///     .finish();
    /// assert!(String::from_utf8_lossy(&body).contains("name=\"name\""));
    /// ```
    #[derive(Debug, Default)]
    pub struct MultipartBody {
        body: Vec<u8>,
    }

    impl MultipartBody {
        pub fn new() -> Self {
            Self::default()
        }

        /// Append a text field.
        #[must_use]
        pub fn text(mut self, name: &str, value: &str) -> Self {
            self.body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
            self
        }

        /// Append the `file` field.
        #[must_use]
        pub fn file(mut self, file_name: &str, bytes: &[u8]) -> Self {
            self.body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; \
                     filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
                )
                .as_bytes(),
            );
            self.body.extend_from_slice(bytes);
            self.body.extend_from_slice(b"\r\n");
            self
        }

        /// Close the body.
        pub fn finish(mut self) -> Vec<u8> {
            self.body
                .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
            self.body
        }
    }

    /// `Content-Type` header matching [`MultipartBody`].
    pub fn content_type() -> (HeaderName, String) {
        (
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
    }
}

pub mod registry {
    //! A fully wired registry over the in-memory store.

    use std::io;
    use std::path::Path;
    use std::sync::Arc;

    use mockable::DefaultClock;
    use tempfile::TempDir;

    use crate::composition::{RegistryAdapters, in_memory_repositories};
    use crate::inbound::http::state::HttpState;
    use crate::outbound::artifacts::CapStdArtifactStore;
    use crate::outbound::memory::InMemoryStore;
    use crate::outbound::security::{Argon2PasswordHasher, JwtTokenIssuer};
    use crate::settings::AdminSettings;

    /// Secret signing tokens in test registries.
    pub const TEST_JWT_SECRET: &[u8] = b"registry-test-secret";

    /// In-memory registry with a seeded `admin`/`admin` account.
    ///
    /// Artifacts land in a temporary directory removed on drop.
    pub struct TestRegistry {
        pub state: HttpState,
        pub store: InMemoryStore,
        artifacts: TempDir,
    }

    impl TestRegistry {
        /// Build and seed a registry.
        ///
        /// # Errors
        /// Returns an I/O error when the artifact directory cannot be created
        /// or seeding fails.
        pub async fn start() -> io::Result<Self> {
            let artifacts = tempfile::tempdir()?;
            let store = InMemoryStore::new();
            let artifact_store = CapStdArtifactStore::open(artifacts.path(), Arc::new(DefaultClock))
                .map_err(|err| io::Error::other(err.to_string()))?;
            let adapters = RegistryAdapters::new(
                in_memory_repositories(&store),
                Arc::new(Argon2PasswordHasher::new()),
                Arc::new(artifact_store),
                Arc::new(JwtTokenIssuer::new(
                    TEST_JWT_SECRET,
                    3600,
                    Arc::new(DefaultClock),
                )),
            );
            adapters
                .seed_admin(&AdminSettings::default())
                .await
                .map_err(|err| io::Error::other(err.to_string()))?;
            Ok(Self {
                state: HttpState::new(adapters.ports()),
                store,
                artifacts,
            })
        }

        /// Directory receiving promoted artifacts.
        pub fn artifacts_dir(&self) -> &Path {
            self.artifacts.path()
        }
    }
}
