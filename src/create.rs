//! Migration creation
//!
//! ## Generated Files
//! ```text
//! migrations/
//! ├── 20251231093400-add-users.js
//! └── sqls/
//!     ├── 20251231093400-add-users-up.sql
//!     └── 20251231093400-add-users-down.sql
//! ```
//!
//! Every step gates the next one. The first failure is returned as is and
//! nothing written before it is removed.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::dir::ensure_dir;
use crate::error::{ScaffoldError, ScaffoldResult};
use crate::path::{self, ALL_MODE};
use crate::template::{self, DOWN_SQL_SUFFIX, Flags, RenderContext, Template, UP_SQL_SUFFIX};
use crate::writer::{ArtifactWriter, FsWriter};

/// Default base directory for migrations.
pub const DEFAULT_MIGRATIONS_DIR: &str = "./migrations";

/// One request to scaffold a migration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationRequest {
    /// Possibly nested name, e.g. `create-users` or `auth/users/`.
    pub raw_name: String,
    /// Named group under `base_dir`; `all` means none.
    pub mode: String,
    pub base_dir: PathBuf,
    pub want_sql: bool,
    pub want_coffee: bool,
    pub ignore_on_init: bool,
}

impl MigrationRequest {
    pub fn new(raw_name: impl Into<String>) -> Self {
        Self {
            raw_name: raw_name.into(),
            mode: ALL_MODE.to_string(),
            base_dir: PathBuf::from(DEFAULT_MIGRATIONS_DIR),
            want_sql: false,
            want_coffee: false,
            ignore_on_init: false,
        }
    }

    pub fn base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = dir.into();
        self
    }

    pub fn mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = mode.into();
        self
    }

    pub fn sql(mut self, yes: bool) -> Self {
        self.want_sql = yes;
        self
    }

    pub fn coffee(mut self, yes: bool) -> Self {
        self.want_coffee = yes;
        self
    }

    pub fn ignore_on_init(mut self, yes: bool) -> Self {
        self.ignore_on_init = yes;
        self
    }

    pub fn flags(&self) -> Flags {
        Flags {
            sql: self.want_sql,
            coffee: self.want_coffee,
            ignore_on_init: self.ignore_on_init,
        }
    }
}

/// A file created by the scaffolder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub filename: String,
    pub directory: PathBuf,
    pub created_at: DateTime<Utc>,
    pub template: Template,
}

impl Artifact {
    pub fn path(&self) -> PathBuf {
        self.directory.join(&self.filename)
    }
}

/// Drives migration creation through an [`ArtifactWriter`].
#[derive(Debug)]
pub struct Scaffolder<W> {
    writer: W,
    timestamp: Option<DateTime<Utc>>,
}

impl Scaffolder<FsWriter> {
    /// Scaffolder writing to the local filesystem at the current time.
    pub fn fs() -> Self {
        Self::new(FsWriter)
    }
}

impl<W: ArtifactWriter> Scaffolder<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            timestamp: None,
        }
    }

    /// Pin the creation timestamp instead of reading the clock.
    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// Create the migration and, if requested, its up/down SQL files.
    ///
    /// Returns the artifacts in creation order: `[primary]` or
    /// `[primary, up, down]`.
    pub fn create(&mut self, request: &MigrationRequest) -> ScaffoldResult<Vec<Artifact>> {
        self.create_with(request, |_| {})
    }

    /// Like [`create`](Self::create), calling `report` after every file written.
    pub fn create_with<F>(
        &mut self,
        request: &MigrationRequest,
        mut report: F,
    ) -> ScaffoldResult<Vec<Artifact>>
    where
        F: FnMut(&Artifact),
    {
        if request.raw_name.is_empty() {
            return Err(ScaffoldError::EmptyName);
        }

        let created_at = self.timestamp.unwrap_or_else(Utc::now);
        let target = path::resolve(&request.raw_name, &request.base_dir, &request.mode)?;

        ensure_dir(&target.directory)?;

        let variant = template::select(request.flags());
        tracing::debug!("Selected template {} for '{}'", variant, target.title);

        let ctx = RenderContext {
            title: &target.title,
            created_at,
            depth: target.depth,
        };

        let mut artifacts = Vec::with_capacity(if request.want_sql { 3 } else { 1 });

        let primary = self.write_artifact(
            &target.directory,
            &format!("{}{}", target.title, template::extension(request.want_coffee)),
            Template::Migration(variant),
            &ctx,
        )?;
        tracing::info!("Created migration at {}", primary.path().display());
        report(&primary);
        artifacts.push(primary);

        if !request.want_sql {
            return Ok(artifacts);
        }

        let sql_dir = path::sql_dir(&target.mode_dir);
        ensure_dir(&sql_dir)?;

        let up = self.write_artifact(
            &sql_dir,
            &format!("{}{}", target.title, UP_SQL_SUFFIX),
            Template::Sql,
            &ctx,
        )?;
        tracing::info!("Created migration up sql file at {}", up.path().display());
        report(&up);
        artifacts.push(up);

        let down = self.write_artifact(
            &sql_dir,
            &format!("{}{}", target.title, DOWN_SQL_SUFFIX),
            Template::Sql,
            &ctx,
        )?;
        tracing::info!("Created migration down sql file at {}", down.path().display());
        report(&down);
        artifacts.push(down);

        Ok(artifacts)
    }

    fn write_artifact(
        &mut self,
        directory: &Path,
        title: &str,
        template: Template,
        ctx: &RenderContext<'_>,
    ) -> ScaffoldResult<Artifact> {
        let artifact = Artifact {
            filename: template::file_name(title, ctx.created_at),
            directory: directory.to_path_buf(),
            created_at: ctx.created_at,
            template,
        };

        let path = artifact.path();
        self.writer
            .write(&path, &template.render(ctx))
            .map_err(|e| ScaffoldError::write(path, e))?;

        Ok(artifact)
    }
}

/// Scaffold a migration on the local filesystem.
pub fn create(request: &MigrationRequest) -> ScaffoldResult<Vec<Artifact>> {
    Scaffolder::fs().create(request)
}
