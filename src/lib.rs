//! # migrate-scaffold
//!
//! Creates timestamp-prefixed migration files for a database migration
//! runner, optionally with companion `-up.sql` / `-down.sql` files.
//!
//! ## Quick Example
//!
//! ```rust,no_run
//! use migrate_scaffold::prelude::*;
//!
//! let request = MigrationRequest::new("create-users").sql(true);
//! let artifacts = migrate_scaffold::create(&request)?;
//! // => migrations/20251231093400-create-users.js
//! //    migrations/sqls/20251231093400-create-users-up.sql
//! //    migrations/sqls/20251231093400-create-users-down.sql
//! assert_eq!(artifacts.len(), 3);
//! # Ok::<(), ScaffoldError>(())
//! ```
//!
//! ## Layout
//!
//! | Option           | Effect                                       |
//! |------------------|----------------------------------------------|
//! | `migrations-dir` | Base directory (default `./migrations`)      |
//! | `mode`           | Sub-directory for a named group (`all` = none) |
//! | `sql-file`       | Loader template plus up/down SQL files       |
//! | `coffee-file`    | CoffeeScript template, `.coffee` extension   |
//! | `ignore-on-init` | Loader skips `up` when run with ignore-on-init |

pub mod config;
pub mod create;
pub mod dir;
pub mod error;
pub mod path;
pub mod template;
pub mod writer;

pub mod prelude {
    pub use crate::config::{CliOverrides, FileConfig, Settings};
    pub use crate::create::{Artifact, MigrationRequest, Scaffolder};
    pub use crate::error::*;
    pub use crate::template::{Flags, Template, TemplateVariant};
    pub use crate::writer::{ArtifactWriter, FsWriter};
}

pub use create::create;
