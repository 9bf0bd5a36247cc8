//! Template variants for migration files.
//!
//! Selection is a priority table over three flags, first match wins:
//!
//! | sql | coffee | ignore-on-init | variant                       |
//! |-----|--------|----------------|-------------------------------|
//! | ✓   | ✓      | any            | `CoffeeSqlFileLoader`         |
//! | ✓   |        | ✓              | `SqlFileLoaderIgnoreOnInit`   |
//! | ✓   |        |                | `SqlFileLoader`               |
//! |     | ✓      | any            | `DefaultCoffee`               |
//! |     |        | any            | `DefaultJs`                   |
//!
//! `ignore-on-init` only matters for plain JS loaders; the coffee loader has
//! no ignore-on-init form.

use std::fmt;

use chrono::{DateTime, Utc};

/// Timestamp prefix of every generated file name.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

pub const JS_EXT: &str = ".js";
pub const COFFEE_EXT: &str = ".coffee";
pub const UP_SQL_SUFFIX: &str = "-up.sql";
pub const DOWN_SQL_SUFFIX: &str = "-down.sql";

/// Flags that drive template selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flags {
    pub sql: bool,
    pub coffee: bool,
    pub ignore_on_init: bool,
}

/// Content strategy for the primary migration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateVariant {
    DefaultJs,
    DefaultCoffee,
    SqlFileLoader,
    SqlFileLoaderIgnoreOnInit,
    CoffeeSqlFileLoader,
}

impl fmt::Display for TemplateVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::DefaultJs => "default-js",
            Self::DefaultCoffee => "default-coffee",
            Self::SqlFileLoader => "sql-file-loader",
            Self::SqlFileLoaderIgnoreOnInit => "sql-file-loader-ignore-on-init",
            Self::CoffeeSqlFileLoader => "coffee-sql-file-loader",
        };
        write!(f, "{}", name)
    }
}

/// Pick the template variant for a flag set.
pub fn select(flags: Flags) -> TemplateVariant {
    if flags.sql && flags.coffee {
        TemplateVariant::CoffeeSqlFileLoader
    } else if flags.sql && flags.ignore_on_init {
        TemplateVariant::SqlFileLoaderIgnoreOnInit
    } else if flags.sql {
        TemplateVariant::SqlFileLoader
    } else if flags.coffee {
        TemplateVariant::DefaultCoffee
    } else {
        TemplateVariant::DefaultJs
    }
}

/// Script extension of the primary migration file.
pub fn extension(coffee: bool) -> &'static str {
    if coffee { COFFEE_EXT } else { JS_EXT }
}

/// What an artifact is rendered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    /// The primary migration script.
    Migration(TemplateVariant),
    /// A companion up/down SQL file.
    Sql,
}

/// Inputs shared by every template body.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub title: &'a str,
    pub created_at: DateTime<Utc>,
    /// Folders between the migration file and the companion `sqls/` root.
    pub depth: usize,
}

impl Template {
    pub fn render(&self, ctx: &RenderContext<'_>) -> String {
        match self {
            Template::Sql => DEFAULT_SQL.to_string(),
            Template::Migration(TemplateVariant::DefaultJs) => DEFAULT_JS.to_string(),
            Template::Migration(TemplateVariant::DefaultCoffee) => DEFAULT_COFFEE.to_string(),
            Template::Migration(TemplateVariant::SqlFileLoader) => {
                fill_sql_paths(SQL_FILE_LOADER_JS, ctx, js_sql_path)
            }
            Template::Migration(TemplateVariant::SqlFileLoaderIgnoreOnInit) => {
                fill_sql_paths(SQL_FILE_LOADER_IGNORE_ON_INIT_JS, ctx, js_sql_path)
            }
            Template::Migration(TemplateVariant::CoffeeSqlFileLoader) => {
                fill_sql_paths(SQL_FILE_LOADER_COFFEE, ctx, coffee_sql_path)
            }
        }
    }
}

/// `20240102030405` for the given instant.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Spaces and underscores become dashes.
pub fn format_title(title: &str) -> String {
    title.replace([' ', '_'], "-")
}

/// `<timestamp>-<title>`, where `title` already carries its suffix.
pub fn file_name(title: &str, at: DateTime<Utc>) -> String {
    format!("{}-{}", format_timestamp(at), format_title(title))
}

fn fill_sql_paths(
    template: &str,
    ctx: &RenderContext<'_>,
    path_expr: fn(usize, &str) -> String,
) -> String {
    let up = file_name(&format!("{}{}", ctx.title, UP_SQL_SUFFIX), ctx.created_at);
    let down = file_name(&format!("{}{}", ctx.title, DOWN_SQL_SUFFIX), ctx.created_at);
    template
        .replace("{up_sql}", &path_expr(ctx.depth, &up))
        .replace("{down_sql}", &path_expr(ctx.depth, &down))
}

fn sql_path_args(depth: usize, file: &str) -> String {
    let mut parts = vec!["__dirname".to_string()];
    parts.extend(std::iter::repeat_n("'..'".to_string(), depth));
    parts.push("'sqls'".to_string());
    parts.push(format!("'{}'", file));
    parts.join(", ")
}

fn js_sql_path(depth: usize, file: &str) -> String {
    format!("path.join({})", sql_path_args(depth, file))
}

fn coffee_sql_path(depth: usize, file: &str) -> String {
    format!("path.join {}", sql_path_args(depth, file))
}

const DEFAULT_SQL: &str = "/* Replace with your SQL commands */";

const DEFAULT_JS: &str = r#"'use strict';

var dbm;
var type;
var seed;

/**
  * We receive the dbmigrate dependency from dbmigrate initially.
  * This enables us to not have to rely on NODE_PATH.
  */
exports.setup = function(options, seedLink) {
  dbm = options.dbmigrate;
  type = dbm.dataType;
  seed = seedLink;
};

exports.up = function(db) {
  return null;
};

exports.down = function(db) {
  return null;
};

exports._meta = {
  "version": 1
};
"#;

const DEFAULT_COFFEE: &str = r#"dbm = undefined
type = undefined
seed = undefined

###
  We receive the dbmigrate dependency from dbmigrate initially.
  This enables us to not have to rely on NODE_PATH.
###
exports.setup = (options, seedLink) ->
  dbm = options.dbmigrate
  type = dbm.dataType
  seed = seedLink

exports.up = (db) ->
  null

exports.down = (db) ->
  null

exports._meta =
  version: 1
"#;

const SQL_FILE_LOADER_JS: &str = r#"'use strict';

var dbm;
var type;
var seed;
var fs = require('fs');
var path = require('path');
var Promise;

/**
  * We receive the dbmigrate dependency from dbmigrate initially.
  * This enables us to not have to rely on NODE_PATH.
  */
exports.setup = function(options, seedLink) {
  dbm = options.dbmigrate;
  type = dbm.dataType;
  seed = seedLink;
  Promise = options.Promise;
};

exports.up = function(db) {
  var filePath = {up_sql};
  return new Promise( function( resolve, reject ) {
    fs.readFile(filePath, {encoding: 'utf-8'}, function(err,data){
      if (err) return reject(err);
      console.log('received data: ' + data);

      resolve(data);
    });
  })
  .then(function(data) {
    return db.runSql(data);
  });
};

exports.down = function(db) {
  var filePath = {down_sql};
  return new Promise( function( resolve, reject ) {
    fs.readFile(filePath, {encoding: 'utf-8'}, function(err,data){
      if (err) return reject(err);
      console.log('received data: ' + data);

      resolve(data);
    });
  })
  .then(function(data) {
    return db.runSql(data);
  });
};

exports._meta = {
  "version": 1
};
"#;

const SQL_FILE_LOADER_IGNORE_ON_INIT_JS: &str = r#"'use strict';

var dbm;
var type;
var seed;
var fs = require('fs');
var path = require('path');
var ignoreOnInit = false;
var Promise;

/**
  * We receive the dbmigrate dependency from dbmigrate initially.
  * This enables us to not have to rely on NODE_PATH.
  */
exports.setup = function(options, seedLink) {
  dbm = options.dbmigrate;
  ignoreOnInit = options.ignoreOnInit;
  type = dbm.dataType;
  seed = seedLink;
  Promise = options.Promise;
};

exports.up = function(db, callback) {
  var filePath = {up_sql};
  if (!ignoreOnInit) {
    return new Promise( function( resolve, reject ) {
      fs.readFile(filePath, {encoding: 'utf-8'}, function(err,data){
        if (err) return reject(err);
        console.log('received data: ' + data);

        resolve(data);
      });
    })
    .then(function(data) {
      return db.runSql(data);
    });
  }
  else {
    console.log('ignoring on init: ' + filePath)
    return null;
  }
};

exports.down = function(db) {
  var filePath = {down_sql};
  return new Promise( function( resolve, reject ) {
    fs.readFile(filePath, {encoding: 'utf-8'}, function(err,data){
      if (err) return reject(err);
      console.log('received data: ' + data);

      resolve(data);
    });
  })
  .then(function(data) {
    return db.runSql(data);
  });
};

exports._meta = {
  "version": 1
};
"#;

const SQL_FILE_LOADER_COFFEE: &str = r#"dbm = undefined
type = undefined
seed = undefined
fs = require 'fs'
path = require 'path'

###
  We receive the dbmigrate dependency from dbmigrate initially.
  This enables us to not have to rely on NODE_PATH.
###
exports.setup = (options, seedLink) ->
  dbm = options.dbmigrate
  type = dbm.dataType
  seed = seedLink

exports.up = (db, callback) ->
  filePath = {up_sql}
  fs.readFile filePath, {encoding: 'utf-8'}, (err, data) ->
    return callback(err) if err
    db.runSql data, callback

exports.down = (db, callback) ->
  filePath = {down_sql}
  fs.readFile filePath, {encoding: 'utf-8'}, (err, data) ->
    return callback(err) if err
    db.runSql data, callback

exports._meta =
  version: 1
"#;
