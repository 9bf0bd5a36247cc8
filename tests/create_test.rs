use std::fs;

use chrono::{TimeZone, Utc};
use migrate_scaffold::prelude::*;
use pretty_assertions::assert_eq;

fn scaffolder() -> Scaffolder<FsWriter> {
    Scaffolder::fs().at(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap())
}

#[test]
fn test_create_users_with_sql_files() {
    let tmp = tempfile::tempdir().unwrap();
    let base = tmp.path().join("migrations");
    let request = MigrationRequest::new("create-users").base_dir(&base).sql(true);

    let artifacts = scaffolder().create(&request).expect("create failed");

    let paths: Vec<_> = artifacts.iter().map(|a| a.path()).collect();
    assert_eq!(
        paths,
        vec![
            base.join("20240301120000-create-users.js"),
            base.join("sqls/20240301120000-create-users-up.sql"),
            base.join("sqls/20240301120000-create-users-down.sql"),
        ]
    );
    assert!(paths.iter().all(|p| p.is_file()));

    assert_eq!(
        artifacts[0].template,
        Template::Migration(TemplateVariant::SqlFileLoader)
    );
    assert_eq!(artifacts[1].template, Template::Sql);

    let migration = fs::read_to_string(&paths[0]).unwrap();
    assert!(migration.contains("'20240301120000-create-users-up.sql'"));
    assert_eq!(
        fs::read_to_string(&paths[2]).unwrap(),
        "/* Replace with your SQL commands */"
    );
}

#[test]
fn test_nested_name_keeps_sql_files_at_mode_root() {
    let tmp = tempfile::tempdir().unwrap();
    let base = tmp.path().join("migrations");
    let request = MigrationRequest::new("auth/users/")
        .base_dir(&base)
        .mode("dev")
        .sql(true)
        .ignore_on_init(true);

    let artifacts = scaffolder().create(&request).unwrap();

    assert_eq!(artifacts[0].directory, base.join("dev/auth/users"));
    assert_eq!(artifacts[0].filename, "20240301120000-users.js");
    assert_eq!(
        artifacts[0].template,
        Template::Migration(TemplateVariant::SqlFileLoaderIgnoreOnInit)
    );
    assert_eq!(artifacts[1].directory, base.join("dev/sqls"));

    let migration = fs::read_to_string(artifacts[0].path()).unwrap();
    assert!(migration.contains("path.join(__dirname, '..', '..', 'sqls', '20240301120000-users-up.sql')"));
}

#[test]
fn test_sql_dir_failure_keeps_primary() {
    let tmp = tempfile::tempdir().unwrap();
    let base = tmp.path().join("migrations");
    fs::create_dir_all(&base).unwrap();
    // A plain file where the sql directory should go.
    fs::write(base.join("sqls"), "").unwrap();

    let request = MigrationRequest::new("create-users").base_dir(&base).sql(true);
    let err = scaffolder().create(&request).unwrap_err();

    match err {
        ScaffoldError::DirCreateFailed { path, .. } => assert_eq!(path, base.join("sqls")),
        other => panic!("expected DirCreateFailed, got {:?}", other),
    }
    assert!(base.join("20240301120000-create-users.js").is_file());
}

#[test]
fn test_same_second_collision_is_a_write_error() {
    let tmp = tempfile::tempdir().unwrap();
    let request = MigrationRequest::new("init").base_dir(tmp.path());

    scaffolder().create(&request).unwrap();
    let err = scaffolder().create(&request).unwrap_err();

    assert_eq!(err.kind(), "WriteFailed");
}

#[test]
fn test_existing_directory_is_reused() {
    let tmp = tempfile::tempdir().unwrap();
    let base = tmp.path().join("migrations");

    scaffolder()
        .create(&MigrationRequest::new("first").base_dir(&base))
        .unwrap();
    scaffolder()
        .create(&MigrationRequest::new("second").base_dir(&base).coffee(true))
        .unwrap();

    let mut names: Vec<_> = fs::read_dir(&base)
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    names.sort();
    assert_eq!(
        names,
        vec!["20240301120000-first.js", "20240301120000-second.coffee"]
    );
}

#[test]
fn test_settings_drive_the_request() {
    let tmp = tempfile::tempdir().unwrap();
    let file = FileConfig {
        migrations_dir: Some(tmp.path().to_path_buf()),
        coffee_file: true,
        ..Default::default()
    };
    let cli = CliOverrides {
        sql_file: true,
        ignore_on_init: true,
        ..Default::default()
    };
    let settings = Settings::resolve(&cli, &file);

    let artifacts = scaffolder().create(&settings.request("seed")).unwrap();

    // Coffee wins over ignore-on-init for loader migrations.
    assert_eq!(
        artifacts[0].template,
        Template::Migration(TemplateVariant::CoffeeSqlFileLoader)
    );
    assert_eq!(artifacts[0].filename, "20240301120000-seed.coffee");
    assert_eq!(artifacts.len(), 3);
}
