use clap::Parser;
use files_manager::cli::{Args, Command};
use files_manager::config::types::{Config, LogLevel};
use files_manager::{Owner, StoreOptions};
use std::path::PathBuf;

#[test]
fn add_flags_map_to_store_options() {
    let args = Args::parse_from([
        "files_manager",
        "add",
        "user:1",
        "/tmp/avatar.jpg",
        "--folder",
        "gallery",
        "--name",
        "My Pic",
        "--group",
        "holiday",
    ]);
    match args.command {
        Command::Add {
            owner,
            path,
            options,
        } => {
            assert_eq!(owner, Owner::new("user", "1"));
            assert_eq!(path, PathBuf::from("/tmp/avatar.jpg"));
            assert_eq!(
                options.to_options(),
                StoreOptions::new()
                    .with_folder("gallery")
                    .with_name("My Pic")
                    .with_group("holiday")
            );
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn copy_all_parses_targets() {
    let args = Args::parse_from([
        "files_manager",
        "copy-all",
        "user:1",
        "--only-group",
        "gallery",
        "--to-owner",
        "post:9",
        "--disk",
        "private",
    ]);
    match args.command {
        Command::CopyAll {
            owner,
            only_group,
            to_owner,
            options,
        } => {
            assert_eq!(owner.to_string(), "user:1");
            assert_eq!(only_group.as_deref(), Some("gallery"));
            assert_eq!(to_owner, Some(Owner::new("post", "9")));
            assert_eq!(options.disk.as_deref(), Some("private"));
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn malformed_owner_is_rejected() {
    assert!(Args::try_parse_from(["files_manager", "list", "user"]).is_err());
    assert!(Args::try_parse_from(["files_manager", "cat", "abc"]).is_err());
}

#[test]
fn effective_log_level_precedence() {
    let args = Args::parse_from(["files_manager", "--debug", "--log-level", "quiet", "print-config"]);
    assert_eq!(args.effective_log_level(), Some(LogLevel::Debug));

    let args = Args::parse_from(["files_manager", "list", "user:1", "--log-level", "info"]);
    assert_eq!(args.effective_log_level(), Some(LogLevel::Info));

    let args = Args::parse_from(["files_manager", "list", "user:1"]);
    assert_eq!(args.effective_log_level(), None);
}

#[test]
fn apply_overrides_sets_flags() {
    let args = Args::parse_from([
        "files_manager",
        "--catalog",
        "/tmp/records.json",
        "--log-level",
        "quiet",
        "delete",
        "3",
    ]);
    let mut cfg = Config::with_root("/srv/files");
    args.apply_overrides(&mut cfg);
    assert_eq!(cfg.catalog_path, PathBuf::from("/tmp/records.json"));
    assert_eq!(cfg.log_level, LogLevel::Quiet);
}
