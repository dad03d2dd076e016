use serial_test::serial;
use std::fs;
use tempfile::tempdir;

use files_manager::config::{CONFIG_ENV, load_config};
use files_manager::default_config_path;

#[test]
#[serial]
fn env_var_selects_config_file() {
    let td = tempdir().unwrap();
    let base = fs::canonicalize(td.path()).unwrap();
    let cfg = base.join("custom_config.xml");
    fs::write(
        &cfg,
        format!(
            "<config>\n  <root>{}</root>\n  <default_folder>uploads</default_folder>\n</config>",
            base.join("data").display()
        ),
    )
    .unwrap();

    // Serialized: the env var is process-wide
    unsafe {
        std::env::set_var(CONFIG_ENV, &cfg);
    }

    assert_eq!(default_config_path().unwrap(), cfg);
    let loaded = load_config(None).expect("load_config via env");
    assert_eq!(loaded.default_folder, "uploads");
    assert_eq!(loaded.catalog_path, base.join("data").join("catalog.json"));

    unsafe {
        std::env::remove_var(CONFIG_ENV);
    }
}

#[test]
#[serial]
fn explicit_path_wins_over_env() {
    let td = tempdir().unwrap();
    let env_cfg = td.path().join("env.xml");
    let explicit = td.path().join("explicit.xml");
    fs::write(&env_cfg, "<config><default_disk>env</default_disk></config>").unwrap();
    fs::write(&explicit, "<config><default_disk>explicit</default_disk></config>").unwrap();

    unsafe {
        std::env::set_var(CONFIG_ENV, &env_cfg);
    }
    let loaded = load_config(Some(&explicit)).unwrap();
    assert_eq!(loaded.default_disk, "explicit");
    unsafe {
        std::env::remove_var(CONFIG_ENV);
    }
}

#[test]
#[serial]
fn missing_env_file_falls_back_to_defaults() {
    let td = tempdir().unwrap();
    unsafe {
        std::env::set_var(CONFIG_ENV, td.path().join("absent.xml"));
    }
    let loaded = load_config(None).unwrap();
    assert_eq!(loaded.default_disk, "public");
    assert_eq!(loaded.default_folder, "files");
    unsafe {
        std::env::remove_var(CONFIG_ENV);
    }
}
