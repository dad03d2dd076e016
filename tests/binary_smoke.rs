use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::tempdir;

fn write_config(dir: &Path) -> PathBuf {
    let cfg = dir.join("config.xml");
    let xml = format!(
        "<config>\n  <root>{}</root>\n  <log_level>quiet</log_level>\n</config>\n",
        dir.join("data").display()
    );
    fs::write(&cfg, xml).unwrap();
    cfg
}

fn run(cfg: &Path, args: &[&str]) -> Output {
    let me = assert_cmd::cargo::cargo_bin!("files_manager");
    Command::new(me)
        .arg("--config")
        .arg(cfg)
        .args(args)
        .output()
        .expect("spawn binary")
}

#[test]
fn binary_print_config_succeeds() {
    let td = tempdir().unwrap();
    let cfg = write_config(td.path());
    let out = run(&cfg, &["print-config"]);
    assert!(out.status.success(), "binary should succeed with print-config");
}

#[test]
fn init_config_writes_template() {
    let td = tempdir().unwrap();
    let cfg = td.path().join("fresh.xml");
    let out = run(&cfg, &["init-config"]);
    assert!(out.status.success());
    assert!(fs::read_to_string(&cfg).unwrap().contains("<default_disk>public</default_disk>"));
}

#[test]
fn add_copy_and_cat_end_to_end() {
    let td = tempdir().unwrap();
    let cfg = write_config(td.path());
    let upload = td.path().join("avatar.jpg");
    fs::write(&upload, b"jpeg-bytes").unwrap();
    let upload = upload.to_str().unwrap();

    let out = run(&cfg, &["add", "user:1", upload, "--name", "My Pic"]);
    assert!(
        out.status.success(),
        "add failed: {}",
        String::from_utf8_lossy(&out.stderr)
    );
    let line = String::from_utf8(out.stdout).unwrap();
    assert!(
        line.starts_with("1\tpublic\tfiles/my_pic.jpg\t-\timg\t10\t/storage/files/my_pic.jpg"),
        "unexpected record line: {line}"
    );

    let out = run(&cfg, &["copy-all", "user:1"]);
    assert!(out.status.success());
    assert!(String::from_utf8(out.stdout).unwrap().contains("files/my_pic_(1).jpg"));

    let out = run(&cfg, &["cat", "2"]);
    assert!(out.status.success());
    assert_eq!(out.stdout, b"jpeg-bytes");

    let out = run(&cfg, &["list", "user:1"]);
    assert_eq!(String::from_utf8(out.stdout).unwrap().lines().count(), 2);
}

#[test]
fn missing_record_fails() {
    let td = tempdir().unwrap();
    let cfg = write_config(td.path());
    let out = run(&cfg, &["cat", "42"]);
    assert!(!out.status.success());
}
