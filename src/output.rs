use owo_colors::OwoColorize;

use crate::record::FileRecord;

/// Small wrapper around stdout/stderr printing to provide consistent, colored
/// user-facing messages. Colors are enabled only when output is a TTY.
fn is_tty() -> bool {
    atty::is(atty::Stream::Stdout)
}

pub fn print_info(msg: &str) {
    if is_tty() {
        println!("{} {}", "info:".cyan().bold(), msg);
    } else {
        println!("info: {}", msg);
    }
}

pub fn print_warn(msg: &str) {
    if is_tty() {
        eprintln!("{} {}", "warn:".yellow().bold(), msg);
    } else {
        eprintln!("warn: {}", msg);
    }
}

pub fn print_error(msg: &str) {
    if is_tty() {
        eprintln!("{} {}", "error:".red().bold(), msg);
    } else {
        eprintln!("error: {}", msg);
    }
}

pub fn print_success(msg: &str) {
    if is_tty() {
        println!("{} {}", "ok:".green().bold(), msg);
    } else {
        println!("ok: {}", msg);
    }
}

/// One tab-separated line per record: id, disk, path, group, type, size, link.
/// Scripts parse this, so it carries no color or prefix.
pub fn record_line(record: &FileRecord, link: &str) -> String {
    format!(
        "{}\t{}\t{}\t{}\t{}\t{}\t{}",
        record.id,
        record.disk,
        record.path(),
        if record.group.is_empty() { "-" } else { &record.group },
        record.file_type,
        record.size,
        link
    )
}

pub fn print_record(record: &FileRecord, link: &str) {
    println!("{}", record_line(record, link));
}
