//! Application orchestrator.
//! Loads/merges config, initializes logging, installs the Ctrl-C handler, validates disks,
//! opens the manager, and dispatches the subcommand.

use anyhow::{Result, bail};
use files_manager::cli::{Args, Command};
use files_manager::config::{create_template_config, load_config, validate_and_normalize};
use files_manager::output as out;
use files_manager::{
    Config, FileManager, FilesError, JsonCatalog, Upload, default_config_path, shutdown,
};
use std::io::Write;
use std::sync::{Arc, Mutex};
use tracing::{debug, error};

use crate::logging::init_tracing;

/// Run the CLI application.
pub fn run(args: Args) -> Result<()> {
    // Handle config commands before logging init
    match args.command {
        Command::PrintConfig => return print_config(&args),
        Command::InitConfig => return init_config(&args),
        _ => {}
    }

    let mut cfg = load_config(args.config.as_deref())?;
    args.apply_overrides(&mut cfg);

    // Initialize logging and capture the guard so we can drop it on signal
    let guard_opt = init_tracing(&cfg.log_level, cfg.log_file.as_deref(), args.json).map_err(|e| {
        out::print_error(&format!("Failed to initialize logging: {}", e));
        e
    })?;

    // Guard needs to be dropped on SIGINT to flush logs
    let guard_slot = Arc::new(Mutex::new(guard_opt));
    {
        let guard_slot = Arc::clone(&guard_slot);
        let installed = ctrlc::set_handler(move || {
            shutdown::request();
            out::print_warn("Received interrupt; finishing the current file and stopping...");
            if let Ok(mut g) = guard_slot.lock() {
                let _ = g.take(); // drop guard here to flush tracing_appender
            }
        });
        if let Err(e) = installed {
            debug!(error = %e, "could not install Ctrl-C handler");
        }
    }

    debug!("Starting files_manager: {:?}", args);

    let result = (|| -> Result<()> {
        validate_and_normalize(&mut cfg)?;
        let mut manager = FileManager::open(cfg)?;
        dispatch(&mut manager, &args.command)
    })();

    if let Err(e) = &result {
        log_failure(e);
    }

    // Ensure logs are flushed before exit
    if let Ok(mut g) = guard_slot.lock() {
        let _ = g.take();
    }

    result
}

fn dispatch(manager: &mut FileManager<JsonCatalog>, command: &Command) -> Result<()> {
    match command {
        Command::Add {
            owner,
            path,
            options,
        } => {
            let upload = Upload::from_path(path)?;
            let record = manager.add_file(owner, &upload, &options.to_options())?;
            out::print_record(&record, &manager.link(&record)?);
        }
        Command::AddContent {
            owner,
            extension,
            content,
            options,
        } => {
            let record = manager.add_file_with_content(
                owner,
                content.as_bytes(),
                extension,
                &options.to_options(),
            )?;
            out::print_record(&record, &manager.link(&record)?);
        }
        Command::Avatar {
            owner,
            path,
            options,
        } => {
            let upload = Upload::from_path(path)?;
            let record = manager.set_avatar(owner, &upload, &options.to_options())?;
            out::print_record(&record, &manager.link(&record)?);
        }
        Command::List { owner, group } => {
            let files = match group {
                Some(g) => manager.files_in_group(owner, g)?,
                None => manager.files(owner)?,
            };
            for record in &files {
                out::print_record(record, &manager.link(record)?);
            }
        }
        Command::Cat { id } => {
            let record = manager.record(*id)?;
            let bytes = manager.content(&record)?;
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&bytes)?;
            stdout.flush()?;
        }
        Command::Copy {
            id,
            to_owner,
            options,
        } => {
            let source = manager.record(*id)?;
            let overrides = options.to_options();
            let record = match to_owner {
                Some(owner) => manager.copy_to_owner(&source, owner, &overrides)?,
                None => manager.copy(&source, &overrides)?,
            };
            out::print_record(&record, &manager.link(&record)?);
        }
        Command::CopyAll {
            owner,
            only_group,
            to_owner,
            options,
        } => {
            let sources = match only_group {
                Some(g) => manager.files_in_group(owner, g)?,
                None => manager.files(owner)?,
            };
            if sources.is_empty() {
                out::print_info(&format!("{owner} has no files to copy"));
                return Ok(());
            }
            let overrides = options.to_options();
            let copies = match to_owner {
                Some(target) => manager.copy_many_to_owner(&sources, target, &overrides)?,
                None => manager.copy_many(&sources, &overrides)?,
            };
            for record in &copies {
                out::print_record(record, &manager.link(record)?);
            }
        }
        Command::Delete { id } => {
            let record = manager.delete(*id)?;
            out::print_success(&format!("deleted {} ({})", record.id, record.path()));
        }
        Command::PrintConfig | Command::InitConfig => {
            bail!("config commands are handled before startup")
        }
    }
    Ok(())
}

fn print_config(args: &Args) -> Result<()> {
    match args.config.as_deref() {
        Some(p) => out::print_info(&format!("Using config (explicit):\n  {}\n", p.display())),
        None => match default_config_path() {
            Ok(p) => {
                out::print_info(&format!("Config path:\n  {}\n", p.display()));
                if !p.exists() {
                    out::print_info("No config file exists there yet; built-in defaults are used.");
                }
            }
            Err(e) => out::print_error(&format!("Could not determine a config path: {e}")),
        },
    }

    let mut cfg: Config = load_config(args.config.as_deref())?;
    args.apply_overrides(&mut cfg);
    out::print_info(&format!(
        "default disk: {}  default folder: {}  catalog: {}",
        cfg.default_disk,
        cfg.default_folder,
        cfg.catalog_path.display()
    ));
    for (name, disk) in &cfg.disks {
        out::print_info(&format!(
            "disk {name}: {} ({})",
            disk.root.display(),
            disk.visibility
        ));
    }
    Ok(())
}

fn init_config(args: &Args) -> Result<()> {
    let path = match args.config.clone() {
        Some(p) => p,
        None => default_config_path()?,
    };
    create_template_config(&path)?;
    out::print_success(&format!("wrote template config to {}", path.display()));
    Ok(())
}

fn log_failure(e: &anyhow::Error) {
    let Some(fe) = e.downcast_ref::<FilesError>() else {
        error!(error = %format!("{e:#}"), "Command failed");
        return;
    };
    let code = fe.code();
    match fe {
        FilesError::UnknownDisk(disk) => {
            error!(code, kind = "unknown_disk", disk = %disk, "Command failed")
        }
        FilesError::RecordNotFound(id) => {
            error!(code, kind = "record_not_found", id = *id, "Command failed")
        }
        FilesError::MissingContent { disk, path } => {
            error!(code, kind = "missing_content", disk = %disk, path = %path, "Command failed")
        }
        FilesError::BatchAborted { index, completed } => {
            error!(code, kind = "batch_aborted", index = *index, completed = *completed, error = %format!("{e:#}"), "Batch copy stopped")
        }
        FilesError::Interrupted => error!(code, kind = "interrupted", "Aborted by user"),
        _ => error!(code, kind = "files_error", error = %format!("{e:#}"), "Command failed"),
    }
}
