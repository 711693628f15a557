//! Application orchestrator.
//! Handles the config-file subcommands, dispatches on the directory count, loads and
//! merges config, initializes logging, and runs the selected workflow.

use anyhow::Result;
use std::process::ExitCode;
use tracing::{debug, error, info};

use copy_with_hash::cli::Args;
use copy_with_hash::config::{CONFIG_ENV_VAR, config_path_override, create_template_config};
use copy_with_hash::mode::{USAGE, USAGE_EXIT_CODE};
use copy_with_hash::output as out;
use copy_with_hash::{HashCopyError, Report, default_config_path, load_config};

use crate::logging::init_tracing;

/// Run the CLI application.
pub fn run(args: Args) -> Result<ExitCode> {
    // Config-file subcommands run before logging init.
    if args.print_config {
        print_config_location();
        return Ok(ExitCode::SUCCESS);
    }
    if args.init_config {
        let path = default_config_path()?;
        create_template_config(&path)?;
        out::print_success(&format!("Template config written to: {}", path.display()));
        return Ok(ExitCode::SUCCESS);
    }

    let Some(mode) = args.mode() else {
        out::print_user(USAGE);
        return Ok(ExitCode::from(USAGE_EXIT_CODE));
    };

    // Defaults < XML < CLI flags.
    let mut cfg = load_config()?;
    args.apply_overrides(&mut cfg);

    // Hold the guard for the whole run so file logs are flushed on return.
    let _guard = init_tracing(cfg.log_level, cfg.log_file.as_deref(), args.json).map_err(|e| {
        out::print_error(&format!("Failed to initialize logging: {}", e));
        e
    })?;

    debug!("Starting copy_with_hash: {:?}", args);

    match copy_with_hash::run(&cfg, &mode) {
        Ok(report) => {
            info!(%report, dry_run = cfg.dry_run, "Run completed");
            print_summary(&report, cfg.dry_run);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            if let Some(hc) = e.downcast_ref::<HashCopyError>() {
                error!(code = hc.code(), kind = hc.kind(), error = %hc, "Run aborted");
            } else {
                error!(error = %format!("{e:#}"), "Run aborted");
            }
            Err(e)
        }
    }
}

fn print_summary(report: &Report, dry_run: bool) {
    let what = match report {
        Report::Rename(_) => "rename",
        Report::Copy(_) => "copy",
    };
    if dry_run {
        out::print_info(&format!("dry-run {what}: {report}"));
    } else {
        out::print_success(&format!("{what}: {report}"));
    }
}

fn print_config_location() {
    if let Some(p) = config_path_override() {
        out::print_info(&format!("Using {CONFIG_ENV_VAR} (explicit):\n  {}", p.display()));
        return;
    }
    match default_config_path() {
        Ok(p) => {
            out::print_info(&format!("Default config path:\n  {}", p.display()));
            if p.exists() {
                out::print_info("A config file exists at that location.");
            } else {
                out::print_info("No config file there yet; built-in defaults apply. Run with --init-config to create one.");
            }
        }
        Err(e) => out::print_error(&format!("Could not determine a default config path: {e}")),
    }
}
