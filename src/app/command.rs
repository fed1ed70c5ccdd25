use super::cli::{help_text, parse_cli_args, CliCommand, CliOptions};
use crate::catalog::{ArtifactCatalog, CatalogApiClient, CatalogDispatcher, MemoryCatalog};
use crate::config::{ConfigError, Settings};
use crate::shared::errors::OutputError;
use crate::shared::fs_atomic::atomic_write_file;
use crate::shared::logging::WizardLog;
use crate::tui::navigation::{parse_scripted_wizard_keys, ScriptStep, SCRIPT_KEYS_ENV};
use crate::tui::session::{run_scripted, SessionExit, WizardSession};
use crate::tui::terminal::{is_interactive, run_wizard_tui};
use crate::wizard::{BaseFlow, Request, WizardController};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

pub fn run_cli(args: Vec<String>) -> Result<String, String> {
    match parse_cli_args(&args)? {
        CliCommand::Help => Ok(help_text()),
        CliCommand::Run(options) => run_wizard(options),
    }
}

fn map_config_err(err: ConfigError) -> String {
    err.to_string()
}

fn load_settings(options: &CliOptions) -> Result<Settings, String> {
    let mut settings = Settings::load(options.config.as_deref()).map_err(map_config_err)?;
    if let Some(api_base) = &options.api_base {
        settings.api_base = api_base.clone();
        settings.validate().map_err(map_config_err)?;
    }
    Ok(settings)
}

fn load_scripted_wizard_keys() -> Result<Option<Vec<ScriptStep>>, String> {
    let Ok(raw) = std::env::var(SCRIPT_KEYS_ENV) else {
        return Ok(None);
    };
    parse_scripted_wizard_keys(&raw).map(Some)
}

fn build_catalog(
    options: &CliOptions,
    settings: &Settings,
) -> Result<Arc<dyn ArtifactCatalog>, String> {
    match &options.catalog {
        Some(path) => {
            let catalog = MemoryCatalog::from_path(path).map_err(|e| e.to_string())?;
            Ok(Arc::new(catalog))
        }
        None => Ok(Arc::new(CatalogApiClient::new(
            &settings.api_base,
            settings.api_token.clone(),
            Duration::from_secs(settings.timeout_secs),
        ))),
    }
}

fn run_wizard(options: CliOptions) -> Result<String, String> {
    let settings = load_settings(&options)?;
    let artifact_type = options.artifact_type.unwrap_or(settings.artifact_type);
    let log = match settings.resolve_state_root() {
        Ok(root) => WizardLog::new(&root),
        Err(_) => WizardLog::disabled(),
    };
    let base_flow = options
        .base_flow
        .as_deref()
        .map(BaseFlow::from_path)
        .transpose()
        .map_err(|e| e.to_string())?;
    let scripted = load_scripted_wizard_keys()?;
    if scripted.is_none() && !is_interactive() {
        return Err(format!(
            "collection-wizard needs an interactive terminal; set {SCRIPT_KEYS_ENV} to drive it from a script"
        ));
    }

    let mut dispatcher = CatalogDispatcher::new(build_catalog(&options, &settings)?);
    let mut session = WizardSession::new(WizardController::new(base_flow), artifact_type, log);
    let exit = match scripted {
        Some(steps) => run_scripted(&mut session, &mut dispatcher, steps)?,
        None => run_wizard_tui(&mut session, &mut dispatcher)?,
    };

    match exit {
        SessionExit::Cancelled => Ok("collection canceled".to_string()),
        SessionExit::Launched(request) => {
            render_launch(&request, options.output.as_deref()).map_err(|e| e.to_string())
        }
    }
}

pub(crate) fn render_launch(request: &Request, output: Option<&Path>) -> Result<String, OutputError> {
    let json = request.to_pretty_json().map_err(OutputError::Encode)?;
    match output {
        Some(path) => {
            let write_err = |source| OutputError::Write {
                path: path.display().to_string(),
                source,
            };
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).map_err(write_err)?;
            }
            atomic_write_file(path, format!("{json}\n").as_bytes()).map_err(write_err)?;
            Ok(format!("launched\nrequest={}", path.display()))
        }
        None => Ok(format!("launched\n{json}")),
    }
}
