use crate::catalog::ArtifactType;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOptions {
    pub base_flow: Option<PathBuf>,
    pub artifact_type: Option<ArtifactType>,
    pub catalog: Option<PathBuf>,
    pub api_base: Option<String>,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    Run(CliOptions),
    Help,
}

pub fn parse_cli_args(args: &[String]) -> Result<CliCommand, String> {
    let mut options = CliOptions::default();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if matches!(arg.as_str(), "help" | "--help" | "-h") {
            return Ok(CliCommand::Help);
        }
        let (flag, inline) = match arg.split_once('=') {
            Some((flag, value)) if flag.starts_with("--") => (flag, Some(value.to_string())),
            _ => (arg.as_str(), None),
        };
        let mut value = || -> Result<String, String> {
            match inline.clone() {
                Some(value) => Ok(value),
                None => iter
                    .next()
                    .cloned()
                    .ok_or_else(|| format!("missing value for `{flag}`")),
            }
        };
        match flag {
            "--base-flow" => options.base_flow = Some(PathBuf::from(value()?)),
            "--type" => options.artifact_type = Some(ArtifactType::parse(&value()?)?),
            "--catalog" => options.catalog = Some(PathBuf::from(value()?)),
            "--api-base" => options.api_base = Some(value()?),
            "--output" => options.output = Some(PathBuf::from(value()?)),
            "--config" => options.config = Some(PathBuf::from(value()?)),
            other => {
                return Err(format!(
                    "unknown argument `{other}`\n\n{}",
                    help_text()
                ))
            }
        }
    }
    Ok(CliCommand::Run(options))
}

pub fn cli_help_lines() -> Vec<String> {
    vec![
        "Usage: collection-wizard [options]".to_string(),
        String::new(),
        "Options:".to_string(),
        "  --base-flow <file>     Edit the request of an existing flow (JSON)".to_string(),
        "  --type <type>          Artifact type: CLIENT, SERVER, CLIENT_EVENT, SERVER_EVENT"
            .to_string(),
        "  --catalog <file>       Serve artifacts from a local JSON catalog".to_string(),
        "  --api-base <url>       Console API base url".to_string(),
        "  --output <file>        Write the launched request to a file".to_string(),
        "  --config <file>        Settings file (default ~/.collection-wizard/config.yaml)"
            .to_string(),
        "  help                   Show this help".to_string(),
    ]
}

pub fn help_text() -> String {
    cli_help_lines().join("\n")
}
