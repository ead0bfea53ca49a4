//! Command-line interface for the mcg binary.
//!
//! The CLI converts dashboard and rules directories selected by globs into
//! Kubernetes manifests inside an existing output directory, then writes the
//! manifest index and the kustomization file.

use std::{path::PathBuf, process};

use clap::Parser;
use mcg::{
    Converters, DEFAULT_NAMESPACE, Error, RunConfig, SourceGlobs, parse_existing_dir,
    parse_key_value,
};
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Command line interface for generating monitoring manifests.
#[derive(Debug, Parser,)]
#[command(
    name = "mcg",
    version,
    about = "Convert Grafana dashboards and Prometheus rules into Kubernetes manifests"
)]
struct Cli
{
    /// Glob of directories with Grafana dashboard JSON files to convert.
    #[arg(long = "dir.dashboards", value_name = "GLOB", env = "MCG_DIR_DASHBOARDS")]
    dashboards: Option<String,>,

    /// Glob of directories with Prometheus rules YAML files to convert.
    #[arg(long = "dir.rules", value_name = "GLOB", env = "MCG_DIR_RULES")]
    rules: Option<String,>,

    /// Output directory for the generated manifests. Its contents are
    /// replaced on every run.
    #[arg(
        long = "dir.output",
        short = 'm',
        value_name = "DIR",
        env = "MCG_DIR_OUTPUT",
        value_parser = parse_existing_dir
    )]
    output: PathBuf,

    /// Annotation to add to every manifest (key=value).
    #[arg(long = "k8s.annotations", short = 'a', value_name = "KEY=VALUE", value_parser = parse_key_value)]
    annotations: Vec<(String, String,),>,

    /// Namespace for generated manifests.
    #[arg(
        long = "k8s.namespace",
        short = 'n',
        value_name = "NAMESPACE",
        env = "MCG_K8S_NAMESPACE",
        default_value = DEFAULT_NAMESPACE
    )]
    namespace: String,

    /// Label to add to every manifest (key=value).
    #[arg(long = "k8s.labels", short = 'l', value_name = "KEY=VALUE", value_parser = parse_key_value)]
    labels: Vec<(String, String,),>,

    /// Team whose rules must not receive the team label from its directory
    /// name.
    #[arg(long = "metadata.rulesLabelsNoEnforceTeams", short = 'r', value_name = "TEAM")]
    no_enforce_teams: Vec<String,>,

    /// Log filter directive, for example `debug` or `mcg=debug`.
    #[arg(long = "log.level", value_name = "FILTER", env = "MCG_LOG", default_value = "info")]
    log_level: String,
}

impl Cli
{
    fn globs(&self,) -> SourceGlobs
    {
        SourceGlobs {
            dashboards: self.dashboards.clone().unwrap_or_default(),
            rules:      self.rules.clone().unwrap_or_default(),
        }
    }

    fn run_config(&self,) -> RunConfig
    {
        let config = RunConfig::new(&self.output,).with_namespace(&self.namespace,);
        let config = self
            .annotations
            .iter()
            .fold(config, |config, (key, value,)| config.with_annotation(key, value,),);
        let config =
            self.labels.iter().fold(config, |config, (key, value,)| config.with_label(key, value,),);
        self.no_enforce_teams.iter().fold(config, |config, team| config.with_no_enforce_team(team,),)
    }
}

/// Entry point that reports errors and sets the appropriate exit status.
fn main()
{
    let cli = Cli::parse();
    init_tracing(&cli.log_level,);

    if let Err(error,) = execute(&cli,) {
        error!("{}", error.to_display_string());
        process::exit(1,);
    }
}

fn init_tracing(directive: &str,)
{
    let filter = EnvFilter::try_new(directive,).unwrap_or_else(|_| EnvFilter::new("info",),);
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter,)
        .with_target(false,)
        .with_writer(std::io::stderr,)
        .try_init();
}

/// Executes one generation run using parsed arguments.
///
/// # Errors
///
/// Propagates the first error raised by the run.
fn execute(cli: &Cli,) -> Result<(), Error,>
{
    mcg::run(&cli.run_config(), &cli.globs(), Converters::default(),)?;
    Ok((),)
}
