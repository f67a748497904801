//! podtolog CLI.
//!
//! Prints a Dynatrace logs viewer link showing the logs of one pod.

use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::Result;
use clap::error::ErrorKind;
use clap::parser::ValueSource;
use clap::{CommandFactory, FromArgMatches, Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use podtolog::config::HOST_ENV_VAR;
use podtolog::template::DEFAULT_TEMPLATE;
use podtolog::{
    build_log_url, ClusterLookup, HostResolver, HostSources, KubeObjectStore, Query, QueryTemplate,
    StaticConfig,
};

/// Where the shard host comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ResolverKind {
    /// Read the pod UID and the DynaKube API URL from the cluster.
    Cluster,
    /// Read the host from --host, PODTOLOG_HOST or podtolog.yaml.
    Static,
}

/// Print a Dynatrace logs link for a Kubernetes pod.
#[derive(Parser)]
#[command(
    name = "podtolog",
    version,
    about = "Print a Dynatrace logs link for a Kubernetes pod",
    override_usage = "podtolog [-n NAMESPACE] <POD>",
    arg_required_else_help = true
)]
struct Cli {
    /// Name of the pod.
    pod: String,

    /// Namespace of the pod (default: current namespace).
    #[arg(short, long)]
    namespace: Option<String>,

    /// How to resolve the log service shard.
    #[arg(long, value_enum, default_value_t = ResolverKind::Cluster)]
    resolver: ResolverKind,

    /// Path to kubeconfig file (default: KUBECONFIG or ~/.kube/config).
    // KUBECONFIG may hold a path list, so discovery reads it, not clap
    #[arg(long)]
    kubeconfig: Option<PathBuf>,

    /// Kubeconfig context to use instead of the current one.
    #[arg(long)]
    context: Option<String>,

    /// Shard host for the static resolver.
    #[arg(long, env = HOST_ENV_VAR, hide_env_values = true)]
    host: Option<String>,

    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,
}

/// Parse arguments, rejecting an explicit `--host` for the cluster resolver.
fn parse_cli<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = Cli::command().try_get_matches_from(args)?;
    let cli = Cli::from_arg_matches(&matches)?;

    let host_on_command_line = matches.value_source("host") == Some(ValueSource::CommandLine);
    if cli.resolver == ResolverKind::Cluster && host_on_command_line {
        return Err(Cli::command().error(
            ErrorKind::ArgumentConflict,
            "--host only applies to --resolver static",
        ));
    }

    Ok(cli)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = parse_cli(std::env::args_os()).unwrap_or_else(|e| e.exit());

    // Logs go to stderr; stdout carries only the link
    let filter = if cli.verbose {
        EnvFilter::new("warn,podtolog=debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let query = Query::new(cli.pod, cli.namespace)?;
    let template = QueryTemplate::new(DEFAULT_TEMPLATE)?;

    let resolver: Box<dyn HostResolver> = match cli.resolver {
        ResolverKind::Cluster => {
            let kubeconfig = cli.kubeconfig.as_deref();
            let store = KubeObjectStore::connect(kubeconfig, cli.context.as_deref()).await?;
            Box::new(ClusterLookup::new(store))
        }
        ResolverKind::Static => {
            let mut sources = HostSources::from_env();
            if let Some(host) = cli.host.filter(|h| !h.trim().is_empty()) {
                sources.env_host = Some(host);
            }
            Box::new(StaticConfig::new(sources))
        }
    };

    let link = build_log_url(resolver.as_ref(), &template, query).await?;
    print!("{link}");
    Ok(())
}
