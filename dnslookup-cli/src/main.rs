use clap::Parser;
use dnslookup::dns::codec::header::OpCodeOptions;
use dnslookup::dns::message::QueryOptions;
use dnslookup::dns::resolver::resolve_ipv4_async;
use dnslookup::dns::resolver::transporter::{ResolverConfig, parse_nameserver};
use std::process::ExitCode;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod output;

#[derive(Parser, Debug)]
#[command(name = "dnslookup")]
#[command(version)]
#[command(about = "Resolve the IPv4 address of a domain with a single UDP query")]
struct Cli {
    /// Domain to resolve
    #[arg(default_value = "duckduckgo.de")]
    domain: String,

    /// Nameserver to ask (ip, ip:port or [ipv6]:port)
    #[arg(default_value = "1.1.1.1")]
    nameserver: String,

    /// Seconds to wait for the response
    #[arg(default_value_t = 1)]
    timeout: u64,

    /// Operation code (query, iquery or status)
    #[arg(long, default_value = "query")]
    opcode: String,

    /// Clear the recursion desired flag
    #[arg(long)]
    no_recursion: bool,

    /// Print the whole decoded response as JSON
    #[arg(long)]
    json: bool,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, default_value = "warn")]
    log_level: String,
}

impl Cli {
    fn resolver_config(&self) -> anyhow::Result<ResolverConfig> {
        Ok(ResolverConfig {
            nameserver: parse_nameserver(&self.nameserver)?,
            timeout: Duration::from_secs(self.timeout),
            query: QueryOptions {
                opcode: OpCodeOptions::from_name(&self.opcode),
                recursion_desired: !self.no_recursion,
            },
        })
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(&cli.log_level);

    match run(&cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: &Cli) -> anyhow::Result<ExitCode> {
    let config = cli.resolver_config()?;
    info!(domain = %cli.domain, nameserver = %config.nameserver, "resolving");

    let result = resolve_ipv4_async(&cli.domain, &config).await;
    let report = output::report(&cli.domain, &result, config.nameserver, cli.json)?;

    println!("{}", report.line);
    Ok(report.exit_code())
}
