use std::path::PathBuf;

use chrono::Local;
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{info, trace};
use tracing_subscriber::EnvFilter;

use config::Config;
use error::Result;
use getrepolist::GitHubClient;
use sampler::{Sampler, SamplerSettings};
use table::RowAppender;

mod config;
mod error;
mod features;
mod getrepolist;
mod repolist;
mod sampler;
mod table;

#[derive(Parser, Debug)]
#[command(name = "github_sample")]
#[command(about = "Sample random public GitHub repositories into a numeric feature table", long_about = None)]
struct Cli {
    /// TOML config file (defaults to sample.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Number of rows to collect
    #[arg(short = 'n', long)]
    samples: Option<usize>,
    /// CSV output path
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Exclusive upper bound for the random listing offset
    #[arg(long)]
    max_offset: Option<u64>,
    /// Candidates tried per row before giving up (0 = unbounded)
    #[arg(long)]
    max_attempts: Option<u64>,
    /// Seed for reproducible offsets
    #[arg(long)]
    seed: Option<u64>,
    /// Append each accepted row to the output as it is sampled
    #[arg(long)]
    incremental: bool,
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,
}

impl Cli {
    fn apply(self, mut config: Config) -> Config {
        if let Some(samples) = self.samples {
            config.sample_size = samples;
        }
        if let Some(output) = self.output {
            config.output = output;
        }
        if let Some(max_offset) = self.max_offset {
            config.max_offset = max_offset;
        }
        if let Some(max_attempts) = self.max_attempts {
            config.max_attempts_per_row = max_attempts;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.token.is_some() {
            config.token = self.token;
        }
        config.incremental |= self.incremental;
        config
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    let config = cli.apply(config);
    config.validate()?;

    if config.token.is_none() {
        info!("no GitHub token configured, using unauthenticated requests");
    }

    let client = GitHubClient::new(&config)?;
    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let settings = SamplerSettings {
        max_offset: config.max_offset,
        max_attempts_per_row: config.max_attempts_per_row,
        languages: config.language_map()?,
    };
    let today = Local::now().date_naive();
    let mut sampler = Sampler::new(client, rng, settings, today);

    info!(
        samples = config.sample_size,
        output = %config.output.display(),
        "sampling repositories"
    );
    let table = if config.incremental {
        let mut appender = RowAppender::create(&config.output)?;
        sampler.sample(config.sample_size, |accepted| {
            trace!(
                index = accepted.index,
                full_name = accepted.full_name,
                language = accepted.language,
                "appending row"
            );
            appender.append(accepted.row)
        })?
    } else {
        let table = sampler.sample(config.sample_size, |_| Ok(()))?;
        table.write(&config.output)?;
        table
    };
    info!(
        rows = table.len(),
        capacity = table.capacity(),
        output = %config.output.display(),
        "wrote sample"
    );
    Ok(())
}
