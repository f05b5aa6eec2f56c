//! protfetch — command-line entry point.

use std::time::Duration;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use protfetch::{
    ClientConfig, DigestRequest, IdentifierField, IdentifierQuery, PeptideMassClient,
    UniProtClient,
};

mod output;

#[derive(Parser)]
#[command(
    name = "protfetch",
    about = "protfetch — UniProt identifier lookup and PeptideMass digestion",
    version
)]
struct Cli {
    /// Output results as JSON (machine-readable).
    #[arg(long, global = true)]
    json: bool,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Request timeout in milliseconds.
    #[arg(long, global = true)]
    timeout_ms: Option<u64>,

    /// Override the UniProt search endpoint.
    #[arg(long, global = true)]
    uniprot_url: Option<String>,

    /// Override the PeptideMass endpoint.
    #[arg(long, global = true)]
    peptide_mass_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up UniProt identifiers for a gene name.
    Lookup {
        /// Gene name (e.g. "BRCA1").
        gene: String,
        /// NCBI taxonomy id of the organism.
        #[arg(long, default_value = "9606")]
        taxonomy_id: u32,
        /// Include unreviewed (TrEMBL) entries.
        #[arg(long)]
        include_unreviewed: bool,
        /// Print primary accessions instead of entry names.
        #[arg(long)]
        accession: bool,
    },
    /// Predict peptides of an enzymatic digest with PeptideMass.
    Digest {
        /// Protein accession or entry name (e.g. "P02768").
        protein: String,
        /// Smallest peptide mass to report.
        #[arg(long, default_value = "500")]
        min_mass: f64,
        /// Largest peptide mass to report.
        #[arg(long, default_value = "3500")]
        max_mass: f64,
        /// Cleaving enzyme as named by PeptideMass.
        #[arg(long, default_value = "Trypsin")]
        enzyme: String,
    },
    /// Generate shell completion scripts.
    Completions {
        /// Shell type (bash, zsh, fish, powershell, elvish).
        shell: Shell,
    },
}

fn resolve_config(cli: &Cli) -> Result<ClientConfig> {
    let mut config = ClientConfig::from_env().context("failed to read PROTFETCH_* settings")?;
    if let Some(ms) = cli.timeout_ms {
        config = config.with_timeout(Duration::from_millis(ms));
    }
    if let Some(url) = &cli.uniprot_url {
        config = config.with_uniprot_search_url(url.as_str());
    }
    if let Some(url) = &cli.peptide_mass_url {
        config = config.with_peptide_mass_url(url.as_str());
    }
    tracing::debug!(?config, "resolved client config");
    Ok(config)
}

async fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Lookup {
            gene,
            taxonomy_id,
            include_unreviewed,
            accession,
        } => {
            let mut config = resolve_config(cli)?;
            if *accession {
                config = config.with_identifier_field(IdentifierField::Accession);
            }
            let query = IdentifierQuery::new(gene.as_str())
                .taxonomy_id(*taxonomy_id)
                .reviewed_only(!*include_unreviewed);

            let ids = UniProtClient::new(&config)?
                .lookup(&query)
                .await
                .with_context(|| format!("lookup of gene {gene} failed"))?;
            output::print_identifiers(&ids, cli.json)
        }
        Commands::Digest {
            protein,
            min_mass,
            max_mass,
            enzyme,
        } => {
            let config = resolve_config(cli)?;
            let request = DigestRequest::new(protein.as_str())
                .mass_range(*min_mass, *max_mass)
                .enzyme(enzyme.as_str());

            let table = PeptideMassClient::new(&config)?
                .digest(&request)
                .await
                .with_context(|| format!("digest of {protein} failed"))?;
            output::print_table(&table, cli.json)
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(*shell, &mut cmd, "protfetch", &mut std::io::stdout());
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // 0 = success, 1 = error
    if let Err(e) = run(&cli).await {
        if cli.json {
            output::print_json(&output::error_json(&e));
        } else {
            eprint!("{}", output::error_report(&e));
        }
        std::process::exit(1);
    }
}
