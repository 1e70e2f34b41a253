//! Wiring & DI. Entry point: bootstrap adapters, inject into services, run the chosen surface.
//! No business logic here.

use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use wiki_enrich::adapters::ai::OpenAiAdapter;
use wiki_enrich::adapters::http::{self, LookupClient};
use wiki_enrich::adapters::ui::{progress, tui};
use wiki_enrich::adapters::wikipedia::WikipediaAdapter;
use wiki_enrich::ports::{CompletionPort, KnowledgeSource, LookupPort};
use wiki_enrich::shared::config::{AppConfig, CREDENTIAL_KEY};
use wiki_enrich::shared::credentials::{CredentialChain, ResolvedCredential};
use wiki_enrich::usecases::enrichment::language_for_locale;
use wiki_enrich::usecases::{EnrichmentService, PromptSettings, SearchService, TermResolver};

#[derive(Parser)]
#[command(name = "wiki-enrich", version, about = "Wikipedia lookup with optional AI summary")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the lookup server.
    Serve {
        /// Listen address (overrides WIKI_ENRICH_BIND_ADDR).
        #[arg(long)]
        bind: Option<String>,
    },
    /// Look up a term and print the (enriched) summary.
    Search {
        /// Term to look up; prompted for when omitted.
        term: Option<String>,
        /// Resolve through a running server instead of in-process.
        #[arg(long)]
        remote: bool,
        /// Lookup server base URL (default: WIKI_ENRICH_SERVER_URL). Implies --remote.
        #[arg(long, value_name = "URL")]
        server_url: Option<String>,
        /// Skip AI enrichment.
        #[arg(long)]
        raw: bool,
    },
    /// Report credential source and server reachability.
    Doctor,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!(env_file = %AppConfig::dotenv_path().display(), "loading configuration");
    let cfg = AppConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "invalid configuration; using defaults");
        AppConfig::default()
    });
    let cli = Cli::parse();

    match cli.command {
        Command::Serve { bind } => run_server(&cfg, bind).await,
        Command::Search {
            term,
            remote,
            server_url,
            raw,
        } => {
            let remote = match server_url {
                Some(url) => Some(url),
                None if remote => Some(cfg.server_url_or_default()),
                None => None,
            };
            run_search(&cfg, term, remote, raw).await
        }
        Command::Doctor => run_doctor(&cfg).await,
    }
}

async fn run_server(cfg: &AppConfig, bind: Option<String>) -> anyhow::Result<()> {
    let addr = bind.unwrap_or_else(|| cfg.bind_addr_or_default());
    let resolver = build_resolver(cfg)?;
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| anyhow::anyhow!("bind {} failed: {}", addr, e))?;

    http::serve(listener, resolver, async {
        let _ = tokio::signal::ctrl_c().await;
        info!("shutdown requested");
    })
    .await?;
    Ok(())
}

async fn run_search(
    cfg: &AppConfig,
    term: Option<String>,
    remote: Option<String>,
    raw: bool,
) -> anyhow::Result<()> {
    let lookup: Arc<dyn LookupPort> = match remote {
        Some(url) => {
            info!(url = %url, "resolving through lookup server");
            Arc::new(
                LookupClient::new(url, cfg.http_timeout()).map_err(|e| anyhow::anyhow!("{}", e))?,
            )
        }
        None => build_resolver(cfg)? as Arc<dyn LookupPort>,
    };

    let enrichment = if raw {
        EnrichmentService::disabled()
    } else {
        build_enrichment(cfg)?
    };
    let service = SearchService::new(lookup, Arc::new(enrichment));

    let term = term.or_else(tui::prompt_term).unwrap_or_default();
    let pb = progress::spinner("Searching Wikipedia...");
    let result = service.search(&term).await;
    pb.finish_and_clear();

    match result {
        Ok(answer) => {
            tui::print_answer(&answer);
            Ok(())
        }
        Err(e) => {
            tui::print_error(&e);
            std::process::exit(1);
        }
    }
}

async fn run_doctor(cfg: &AppConfig) -> anyhow::Result<()> {
    match find_credential(cfg) {
        Some(cred) => println!(
            "{} found in '{}' source: {}",
            CREDENTIAL_KEY,
            cred.source,
            cred.masked()
        ),
        None => println!(
            "{} not found (checked {}, environment, {}); AI summaries disabled",
            CREDENTIAL_KEY,
            cfg.secrets_path_or_default().display(),
            cfg.env_file_or_default().display()
        ),
    }

    let client = LookupClient::new(cfg.server_url_or_default(), cfg.http_timeout())
        .map_err(|e| anyhow::anyhow!("{}", e))?;
    match client.health().await {
        Ok(()) => println!("lookup server at {} is healthy", client.base_url()),
        Err(e) => println!("lookup server at {} unavailable: {}", client.base_url(), e),
    }
    Ok(())
}

fn build_resolver(cfg: &AppConfig) -> anyhow::Result<Arc<TermResolver>> {
    let source: Arc<dyn KnowledgeSource> = Arc::new(
        WikipediaAdapter::new(cfg.wiki_api_url_or_default(), cfg.http_timeout())
            .map_err(|e| anyhow::anyhow!("{}", e))?,
    );
    let locale = cfg.locale_or_default();
    info!(locale = %locale, sentences = cfg.sentences_or_default(), "term resolver ready");
    Ok(Arc::new(TermResolver::new(
        source,
        cfg.sentences_or_default(),
        locale,
    )))
}

fn find_credential(cfg: &AppConfig) -> Option<ResolvedCredential> {
    CredentialChain::new(cfg.secrets_path_or_default(), cfg.env_file_or_default())
        .resolve(CREDENTIAL_KEY)
}

fn build_enrichment(cfg: &AppConfig) -> anyhow::Result<EnrichmentService> {
    let settings = PromptSettings {
        language: language_for_locale(&cfg.locale_or_default()).to_string(),
        max_tokens: cfg.ai_max_tokens_or_default(),
        temperature: cfg.ai_temperature_or_default(),
    };

    let completion: Option<Arc<dyn CompletionPort>> = match find_credential(cfg) {
        Some(cred) => {
            info!(
                source = cred.source,
                key = %cred.masked(),
                model = %cfg.ai_model_or_default(),
                url = %cfg.ai_api_url_or_default(),
                "AI enrichment enabled with OpenAI adapter"
            );
            let adapter = OpenAiAdapter::new(
                cfg.ai_api_url_or_default(),
                cred.value,
                cfg.ai_model_or_default(),
                cfg.ai_timeout(),
            )
            .map_err(|e| anyhow::anyhow!("{}", e))?;
            Some(Arc::new(adapter) as Arc<dyn CompletionPort>)
        }
        None => {
            warn!("{} not set, summaries will be shown raw", CREDENTIAL_KEY);
            None
        }
    };

    Ok(EnrichmentService::new(completion, settings))
}
