use std::{fs, io::Write, path::PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{AdamaClient, SearchBackend, DEFAULT_ADAMA_URL};
use shared::domain::{ServiceRef, DEFAULT_NAMESPACE, DEFAULT_SERVICE};
use tokio::sync::oneshot;
use tracing::info;
use widget::{AppContext, PageInitializer, PageState, Pager};

#[derive(Parser, Debug)]
#[command(name = "phasing-render")]
struct Cli {
    #[arg(long, default_value = DEFAULT_ADAMA_URL)]
    adama_url: String,
    /// Bearer token issued by the host portal.
    #[arg(long)]
    token: Option<String>,
    #[arg(long, default_value = DEFAULT_NAMESPACE)]
    namespace: String,
    #[arg(long, default_value = DEFAULT_SERVICE)]
    service: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one page lifetime and write the widget markup.
    Render {
        #[arg(long, default_value_t = widget::pagination::DEFAULT_PAGE_LENGTH)]
        page_length: usize,
        #[arg(long, default_value_t = 0)]
        page: usize,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Check the upstream search service.
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();
    info!("{}", widget::BANNER);

    let mut client = AdamaClient::new(&cli.adama_url)?;
    if let Some(token) = &cli.token {
        client = client.with_token(token.clone());
    }

    match cli.command {
        Command::Render {
            page_length,
            page,
            output,
        } => {
            let mut pager = Pager::with_length(page_length)?;
            pager.set_page(page);
            let service = ServiceRef::new(cli.namespace, cli.service);
            let (state, html) = render_page(&client, service, pager).await?;

            match output {
                Some(path) => fs::write(&path, &html)
                    .with_context(|| format!("failed to write {}", path.display()))?,
                None => {
                    let mut stdout = std::io::stdout().lock();
                    stdout.write_all(html.as_bytes())?;
                    stdout.write_all(b"\n")?;
                }
            }

            if state != PageState::ResultsRendered {
                bail!("search failed; page ended in state {state:?}");
            }
        }
        Command::Status => {
            client.status().await?;
            println!("ok");
        }
    }

    Ok(())
}

async fn render_page(
    backend: &dyn SearchBackend,
    service: ServiceRef,
    pager: Pager,
) -> Result<(PageState, String)> {
    let mut ctx = AppContext::new().with_pager(pager);
    let (ready_tx, ready_rx) = oneshot::channel();
    ready_tx
        .send(())
        .map_err(|_| anyhow::anyhow!("page dropped the ready signal"))?;

    let state = PageInitializer::new(service)
        .run(ready_rx, &mut ctx, backend)
        .await?;
    Ok((state, ctx.to_html()))
}
