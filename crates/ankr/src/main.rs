mod cli;

use ankr_core::rpc::PaginatedRequest;
use ankr_core::types::*;
use ankr_core::{AnkrClient, CancelReason, Context, CoreError, PageCursor};
use clap::Parser;
use eyre::{eyre, WrapErr};
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use cli::Command;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let args = cli::Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_level(true)
        .init();

    let client = AnkrClient::new(args.client_config()).wrap_err("configure Ankr client")?;

    // Ctrl-C cancels whatever call is in flight, including limiter waits.
    let shutdown = CancellationToken::new();
    tokio::spawn({
        let shutdown = shutdown.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::warn!("interrupt received, cancelling");
                shutdown.cancel();
            }
        }
    });
    let mut ctx = Context::with_token(shutdown);
    if let Some(deadline) = args.deadline() {
        ctx = ctx.with_timeout(deadline);
    }

    let output = run(&client, &ctx, args.command).await.map_err(|report| {
        match report.downcast_ref::<CoreError>() {
            Some(err) => eyre!(format_api_error(&args.endpoint, err))
                .wrap_err("while calling the Ankr API"),
            None => report,
        }
    })?;

    let rendered = serde_json::to_string_pretty(&output).context("render JSON output")?;
    println!("{rendered}");
    Ok(())
}

/// API failures surface as a [`CoreError`] inside the report.
async fn run(
    client: &AnkrClient,
    ctx: &Context,
    command: Command,
) -> eyre::Result<serde_json::Value> {
    match command {
        Command::Stats { chain } => {
            let stats = client
                .get_blockchain_stats(ctx, &GetBlockchainStatsRequest { blockchain: chain })
                .await?;
            to_json(&stats)
        }
        Command::Blocks {
            chain,
            from,
            to,
            include_logs,
        } => {
            let request = GetBlocksRequest {
                include_logs: include_logs.then_some(true),
                ..GetBlocksRequest::new(chain, from, to)
            };
            to_json(&client.get_blocks(ctx, &request).await?)
        }
        Command::Balances {
            wallet,
            chain,
            all_tokens,
            max_pages,
        } => {
            let cursor = client.get_account_balances(GetAccountBalanceRequest {
                wallet_address: wallet,
                blockchain: chain,
                only_whitelisted: all_tokens.then_some(false),
                ..Default::default()
            });
            to_json(&collect_pages(&cursor, ctx, max_pages).await?)
        }
        Command::Nfts {
            wallet,
            chain,
            max_pages,
        } => {
            let cursor = client.get_nfts_by_owner(GetNftsByOwnerRequest {
                wallet_address: wallet,
                blockchain: chain,
                ..Default::default()
            });
            to_json(&collect_pages(&cursor, ctx, max_pages).await?)
        }
        Command::Price { chain, contract } => {
            let request = GetTokenPriceRequest::new(chain, contract);
            to_json(&client.get_token_price(ctx, &request).await?)
        }
        Command::Currencies { chain } => {
            let request = GetCurrenciesRequest::new(chain);
            to_json(&client.get_currencies(ctx, &request).await?)
        }
        Command::Holders {
            chain,
            contract,
            page_size,
            max_pages,
        } => {
            let cursor = client.get_token_holders(GetTokenHoldersRequest {
                page_size,
                ..GetTokenHoldersRequest::new(chain, contract)
            });
            to_json(&collect_pages(&cursor, ctx, max_pages).await?)
        }
        Command::Interactions { address } => {
            let request = GetInteractionsRequest { address };
            to_json(&client.get_interactions(ctx, &request).await?)
        }
    }
}

/// Fetch up to `max_pages` pages, stopping early at the final page.
async fn collect_pages<R: PaginatedRequest>(
    cursor: &PageCursor<R>,
    ctx: &Context,
    max_pages: usize,
) -> Result<Vec<R::Response>, CoreError> {
    let mut pages = Vec::new();
    while cursor.has_next() && pages.len() < max_pages {
        pages.push(cursor.next(ctx).await?);
        tracing::debug!(method = R::METHOD, pages = pages.len(), "page fetched");
    }
    if cursor.has_next() {
        tracing::info!(
            method = R::METHOD,
            pages = pages.len(),
            "more pages available; raise --max-pages to fetch them"
        );
    }
    Ok(pages)
}

fn to_json<T: Serialize>(value: &T) -> eyre::Result<serde_json::Value> {
    serde_json::to_value(value).wrap_err("render JSON output")
}

fn format_api_error(endpoint: &str, err: &CoreError) -> String {
    let mut lines = vec![
        format!("request to `{endpoint}` failed"),
        format!("error: {err}"),
    ];

    let source_error = err.to_string();
    if let CoreError::Cancelled(reason) = err {
        lines.push(match reason {
            CancelReason::Cancelled => "hint: the call was interrupted".into(),
            CancelReason::DeadlineExceeded => {
                "hint: the call ran past its deadline; raise or drop --deadline-secs".into()
            }
        });
    } else if matches!(err, CoreError::RateLimitExceeded) {
        lines.push(
            "hint: local rate limit reached; raise --rate-limit or pass --on-rate-limit block"
                .into(),
        );
    } else if source_error.contains("429") {
        lines.push("hint: the server is throttling this key; lower --rate-limit".into());
    } else if source_error.contains("401") || source_error.contains("403") {
        lines.push("hint: authentication failed; verify --api-key or ANKR_API_KEY".into());
    } else if source_error.contains("dns error") || source_error.contains("Could not resolve host")
    {
        lines.push(
            "hint: hostname resolution failed; verify the endpoint hostname and your DNS/network"
                .into(),
        );
    } else if source_error.contains("certificate") || source_error.contains("tls") {
        lines.push(
            "hint: TLS handshake failed; verify certificate trust and that the endpoint uses HTTPS"
                .into(),
        );
    } else if err.rpc_error().is_some() {
        lines.push("hint: the API rejected the parameters; check addresses and chain names".into());
    }

    lines.join("\n")
}
