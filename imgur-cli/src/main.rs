// ABOUTME: Main entry point for the Imgur CLI application
// ABOUTME: Loads configuration, builds the SDK client and dispatches subcommands

use anyhow::{bail, Context, Result};
use clap::Parser;
use imgur_cli::cli::{Cli, Commands};
use imgur_cli::cli_output::CliOutput;
use imgur_cli::config::Config;
use imgur_cli::constants::env as env_vars;
use imgur_cli::output::{JsonFormatter, OutputFormat, TableFormatter};
use imgur_sdk::{ImgurClient, Resource, UploadKind, UploadOptions, UploadRequest};
use std::env;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    // Determine if color should be used
    let use_color = !cli.no_color
        && env::var(env_vars::NO_COLOR).is_err()
        && env::var("TERM").unwrap_or_default() != "dumb";
    let output = CliOutput::with_color(use_color);

    if let Err(err) = run(cli, use_color, &output).await {
        output.error(&err);
        std::process::exit(1);
    }
}

async fn run(cli: Cli, use_color: bool, output: &CliOutput) -> Result<()> {
    let config = Config::load().context("Failed to load configuration")?;
    log::debug!("Loaded configuration: {config:?}");

    let client = config.build_client()?;
    log::debug!("Using API base {}", client.base_url());

    let formatter: Box<dyn OutputFormat> = if cli.json || config.prefers_json() {
        Box::new(JsonFormatter::new(cli.pretty))
    } else {
        Box::new(TableFormatter::new(use_color))
    };

    match cli.command {
        Commands::Resolve { url } => {
            let resource = client
                .resolve_url(&url)
                .await
                .with_context(|| format!("Failed to resolve {url}"))?;
            println!("{}", formatter.format_resource(&resource)?);
        }
        Commands::Image { id } => {
            let info = client.image_info(&id).await?;
            println!("{}", formatter.format_resource(&Resource::from(info))?);
        }
        Commands::Album { id } => {
            let info = client.album_info(&id).await?;
            println!("{}", formatter.format_resource(&Resource::from(info))?);
        }
        Commands::GalleryImage { id } => {
            let info = client.gallery_image_info(&id).await?;
            println!("{}", formatter.format_resource(&Resource::from(info))?);
        }
        Commands::GalleryAlbum { id } => {
            let info = client.gallery_album_info(&id).await?;
            println!("{}", formatter.format_resource(&Resource::from(info))?);
        }
        Commands::Upload {
            file,
            url,
            album,
            title,
            description,
        } => {
            let options = UploadOptions {
                album,
                title,
                description,
            };

            let info = match (file, url) {
                (Some(path), _) => client
                    .upload_image_from_file(&path, options)
                    .await
                    .with_context(|| format!("Failed to upload {}", path.display()))?,
                (None, Some(url)) => client
                    .upload_image(UploadRequest {
                        image: url.clone().into_bytes(),
                        kind: UploadKind::Url.into(),
                        options,
                    })
                    .await
                    .with_context(|| format!("Failed to upload {url}"))?,
                (None, None) => bail!("Nothing to upload. Pass a file or --url"),
            };

            output.success(&format!("Uploaded {}", info.link));
            println!("{}", formatter.format_resource(&Resource::Image(info))?);
        }
        Commands::Rate => {
            let quota = client
                .rate_limit()
                .await
                .context("Failed to check rate limit")?;
            println!("{}", formatter.format_quota(&quota)?);
        }
    }

    warn_on_quota_problem(&client, output);
    Ok(())
}

fn warn_on_quota_problem(client: &ImgurClient, output: &CliOutput) {
    if let Some(error) = client.last_quota().error {
        output.warning(&format!("Rate-limit headers were incomplete: {error}"));
    }
}
