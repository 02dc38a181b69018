// Command dispatch: each verb becomes one linear pipeline,
// build -> send -> materialize. The stored key is loaded once, before
// any request is built, and handed to the builder as a plain value.

use crate::api::ApiClient;
use crate::cli::{Cli, Commands, ImageCommand, ImageOptions};
use crate::credentials::{self, Credential, CredentialStore};
use crate::output::{Materialized, Materializer};
use crate::request::{Operation, RequestBuilder};
use anyhow::{Context, Result};
use dialoguer::Password;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;

/// Run the parsed command line, writing command output to `out`.
pub fn run<W: Write>(cli: Cli, out: &mut W) -> Result<()> {
    let api = ApiClient::new(&cli.api_url)?;
    let store = cli
        .key_file
        .map(|path| CredentialStore::new(path))
        .unwrap_or_else(CredentialStore::default_location);

    match cli.command {
        Commands::Init { key } => handle_init(&api, &store, key, out),
        Commands::Costs => execute(&api, None, Operation::Costs, &Materializer::default(), out),
        Commands::Services => {
            execute(&api, None, Operation::Services, &Materializer::default(), out)
        }
        Commands::Tokens => {
            let key = store.load()?;
            execute(&api, Some(key), Operation::Tokens, &Materializer::default(), out)
        }
        Commands::Image(ImageCommand::Local { options, paths }) => {
            let key = store.load()?;
            let op = Operation::image_local(paths, options.quality)?;
            execute(&api, Some(key), op, &materializer_for(&options), out)
        }
        Commands::Image(ImageCommand::Remote { options, urls }) => {
            let key = store.load()?;
            let op = Operation::image_remote(urls, options.quality)?;
            execute(&api, Some(key), op, &materializer_for(&options), out)
        }
        Commands::Nlp(args) => {
            let key = store.load()?;
            let op = Operation::nlp(args.task, args.texts)?;
            execute(&api, Some(key), op, &Materializer::default(), out)
        }
    }
}

fn materializer_for(options: &ImageOptions) -> Materializer {
    Materializer::new(&options.output_dir)
}

/// Build, send, materialize. The response shape is taken from the
/// operation before it is turned into a request.
fn execute<W: Write>(
    api: &ApiClient,
    key: Option<Credential>,
    operation: Operation,
    materializer: &Materializer,
    out: &mut W,
) -> Result<()> {
    let shape = operation.response_shape();
    let builder = RequestBuilder::new(api.base_url().clone());
    let builder = match key {
        Some(key) => builder.with_credential(key),
        None => builder,
    };
    let request = builder.build(&operation)?;

    let spinner = spinner("Waiting for Wabel Tools...");
    let response = api.send(request);
    spinner.finish_and_clear();

    match materializer.materialize(&shape, &response?, out)? {
        Materialized::Saved(path) => {
            writeln!(out, "Processed image saved as '{}'", path.display())
                .context("writing to stdout")?;
        }
        Materialized::Printed => {}
    }
    Ok(())
}

/// Validate the key against the service, then store it. Nothing is
/// written when validation fails.
fn handle_init<W: Write>(
    api: &ApiClient,
    store: &CredentialStore,
    key: Option<String>,
    out: &mut W,
) -> Result<()> {
    let raw = match key {
        Some(key) => key,
        // `Password` hides the key while it is typed.
        None => Password::new()
            .with_prompt("API key")
            .interact()
            .context("reading API key from the terminal")?,
    };
    let candidate = Credential::new(&raw)?;

    let spinner = spinner("Validating API key...");
    let validated = credentials::validate(api, &candidate);
    spinner.finish_and_clear();
    validated?;

    store.save(&candidate)?;
    writeln!(out, "API key saved.").context("writing to stdout")?;
    Ok(())
}

fn spinner(message: &'static str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message);
    // Drawn once; no ticker thread runs while the request blocks.
    spinner.tick();
    spinner
}
