use std::{collections::BTreeMap, path::PathBuf, process, sync::Arc};

use glifo::{
    application::{
        catalog::IconCatalog,
        error::AppError,
        render::RenderOptions,
        service::IconService,
    },
    cache::{CacheWarmer, CollectionCache},
    config::{self, Command, RenderOptionArgs},
    domain::{error::DomainError, identifier::IconId},
    infra::{
        error::InfraError,
        source::{CollectionSource, EmbeddedSource, FsSource},
        telemetry,
    },
};
use tracing::{Dispatch, Level, dispatcher, error, info};
use tracing_subscriber::fmt as tracing_fmt;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt().with_max_level(Level::ERROR).finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()
        .map_err(|err| AppError::unexpected(format!("failed to load configuration: {err}")))?;

    telemetry::init(&settings.logging).map_err(AppError::from)?;

    let source: Arc<dyn CollectionSource> = match settings.icons.data_dir.as_ref() {
        Some(dir) => {
            info!(data_dir = %dir.display(), "loading collections from directory");
            Arc::new(FsSource::new(dir.clone()))
        }
        None => Arc::new(EmbeddedSource::new()),
    };

    let cache = CollectionCache::new(source);
    let service = IconService::new(cache.clone(), settings.icons.fallback.clone());
    let catalog = IconCatalog::new(cache.clone());
    let warmer = CacheWarmer::new(cache);

    match cli_args.command.unwrap_or(Command::List) {
        Command::Render(args) => {
            let id = IconId::parse(&args.identifier).map_err(DomainError::from)?;
            let options = render_options(&args.options);
            match service.render_icon(&id, &options).await {
                Some(svg) => write_output(args.out, svg).await,
                None => Err(DomainError::not_found("icon").into()),
            }
        }
        Command::Batch(args) => {
            let options = render_options(&args.options);
            let outcome = service.render_batch(&args.identifiers, &options).await;
            // BTreeMap keeps the emitted mapping stable across runs.
            let mapping: BTreeMap<_, _> = outcome.rendered.into_iter().collect();
            let json = serde_json::to_string_pretty(&mapping)
                .map_err(|err| AppError::unexpected(format!("failed to encode mapping: {err}")))?;
            write_output(args.out, json).await
        }
        Command::List => {
            warmer.warm(&settings.icons.prewarm).await;
            for name in catalog.list_collections() {
                println!("{name}");
            }
            Ok(())
        }
        Command::Search(args) => {
            if args.collection.is_none() {
                warmer.warm(&settings.icons.prewarm).await;
            }
            let hits = catalog
                .search(&args.query, args.collection.as_deref(), args.limit)
                .await;
            for id in hits {
                println!("{id}");
            }
            Ok(())
        }
        Command::Warm => {
            let requested = settings.icons.prewarm.len();
            let warmed = warmer.warm(&settings.icons.prewarm).await;
            println!("warmed {warmed} of {requested} collections");
            Ok(())
        }
    }
}

fn render_options(args: &RenderOptionArgs) -> RenderOptions {
    RenderOptions {
        size: args.size.clone(),
        class: args.class.clone(),
        color: args.color.clone(),
    }
}

async fn write_output(out: Option<PathBuf>, content: String) -> Result<(), AppError> {
    match out {
        Some(path) => {
            tokio::fs::write(&path, content)
                .await
                .map_err(|err| AppError::Infra(InfraError::Io(err)))?;
            info!(path = %path.display(), "output written");
            Ok(())
        }
        None => {
            println!("{content}");
            Ok(())
        }
    }
}
