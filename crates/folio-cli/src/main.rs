use anyhow::Result;
use folio_config::Config;
use folio_engine::{FileSource, HttpSource, Loader, render};
use std::{env, path::PathBuf, process};
use tokio::io::AsyncReadExt;

/// What the command line asked for.
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Stdin,
    Path {
        path: String,
        config_path: Option<PathBuf>,
    },
}

/// Where a content path will be fetched from.
#[derive(Debug, PartialEq, Eq)]
enum SourceChoice {
    Http { base_url: Option<String> },
    Files { root: PathBuf },
}

fn usage(program: &str) {
    eprintln!("Usage: {program} [--config <config-file>] [content-path | -]");
    eprintln!("Renders markdown to HTML on stdout. Reads stdin when no path or '-' is given.");
}

fn parse_args(args: &[String]) -> Option<Command> {
    let mut config_path = None;
    let mut path = None;
    let mut rest = args.iter().skip(1);

    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "--config" => config_path = Some(PathBuf::from(rest.next()?)),
            flag if flag.starts_with("--") => return None,
            _ if path.is_some() => return None,
            _ => path = Some(arg.clone()),
        }
    }

    match path {
        None if config_path.is_none() => Some(Command::Stdin),
        Some(p) if p == "-" && config_path.is_none() => Some(Command::Stdin),
        Some(p) if p != "-" => Some(Command::Path { path: p, config_path }),
        _ => None,
    }
}

fn is_url(path: &str) -> bool {
    path.starts_with("http://") || path.starts_with("https://")
}

fn source_for(path: &str, config: Option<&Config>) -> SourceChoice {
    let base_url = config.and_then(|c| c.base_url.clone());
    if is_url(path) || base_url.is_some() {
        return SourceChoice::Http { base_url };
    }

    let root = config.map_or_else(|| PathBuf::from("."), |c| c.content_root.clone());
    SourceChoice::Files { root }
}

fn build_loader(choice: SourceChoice) -> Result<Loader> {
    let loader = match choice {
        SourceChoice::Http { base_url } => Loader::new(HttpSource::new(base_url.as_deref())?),
        SourceChoice::Files { root } => Loader::new(FileSource::new(root)),
    };
    Ok(loader)
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("folio-cli");

    let Some(command) = parse_args(&args) else {
        usage(program);
        process::exit(1);
    };

    let (path, config_path) = match command {
        Command::Stdin => {
            let mut markdown = String::new();
            tokio::io::stdin().read_to_string(&mut markdown).await?;
            println!("{}", render(&markdown));
            return Ok(());
        }
        Command::Path { path, config_path } => (path, config_path),
    };

    let config_path = config_path.unwrap_or_else(Config::config_path);
    let config = match Config::load_from_path(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            usage(program);
            process::exit(1);
        }
    };
    if config.is_none() {
        log::info!(
            "No config file at {}, reading content relative to the current directory",
            config_path.display()
        );
    }

    let choice = source_for(&path, config.as_ref());
    log::debug!("Loading {path} from {choice:?}");
    let loader = build_loader(choice)?;

    println!("{}", loader.load_and_render(&path).await);
    Ok(())
}
