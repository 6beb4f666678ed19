// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Bookmarker CLI
//!
//! Fetch pages, inspect URI handling and maintain a local bookmark index.

use std::env;
use std::fs;
use std::process::ExitCode;
use std::time::Duration;

use bookmarker::index::Index;
use bookmarker::{
    absolute, classify, clean, Document, FileIndex, HttpClient, HttpClientConfig,
    RequestHeaders, Response,
};

#[derive(Debug, Default)]
struct Options {
    positional: Vec<String>,
    last_modified: Option<String>,
    etag: Option<String>,
    out: Option<String>,
    limit: Option<usize>,
}

fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("bookmarker=info".parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return ExitCode::from(1);
    }

    let options = match parse_options(&args[2..]) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::from(1);
        }
    };
    let positional = &options.positional;

    match args[1].as_str() {
        "head" if positional.len() == 1 => head(&positional[0]),
        "get" if positional.len() == 1 => get(&positional[0], &options),
        "resolve" if positional.len() == 2 => resolve(&positional[0], &positional[1]),
        "classify" if positional.len() == 1 => classify_uri(&positional[0]),
        "add" if positional.len() >= 2 => add(&positional[0], &positional[1..]),
        "search" if positional.len() >= 2 => search(
            &positional[0],
            &positional[1..].join(" "),
            options.limit.unwrap_or(20),
        ),
        "head" | "get" | "resolve" | "classify" | "add" | "search" => {
            eprintln!("Wrong number of arguments for '{}'", args[1]);
            print_usage();
            ExitCode::from(1)
        }
        "--help" | "-h" | "help" => {
            print_usage();
            ExitCode::SUCCESS
        }
        "--version" | "-v" | "version" => {
            println!("bookmarker {}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        cmd => {
            eprintln!("Unknown command: {}", cmd);
            print_usage();
            ExitCode::from(1)
        }
    }
}

fn print_usage() {
    println!(
        r#"Bookmarker - fetch and index bookmarked pages

USAGE:
    bookmarker <COMMAND> [OPTIONS]

COMMANDS:
    head <uri>                      Show response headers without following redirects
    get <uri>                       Fetch a URI, following redirects
        --last-modified <date>      Send as If-Modified-Since
        --etag <tag>                Send as ETag
        --out <file>                Write the decoded body to a file
    resolve <reference> <parent>    Resolve a relative reference
    classify <uri>                  Report image / video / neither
    add <index> <uri>...            Fetch pages and add them to an index
    search <index> <query>          Query an index
        --limit <n>                 Maximum results (default 20)
    help                            Show this help message
    version                         Show version information

ENVIRONMENT:
    BOOKMARKER_USER_AGENT           User agent for requests
    BOOKMARKER_TIMEOUT_SECS         Per-request timeout in seconds (default 20)
    RUST_LOG                        Log filter, e.g. bookmarker=debug

EXAMPLES:
    bookmarker get smh.com.au
    bookmarker resolve one/two/ http://www.foxsports.com.au/rss
    bookmarker add ~/.bookmarks/index.jsonl example.com rust-lang.org
    bookmarker search ~/.bookmarks/index.jsonl "title:rust +language"
"#
    );
}

fn parse_options(args: &[String]) -> Result<Options, String> {
    let mut options = Options::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        let mut value = |flag: &str| {
            iter.next()
                .cloned()
                .ok_or_else(|| format!("Missing value for {}", flag))
        };
        match arg.as_str() {
            "--last-modified" => options.last_modified = Some(value(arg)?),
            "--etag" => options.etag = Some(value(arg)?),
            "--out" => options.out = Some(value(arg)?),
            "--limit" => {
                let raw = value(arg)?;
                options.limit = Some(
                    raw.parse()
                        .map_err(|_| format!("Invalid --limit: {}", raw))?,
                );
            }
            _ => options.positional.push(arg.clone()),
        }
    }

    Ok(options)
}

fn client() -> Option<HttpClient> {
    let mut config = HttpClientConfig::for_crawling();
    if let Ok(agent) = env::var("BOOKMARKER_USER_AGENT") {
        config = config.user_agent(agent);
    }
    if let Some(secs) = env::var("BOOKMARKER_TIMEOUT_SECS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
    {
        config = config.timeout(Duration::from_secs(secs));
    }

    match HttpClient::with_config(config) {
        Ok(client) => Some(client),
        Err(e) => {
            eprintln!("Failed to create HTTP client: {}", e);
            None
        }
    }
}

fn print_response(response: &Response) {
    println!("Status: {}", response.status);
    println!("Location: {}", response.effective_location());
    println!("Time: {}ms", response.response_time_ms);
    println!("\n=== Headers ===");
    for (name, value) in response.headers.iter() {
        println!("{}: {}", name, value.to_str().unwrap_or("<binary>"));
    }
}

fn head(uri: &str) -> ExitCode {
    let Some(client) = client() else {
        return ExitCode::from(1);
    };

    match client.head(uri, RequestHeaders::new()) {
        Ok(Some(response)) => {
            print_response(&response);
            ExitCode::SUCCESS
        }
        Ok(None) => {
            eprintln!("Not a fetchable URI: {}", uri);
            ExitCode::from(1)
        }
        Err(e) => {
            eprintln!("Request failed: {}", e);
            ExitCode::from(1)
        }
    }
}

fn get(uri: &str, options: &Options) -> ExitCode {
    let Some(client) = client() else {
        return ExitCode::from(1);
    };

    let mut headers = RequestHeaders::new();
    if let Some(ref last_modified) = options.last_modified {
        headers.insert("last-modified", last_modified.clone());
    }
    if let Some(ref etag) = options.etag {
        headers.insert("etag", etag.clone());
    }

    match client.get(uri, headers) {
        Ok(Some(response)) => {
            print_response(&response);
            println!("\nSize: {} bytes ({} on the wire)", response.content().len(), response.body.len());

            if let Some(ref path) = options.out {
                if let Err(e) = fs::write(path, response.content()) {
                    eprintln!("Failed to write {}: {}", path, e);
                    return ExitCode::from(1);
                }
            }
            ExitCode::SUCCESS
        }
        Ok(None) => {
            eprintln!("Not a fetchable URI: {}", uri);
            ExitCode::from(1)
        }
        Err(e) => {
            eprintln!("Failed to fetch URI: {}", e);
            ExitCode::from(1)
        }
    }
}

fn resolve(reference: &str, parent: &str) -> ExitCode {
    let Some(parent) = clean(parent) else {
        eprintln!("Invalid parent URI: {}", parent);
        return ExitCode::from(1);
    };

    match absolute(reference, &parent) {
        Some(uri) => {
            println!("{}", uri);
            ExitCode::SUCCESS
        }
        None => {
            eprintln!("Cannot resolve '{}' against {}", reference, parent);
            ExitCode::from(1)
        }
    }
}

fn classify_uri(uri: &str) -> ExitCode {
    match clean(uri) {
        Some(uri) => {
            println!("{}", classify(&uri).as_str());
            ExitCode::SUCCESS
        }
        None => {
            eprintln!("Invalid URI: {}", uri);
            ExitCode::from(1)
        }
    }
}

fn add(path: &str, uris: &[String]) -> ExitCode {
    let Some(client) = client() else {
        return ExitCode::from(1);
    };

    let mut index = FileIndex::new(path);
    if let Err(e) = index.open_for_writing() {
        eprintln!("Failed to open index: {}", e);
        return ExitCode::from(1);
    }

    let mut failures = 0;
    for uri in uris {
        let response = match client.get(uri.as_str(), RequestHeaders::new()) {
            Ok(Some(response)) if response.kind().is_terminal() => response,
            Ok(Some(response)) => {
                eprintln!("✗ [{}] {}", response.status_code(), uri);
                failures += 1;
                continue;
            }
            Ok(None) => {
                eprintln!("✗ not fetchable: {}", uri);
                failures += 1;
                continue;
            }
            Err(e) => {
                eprintln!("✗ {}: {}", uri, e);
                failures += 1;
                continue;
            }
        };

        let document = Document::from_response(&response);
        match index.add(&document) {
            Ok(()) => println!("✓ [{}] {} ({})", response.status_code(), document.url, document.title),
            Err(e) => {
                eprintln!("✗ {}: {}", uri, e);
                failures += 1;
            }
        }
    }

    println!("\nSummary: {} added, {} failed", uris.len() - failures, failures);
    if failures == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}

fn search(path: &str, query: &str, limit: usize) -> ExitCode {
    let mut index = FileIndex::new(path);
    if let Err(e) = index.open_for_reading() {
        eprintln!("Failed to open index: {}", e);
        return ExitCode::from(1);
    }

    match index.query(query, limit) {
        Ok(hits) if hits.is_empty() => {
            println!("No matches");
            ExitCode::SUCCESS
        }
        Ok(hits) => {
            for hit in &hits {
                println!("{:>3}% {} - {}", hit.percent, hit.document.url, hit.document.title);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Query failed: {}", e);
            ExitCode::from(1)
        }
    }
}
