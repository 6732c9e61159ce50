use clap::Parser;

use csv_export::interfaces::cli;

#[tokio::main]
async fn main() {
    let _ = tracing_subscriber::fmt().with_env_filter("info").try_init();

    let args = cli::Cli::parse();
    if let Err(err) = cli::run(args).await {
        eprintln!("csv-export: {}", err);
        std::process::exit(1);
    }
}
