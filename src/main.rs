use byovec::application::demo::DemoReport;
use byovec::cli::commands::{parse_vector, Cli, Commands};
use byovec::config::Settings;
use byovec::domain::entities::record::SearchHit;
use byovec::logging::init_tracing;
use byovec::Byovec;
use clap::Parser;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    if let Err(e) = init_tracing() {
        eprintln!("Error initializing logging: {e}");
    }

    let settings = match Settings::from_env() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let (arch, pretrain) = match &cli.command {
        Commands::Ingest { arch, pretrain, .. } => (Some(arch.clone()), Some(pretrain.clone())),
        _ => (None, None),
    };
    let app = match Byovec::new(&settings, arch, pretrain) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("Error initializing byovec: {e}");
            std::process::exit(1);
        }
    };

    let result = run_command(&app, cli.command).await;
    if let Err(e) = app.close().await {
        tracing::warn!(error = %e, "close failed");
    }
    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run_command(app: &Byovec, cmd: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        Commands::Ingest { csv, limit, .. } => {
            let report = app.ingest_csv(&csv, limit).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Demo => {
            app.ping().await?;
            let report = app.demo().await?;
            print_demo(&report);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Search { target, vector, limit, fields } => {
            let vector = parse_vector(&vector)?;
            let hits = app.search(&target, vector, limit, fields.clone()).await?;
            print_hits(&hits, &fields);
        }
        Commands::Ping => {
            let readiness = app.ping().await?;
            println!("{}", serde_json::to_string_pretty(&readiness)?);
        }
    }
    Ok(())
}

fn print_hits(hits: &[SearchHit], fields: &[String]) {
    if hits.is_empty() {
        println!("No results");
        return;
    }
    for hit in hits {
        println!("{}", hit.summary(fields));
    }
}

fn print_demo(report: &DemoReport) {
    println!("Total objects in {}: {}", report.collection, report.total);
    println!("near_vector (img_vec):");
    print_hits(&report.image_hits, &report.image_fields);
    println!("near_vector (txt_vec):");
    print_hits(&report.text_hits, &report.text_fields);
}
