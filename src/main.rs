use anyhow::Result;
use swapi_etl::{init_tracing_once, EtlOptions, SwapiETL};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing_once();

    let opts = EtlOptions::from_env();
    tracing::info!(
        "api root {}, output {}, concurrency {}",
        opts.api_root,
        opts.output_dir.display(),
        opts.concurrency.map(|n| n.to_string()).unwrap_or_else(|| "unbounded".to_string())
    );

    let summary = SwapiETL::with_options(opts).run().await?;

    println!(
        "Wrote {} planets to {} and {} homeworlds to {}",
        summary.planet_rows,
        summary.planets_csv.display(),
        summary.people_rows,
        summary.people_csv.display()
    );

    Ok(())
}
