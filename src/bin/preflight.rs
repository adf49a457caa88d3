use enrich_info::domain::person::Identity;
use enrich_info::infra::config::AppConfig;
use enrich_info::{http_enricher, PersonStore, PgPersonStore};

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: cargo run --bin preflight -- [PROBE_NAME]\n\
         \n\
         Requires env vars:\n\
           DATABASE_URL\n\
         Optional:\n\
           AGE_API_URL, GENDER_API_URL, NATIONALITY_API_URL, UPSTREAM_TIMEOUT_SECS\n"
    );
    std::process::exit(2);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        usage_and_exit();
    }
    let probe = args.first().map(String::as_str).unwrap_or("Dmitriy");

    // Force-read config (nice error messages if missing)
    let config = AppConfig::from_env()?;

    println!("> Preflight:");
    println!("  AGE_API_URL={}", config.upstream.age_url);
    println!("  GENDER_API_URL={}", config.upstream.gender_url);
    println!("  NATIONALITY_API_URL={}", config.upstream.nationality_url);

    // Database connectivity + table bootstrap
    let store = PgPersonStore::connect(&config.database_url, 1)
        .await
        .map_err(|e| anyhow::anyhow!("Postgres not reachable: {}", e))?;
    store.ping().await?;
    println!("  Postgres reachable, `people` table present.");

    // One full enrichment round-trip
    let enricher = http_enricher(&config.upstream)?;
    let identity = Identity::new(probe, "Preflight", "");
    let person = enricher
        .enrich(&identity)
        .await
        .map_err(|e| anyhow::anyhow!("Enrichment of {:?} failed: {}", identity.name, e))?;
    println!(
        "  Enriched {}: age={} gender={:?} nationality={}",
        person.name, person.age, person.gender, person.nationality
    );

    println!("> Preflight OK.");
    Ok(())
}
