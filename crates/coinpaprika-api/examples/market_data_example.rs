/*
[INPUT]:  Coin identifier (e.g., "btc-bitcoin")
[OUTPUT]: Latest tweets and ICO listings printed to stdout
[POS]:    Examples - public market data queries
[UPDATE]: When adding new models
*/

use std::sync::Arc;

use coinpaprika_api::*;
use url::Url;

/// Example: query public endpoints through `Request`
///
/// These endpoints are public and don't require a token.
#[tokio::main]
async fn main() {
    println!("=== Coinpaprika Market Data Example ===\n");

    let transport = match Transport::new() {
        Ok(transport) => transport,
        Err(e) => {
            eprintln!("Failed to create transport: {}", e);
            return;
        }
    };
    let base_url = Url::parse(DEFAULT_BASE_URL).expect("default base url is valid");

    let coin = "btc-bitcoin";

    // Awaiting the result directly
    println!("Querying tweets for {}...", coin);
    let tweets = Request::<Vec<Tweet>>::new(base_url.clone(), Method::Get, format!("coins/{coin}/twitter"), None);
    match tweets.execute(&transport, None).await {
        Response::Success(tweets) => println!("✓ {} tweets, first: {:?}", tweets.len(), tweets.first()),
        Response::Failure(e) => println!("✗ Error: {}", e),
    }

    // Callback delivered on a queue drained by this task
    println!("\nQuerying ICO listings...");
    let (queue, mut runner) = CallbackQueue::new();
    let icos = Request::<Vec<Ico>>::new(base_url, Method::Get, "icos", None);
    icos.perform(&transport, Some(Arc::new(queue)), Some(CachePolicy::ReloadIgnoringCacheData), |response| {
        match response {
            Response::Success(icos) => println!("✓ {} ICOs listed", icos.len()),
            Response::Failure(e) => println!("✗ Error: {}", e),
        }
    });
    runner.run_one().await;

    println!("\n✓ Market data example complete");
}
