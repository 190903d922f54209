use spot_query::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let query = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    println!("Input: '{query}'");

    match parse_query(&query) {
        Ok(query) => {
            println!("\nFilters:\n{query:#?}");
            println!("\nCanonical: {query}");
            println!("Tagged:    {}", query.tagged());
        }
        Err(err) => {
            eprintln!("\n{err}");
            std::process::exit(1);
        }
    }
}
