//! E-Library client - command line
//!
//! Lists one page of a library collection:
//! `elibrary-client <books|messages|reviews|shelf> [page] [key=value ...]`

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use elibrary_client::{
    config::AppConfig,
    error::AppError,
    services::catalog,
    FetchResult, Filters, LibraryClient, Resource, ResourceFetchController,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("elibrary_client={}", config.logging.level).into());
    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting E-Library client v{}", env!("CARGO_PKG_VERSION"));

    let mut args = std::env::args().skip(1);
    let collection = args.next().unwrap_or_else(|| "books".to_string());
    let page = match args.next() {
        Some(raw) => raw
            .parse::<i64>()
            .map_err(|_| AppError::BadRequest(format!("Invalid page number: {}", raw)))?,
        None => 1,
    };
    let filters = parse_filters(args)?;

    let client = LibraryClient::from_config(&config)?;

    let links: Vec<&str> = client.nav_links().iter().map(|link| link.label()).collect();
    println!("[{}] {:?}", links.join(" | "), client.session_action());

    let page_index = zero_based(page);
    match collection.as_str() {
        "books" if filters.contains_key("title") => {
            list(&client, client.controller(catalog::books_by_title()), page_index, &filters).await
        }
        "books" if filters.contains_key("category") => {
            list(&client, client.controller(catalog::books_by_category()), page_index, &filters).await
        }
        "books" => list(&client, client.controller(catalog::books()), page_index, &filters).await,
        "reviews" => list(&client, client.controller(catalog::reviews_by_book()), page_index, &filters).await,
        "messages" if filters.contains_key("userEmail") => {
            list(&client, client.controller(catalog::messages_by_user()), page_index, &filters).await
        }
        "messages" => list(&client, client.controller(catalog::open_messages()), page_index, &filters).await,
        "shelf" => list(&client, client.controller(catalog::shelf_history()), page_index, &filters).await,
        other => Err(AppError::BadRequest(format!("Unknown collection: {}", other)).into()),
    }
}

/// Pages are one-based on the command line
fn zero_based(page: i64) -> u32 {
    u32::try_from(page.saturating_sub(1).max(0)).unwrap_or(u32::MAX)
}

fn parse_filters(args: impl Iterator<Item = String>) -> Result<Filters, AppError> {
    let mut filters = Filters::new();
    for arg in args {
        let (key, value) = arg
            .split_once('=')
            .ok_or_else(|| AppError::BadRequest(format!("Expected key=value, got: {}", arg)))?;
        filters.insert(key.to_string(), value.to_string());
    }
    Ok(filters)
}

async fn list<T: Resource>(
    client: &LibraryClient,
    controller: ResourceFetchController<T>,
    page_index: u32,
    filters: &Filters,
) -> anyhow::Result<()> {
    controller
        .request_page_as(page_index, filters, client.session())
        .await;

    match controller.current_result() {
        FetchResult::Loading => println!("Still loading..."),
        FetchResult::Failed(error) => {
            println!("{}", error.user_message());
            return Err(AppError::Fetch(error).into());
        }
        FetchResult::Loaded(page) if page.is_empty() => {
            println!("No {} to show.", controller.endpoint().collection());
        }
        FetchResult::Loaded(page) => {
            for item in page.items() {
                println!("#{} {:?}", item.id(), item);
            }
            let pagination = controller.pagination();
            let window: Vec<String> = client
                .page_window(&pagination)
                .into_iter()
                .map(|p| {
                    if p == pagination.page_index() {
                        format!("[{}]", p + 1)
                    } else {
                        (p + 1).to_string()
                    }
                })
                .collect();
            println!(
                "Page {} of {} ({} total): {}",
                pagination.display_number(),
                pagination.total_pages(),
                page.total_elements(),
                window.join(" ")
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_based_page() {
        assert_eq!(zero_based(1), 0);
        assert_eq!(zero_based(3), 2);
        assert_eq!(zero_based(0), 0);
        assert_eq!(zero_based(i64::MIN), 0);
        assert_eq!(zero_based(i64::MAX), u32::MAX);
    }

    #[test]
    fn test_parse_filters() {
        let filters = parse_filters(["title=rust".to_string(), "size=3".to_string()].into_iter()).unwrap();
        assert_eq!(filters.get("title").map(String::as_str), Some("rust"));
        assert!(parse_filters(["title".to_string()].into_iter()).is_err());
    }
}
