//! List posts known to the content API

use anyhow::Result;

use crate::content::{Feed, LoadMore, Paginator};
use crate::Starlog;

/// Fetch and print the full post listing, page by page
pub async fn run(app: &Starlog, preview_ref: Option<&str>) -> Result<()> {
    let client = app.content_client()?;
    let paginator = Paginator::new(&client, &app.config.document_type);

    let first = paginator
        .fetch_page(app.config.page_size, preview_ref)
        .await?;
    let feed = Feed::new(first);

    while let LoadMore::Appended(count) = feed.load_more(&paginator).await? {
        tracing::debug!("Loaded {} more posts", count);
    }

    let posts = feed.posts().await;
    println!("Posts ({}):", posts.len());
    for post in posts {
        println!(
            "  {} - {} [{}]",
            post.first_publication_date.as_deref().unwrap_or("unpublished"),
            post.title,
            post.id.as_str().unwrap_or("no uid")
        );
    }
    Ok(())
}
