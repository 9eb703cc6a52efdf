//! Generate static files from CMS content

use anyhow::Result;

use crate::generator::Generator;
use crate::Starlog;

/// Run a full generation cycle
pub async fn run(app: &Starlog, preview_ref: Option<&str>) -> Result<()> {
    let generator = Generator::new(app)?;
    let summary = generator.generate(preview_ref).await?;

    tracing::info!(
        "Generated {} post pages ({} redirects, {} skipped)",
        summary.posts,
        summary.redirects,
        summary.skipped
    );
    Ok(())
}
