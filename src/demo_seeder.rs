use crate::db::app_repository::AppRepository;
use crate::db::post_repository::PostRepository;
use crate::error::AppError;
use crate::source::inline::{sample_apps, sample_posts};

/// Fill empty repositories with the bundled catalog.
///
/// A repository that already holds records is left alone. Ids are assigned
/// by the repository; publication dates and status are kept.
pub async fn seed_demo_data(
    post_repo: &dyn PostRepository,
    app_repo: &dyn AppRepository,
) -> Result<(), AppError> {
    tracing::info!("Starting demo data seeding...");

    if post_repo.count().await? == 0 {
        for post in sample_posts() {
            let title = post.title.clone();
            let stored = post_repo.insert(post.into()).await?;
            tracing::info!("Seeded post '{}' as #{}", title, stored.id);
        }
    } else {
        tracing::info!("Posts already present, skipping.");
    }

    if app_repo.count().await? == 0 {
        for app in sample_apps() {
            let name = app.name.clone();
            let stored = app_repo.insert(app.into()).await?;
            tracing::info!("Seeded app '{}' as #{}", name, stored.id);
        }
    } else {
        tracing::info!("Apps already present, skipping.");
    }

    tracing::info!("Demo data seeding completed.");
    Ok(())
}
