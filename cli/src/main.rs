use anyhow::Result;
use clap::{Parser, Subcommand};

use folio::models::app_entry::AppEntry;
use folio::models::post::BlogPost;
use folio::models::record::Record;
use folio::query::engine::{ListOutcome, ListQueryEngine, PageDirection, PageView};
use folio::source::client::{DataSource, HttpDataSource};
use folio::source::inline::InlineDataSource;
use folio::source::loader::{load_apps_page, load_blog_page, load_home};

#[derive(Parser, Debug)]
#[command(name = "folio-cli", about = "Browse Folio blog posts and apps from the terminal")]
struct Cli {
    /// Base URL of a running Folio server. The bundled catalog is used when omitted.
    #[arg(long, env = "FOLIO_BASE_URL")]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List blog posts, five per page
    Posts {
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        search: Option<String>,
        /// 1-based page number; pages past the end show the last page
        #[arg(long, default_value_t = 1)]
        page: usize,
        #[arg(long)]
        json: bool,
    },
    /// List showcased apps
    Apps {
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Recent posts, featured apps and totals
    Home {
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let source: Box<dyn DataSource> = match &cli.base_url {
        Some(url) => Box::new(HttpDataSource::new(url)?),
        None => Box::new(InlineDataSource::default()),
    };

    match cli.command {
        Command::Posts {
            category,
            search,
            page,
            json,
        } => {
            let mut engine = load_blog_page(source.as_ref()).await;
            apply_filters(&mut engine, category.as_deref(), search.as_deref());
            go_to_page(&mut engine, page);
            print_outcome(&engine, "posts", json, print_post)?;
        }
        Command::Apps {
            category,
            search,
            json,
        } => {
            let mut engine = load_apps_page(source.as_ref()).await;
            apply_filters(&mut engine, category.as_deref(), search.as_deref());
            print_outcome(&engine, "apps", json, print_app)?;
        }
        Command::Home { json } => {
            let summary = load_home(source.as_ref()).await;
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
                return Ok(());
            }

            println!("Recent posts:");
            for post in &summary.recent_posts {
                print_post(post);
            }
            println!("\nFeatured apps:");
            for app in &summary.featured_apps {
                print_app(app);
            }
            println!(
                "\nPosts: {}  Apps: {}",
                count_label(summary.post_count),
                count_label(summary.app_count)
            );
        }
    }

    Ok(())
}

fn apply_filters<R: Record>(
    engine: &mut ListQueryEngine<R>,
    category: Option<&str>,
    search: Option<&str>,
) {
    if let Some(category) = category {
        engine.apply_category(category);
    }
    if let Some(search) = search {
        engine.apply_search(search);
    }
}

/// Step forward to the 1-based `page`. Requests past the end land on the
/// last page.
fn go_to_page<R: Record>(engine: &mut ListQueryEngine<R>, page: usize) {
    let target = page.min(engine.total_pages());
    while engine.current_page() < target {
        engine.page(PageDirection::Next);
    }
}

fn print_outcome<R, F>(engine: &ListQueryEngine<R>, noun: &str, json: bool, print: F) -> Result<()>
where
    R: Record + serde::Serialize,
    F: Fn(&R),
{
    match engine.outcome() {
        ListOutcome::Pending => println!("Still loading {noun}."),
        ListOutcome::LoadFailed(reason) => {
            anyhow::bail!("Failed to load {noun}: {reason}");
        }
        ListOutcome::NoMatches if json => {
            println!("{}", serde_json::to_string_pretty(&engine.current_page_view())?)
        }
        ListOutcome::NoMatches => println!("No {noun} match the current filters."),
        ListOutcome::Page(view) if json => {
            println!("{}", serde_json::to_string_pretty(&view)?)
        }
        ListOutcome::Page(view) => {
            for record in view.records.iter().copied() {
                print(record);
            }
            print_pagination(&view, noun);
        }
    }
    Ok(())
}

fn print_pagination<R>(view: &PageView<'_, R>, noun: &str) {
    if !view.show_controls() {
        println!("\n{} {noun}", view.total_matches);
        return;
    }

    let mut hints = Vec::new();
    if view.has_previous() {
        hints.push(format!("--page {} for previous", view.page_index - 1));
    }
    if view.has_next() {
        hints.push(format!("--page {} for next", view.page_index + 1));
    }
    println!(
        "\nPage {} of {} ({} {noun}) {}",
        view.page_index,
        view.total_pages,
        view.total_matches,
        hints.join(", ")
    );
}

fn print_post(post: &BlogPost) {
    let date = post
        .created_at
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "undated".to_string());
    println!(
        "[{}] {} ({}, {})",
        post.id,
        post.title,
        post.category.as_deref().unwrap_or("uncategorized"),
        date
    );
    if let Some(summary) = post.summary_or_preview() {
        println!("    {summary}");
    }
    let tags = post.tag_list();
    if !tags.is_empty() {
        println!("    #{}", tags.join(" #"));
    }
}

fn print_app(app: &AppEntry) {
    println!(
        "[{}] {}{} ({}, {})",
        app.id,
        app.name,
        if app.featured { " *" } else { "" },
        app.technology.as_deref().unwrap_or("-"),
        app.status
    );
    if let Some(description) = app.description.as_deref() {
        println!("    {description}");
    }
    if let Some(url) = app.source_url() {
        println!("    {url}");
    }
}

fn count_label(count: Option<usize>) -> String {
    count.map_or_else(|| "-".to_string(), |n| n.to_string())
}
