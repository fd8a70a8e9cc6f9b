use pulldown_cmark::{html, Event, Options, Parser, TagEnd};

use crate::models::app_entry::AppEntry;
use crate::models::post::BlogPost;

fn options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_SMART_PUNCTUATION
}

/// Render a raw Markdown string to sanitized HTML.
///
/// Supports GitHub Flavored Markdown (GFM) features: tables,
/// footnotes, strikethrough, task lists, and smart punctuation.
/// Raw HTML in post bodies goes through `ammonia` before it is returned.
pub fn render_markdown(raw: &str) -> String {
    let parser = Parser::new_ext(raw, options());
    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);
    ammonia::clean(&html_output)
}

/// Strip markdown syntax and keep at most `max_len` bytes of text.
///
/// Blocks are joined with single spaces. The cut always lands on a
/// character boundary.
pub fn plain_text_preview(raw: &str, max_len: usize) -> String {
    let parser = Parser::new_ext(raw, options());
    let mut text = String::new();

    for event in parser {
        match event {
            Event::Text(t) | Event::Code(t) => {
                text.push_str(&t);
                if text.len() >= max_len * 2 {
                    break;
                }
            }
            Event::SoftBreak | Event::HardBreak => text.push(' '),
            Event::End(
                TagEnd::Paragraph
                | TagEnd::Heading(_)
                | TagEnd::Item
                | TagEnd::TableCell
                | TagEnd::CodeBlock
                | TagEnd::BlockQuote(..),
            ) => text.push(' '),
            _ => {}
        }
    }

    let mut text = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if text.len() > max_len {
        let mut cut = max_len;
        while !text.is_char_boundary(cut) {
            cut -= 1;
        }
        text.truncate(cut);
    }
    text.trim_end().to_string()
}

/// Render the single-post page body served at `/blog/post/{id}`.
pub fn render_post_article(post: &BlogPost) -> String {
    let mut meta = Vec::new();
    meta.push(ammonia::clean_text(
        post.category.as_deref().unwrap_or("Uncategorized"),
    ));
    if let Some(author) = post.author.as_deref() {
        meta.push(ammonia::clean_text(author));
    }
    if let Some(created_at) = post.created_at {
        meta.push(created_at.format("%Y-%m-%d").to_string());
    }

    let tags: String = post
        .tag_list()
        .into_iter()
        .map(|tag| format!("<span class=\"blog-post-tag\">#{}</span>", ammonia::clean_text(tag)))
        .collect();

    format!(
        "<article class=\"blog-post\">\n<h1>{}</h1>\n<div class=\"blog-post-meta\">{}</div>\n<div class=\"blog-post-content\">{}</div>\n<div class=\"blog-post-tags\">{}</div>\n</article>\n",
        ammonia::clean_text(&post.title),
        meta.join(" · "),
        render_markdown(post.content.as_deref().unwrap_or_default()),
        tags,
    )
}

/// Render the app detail page body served at `/apps/app/{id}`.
pub fn render_app_article(app: &AppEntry) -> String {
    let mut meta = vec![
        ammonia::clean_text(app.category.as_deref().unwrap_or("Uncategorized")),
        app.status.to_string(),
    ];
    if let Some(technology) = app.technology.as_deref() {
        meta.push(ammonia::clean_text(technology));
    }

    let mut links = String::new();
    if let Some(url) = app.app_url.as_deref().filter(|u| !u.is_empty() && *u != "#") {
        links.push_str(&format!(
            "<a class=\"app-link\" href=\"{}\">Open app</a>",
            ammonia::clean_text(url)
        ));
    }
    if let Some(url) = app.source_url() {
        links.push_str(&format!(
            "<a class=\"app-source\" href=\"{}\">Source</a>",
            ammonia::clean_text(url)
        ));
    }

    format!(
        "<article class=\"app-detail\">\n<h1>{}</h1>\n<div class=\"app-meta\">{}</div>\n<div class=\"app-description\">{}</div>\n<div class=\"app-links\">{}</div>\n</article>\n",
        ammonia::clean_text(&app.name),
        meta.join(" · "),
        render_markdown(app.description.as_deref().unwrap_or_default()),
        links,
    )
}
