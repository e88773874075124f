use crate::app::{AppContext, Result};
use crate::domain::{ListingOptions, ListingPage, Post};
use crate::reddit;
use crate::sanitize;

pub fn add_topic(ctx: &AppContext, topic: &str) -> Result<()> {
    let mut topics = ctx.topics()?;
    if topics.iter().any(|t| t == topic) {
        println!("Already in feed: r/{}", topic);
        return Ok(());
    }

    topics.push(topic.to_string());
    ctx.store.save(&topics)?;
    println!("Added r/{}", topic);
    Ok(())
}

pub fn remove_topic(ctx: &AppContext, topic: &str) -> Result<()> {
    let mut topics = ctx.topics()?;
    let before_len = topics.len();
    topics.retain(|t| t != topic);

    if topics.len() == before_len {
        println!("Not in feed: r/{}", topic);
        return Ok(());
    }

    ctx.store.save(&topics)?;
    println!("Removed r/{}", topic);
    Ok(())
}

pub fn list_topics(ctx: &AppContext) -> Result<()> {
    let topics = ctx.topics()?;

    if topics.is_empty() {
        println!("Feed is empty");
        return Ok(());
    }

    for topic in topics {
        println!("r/{}", topic);
    }
    Ok(())
}

pub async fn search_subreddits(
    ctx: &AppContext,
    query: &str,
    options: &ListingOptions,
) -> Result<()> {
    let topics = ctx.topics()?;
    let page = ctx.api.subreddits(query, options).await?;

    if page.children.is_empty() {
        println!("No subreddits found");
        return Ok(());
    }

    for sub in page.items() {
        let marker = if topics.iter().any(|t| t == &sub.display_name) {
            "*"
        } else {
            " "
        };

        let mut line = format!("{} r/{}", marker, sub.display_name);
        if let Some(subscribers) = sub.subscribers {
            line.push_str(&format!(" ({} subscribers)", subscribers));
        }
        println!("{}", line);

        let description = html_escape::decode_html_entities(&sub.description);
        if let Some(first) = description.lines().find(|l| !l.trim().is_empty()) {
            println!("    {}", first.trim());
        }
    }

    print_cursors(&page.before, &page.after);
    Ok(())
}

pub async fn list_posts(ctx: &AppContext, subreddit: &str, options: &ListingOptions) -> Result<()> {
    let page = ctx.api.posts(subreddit, options).await?;
    print_posts(ctx, subreddit, &page);
    Ok(())
}

pub async fn show_feed(ctx: &AppContext) -> Result<()> {
    let topics = ctx.topics()?;
    let feeds = reddit::load_feeds(ctx.api.as_ref(), &topics).await?;

    for (topic, page) in &feeds {
        print_posts(ctx, topic, page);
        println!();
    }
    Ok(())
}

fn print_posts(ctx: &AppContext, subreddit: &str, page: &ListingPage<Post>) {
    println!("r/{}", subreddit);

    if page.children.is_empty() {
        println!("  No posts");
    }

    let base = &ctx.config.reddit.base_url;
    for post in page.items() {
        println!("  {}", post.title);
        println!("    By: u/{}  Comments: {}", post.author, post.num_comments);
        println!("    {}", post.comments_url(base));
        if let Some(url) = post.external_url(base) {
            println!("    {}", url);
        }
        if let Some(html) = &post.selftext_html {
            let body = sanitize::clean_html(&sanitize::decode_entities(html));
            for line in body.lines().take(6) {
                println!("      {}", line);
            }
        }
    }

    print_cursors(&page.before, &page.after);
}

fn print_cursors(before: &Option<String>, after: &Option<String>) {
    if before.is_none() && after.is_none() {
        return;
    }

    println!();
    if let Some(before) = before {
        println!("  --before {}", before);
    }
    if let Some(after) = after {
        println!("  --after {}", after);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn ctx() -> AppContext {
        AppContext::in_memory(Config::default()).unwrap()
    }

    #[test]
    fn add_materializes_defaults_alongside_the_new_topic() {
        let ctx = ctx();

        add_topic(&ctx, "rust").unwrap();

        assert_eq!(ctx.topics().unwrap(), ["news", "rust"]);
    }

    #[test]
    fn duplicate_add_changes_nothing() {
        let ctx = ctx();

        add_topic(&ctx, "rust").unwrap();
        add_topic(&ctx, "rust").unwrap();

        assert_eq!(ctx.topics().unwrap(), ["news", "rust"]);
    }

    #[test]
    fn remove_of_an_absent_topic_changes_nothing() {
        let ctx = ctx();
        add_topic(&ctx, "rust").unwrap();

        remove_topic(&ctx, "askscience").unwrap();

        assert_eq!(ctx.topics().unwrap(), ["news", "rust"]);
    }

    #[test]
    fn removing_the_last_topic_revives_the_defaults() {
        let ctx = ctx();

        // The only topic is the default; removing it empties the slot,
        // and an empty slot reads back as the defaults again.
        remove_topic(&ctx, "news").unwrap();

        assert_eq!(ctx.topics().unwrap(), ["news"]);
    }
}
