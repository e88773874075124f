use chrono::{DateTime, Utc};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::config::UiConfig;
use crate::domain::Subreddit;
use crate::query::QueryState;
use crate::sanitize;
use crate::tui::app::{ActivePane, FeedRow, TuiApp, View};

pub fn render(frame: &mut Frame, app: &mut TuiApp, colors: &UiConfig) {
    match app.view {
        View::Feed => {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Min(10),   // Feed rows
                    Constraint::Length(1), // Status bar
                ])
                .split(frame.area());

            render_feed(frame, app, chunks[0], colors);
            render_status_bar(frame, app, chunks[1], colors);
        }
        View::Manage => {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(8), // Active topics
                    Constraint::Length(3), // Search box
                    Constraint::Min(10),   // Results
                    Constraint::Length(1), // Status bar
                ])
                .split(frame.area());

            render_topics_pane(frame, app, chunks[0], colors);
            render_search_box(frame, app, chunks[1], colors);
            render_results_pane(frame, app, chunks[2], colors);
            render_status_bar(frame, app, chunks[3], colors);
        }
    }
}

fn render_feed(frame: &mut Frame, app: &mut TuiApp, area: Rect, colors: &UiConfig) {
    let now = Utc::now();
    let rows = app.feed_rows();
    let items: Vec<ListItem> = rows
        .iter()
        .map(|row| feed_list_item(app, row, now, colors))
        .collect();

    let title = format!(" Feed ({}) ", app.topics.len());
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.active_border));

    let highlight_style = Style::default()
        .bg(colors.selection_bg)
        .fg(colors.selection_fg)
        .add_modifier(Modifier::BOLD);

    let list = List::new(items)
        .block(block)
        .highlight_style(highlight_style)
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut app.feed_list_state);
}

fn feed_list_item(
    app: &TuiApp,
    row: &FeedRow,
    now: DateTime<Utc>,
    colors: &UiConfig,
) -> ListItem<'static> {
    match row {
        FeedRow::Header { topic, open } => {
            let marker = if *open { "▾" } else { "▸" };
            ListItem::new(Line::from(Span::styled(
                format!("{marker} r/{topic}"),
                Style::default()
                    .fg(colors.topic_header)
                    .add_modifier(Modifier::BOLD),
            )))
        }
        FeedRow::Loading { .. } => ListItem::new(Line::from(Span::styled(
            "  Loading...".to_string(),
            Style::default().fg(colors.post_meta),
        ))),
        FeedRow::Error { message, .. } => ListItem::new(Line::from(Span::styled(
            format!("  Error loading posts \"{message}\""),
            Style::default().fg(colors.error_fg),
        ))),
        FeedRow::Post {
            topic,
            index,
            expanded,
        } => post_list_item(app, topic, *index, *expanded, now, colors),
        FeedRow::Pager {
            page,
            has_prev,
            has_next,
            ..
        } => {
            let mut hints = Vec::new();
            if *has_prev {
                hints.push("p:Prev");
            }
            if *has_next {
                hints.push("n:Next");
            }
            let text = if hints.is_empty() {
                format!("  Page {page}")
            } else {
                format!("  Page {page}  {}", hints.join("  "))
            };
            ListItem::new(Line::from(Span::styled(
                text,
                Style::default().fg(colors.post_meta),
            )))
        }
        FeedRow::Empty => ListItem::new("Feed is empty".to_string()),
    }
}

fn post_list_item(
    app: &TuiApp,
    topic: &str,
    index: usize,
    expanded: bool,
    now: DateTime<Utc>,
    colors: &UiConfig,
) -> ListItem<'static> {
    let Some(post) = app.post_at(topic, index) else {
        return ListItem::new(String::new());
    };

    let marker = if expanded { "▾" } else { "▸" };
    let mut lines = vec![Line::from(Span::styled(
        format!("  {marker} {}", post.title),
        Style::default().add_modifier(Modifier::BOLD),
    ))];

    let mut meta = format!("      By: u/{}  Comments: {}", post.author, post.num_comments);
    if let Some(age) = post.age_label(now) {
        meta.push_str("  ");
        meta.push_str(&age);
    }
    lines.push(Line::from(Span::styled(
        meta,
        Style::default().fg(colors.post_meta),
    )));

    if expanded {
        if let Some(url) = post.external_url(&app.base_url) {
            lines.push(Line::from(Span::styled(
                format!("      {url}"),
                Style::default().fg(colors.link),
            )));
        }
        if let Some(html) = &post.selftext_html {
            let body = sanitize::clean_html(&sanitize::decode_entities(html));
            for body_line in body.lines() {
                lines.push(Line::from(format!("      {body_line}")));
            }
        }
    }

    ListItem::new(lines)
}

fn render_topics_pane(frame: &mut Frame, app: &mut TuiApp, area: Rect, colors: &UiConfig) {
    let is_active = app.active_pane == ActivePane::Topics;

    let items: Vec<ListItem> = app
        .topics
        .iter()
        .map(|topic| ListItem::new(format!("r/{topic}")))
        .collect();

    let title = format!(
        " Active Topics ({}) [{}/{}] ",
        app.topics.len(),
        app.topic_index + 1,
        app.topics.len().max(1)
    );

    let list = List::new(items)
        .block(pane_block(title, is_active, colors))
        .highlight_style(highlight_style(is_active, colors))
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut app.topic_list_state);
}

fn render_search_box(frame: &mut Frame, app: &TuiApp, area: Rect, colors: &UiConfig) {
    let (text, border_color) = match &app.search_input {
        Some(buf) => (format!("{buf}█"), colors.active_border),
        None if app.search.is_empty() => ("search...".to_string(), colors.inactive_border),
        None => (app.search.clone(), colors.inactive_border),
    };

    let block = Block::default()
        .title(" Search (/) ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    frame.render_widget(Paragraph::new(text).block(block), area);
}

fn render_results_pane(frame: &mut Frame, app: &mut TuiApp, area: Rect, colors: &UiConfig) {
    let is_active = app.active_pane == ActivePane::Results;

    let (items, title) = match app.current_results() {
        None | Some(QueryState::Loading) => (
            vec![ListItem::new(Span::styled(
                "Loading...".to_string(),
                Style::default().fg(colors.post_meta),
            ))],
            " Subreddits ".to_string(),
        ),
        Some(QueryState::Failed(message)) => (
            vec![ListItem::new(Span::styled(
                format!("Error loading subreddits \"{message}\""),
                Style::default().fg(colors.error_fg),
            ))],
            " Subreddits ".to_string(),
        ),
        Some(QueryState::Ready(page)) => {
            let items = page
                .items()
                .map(|sub| result_list_item(app, sub, colors))
                .collect();
            let title = format!(
                " Subreddits ({}) [{}/{}] page {} ",
                page.children.len(),
                app.result_index + 1,
                page.children.len().max(1),
                app.results_pager.page()
            );
            (items, title)
        }
    };

    let list = List::new(items)
        .block(pane_block(title, is_active, colors))
        .highlight_style(highlight_style(is_active, colors))
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut app.result_list_state);
}

fn result_list_item(app: &TuiApp, sub: &Subreddit, colors: &UiConfig) -> ListItem<'static> {
    let saved = app.topics.iter().any(|t| t == &sub.display_name);

    let name_style = if saved {
        Style::default().fg(colors.saved_topic)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };
    let marker = if saved { "*" } else { " " };

    let mut spans = vec![Span::styled(
        format!("{marker} r/{}", sub.display_name),
        name_style,
    )];
    if saved {
        spans.push(Span::styled(
            "  (added)".to_string(),
            Style::default().fg(colors.post_meta),
        ));
    }
    if let Some(subscribers) = sub.subscribers {
        spans.push(Span::styled(
            format!("  {subscribers} subscribers"),
            Style::default().fg(colors.post_meta),
        ));
    }

    let mut lines = vec![Line::from(spans)];

    // Descriptions are markdown; show the first non-blank line as text.
    let description = html_escape::decode_html_entities(&sub.description);
    if let Some(first_line) = description.lines().find(|l| !l.trim().is_empty()) {
        lines.push(Line::from(Span::styled(
            format!("    {}", first_line.trim()),
            Style::default().fg(colors.post_meta),
        )));
    }

    ListItem::new(lines)
}

fn pane_block(title: String, is_active: bool, colors: &UiConfig) -> Block<'static> {
    let border_color = if is_active {
        colors.active_border
    } else {
        colors.inactive_border
    };
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
}

fn highlight_style(is_active: bool, colors: &UiConfig) -> Style {
    if is_active {
        Style::default()
            .bg(colors.selection_bg)
            .fg(colors.selection_fg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .bg(colors.inactive_border)
            .fg(colors.status_fg)
    }
}

fn render_status_bar(frame: &mut Frame, app: &TuiApp, area: Rect, colors: &UiConfig) {
    let status = if app.in_search_input() {
        "Type to search  Enter:Submit  Esc:Cancel".to_string()
    } else if let Some(ref msg) = app.status_message {
        msg.clone()
    } else {
        match app.view {
            View::Feed => {
                "j/k:Nav  Enter:Toggle  n/p:Page  o:Open  R:Reload  m:Manage  q:Quit".to_string()
            }
            View::Manage => {
                "j/k:Nav  Tab:Pane  Enter:Add/Remove  /:Search  n/p:Page  f:Feed  q:Quit"
                    .to_string()
            }
        }
    };

    let paragraph =
        Paragraph::new(status).style(Style::default().fg(colors.status_fg).bg(colors.status_bg));

    frame.render_widget(paragraph, area);
}
