pub mod app;
pub mod event;
pub mod layout;
pub mod pager;

use std::io::{self, Stdout};
use std::sync::Arc;

use crossterm::{
    event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use crate::app::{AppContext, Result};
use crate::domain::ListingOptions;
use crate::query::{self, QueryOutcome, QueryState};

use self::app::{ActivePane, FeedRow, TuiApp, View};
use self::event::Action;

type Tui = Terminal<CrosstermBackend<Stdout>>;

pub async fn run(ctx: Arc<AppContext>) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, ctx).await;
    restore_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

async fn run_app(terminal: &mut Tui, ctx: Arc<AppContext>) -> Result<()> {
    let topics = ctx.topics()?;
    let mut app = TuiApp::new(
        topics,
        ctx.config.reddit.page_size,
        ctx.config.reddit.base_url.clone(),
    );

    let (tx, mut rx) = mpsc::unbounded_channel::<QueryOutcome>();
    let mut events = EventStream::new();

    loop {
        ensure_queries(&mut app, &ctx, &tx);

        terminal.draw(|frame| layout::render(frame, &mut app, &ctx.config.ui))?;

        tokio::select! {
            maybe_event = events.next() => {
                if let Some(Ok(Event::Key(key))) = maybe_event {
                    if key.kind == KeyEventKind::Press {
                        handle_key(&mut app, &ctx, key)?;
                    }
                }
            }
            Some(outcome) = rx.recv() => {
                match outcome {
                    QueryOutcome::Subreddits { key, result } => {
                        app.subreddits.resolve(&key, result);
                        app.clamp_result_selection();
                    }
                    QueryOutcome::Posts { key, result } => {
                        app.posts.resolve(&key, result);
                        app.clamp_feed_selection();
                    }
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Spawns a fetch for every query the current view needs that is not
/// already cached or in flight.
fn ensure_queries(app: &mut TuiApp, ctx: &Arc<AppContext>, tx: &mpsc::UnboundedSender<QueryOutcome>) {
    match app.view {
        View::Manage => {
            let key = app.results_key();
            if app.subreddits.begin(&key) {
                spawn_subreddit_query(
                    ctx,
                    tx,
                    key,
                    app.search.clone(),
                    app.results_pager.options().clone(),
                );
            }
        }
        View::Feed => {
            let wanted: Vec<(String, String, ListingOptions)> = app
                .topics
                .iter()
                .filter_map(|topic| {
                    let section = app.sections.get(topic)?;
                    if !section.open {
                        return None;
                    }
                    let key = query::posts_key(topic, section.pager.options());
                    Some((topic.clone(), key, section.pager.options().clone()))
                })
                .collect();

            for (topic, key, options) in wanted {
                if app.posts.begin(&key) {
                    spawn_post_query(ctx, tx, key, topic, options);
                }
            }
        }
    }
}

fn spawn_subreddit_query(
    ctx: &Arc<AppContext>,
    tx: &mpsc::UnboundedSender<QueryOutcome>,
    key: String,
    search: String,
    options: ListingOptions,
) {
    let api = ctx.api.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = api
            .subreddits(&search, &options)
            .await
            .map_err(|e| e.to_string());
        let _ = tx.send(QueryOutcome::Subreddits { key, result });
    });
}

fn spawn_post_query(
    ctx: &Arc<AppContext>,
    tx: &mpsc::UnboundedSender<QueryOutcome>,
    key: String,
    topic: String,
    options: ListingOptions,
) {
    let api = ctx.api.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = api.posts(&topic, &options).await.map_err(|e| e.to_string());
        let _ = tx.send(QueryOutcome::Posts { key, result });
    });
}

fn handle_key(app: &mut TuiApp, ctx: &AppContext, key: KeyEvent) -> Result<()> {
    // The search box grabs every key while it is active.
    if app.in_search_input() {
        match key.code {
            KeyCode::Esc => app.cancel_search(),
            KeyCode::Enter => app.submit_search(),
            KeyCode::Backspace => app.search_pop(),
            KeyCode::Char(c) => app.search_push(c),
            _ => {}
        }
        return Ok(());
    }

    match Action::from(key) {
        Action::Quit => app.should_quit = true,
        Action::MoveUp => app.move_up(),
        Action::MoveDown => app.move_down(),
        Action::NextPane => {
            if app.view == View::Manage {
                app.active_pane = app.active_pane.next();
            }
        }
        Action::PrevPane => {
            if app.view == View::Manage {
                app.active_pane = app.active_pane.prev();
            }
        }
        Action::FeedView => app.view = View::Feed,
        Action::ManageView => app.view = View::Manage,
        Action::Search => {
            if app.view == View::Manage {
                app.start_search();
            }
        }
        Action::Select => handle_select(app, ctx)?,
        Action::Remove => handle_remove(app, ctx)?,
        Action::NextPage => handle_page(app, PageDir::Next),
        Action::PrevPage => handle_page(app, PageDir::Prev),
        Action::OpenInBrowser => open_selected(app),
        Action::Reload => reload_visible(app),
        Action::ClearStatus => app.clear_status(),
        Action::None => {}
    }

    Ok(())
}

fn handle_select(app: &mut TuiApp, ctx: &AppContext) -> Result<()> {
    match app.view {
        View::Feed => {
            let Some(row) = app.selected_feed_row() else {
                return Ok(());
            };
            match row {
                FeedRow::Header { topic, .. } => app.toggle_section(&topic),
                FeedRow::Post { topic, index, .. } => app.toggle_post(&topic, index),
                _ => {}
            }
        }
        View::Manage => match app.active_pane {
            ActivePane::Topics => return handle_remove(app, ctx),
            ActivePane::Results => {
                let Some(name) = app.selected_result().map(|s| s.display_name.clone()) else {
                    return Ok(());
                };
                if app.add_topic(&name) {
                    ctx.store.save(&app.topics)?;
                    app.set_status(format!("Added r/{name}"));
                } else {
                    app.set_status(format!("r/{name} is already in the feed"));
                }
            }
        },
    }
    Ok(())
}

fn handle_remove(app: &mut TuiApp, ctx: &AppContext) -> Result<()> {
    if app.view != View::Manage || app.active_pane != ActivePane::Topics {
        return Ok(());
    }
    let Some(topic) = app.selected_topic().cloned() else {
        return Ok(());
    };
    if app.remove_topic(&topic) {
        ctx.store.save(&app.topics)?;
        app.set_status(format!("Removed r/{topic}"));
    }
    Ok(())
}

enum PageDir {
    Next,
    Prev,
}

/// Turns the page of whichever listing the cursor is on. A direction
/// whose cursor is missing from the current page does nothing, matching
/// the pager controls only being offered when the cursor exists.
fn handle_page(app: &mut TuiApp, dir: PageDir) {
    match app.view {
        View::Feed => {
            let Some(topic) = app
                .selected_feed_row()
                .and_then(|row| row.topic().map(str::to_string))
            else {
                return;
            };
            let (before, after) = match app.current_posts(&topic) {
                Some(QueryState::Ready(page)) => (page.before.clone(), page.after.clone()),
                _ => return,
            };

            let Some(section) = app.sections.get_mut(&topic) else {
                return;
            };
            match dir {
                PageDir::Next if after.is_some() => section.pager.turn(None, after),
                PageDir::Prev if before.is_some() => section.pager.turn(before, None),
                _ => return,
            }
            // Expansion indexes into the page that just changed.
            section.expanded.clear();
            app.clamp_feed_selection();
        }
        View::Manage => {
            let (before, after) = match app.current_results() {
                Some(QueryState::Ready(page)) => (page.before.clone(), page.after.clone()),
                _ => return,
            };

            match dir {
                PageDir::Next if after.is_some() => app.results_pager.turn(None, after),
                PageDir::Prev if before.is_some() => app.results_pager.turn(before, None),
                _ => return,
            }
            app.result_index = 0;
            app.result_list_state.select(Some(0));
        }
    }
}

fn open_selected(app: &mut TuiApp) {
    if app.view != View::Feed {
        return;
    }
    let Some(FeedRow::Post {
        topic,
        index,
        expanded,
    }) = app.selected_feed_row()
    else {
        return;
    };
    let Some(post) = app.post_at(&topic, index) else {
        return;
    };

    let link = match post.external_url(&app.base_url) {
        Some(url) if expanded => url.to_string(),
        _ => post.comments_url(&app.base_url),
    };

    if let Err(e) = open::that(&link) {
        app.set_status(format!("Failed to open browser: {}", e));
    } else {
        app.set_status(format!("Opened {link}"));
    }
}

/// Drops every cached page behind the visible queries, deeper pages
/// included, so the next pass of the loop fetches them again.
fn reload_visible(app: &mut TuiApp) {
    match app.view {
        View::Feed => {
            let prefixes: Vec<String> = app
                .topics
                .iter()
                .filter_map(|topic| {
                    let section = app.sections.get(topic)?;
                    section.open.then(|| query::posts_prefix(topic))
                })
                .collect();
            for prefix in prefixes {
                app.posts.invalidate_prefix(&prefix);
            }
            app.set_status("Reloading feed...".to_string());
        }
        View::Manage => {
            let prefix = query::subreddits_prefix(&app.search);
            app.subreddits.invalidate_prefix(&prefix);
            app.set_status("Reloading subreddits...".to_string());
        }
    }
}
