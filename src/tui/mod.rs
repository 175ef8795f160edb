pub mod app;
pub mod event;
pub mod layout;

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use crossterm::event::KeyCode;
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc::{self, UnboundedSender};

use crate::app::{AppContext, Result};
use crate::domain::Category;
use crate::list::{FetchOutcome, ListController, PendingFetch, ViewState};

use self::app::{InputMode, Screen, TuiApp};
use self::event::{Action, AppEvent, EventHandler};

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

/// Run a fetch on its own task; the outcome comes back through the channel
/// and is folded into the controller on the next loop turn. The controller's
/// generation guard discards anything a newer fetch has superseded.
fn spawn_fetch(ctx: &Arc<AppContext>, tx: &UnboundedSender<FetchOutcome>, fetch: PendingFetch) {
    let client = ctx.client.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let outcome = fetch.execute(client.as_ref()).await;
        let _ = tx.send(outcome);
    });
}

async fn run_app(terminal: &mut Tui, ctx: Arc<AppContext>) -> Result<()> {
    let list = ListController::new(ctx.config.country.clone(), ctx.config.page_size);
    let mut app = TuiApp::new(list);
    let event_handler = EventHandler::new(Duration::from_millis(100));
    let (tx, mut rx) = mpsc::unbounded_channel();

    // Initial page-1 fetch on mount
    let fetch = app.list.start();
    spawn_fetch(&ctx, &tx, fetch);

    loop {
        while let Ok(outcome) = rx.try_recv() {
            app.list.apply(outcome);
            app.clamp_selection();
        }

        terminal.draw(|frame| layout::render(frame, &app))?;

        if let AppEvent::Key(key) = event_handler.next()? {
            app.clear_status();
            match app.input_mode {
                InputMode::Search => handle_search_key(&mut app, &ctx, &tx, key.code),
                InputMode::Normal => handle_action(&mut app, &ctx, &tx, Action::from(key)),
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn handle_search_key(
    app: &mut TuiApp,
    ctx: &Arc<AppContext>,
    tx: &UnboundedSender<FetchOutcome>,
    code: KeyCode,
) {
    match code {
        KeyCode::Enter => {
            app.input_mode = InputMode::Normal;
            let fetch = app.list.submit_search(app.search_input.clone());
            spawn_fetch(ctx, tx, fetch);
        }
        KeyCode::Esc => {
            // Cancel the edit, keep whatever query was active before
            app.input_mode = InputMode::Normal;
            app.search_input = app.list.search_query.clone();
        }
        KeyCode::Backspace => {
            app.search_input.pop();
        }
        KeyCode::Char(c) => {
            app.search_input.push(c);
        }
        _ => {}
    }
}

fn handle_action(
    app: &mut TuiApp,
    ctx: &Arc<AppContext>,
    tx: &UnboundedSender<FetchOutcome>,
    action: Action,
) {
    match action {
        Action::Quit => {
            app.should_quit = true;
        }
        Action::MoveUp => {
            app.move_up();
        }
        Action::MoveDown => {
            let at_end = app.move_down();
            if at_end && app.screen == Screen::List {
                if let Some(fetch) = app.list.load_more() {
                    spawn_fetch(ctx, tx, fetch);
                }
            }
        }
        Action::Select => {
            if app.screen == Screen::List {
                app.open_detail();
            }
        }
        Action::Back => match app.screen {
            Screen::Detail => app.close_detail(),
            Screen::List => {
                // Esc on the list clears an active search
                if !app.list.search_query.trim().is_empty() {
                    app.search_input.clear();
                    let fetch = app.list.clear_search();
                    spawn_fetch(ctx, tx, fetch);
                }
            }
        },
        Action::OpenSearch => {
            if app.screen == Screen::List {
                app.input_mode = InputMode::Search;
            }
        }
        Action::NextCategory | Action::PrevCategory => {
            if app.screen == Screen::List {
                let next = if action == Action::NextCategory {
                    Category::cycle_next(app.list.selected_category)
                } else {
                    Category::cycle_prev(app.list.selected_category)
                };
                // While a search is active the category is stored silently
                // and takes effect once the search is cleared.
                if let Some(fetch) = app.list.select_category(next) {
                    spawn_fetch(ctx, tx, fetch);
                }
            }
        }
        Action::OpenInBrowser => {
            if let Err(e) = app.open_selected_in_browser() {
                app.set_status(format!("Failed to open browser: {e}"));
            }
        }
        Action::Refresh => {
            if app.screen == Screen::List {
                let fetch = app.list.refresh();
                spawn_fetch(ctx, tx, fetch);
            }
        }
        Action::Retry => {
            if app.screen == Screen::List
                && matches!(app.list.view_state(), ViewState::Error(_))
            {
                let fetch = app.list.retry();
                spawn_fetch(ctx, tx, fetch);
            }
        }
        Action::None => {}
    }
}
