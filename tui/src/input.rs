//! Input handling for the Six Cities TUI.

use anyhow::{Result, anyhow};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};
use tokio::sync::mpsc;

use six_cities_engine::{App, CITIES, MAX_RATING, MIN_RATING, Route, TextField};

const INPUT_POLL_TIMEOUT: Duration = Duration::from_millis(25); // shutdown responsiveness
const INPUT_CHANNEL_CAPACITY: usize = 1024; // bounded: no OOM
const MAX_EVENTS_PER_FRAME: usize = 64; // never starve rendering

enum InputMsg {
    Event(Event),
    Error(String),
}

/// Reads terminal events on a blocking task and hands them to the UI loop.
pub struct InputPump {
    rx: mpsc::Receiver<InputMsg>,
    stop: Arc<AtomicBool>,
    join: Option<tokio::task::JoinHandle<()>>,
}

impl InputPump {
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel(INPUT_CHANNEL_CAPACITY);
        let stop = Arc::new(AtomicBool::new(false));
        let stop2 = stop.clone();

        let join = tokio::task::spawn_blocking(move || input_loop(&stop2, &tx));
        Self {
            rx,
            stop,
            join: Some(join),
        }
    }

    pub async fn shutdown(&mut self) {
        // Unblock the input thread if it is waiting on channel capacity.
        self.rx.close();

        self.stop.store(true, Ordering::Release);
        if let Some(join) = self.join.take() {
            let _ = tokio::time::timeout(Duration::from_secs(2), join).await;
        }
    }
}

impl Default for InputPump {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for InputPump {
    fn drop(&mut self) {
        // Best-effort stop if caller exits early; do not block in Drop.
        self.rx.close();
        self.stop.store(true, Ordering::Release);
    }
}

fn input_loop(stop: &AtomicBool, tx: &mpsc::Sender<InputMsg>) {
    while !stop.load(Ordering::Acquire) {
        match event::poll(INPUT_POLL_TIMEOUT) {
            Ok(true) => match event::read() {
                Ok(ev) => {
                    if tx.blocking_send(InputMsg::Event(ev)).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    let _ = tx.blocking_send(InputMsg::Error(e.to_string()));
                    break;
                }
            },
            Ok(false) => {}
            Err(e) => {
                let _ = tx.blocking_send(InputMsg::Error(e.to_string()));
                break;
            }
        }
    }
}

/// Drain queued input. Returns `true` when the app should quit.
pub fn handle_events(app: &mut App, input: &mut InputPump) -> Result<bool> {
    let mut processed = 0;
    while processed < MAX_EVENTS_PER_FRAME {
        let ev = match input.rx.try_recv() {
            Ok(InputMsg::Event(ev)) => ev,
            Ok(InputMsg::Error(msg)) => return Err(anyhow!("input error: {msg}")),
            Err(mpsc::error::TryRecvError::Empty) => break,
            Err(mpsc::error::TryRecvError::Disconnected) => {
                return Err(anyhow!("input pump disconnected"));
            }
        };
        if apply_event(app, ev) {
            return Ok(true);
        }
        processed += 1;
    }
    Ok(app.should_quit())
}

/// Apply one terminal event. Returns `true` when the app should quit.
pub fn apply_event(app: &mut App, event: Event) -> bool {
    match event {
        Event::Key(key) => {
            if matches!(key.kind, KeyEventKind::Release) {
                return app.should_quit();
            }
            if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                app.request_quit();
                return true;
            }

            if matches!(app.route(), Route::Login) {
                handle_login_key(app, key);
            } else if app.comment_form().editing {
                handle_comment_key(app, key);
            } else {
                handle_page_key(app, key);
            }
        }
        Event::Paste(text) => {
            if matches!(app.route(), Route::Login) {
                app.login_form_mut().focused_mut().enter_text(&text);
            } else if app.comment_form().editing {
                app.comment_form_mut().text.enter_text(&text);
            }
        }
        _ => {}
    }
    app.should_quit()
}

/// Cursor and deletion keys shared by every text field.
fn edit_field(field: &mut TextField, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => field.enter_char(c),
        KeyCode::Backspace => field.delete_char(),
        KeyCode::Delete => field.delete_char_forward(),
        KeyCode::Left => field.move_cursor_left(),
        KeyCode::Right => field.move_cursor_right(),
        KeyCode::Home => field.move_cursor_home(),
        KeyCode::End => field.move_cursor_end(),
        _ => return false,
    }
    true
}

fn handle_login_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.go_back(),
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            app.login_form_mut().focus_next();
        }
        KeyCode::Enter => app.submit_login(),
        KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.open_login_city();
        }
        _ => {
            edit_field(app.login_form_mut().focused_mut(), key);
        }
    }
}

fn handle_comment_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.stop_comment(),
        KeyCode::Enter => app.submit_comment(),
        KeyCode::Up => {
            let form = app.comment_form_mut();
            let next = form.rating.map_or(MAX_RATING, |r| (r + 1).min(MAX_RATING));
            form.set_rating(next);
        }
        KeyCode::Down => {
            let form = app.comment_form_mut();
            let next = form.rating.map_or(MIN_RATING, |r| r.saturating_sub(1).max(MIN_RATING));
            form.set_rating(next);
        }
        _ => {
            edit_field(&mut app.comment_form_mut().text, key);
        }
    }
}

fn handle_page_key(app: &mut App, key: KeyEvent) {
    // Global keys first.
    match key.code {
        KeyCode::Char('q') => {
            app.request_quit();
            return;
        }
        KeyCode::Esc | KeyCode::Backspace => {
            app.go_back();
            return;
        }
        KeyCode::Char('m') => {
            app.navigate(Route::Main);
            return;
        }
        KeyCode::Char('v') => {
            app.navigate(Route::Favorites);
            return;
        }
        KeyCode::Char('l') => {
            app.navigate(Route::Login);
            return;
        }
        KeyCode::Char('x') => {
            app.sign_out();
            return;
        }
        KeyCode::Char('r') => {
            app.reload();
            return;
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.select_prev();
            return;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.select_next();
            return;
        }
        KeyCode::Enter => {
            if matches!(app.route(), Route::NotFound) {
                app.navigate(Route::Main);
            } else {
                app.open_selected();
            }
            return;
        }
        KeyCode::Char('f') => {
            app.toggle_selected_favorite();
            return;
        }
        _ => {}
    }

    match app.route() {
        Route::Main => match key.code {
            KeyCode::Right | KeyCode::Tab | KeyCode::Char(']') => app.next_city(),
            KeyCode::Left | KeyCode::BackTab | KeyCode::Char('[') => app.prev_city(),
            KeyCode::Char('s') => app.cycle_sort(),
            KeyCode::Char(c @ '1'..='6') => {
                if let Some(index) = c.to_digit(10).and_then(|d| usize::try_from(d).ok()) {
                    app.set_city(CITIES[index - 1]);
                }
            }
            _ => {}
        },
        Route::Offer(_) => match key.code {
            KeyCode::Char('b') => app.toggle_current_favorite(),
            KeyCode::Char('c') => app.start_comment(),
            KeyCode::Char(c @ '1'..='5') => {
                if let Some(rating) = c.to_digit(10).and_then(|d| u8::try_from(d).ok()) {
                    app.comment_form_mut().set_rating(rating);
                }
            }
            _ => {}
        },
        Route::Login | Route::Favorites | Route::NotFound => {}
    }
}
