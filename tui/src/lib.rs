//! TUI rendering for Six Cities using ratatui.

mod input;
mod listing;
mod offer_page;
mod theme;

pub use input::{InputPump, apply_event, handle_events};
pub use theme::{Glyphs, Palette, glyphs, palette, spinner_frame, stars, styles};

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap},
};
use unicode_width::UnicodeWidthStr;

use six_cities_engine::{App, LoginField, Route, TextField, selectors};
use six_cities_utils::sanitize_display_text;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let options = app.ui_options();
    let palette = palette(options);
    let glyphs = glyphs(options);
    // Clear with background color
    let bg_block = Block::default().style(Style::default().bg(palette.bg_dark));
    frame.render_widget(bg_block, frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(1),    // Page
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    draw_header(frame, app, chunks[0], &palette, &glyphs);

    if app.is_page_loading() {
        draw_spinner(frame, app, chunks[1], &palette);
    } else {
        match app.route() {
            Route::Main => listing::draw_main(frame, app, chunks[1], &palette, &glyphs),
            Route::Favorites => listing::draw_favorites(frame, app, chunks[1], &palette, &glyphs),
            Route::Offer(_) => offer_page::draw(frame, app, chunks[1], &palette, &glyphs),
            Route::Login => draw_login(frame, app, chunks[1], &palette),
            Route::NotFound => draw_not_found(frame, chunks[1], &palette),
        }
    }

    draw_status_bar(frame, app, chunks[2], &palette);
}

/// Server-provided text with control sequences stripped.
pub(crate) fn clean(text: &str) -> String {
    sanitize_display_text(text).into_owned()
}

pub(crate) fn truncate_with_ellipsis(raw: &str, max: usize) -> String {
    let max = max.max(3);
    let trimmed = raw.trim();
    if trimmed.chars().count() <= max {
        trimmed.to_string()
    } else {
        let head: String = trimmed.chars().take(max - 3).collect();
        format!("{head}...")
    }
}

pub(crate) fn hint_spans<'a>(hints: &[(&'a str, &'a str)], palette: &Palette) -> Vec<Span<'a>> {
    hints
        .iter()
        .flat_map(|(key, label)| {
            [
                Span::styled(*key, styles::key_highlight(palette)),
                Span::styled(format!(" {label}  "), styles::key_hint(palette)),
            ]
        })
        .collect()
}

pub(crate) fn panel<'a>(title: &'a str, palette: &Palette) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.bg_border))
        .title(Span::styled(format!(" {title} "), styles::title(palette)))
        .padding(Padding::horizontal(1))
        .style(Style::default().bg(palette.bg_panel))
}

fn draw_header(frame: &mut Frame, app: &App, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    let state = app.state();
    let left = Line::from(vec![
        Span::styled(
            "six cities",
            Style::default()
                .fg(palette.primary)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {} {}", glyphs.separator, app.route().title()),
            Style::default().fg(palette.text_secondary),
        ),
    ]);

    let right = if selectors::select_is_authorized(state) {
        let email = selectors::select_user_email(state).map(clean).unwrap_or_default();
        Line::from(vec![
            Span::styled(email, Style::default().fg(palette.text_primary)),
            Span::styled(
                format!(" {} ", glyphs.separator),
                Style::default().fg(palette.text_muted),
            ),
            Span::styled(glyphs.bookmark_on, Style::default().fg(palette.highlight)),
            Span::styled(
                format!(" {}", selectors::select_favorite_count(state)),
                Style::default().fg(palette.text_primary),
            ),
            Span::styled("  Sign out", styles::key_hint(palette)),
        ])
    } else {
        Line::from(Span::styled("Sign in", Style::default().fg(palette.accent)))
    };

    let right_width = u16::try_from(right.width()).unwrap_or(area.width).min(area.width);
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(right_width)])
        .split(area);
    frame.render_widget(Paragraph::new(left), cols[0]);
    frame.render_widget(Paragraph::new(right).alignment(Alignment::Right), cols[1]);
}

fn draw_spinner(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let spinner = spinner_frame(app.tick_count(), app.ui_options());
    let text = Paragraph::new(Line::from(vec![
        Span::styled(spinner, Style::default().fg(palette.primary)),
        Span::styled(" Loading...", Style::default().fg(palette.text_secondary)),
    ]))
    .alignment(Alignment::Center);
    let y = area.y + area.height / 2;
    frame.render_widget(text, Rect::new(area.x, y, area.width, 1));
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let mut spans = vec![Span::raw(" ")];
    if let Some(notice) = app.notice() {
        spans.push(Span::styled(
            clean(notice),
            Style::default().fg(palette.warning),
        ));
        spans.push(Span::raw("  "));
    }
    spans.extend(hint_spans(key_hints(app), palette));
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn key_hints(app: &App) -> &'static [(&'static str, &'static str)] {
    match app.route() {
        Route::Login => &[
            ("Tab", "next field"),
            ("Enter", "sign in"),
            ("Ctrl+R", "browse city"),
            ("Esc", "back"),
        ],
        Route::Offer(_) if app.comment_form().editing => &[
            ("Enter", "submit"),
            ("Up/Down", "rating"),
            ("Esc", "done"),
        ],
        Route::Offer(_) => &[
            ("b", "bookmark"),
            ("c", "review"),
            ("j/k", "nearby"),
            ("Enter", "open"),
            ("Esc", "back"),
            ("q", "quit"),
        ],
        Route::Main => &[
            ("Left/Right", "city"),
            ("s", "sort"),
            ("Enter", "open"),
            ("f", "bookmark"),
            ("v", "favorites"),
            ("l", "sign in"),
            ("x", "sign out"),
            ("q", "quit"),
        ],
        Route::Favorites => &[
            ("Enter", "open"),
            ("f", "remove"),
            ("m", "main"),
            ("Esc", "back"),
            ("q", "quit"),
        ],
        Route::NotFound => &[("Enter", "go to main page"), ("q", "quit")],
    }
}

/// A text field rendered on one line, with the cursor placed when focused.
fn draw_field(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    field: &TextField,
    masked: bool,
    focused: bool,
    palette: &Palette,
) {
    let shown = if masked {
        "*".repeat(field.grapheme_count())
    } else {
        field.text().to_string()
    };
    let border = if focused {
        palette.accent
    } else {
        palette.bg_border
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border))
        .title(Span::styled(
            format!(" {label} "),
            Style::default().fg(palette.text_secondary),
        ));
    let inner = block.inner(area);
    frame.render_widget(
        Paragraph::new(Span::styled(
            shown.clone(),
            Style::default().fg(palette.text_primary),
        ))
        .block(block),
        area,
    );

    if focused {
        let before = if masked {
            "*".repeat(field.cursor())
        } else {
            field.before_cursor().to_string()
        };
        let offset = u16::try_from(before.width()).unwrap_or(u16::MAX);
        let x = inner.x.saturating_add(offset).min(inner.right().saturating_sub(1));
        frame.set_cursor_position((x, inner.y));
    }
}

fn draw_login(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let form = app.login_form();
    let width = area.width.min(52);
    let x = area.x + (area.width - width) / 2;
    let column = Rect::new(x, area.y, width, area.height.min(14));

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Title
            Constraint::Length(3), // Email
            Constraint::Length(3), // Password
            Constraint::Length(2), // Error
            Constraint::Length(2), // City shortcut
        ])
        .split(column);

    frame.render_widget(
        Paragraph::new(Span::styled("Sign in", styles::title(palette))),
        rows[0],
    );
    draw_field(
        frame,
        rows[1],
        "E-mail",
        &form.email,
        false,
        form.focus == LoginField::Email,
        palette,
    );
    draw_field(
        frame,
        rows[2],
        "Password",
        &form.password,
        true,
        form.focus == LoginField::Password,
        palette,
    );

    if let Some(error) = form
        .error
        .as_deref()
        .or_else(|| selectors::select_login_error(app.state()))
    {
        frame.render_widget(
            Paragraph::new(Span::styled(
                clean(error),
                Style::default().fg(palette.error),
            ))
            .wrap(Wrap { trim: true }),
            rows[3],
        );
    }

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("Ctrl+R", styles::key_highlight(palette)),
            Span::styled(" browse ", styles::key_hint(palette)),
            Span::styled(app.login_city().as_str(), styles::tab_active(palette)),
        ])),
        rows[4],
    );
}

fn draw_not_found(frame: &mut Frame, area: Rect, palette: &Palette) {
    let lines = vec![
        Line::from(Span::styled(
            "404. Page not found",
            styles::title(palette),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press Enter to go to the main page",
            Style::default().fg(palette.text_secondary),
        )),
    ];
    let y = area.y + area.height.saturating_sub(3) / 2;
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        Rect::new(area.x, y, area.width, area.height.min(3)),
    );
}
