//! The offer page: details, reviews, nearby offers and the map.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, BorderType, Borders, List, ListItem, ListState, Paragraph, Wrap,
        canvas::{Canvas, Points},
    },
};

use six_cities_engine::{
    App, CommentForm, MAX_COMMENT_CHARS, MAX_GALLERY_IMAGES, MIN_COMMENT_CHARS, Offer,
    RATING_TITLES, Review, selectors,
};

use crate::listing::offer_item;
use crate::theme::{Glyphs, Palette, stars, styles};
use crate::{clean, panel};

pub(crate) fn draw(frame: &mut Frame, app: &App, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    let Some(offer) = app.current_offer() else {
        return;
    };

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let details = panel("Offer", palette);
    let inner = details.inner(cols[0]);
    frame.render_widget(details, cols[0]);
    frame.render_widget(
        Paragraph::new(detail_lines(offer, palette, glyphs)).wrap(Wrap { trim: false }),
        inner,
    );

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(8),     // Reviews
            Constraint::Length(8),  // Nearby
            Constraint::Length(10), // Map
        ])
        .split(cols[1]);

    draw_reviews(frame, app, right[0], palette, glyphs);
    draw_nearby(frame, app, right[1], palette, glyphs);
    draw_map(frame, app, right[2], palette, glyphs);
}

fn detail_lines<'a>(offer: &Offer, palette: &Palette, glyphs: &Glyphs) -> Vec<Line<'a>> {
    let muted = Style::default().fg(palette.text_muted);
    let secondary = Style::default().fg(palette.text_secondary);
    let mut lines = Vec::new();

    let photos = offer.images.len().min(MAX_GALLERY_IMAGES);
    lines.push(Line::from(Span::styled(
        match photos {
            0 => "No photos".to_string(),
            1 => "1 photo".to_string(),
            n => format!("{n} photos"),
        },
        muted,
    )));

    if offer.is_premium {
        lines.push(Line::from(Span::styled(
            format!(" {} Premium ", glyphs.premium),
            styles::premium(palette),
        )));
    }

    let (bookmark, bookmark_style, bookmark_label) = if offer.is_favorite {
        (
            glyphs.bookmark_on,
            Style::default().fg(palette.highlight),
            "In bookmarks",
        )
    } else {
        (glyphs.bookmark_off, muted, "To bookmarks")
    };
    lines.push(Line::from(vec![
        Span::styled(clean(&offer.title), styles::title(palette)),
        Span::raw("  "),
        Span::styled(bookmark, bookmark_style),
        Span::styled(format!(" {bookmark_label}"), muted),
    ]));

    lines.push(Line::from(vec![
        Span::styled(
            stars(offer.stars(), glyphs),
            Style::default().fg(palette.highlight),
        ),
        Span::styled(format!(" {:.1}", offer.rating), secondary),
    ]));

    let mut features = vec![offer.kind.label()];
    if let Some(bedrooms) = offer.bedrooms {
        let noun = if bedrooms == 1 { "Bedroom" } else { "Bedrooms" };
        features.push(format!("{bedrooms} {noun}"));
    }
    if let Some(adults) = offer.max_adults {
        let noun = if adults == 1 { "adult" } else { "adults" };
        features.push(format!("Max {adults} {noun}"));
    }
    let divider = format!(" {} ", glyphs.bullet);
    lines.push(Line::from(Span::styled(features.join(divider.as_str()), secondary)));

    lines.push(Line::from(vec![
        Span::styled(format!("€{}", offer.price), styles::price(palette)),
        Span::styled(" night", muted),
    ]));

    if !offer.goods.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("What's inside", styles::title(palette))));
        for good in &offer.goods {
            lines.push(Line::from(Span::styled(
                format!("{} {}", glyphs.bullet, clean(good)),
                secondary,
            )));
        }
    }

    if let Some(host) = &offer.host {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Meet the host", styles::title(palette))));
        let mut spans = vec![Span::styled(
            clean(&host.name),
            Style::default().fg(palette.text_primary),
        )];
        if host.is_pro {
            spans.push(Span::styled(
                "  Pro",
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD),
            ));
        }
        lines.push(Line::from(spans));
    }

    if let Some(description) = offer.description.as_deref().filter(|d| !d.trim().is_empty()) {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            clean(description),
            Style::default().fg(palette.text_primary),
        )));
    }

    lines
}

fn review_lines<'a>(review: &Review, palette: &Palette, glyphs: &Glyphs) -> Vec<Line<'a>> {
    let mut name = vec![Span::styled(
        clean(&review.user.name),
        Style::default()
            .fg(palette.text_primary)
            .add_modifier(Modifier::BOLD),
    )];
    if review.user.is_pro {
        name.push(Span::styled(" Pro", Style::default().fg(palette.accent)));
    }
    name.push(Span::raw("  "));
    name.push(Span::styled(
        stars(review.rating, glyphs),
        Style::default().fg(palette.highlight),
    ));
    name.push(Span::styled(
        format!("  {}", review.display_date()),
        Style::default().fg(palette.text_muted),
    ));

    vec![
        Line::from(name),
        Line::from(Span::styled(
            clean(&review.comment),
            Style::default().fg(palette.text_secondary),
        )),
        Line::from(""),
    ]
}

fn draw_reviews(frame: &mut Frame, app: &App, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    let state = app.state();
    let title = format!("Reviews {} {}", glyphs.bullet, selectors::select_review_count(state));
    let block = panel(&title, palette);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let authorized = selectors::select_is_authorized(state);
    let form_height = if authorized { 7 } else { 1 };
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(form_height)])
        .split(inner);

    let lines: Vec<Line> = selectors::select_reviews(state)
        .into_iter()
        .flat_map(|review| review_lines(review, palette, glyphs))
        .collect();
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), rows[0]);

    if authorized {
        draw_comment_form(frame, app, rows[1], palette, glyphs);
    } else {
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("c", styles::key_highlight(palette)),
                Span::styled(" sign in to leave a review", styles::key_hint(palette)),
            ])),
            rows[1],
        );
    }
}

fn rating_line<'a>(form: &CommentForm, palette: &Palette, glyphs: &Glyphs) -> Line<'a> {
    let rating = form.rating.unwrap_or(0);
    let title = form
        .rating
        .and_then(|r| RATING_TITLES.get(usize::from(r).wrapping_sub(1)))
        .copied()
        .unwrap_or("choose 1-5");
    Line::from(vec![
        Span::styled("Your review ", Style::default().fg(palette.text_primary)),
        Span::styled(stars(rating, glyphs), Style::default().fg(palette.highlight)),
        Span::styled(format!(" {title}"), Style::default().fg(palette.text_muted)),
    ])
}

fn draw_comment_form(frame: &mut Frame, app: &App, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    let form = app.comment_form();
    let state = app.state();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Rating
            Constraint::Min(3),    // Text
            Constraint::Length(1), // Counter / status
        ])
        .split(area);

    frame.render_widget(Paragraph::new(rating_line(form, palette, glyphs)), rows[0]);

    let border = if form.editing {
        palette.accent
    } else {
        palette.bg_border
    };
    let placeholder = form.text.is_empty() && !form.editing;
    let text = if placeholder {
        Span::styled(
            "Tell how was your stay, what you like and what can be improved",
            Style::default().fg(palette.text_muted),
        )
    } else {
        Span::styled(
            form.text.text().to_string(),
            Style::default().fg(palette.text_primary),
        )
    };
    frame.render_widget(
        Paragraph::new(text)
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(border)),
            ),
        rows[1],
    );

    let status = if selectors::select_is_posting_review(state) {
        Span::styled("Posting...", Style::default().fg(palette.primary))
    } else if let Some(err) = selectors::select_post_review_error(state) {
        Span::styled(clean(err), Style::default().fg(palette.error))
    } else {
        let count = form.char_count();
        let color = if form.is_valid() {
            palette.success
        } else {
            palette.text_muted
        };
        Span::styled(
            format!("{count}/{MAX_COMMENT_CHARS} (at least {MIN_COMMENT_CHARS})"),
            Style::default().fg(color),
        )
    };
    frame.render_widget(Paragraph::new(status), rows[2]);
}

fn draw_nearby(frame: &mut Frame, app: &App, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    let block = panel("Other places in the neighbourhood", palette);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let nearby = selectors::select_nearby_offers(app.state());
    let items: Vec<ListItem> = nearby
        .iter()
        .enumerate()
        .map(|(i, offer)| offer_item(offer, i == app.selected(), inner.width, palette, glyphs))
        .collect();
    let mut list_state = ListState::default().with_selected(Some(app.selected()));
    frame.render_stateful_widget(List::new(items), inner, &mut list_state);
}

fn draw_map(frame: &mut Frame, app: &App, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    let points = selectors::select_map_points(app.state());
    let current: Vec<(f64, f64)> = points
        .iter()
        .filter(|p| p.is_current)
        .map(|p| (p.location.longitude, p.location.latitude))
        .collect();
    let nearby: Vec<(f64, f64)> = points
        .iter()
        .filter(|p| !p.is_current)
        .map(|p| (p.location.longitude, p.location.latitude))
        .collect();

    let (x_bounds, y_bounds) = map_bounds(current.iter().chain(&nearby));
    let title = format!(
        "Map {} current {} nearby",
        glyphs.map_current, glyphs.map_nearby
    );
    let canvas = Canvas::default()
        .block(panel(&title, palette))
        .x_bounds(x_bounds)
        .y_bounds(y_bounds)
        .paint(|ctx| {
            ctx.draw(&Points {
                coords: &nearby,
                color: palette.accent,
            });
            ctx.draw(&Points {
                coords: &current,
                color: palette.highlight,
            });
        });
    frame.render_widget(canvas, area);
}

/// Padded bounding box around the plotted points.
fn map_bounds<'a>(points: impl Iterator<Item = &'a (f64, f64)>) -> ([f64; 2], [f64; 2]) {
    const PAD: f64 = 0.005;
    let mut x = [f64::MAX, f64::MIN];
    let mut y = [f64::MAX, f64::MIN];
    for (lon, lat) in points {
        x = [x[0].min(*lon), x[1].max(*lon)];
        y = [y[0].min(*lat), y[1].max(*lat)];
    }
    if x[0] > x[1] {
        return ([-1.0, 1.0], [-1.0, 1.0]);
    }
    ([x[0] - PAD, x[1] + PAD], [y[0] - PAD, y[1] + PAD])
}
