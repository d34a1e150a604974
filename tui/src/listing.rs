//! Offer lists: the city page and saved favorites.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph, Tabs},
};

use six_cities_engine::{App, CITIES, Offer, selectors};

use crate::theme::{Glyphs, Palette, stars, styles};
use crate::{clean, panel, truncate_with_ellipsis};

/// Two-line list entry for an offer card.
pub(crate) fn offer_item<'a>(
    offer: &Offer,
    selected: bool,
    width: u16,
    palette: &Palette,
    glyphs: &Glyphs,
) -> ListItem<'a> {
    let marker = if selected { glyphs.selected } else { " " };
    let (bookmark, bookmark_style) = if offer.is_favorite {
        (glyphs.bookmark_on, Style::default().fg(palette.highlight))
    } else {
        (glyphs.bookmark_off, Style::default().fg(palette.text_muted))
    };

    let mut head = vec![
        Span::styled(format!("{marker} "), Style::default().fg(palette.accent)),
        Span::styled(format!("€{}", offer.price), styles::price(palette)),
        Span::styled(" / night  ", Style::default().fg(palette.text_muted)),
        Span::styled(
            stars(offer.stars(), glyphs),
            Style::default().fg(palette.highlight),
        ),
        Span::raw("  "),
        Span::styled(bookmark, bookmark_style),
    ];
    if offer.is_premium {
        head.push(Span::raw("  "));
        head.push(Span::styled(
            format!(" {} Premium ", glyphs.premium),
            styles::premium(palette),
        ));
    }

    let title_width = usize::from(width.saturating_sub(6));
    let body = Line::from(vec![
        Span::raw("  "),
        Span::styled(
            truncate_with_ellipsis(&clean(&offer.title), title_width),
            styles::title(palette),
        ),
        Span::styled(
            format!(" {} {}", glyphs.bullet, offer.kind.label()),
            Style::default().fg(palette.text_secondary),
        ),
    ]);

    let item = ListItem::new(vec![Line::from(head), body]);
    if selected {
        item.style(styles::selected_row(palette))
    } else {
        item
    }
}

fn places_heading(count: usize, city: &str) -> String {
    let noun = if count == 1 { "place" } else { "places" };
    format!("{count} {noun} to stay in {city}")
}

pub(crate) fn draw_main(frame: &mut Frame, app: &App, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    let state = app.state();
    let city = selectors::select_city(state);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // City tabs
            Constraint::Min(1),    // Offers
        ])
        .split(area);

    let tabs = Tabs::new(CITIES.iter().map(|c| c.as_str()))
        .select(city.index())
        .style(Style::default().fg(palette.text_secondary))
        .highlight_style(styles::tab_active(palette))
        .divider(glyphs.separator);
    frame.render_widget(tabs, chunks[0]);

    let offers = selectors::select_city_offers(state);

    if offers.is_empty() {
        let (title, detail) = match selectors::select_offers_error(state) {
            Some(err) => ("Could not load offers".to_string(), clean(err)),
            None => (
                "No places to stay available".to_string(),
                format!(
                    "We could not find any property available at the moment in {}",
                    city.as_str()
                ),
            ),
        };
        draw_empty(frame, chunks[1], &title, &detail, palette);
        return;
    }

    let block = panel(city.as_str(), palette);
    let inner = block.inner(chunks[1]);
    frame.render_widget(block, chunks[1]);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Count
            Constraint::Length(2), // Sort
            Constraint::Min(1),    // List
        ])
        .split(inner);

    frame.render_widget(
        Paragraph::new(Span::styled(
            places_heading(offers.len(), city.as_str()),
            styles::title(palette),
        )),
        rows[0],
    );
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("Sort by ", Style::default().fg(palette.text_muted)),
            Span::styled(
                selectors::select_sort(state).label(),
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::UNDERLINED),
            ),
        ])),
        rows[1],
    );

    let items: Vec<ListItem> = offers
        .iter()
        .enumerate()
        .map(|(i, offer)| offer_item(offer, i == app.selected(), rows[2].width, palette, glyphs))
        .collect();
    let mut list_state = ListState::default().with_selected(Some(app.selected()));
    frame.render_stateful_widget(List::new(items), rows[2], &mut list_state);
}

pub(crate) fn draw_favorites(
    frame: &mut Frame,
    app: &App,
    area: Rect,
    palette: &Palette,
    glyphs: &Glyphs,
) {
    let groups = selectors::select_favorites_by_city(app.state());
    if groups.is_empty() {
        draw_empty(
            frame,
            area,
            "Nothing yet saved.",
            "Save properties to narrow down search or plan your future trips.",
            palette,
        );
        return;
    }

    let block = panel("Saved listing", palette);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut items = Vec::new();
    let mut selected_item = 0;
    let mut index = 0;
    for (city, offers) in &groups {
        items.push(ListItem::new(Line::from(Span::styled(
            city.as_str(),
            styles::tab_active(palette),
        ))));
        for offer in offers {
            let selected = index == app.selected();
            if selected {
                selected_item = items.len();
            }
            items.push(offer_item(offer, selected, inner.width, palette, glyphs));
            index += 1;
        }
    }

    let mut list_state = ListState::default().with_selected(Some(selected_item));
    frame.render_stateful_widget(List::new(items), inner, &mut list_state);
}

fn draw_empty(frame: &mut Frame, area: Rect, title: &str, detail: &str, palette: &Palette) {
    let lines = vec![
        Line::from(Span::styled(title.to_string(), styles::title(palette))),
        Line::from(""),
        Line::from(Span::styled(
            detail.to_string(),
            Style::default().fg(palette.text_secondary),
        )),
    ];
    let y = area.y + area.height.saturating_sub(3) / 2;
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        Rect::new(area.x, y, area.width, area.height.min(3)),
    );
}
