//! News list panel: cards, the empty and failed placeholders, and the
//! "load more" row.

use crate::app::{App, FeedStatus, Focus};
use crate::display::{render_list, Card, ListBody, EMPTY_CATEGORY_MESSAGE};
use crate::feed::{LOAD_FAILED_HINT, LOAD_FAILED_MESSAGE};
use crate::theme::category_style;
use crate::util::{clamp_lines, truncate_to_width};
use chrono::Utc;
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

/// Summary lines shown per card.
const SUMMARY_LINES: usize = 2;

/// Render the news list panel.
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    let is_focused = app.focus == Focus::NewsList;
    let border_style = if is_focused {
        app.style("panel_border_focused")
    } else {
        app.style("panel_border")
    };

    let title = format!(
        "News - {} ({}/{})",
        app.display.category(),
        app.display.visible_len(),
        app.display.filtered_len()
    );
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title);

    match &app.feed_status {
        FeedStatus::Failed(_) => {
            let text = vec![
                Line::from(Span::styled(LOAD_FAILED_MESSAGE, app.style("error"))),
                Line::from(Span::styled(LOAD_FAILED_HINT, app.style("placeholder"))),
            ];
            render_placeholder(f, text, block, area);
            return;
        }
        FeedStatus::Loading => {
            let text = vec![Line::from(Span::styled(
                "Loading news...",
                app.style("placeholder"),
            ))];
            render_placeholder(f, text, block, area);
            return;
        }
        FeedStatus::Loaded => {}
    }

    let view = render_list(&app.display, Utc::now());
    let cards = match &view.body {
        ListBody::Empty => {
            let text = vec![Line::from(Span::styled(
                EMPTY_CATEGORY_MESSAGE,
                app.style("placeholder"),
            ))];
            render_placeholder(f, text, block, area);
            return;
        }
        ListBody::Cards(cards) => cards,
    };

    // Inner width minus the highlight symbol
    let width = area.width.saturating_sub(4) as usize;

    let mut items: Vec<ListItem> = cards
        .iter()
        .enumerate()
        .map(|(i, card)| card_item(app, card, width, is_focused && i == app.selected))
        .collect();

    if view.show_load_more {
        let hidden = app.display.filtered_len() - app.display.visible_len();
        items.push(ListItem::new(Line::from(Span::styled(
            format!("▼ Load more ({hidden} more) [m]"),
            app.style("load_more"),
        ))));
    }

    let list = List::new(items).block(block).highlight_symbol("> ");

    let mut state = ListState::default().with_selected(Some(app.selected));
    f.render_stateful_widget(list, area, &mut state);
}

fn render_placeholder(f: &mut Frame, text: Vec<Line<'_>>, block: Block<'_>, area: Rect) {
    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

/// One card as a multi-line list item.
fn card_item<'a>(app: &App, card: &'a Card, width: usize, selected: bool) -> ListItem<'a> {
    let meta = app.style("card_meta");

    let mut badge = vec![
        Span::styled(format!("[{}]", card.category), category_style(card.color)),
        Span::raw(" "),
    ];
    if card.trending {
        badge.push(Span::styled("Trending ", app.style("trending_badge")));
    }
    badge.push(Span::styled(card.time.as_str(), meta));

    let title_style = if selected {
        app.style("card_selected")
    } else {
        app.style("card_title")
    };

    let mut lines = vec![
        Line::from(badge),
        Line::from(Span::styled(
            truncate_to_width(&card.title, width).into_owned(),
            title_style,
        )),
    ];

    let summary = app.style("card_summary");
    lines.extend(
        clamp_lines(&card.summary, width, SUMMARY_LINES)
            .into_iter()
            .map(|l| Line::from(Span::styled(l, summary))),
    );

    let mut source = vec![Span::styled(
        format!("{} · {}", card.source, card.country),
        meta,
    )];
    if card.has_tags() {
        source.push(Span::styled(
            format!("  {}", card.tags.join(" ")),
            app.style("card_tags"),
        ));
    }
    lines.push(Line::from(source));
    lines.push(Line::default());

    ListItem::new(lines)
}
