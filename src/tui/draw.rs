//! Ratatui projection of the page view.
//!
//! Drawing rebuilds the screen from the current [`PageView`] every frame and
//! returns a fresh [`HitMap`] so mouse gestures resolve against exactly what
//! is on screen. Hand tile rects carry cloned tile views, which is where the
//! drag controller reads its payload attributes from; zone rects carry their
//! fixed end flag.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};

use crate::drag::DropZone;
use crate::view::{BigMessage, PageView, PanelHighlight, PlayerPanel, TileView};

use super::app::App;

/// Hit-testing data for one drawn frame.
#[derive(Debug, Default)]
pub struct HitMap {
    tiles: Vec<(Rect, TileView)>,
    zones: Vec<(Rect, DropZone)>,
}

impl HitMap {
    /// Hand tile view under the given cell.
    pub fn tile_at(&self, column: u16, row: u16) -> Option<&TileView> {
        let position = Position::new(column, row);
        self.tiles
            .iter()
            .find(|(rect, _)| rect.contains(position))
            .map(|(_, tile)| tile)
    }

    /// Drop zone under the given cell.
    pub fn zone_at(&self, column: u16, row: u16) -> Option<DropZone> {
        let position = Position::new(column, row);
        self.zones
            .iter()
            .find(|(rect, _)| rect.contains(position))
            .map(|(_, zone)| *zone)
    }
}

/// Draws the whole page and returns the frame's hit map.
pub fn draw(frame: &mut Frame, app: &App) -> HitMap {
    let mut hits = HitMap::default();

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(34), Constraint::Min(40)])
        .split(frame.area());

    draw_history(frame, columns[0], app.page());

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Length(8),
            Constraint::Length(1),
            Constraint::Min(8),
            Constraint::Length(3),
        ])
        .split(columns[1]);

    draw_big_message(frame, rows[0], app.page());
    draw_board(frame, rows[1], app, &mut hits);
    draw_stock(frame, rows[2], app.page());
    draw_panels(frame, rows[3], app, &mut hits);
    draw_status_bar(frame, rows[4], app);

    hits
}

fn draw_history(frame: &mut Frame, area: Rect, page: &PageView) {
    let items: Vec<ListItem> = page
        .history()
        .iter()
        .map(|line| ListItem::new(line.as_str()))
        .collect();
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title("History"));
    frame.render_widget(list, area);
}

fn draw_big_message(frame: &mut Frame, area: Rect, page: &PageView) {
    let Some(message) = page.big_message() else {
        return;
    };
    let (text, style) = match message {
        BigMessage::Waiting { can_start: true } => (
            "Waiting for players\n[s] Start Game".to_string(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        BigMessage::Waiting { can_start: false } => (
            "Waiting for players".to_string(),
            Style::default().fg(Color::Yellow),
        ),
        BigMessage::GameOver { text, viewer_won } => (
            format!("{text}\n[n] New Game"),
            if *viewer_won {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
            },
        ),
    };
    let paragraph = Paragraph::new(text)
        .style(style)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn draw_board(frame: &mut Frame, area: Rect, app: &App, hits: &mut HitMap) {
    let strip = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(13),
            Constraint::Min(10),
            Constraint::Length(13),
        ])
        .split(area);

    draw_drop_zone(frame, strip[0], DropZone::LeftEnd, app, hits);
    draw_chain(frame, strip[1], app.page());
    draw_drop_zone(frame, strip[2], DropZone::RightEnd, app, hits);
}

fn draw_drop_zone(frame: &mut Frame, area: Rect, zone: DropZone, app: &App, hits: &mut HitMap) {
    let zone_area = center_rect(area, 12, 5);
    let style = if app.hover_zone() == Some(zone) {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else if app.is_dragging() {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let label = match zone {
        DropZone::LeftEnd => "\nleft end",
        DropZone::RightEnd => "\nright end",
    };
    let paragraph = Paragraph::new(label)
        .style(style)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, zone_area);
    hits.zones.push((zone_area, zone));
}

fn draw_chain(frame: &mut Frame, area: Rect, page: &PageView) {
    let mut x = area.x;
    for tile in page.board() {
        let (width, height): (u16, u16) = if *tile.rotated() { (5, 5) } else { (7, 3) };
        if x + width > area.right() || height > area.height {
            // No horizontal scrolling; long chains clip at the zone edge.
            break;
        }
        let y = area.y + (area.height - height) / 2;
        draw_tile(frame, Rect::new(x, y, width, height), tile, Style::default());
        x += width;
    }
}

fn draw_tile(frame: &mut Frame, area: Rect, tile: &TileView, style: Style) {
    let text = if *tile.rotated() {
        format!("{}\n-\n{}", tile.left(), tile.right())
    } else {
        format!("{}|{}", tile.left(), tile.right())
    };
    let paragraph = Paragraph::new(text)
        .style(style)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn draw_stock(frame: &mut Frame, area: Rect, page: &PageView) {
    let paragraph = Paragraph::new(page.stock_line().as_str()).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn draw_panels(frame: &mut Frame, area: Rect, app: &App, hits: &mut HitMap) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);
    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);
    let slots = [top[0], top[1], bottom[0], bottom[1]];

    for (slot, panel) in slots.iter().zip(app.page().panels()) {
        if let Some(panel) = panel {
            draw_panel(frame, *slot, panel, app, hits);
        }
    }
}

fn draw_panel(frame: &mut Frame, area: Rect, panel: &PlayerPanel, app: &App, hits: &mut HitMap) {
    let border_style = match panel.highlight() {
        PanelHighlight::Winner => Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        PanelHighlight::Turn => Style::default().fg(Color::Cyan),
        PanelHighlight::Neutral => Style::default(),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(panel.heading().as_str());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if *panel.is_viewer() {
        draw_hand(frame, inner, panel, app, hits);
    } else {
        draw_hidden_hand(frame, inner, panel);
    }
}

fn draw_hidden_hand(frame: &mut Frame, area: Rect, panel: &PlayerPanel) {
    let mut lines = vec![Line::from("## ".repeat(*panel.hidden_tiles()))];
    if let Some(label) = panel.turn_label() {
        lines.push(Line::from(Span::styled(
            label.clone(),
            Style::default().fg(Color::Cyan),
        )));
    }
    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn draw_hand(frame: &mut Frame, area: Rect, panel: &PlayerPanel, app: &App, hits: &mut HitMap) {
    let carried = app.carried().map(|payload| payload.instance.clone());
    let mut x = area.x;
    let mut y = area.y;
    for tile in panel.hand() {
        if x + 7 > area.right() {
            x = area.x;
            y += 3;
        }
        if x + 7 > area.right() || y + 3 > area.bottom() {
            break;
        }
        let rect = Rect::new(x, y, 7, 3);
        let mut style = if *tile.draggable() {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        if *tile.highlighted() {
            style = Style::default().fg(Color::Green).add_modifier(Modifier::BOLD);
        }
        if carried.as_deref() == Some(tile.instance().as_str()) {
            style = style.add_modifier(Modifier::DIM);
        }
        draw_tile(frame, rect, tile, style);
        hits.tiles.push((rect, tile.clone()));
        x += 7;
    }

    if let Some(control) = panel.control() {
        let hint = format!("[p] {}", control.label());
        if area.height > 0 {
            let row = Rect::new(area.x, area.bottom() - 1, area.width, 1);
            let paragraph = Paragraph::new(hint)
                .style(Style::default().fg(Color::Magenta))
                .alignment(Alignment::Right);
            frame.render_widget(paragraph, row);
        }
    }
}

fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    if let Some(alert) = app.alert() {
        let paragraph = Paragraph::new(format!("{alert}  (press any key)"))
            .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(paragraph, area);
        return;
    }
    let text = if app.is_waiting() {
        "waiting for the server".to_string()
    } else if let Some(payload) = app.carried() {
        format!("carrying [{}|{}], drop it on an end", payload.left, payload.right)
    } else {
        "drag a tile onto an end | [p] pick up or pass | [r] refresh | [q] quit".to_string()
    };
    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

/// Centers a `width` by `height` rect inside `area`, clamping to fit.
fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}
