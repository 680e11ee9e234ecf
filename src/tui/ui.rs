use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use snappick::{Orientation, VisibleItem};

use crate::app::App;
use super::theme::*;

fn main_layout(area: Rect) -> [Rect; 3] {
    Layout::vertical([
        Constraint::Min(0),    // Picker
        Constraint::Length(1), // Status
        Constraint::Length(1), // Hotkeys
    ])
    .areas(area)
}

fn picker_block() -> Block<'static> {
    Block::default()
        .title(" snappick ")
        .title_style(Style::new().fg(ACCENT_MINT).bold())
        .borders(Borders::ALL)
        .border_style(Style::new().fg(TEXT_DIM))
}

/// Screen area the picker list occupies for a terminal of size `area`.
pub fn picker_area(area: Rect) -> Rect {
    let [picker, _, _] = main_layout(area);
    picker_block().inner(picker)
}

pub fn render(frame: &mut Frame, app: &App) {
    let [picker, status, hotkeys] = main_layout(frame.area());

    frame.render_widget(picker_block(), picker);
    render_picker(frame, app.picker_area, app);
    render_status(frame, status, app);
    render_hotkeys(frame, hotkeys);
}

/// Clip `start..start + len` along the scroll axis to `0..limit`.
fn clip(start: i64, len: i64, limit: u16) -> Option<(u16, u16)> {
    let from = start.max(0);
    let to = (start + len).min(i64::from(limit));
    (from < to).then(|| (from as u16, (to - from) as u16))
}

fn render_picker(frame: &mut Frame, area: Rect, app: &App) {
    let Some(layout) = app.picker.layout() else {
        return;
    };
    if area.width == 0 || area.height == 0 {
        return;
    }

    let extent = i64::from(layout.item_extent);
    let padding = i64::from(layout.edge_padding);

    // Center band behind the selected slot
    let band = match layout.orientation {
        Orientation::Vertical => clip(padding, extent, area.height)
            .map(|(y, h)| Rect::new(area.x, area.y + y, area.width, h)),
        Orientation::Horizontal => clip(padding, extent, area.width)
            .map(|(x, w)| Rect::new(area.x + x, area.y, w, area.height)),
    };
    if let Some(band) = band {
        frame.render_widget(Block::default().style(Style::new().bg(CENTER_BAND)), band);
    }

    if app.picker.is_empty() {
        let mid = Rect::new(area.x, area.y + area.height / 2, area.width, 1);
        frame.render_widget(
            Paragraph::new("(no values)").alignment(Alignment::Center).fg(TEXT_DIM),
            mid,
        );
        return;
    }

    for item in app.picker.visible_items() {
        if let Some(rect) = item_rect(area, layout.orientation, &item, extent) {
            let centered = item.distance.abs() * 2 < extent;
            let style = if centered {
                Style::new().fg(ACCENT_MINT).bold()
            } else {
                Style::new().fg(faded(item.alpha))
            };
            frame.render_widget(
                Paragraph::new(item.value.as_str()).alignment(Alignment::Center).style(style),
                rect,
            );
        }
    }
}

/// Cell rectangle for an item's label; labels sit on the middle cell row.
fn item_rect(area: Rect, orientation: Orientation, item: &VisibleItem<'_, String>, extent: i64) -> Option<Rect> {
    match orientation {
        Orientation::Vertical => {
            let row = item.start + extent / 2;
            let (y, _) = clip(row, 1, area.height)?;
            Some(Rect::new(area.x, area.y + y, area.width, 1))
        }
        Orientation::Horizontal => {
            let (x, w) = clip(item.start, extent, area.width)?;
            Some(Rect::new(area.x + x, area.y + area.height / 2, w, 1))
        }
    }
}

fn render_status(frame: &mut Frame, area: Rect, app: &App) {
    let status = app.status.borrow();
    let index = app
        .picker
        .current_index()
        .map(|index| format!("{}/{}", index + 1, app.picker.value_count()))
        .unwrap_or_else(|| "-".to_string());
    let value = app.picker.current_value().cloned().unwrap_or_default();
    let mode = if app.picker.is_cyclic() { "cyclic" } else { "bounded" };
    let axis = match app.picker.orientation() {
        Orientation::Vertical => "vertical",
        Orientation::Horizontal => "horizontal",
    };

    let line = Line::from(vec![
        Span::styled(" value ", Style::new().fg(TEXT_DIM)),
        Span::styled(value, Style::new().fg(TEXT_WHITE).bold()),
        Span::styled(format!("  #{}", index), Style::new().fg(ACCENT_BLUE)),
        Span::styled(format!("  {}", status.scroll_state.label()), Style::new().fg(ACCENT_GOLD)),
        Span::styled(
            format!("  {} · {} · {} selections", mode, axis, status.selections),
            Style::new().fg(TEXT_DIM),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_hotkeys(frame: &mut Frame, area: Rect) {
    let hotkeys = [
        ("[arrows]", " step · "),
        ("[wheel]", " drag · "),
        ("[click]", " pick item · "),
        ("[o]", " axis · "),
        ("[c]", " cyclic · "),
        ("[Enter]", " choose · "),
        ("[q]", " quit"),
    ];
    let spans: Vec<Span> = hotkeys
        .iter()
        .flat_map(|(key, label)| {
            [
                Span::styled(*key, Style::new().fg(TEXT_WHITE)),
                Span::styled(*label, Style::new().fg(TEXT_DIM)),
            ]
        })
        .collect();
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
