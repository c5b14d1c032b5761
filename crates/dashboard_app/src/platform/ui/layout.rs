use ratatui::layout::{Constraint, Layout, Rect};

use super::constants::{FOOTER_HEIGHT, HEADER_HEIGHT, NAV_WIDTH, TOAST_WIDTH};

/// Screen regions, top to bottom, left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Regions {
    pub header: Rect,
    pub nav: Rect,
    pub page: Rect,
    pub activity: Rect,
    pub toasts: Rect,
}

pub fn split(area: Rect) -> Regions {
    let [header, body, footer] = Layout::vertical([
        Constraint::Length(HEADER_HEIGHT),
        Constraint::Min(0),
        Constraint::Length(FOOTER_HEIGHT),
    ])
    .areas(area);
    let [nav, page] =
        Layout::horizontal([Constraint::Length(NAV_WIDTH), Constraint::Min(0)]).areas(body);
    let [activity, toasts] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(TOAST_WIDTH)]).areas(footer);

    Regions {
        header,
        nav,
        page,
        activity,
        toasts,
    }
}

/// Page body above a fixed number of rows, e.g. an input line or a hint.
pub fn split_bottom(area: Rect, rows: u16) -> (Rect, Rect) {
    let [top, bottom] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(rows)]).areas(area);
    (top, bottom)
}
