mod helpers;

pub use helpers::{wrap_decrement, wrap_increment};

use crate::app::state::{App, Page};
use crossterm::event::KeyCode;

const SCROLL_STEP: usize = 5;

pub fn handle_input(app: &mut App, key: KeyCode) {
    if handle_help_toggle(app, key) {
        return;
    }

    match key {
        KeyCode::Char('q') => app.running = false,
        KeyCode::Tab => app.next_page(),
        KeyCode::BackTab => app.previous_page(),
        KeyCode::Char(digit @ '1'..='5') => {
            let index = digit as usize - '1' as usize;
            if let Some(page) = Page::from_index(index) {
                app.set_page(page);
            }
        }
        KeyCode::Up => app.focus_previous(),
        KeyCode::Down => app.focus_next(),
        KeyCode::Left | KeyCode::Right => {
            if let Some(selector) = app.focused_selector() {
                app.cycle(selector, key == KeyCode::Right);
            }
        }
        KeyCode::Char('f') => app.toggle_frame(),
        KeyCode::Char('r') => app.reload(),
        _ => handle_page_input(app, key),
    }
}

fn handle_help_toggle(app: &mut App, key: KeyCode) -> bool {
    if key == KeyCode::F(1) {
        app.show_help = !app.show_help;
        return true;
    }

    if app.show_help {
        if key == KeyCode::Esc {
            app.show_help = false;
        }
        return true;
    }

    false
}

fn handle_page_input(app: &mut App, key: KeyCode) {
    match (app.page, key) {
        (Page::ViewBySdg, KeyCode::Char('c')) => app.toggle_comparison(),
        (Page::Attributes, KeyCode::PageDown) => {
            app.table_scroll = app.table_scroll.saturating_add(SCROLL_STEP);
        }
        (Page::Attributes, KeyCode::PageUp) => {
            app.table_scroll = app.table_scroll.saturating_sub(SCROLL_STEP);
        }
        (Page::Attributes, KeyCode::Home) => app.table_scroll = 0,
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::tests::fixture_app;
    use crate::app::state::Selector;
    use sdg_port_radar::chart::RadarFrame;

    #[test]
    fn digits_and_tab_switch_pages() -> Result<(), Box<dyn std::error::Error>> {
        let (mut app, _dir) = fixture_app()?;

        handle_input(&mut app, KeyCode::Char('3'));
        assert_eq!(app.page, Page::ViewBySdg);
        handle_input(&mut app, KeyCode::Tab);
        assert_eq!(app.page, Page::SdgPerPort);
        handle_input(&mut app, KeyCode::BackTab);
        handle_input(&mut app, KeyCode::BackTab);
        assert_eq!(app.page, Page::Attributes);
        Ok(())
    }

    #[test]
    fn arrows_change_the_focused_selector() -> Result<(), Box<dyn std::error::Error>> {
        let (mut app, _dir) = fixture_app()?;
        handle_input(&mut app, KeyCode::Char('2'));

        handle_input(&mut app, KeyCode::Right);
        assert_eq!(app.category(), "SDG 7");

        handle_input(&mut app, KeyCode::Down);
        assert_eq!(app.focused_selector(), Some(Selector::IndicatorArea));
        handle_input(&mut app, KeyCode::Left);
        assert_eq!(app.selected(Selector::IndicatorArea), "Social");
        Ok(())
    }

    #[test]
    fn help_swallows_keys_until_closed() -> Result<(), Box<dyn std::error::Error>> {
        let (mut app, _dir) = fixture_app()?;

        handle_input(&mut app, KeyCode::F(1));
        handle_input(&mut app, KeyCode::Char('q'));
        assert!(app.running);

        handle_input(&mut app, KeyCode::Esc);
        assert!(!app.show_help);
        handle_input(&mut app, KeyCode::Char('q'));
        assert!(!app.running);
        Ok(())
    }

    #[test]
    fn comparison_and_frame_toggles() -> Result<(), Box<dyn std::error::Error>> {
        let (mut app, _dir) = fixture_app()?;

        handle_input(&mut app, KeyCode::Char('c'));
        assert!(!app.comparison);

        handle_input(&mut app, KeyCode::Char('3'));
        handle_input(&mut app, KeyCode::Char('c'));
        assert!(app.comparison);

        handle_input(&mut app, KeyCode::Char('f'));
        assert_eq!(app.frame, RadarFrame::Circle);
        Ok(())
    }
}
