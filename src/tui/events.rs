//! Event Handling - Keyboard and mouse input processing
//!
//! Keyboard drag: Enter/Space picks up the panel under the cursor, arrows
//! then report one hover per neighbouring slot, Enter/Space drops.
//! Mouse drag: button down starts, drag over a panel hovers, button up drops.

use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};

use super::layout::{hit_test, vertical_neighbor};
use super::state::{AppState, View};

/// Actions that can be triggered by user input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Submit,
    Leave,
    Navigate,
    PickUp,
    Hover,
    Drop,
    Edit,
    None,
}

/// Dispatch a terminal event
pub fn handle_event(event: Event, state: &mut AppState) -> Action {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key_event(key, state),
        Event::Mouse(mouse) if state.view == View::Workbench => handle_mouse_event(mouse, state),
        _ => Action::None,
    }
}

/// Handle keyboard events
pub fn handle_key_event(key: KeyEvent, state: &mut AppState) -> Action {
    // Ctrl+C quits from anywhere
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Action::Quit;
    }

    match state.view {
        View::Landing => handle_landing_key(key, state),
        View::Workbench => handle_workbench_key(key, state),
    }
}

fn handle_landing_key(key: KeyEvent, state: &mut AppState) -> Action {
    match key.code {
        KeyCode::Esc => Action::Quit,
        KeyCode::Enter => match state.submit_prompt() {
            Ok(()) => Action::Submit,
            Err(_) => Action::None,
        },
        KeyCode::Backspace => {
            state.input.pop();
            Action::Edit
        }
        KeyCode::Char(c) => {
            state.input.push(c);
            state.notice = None;
            Action::Edit
        }
        _ => Action::None,
    }
}

fn handle_workbench_key(key: KeyEvent, state: &mut AppState) -> Action {
    match key.code {
        KeyCode::Char('q') => return Action::Quit,
        KeyCode::Esc => {
            state.leave_workbench();
            return Action::Leave;
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            return if state.is_dragging() {
                state.drop_panel();
                Action::Drop
            } else {
                state.begin_drag(state.cursor);
                Action::PickUp
            };
        }
        _ => {}
    }

    let Some(target) = neighbor_slot(key.code, state) else {
        return Action::None;
    };

    if state.is_dragging() {
        state.hover(target);
        Action::Hover
    } else {
        state.cursor = target;
        Action::Navigate
    }
}

/// Slot reached from the cursor by a direction key
fn neighbor_slot(code: KeyCode, state: &AppState) -> Option<usize> {
    let count = state.panel_count();
    if count == 0 {
        return None;
    }
    let cursor = state.cursor.min(count - 1);

    match code {
        KeyCode::Left | KeyCode::Char('h') => cursor.checked_sub(1),
        KeyCode::Right | KeyCode::Char('l') => Some(cursor + 1).filter(|&i| i < count),
        KeyCode::Up | KeyCode::Char('k') => vertical_neighbor(&state.panel_rects, cursor, true)
            .or_else(|| {
                state.panel_rects.is_empty().then(|| cursor.checked_sub(1)).flatten()
            }),
        KeyCode::Down | KeyCode::Char('j') => {
            vertical_neighbor(&state.panel_rects, cursor, false).or_else(|| {
                state
                    .panel_rects
                    .is_empty()
                    .then_some(cursor + 1)
                    .filter(|&i| i < count)
            })
        }
        _ => None,
    }
}

/// Handle mouse events
fn handle_mouse_event(mouse: MouseEvent, state: &mut AppState) -> Action {
    let hit = hit_test(&state.panel_rects, mouse.column, mouse.row);

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => match hit {
            Some(index) => {
                state.begin_drag(index);
                Action::PickUp
            }
            None => Action::None,
        },
        MouseEventKind::Drag(MouseButton::Left) if state.is_dragging() => match hit {
            Some(index) => {
                state.hover(index);
                Action::Hover
            }
            None => Action::None,
        },
        MouseEventKind::Up(MouseButton::Left) if state.is_dragging() => {
            state.drop_panel();
            Action::Drop
        }
        _ => Action::None,
    }
}

/// Poll for terminal events with timeout
pub fn poll_event(timeout: Duration) -> std::io::Result<Option<Event>> {
    if event::poll(timeout)? {
        return Ok(Some(event::read()?));
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WorkbenchConfig;
    use ratatui::layout::Rect;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn type_prompt(state: &mut AppState, text: &str) {
        for c in text.chars() {
            handle_event(key(KeyCode::Char(c)), state);
        }
    }

    fn ids(state: &AppState) -> Vec<String> {
        state
            .session
            .as_ref()
            .unwrap()
            .grid()
            .sequence()
            .ids()
            .into_iter()
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_ctrl_c_quit() {
        let mut state = AppState::new(WorkbenchConfig::default());
        let key = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(handle_event(key, &mut state), Action::Quit);
    }

    #[test]
    fn test_typing_edits_prompt() {
        let mut state = AppState::new(WorkbenchConfig::default());
        type_prompt(&mut state, "hiq");
        handle_event(key(KeyCode::Backspace), &mut state);
        assert_eq!(state.input, "hi");
        assert_eq!(state.view, View::Landing);
    }

    #[tokio::test]
    async fn test_enter_opens_workbench() {
        let mut state = AppState::new(WorkbenchConfig::default());
        assert_eq!(handle_event(key(KeyCode::Enter), &mut state), Action::None);
        assert_eq!(state.view, View::Landing);

        type_prompt(&mut state, "analyse");
        assert_eq!(handle_event(key(KeyCode::Enter), &mut state), Action::Submit);
        assert_eq!(state.view, View::Workbench);

        assert_eq!(handle_event(key(KeyCode::Esc), &mut state), Action::Leave);
        assert_eq!(state.view, View::Landing);
    }

    #[tokio::test]
    async fn test_keyboard_drag() {
        let mut state = AppState::new(WorkbenchConfig::default());
        type_prompt(&mut state, "go");
        handle_event(key(KeyCode::Enter), &mut state);

        // Navigate without dragging
        assert_eq!(handle_event(key(KeyCode::Right), &mut state), Action::Navigate);
        assert_eq!(state.cursor, 1);
        assert_eq!(ids(&state)[0], "pdf");

        // Carry "web" two slots to the right
        assert_eq!(handle_event(key(KeyCode::Enter), &mut state), Action::PickUp);
        handle_event(key(KeyCode::Right), &mut state);
        handle_event(key(KeyCode::Right), &mut state);
        assert_eq!(state.cursor, 3);
        assert_eq!(handle_event(key(KeyCode::Char(' ')), &mut state), Action::Drop);

        assert_eq!(ids(&state), vec!["pdf", "data", "slides", "web", "code", "summary"]);
    }

    #[tokio::test]
    async fn test_left_edge_is_not_an_event() {
        let mut state = AppState::new(WorkbenchConfig::default());
        type_prompt(&mut state, "go");
        handle_event(key(KeyCode::Enter), &mut state);
        handle_event(key(KeyCode::Enter), &mut state);
        assert_eq!(handle_event(key(KeyCode::Left), &mut state), Action::None);
        assert_eq!(ids(&state)[0], "pdf");
    }

    #[tokio::test]
    async fn test_mouse_drag() {
        let mut state = AppState::new(WorkbenchConfig::default());
        type_prompt(&mut state, "go");
        handle_event(key(KeyCode::Enter), &mut state);
        state.panel_rects = vec![
            Rect::new(0, 0, 10, 5),
            Rect::new(10, 0, 10, 5),
            Rect::new(20, 0, 10, 5),
            Rect::new(30, 0, 10, 5),
            Rect::new(40, 0, 10, 5),
            Rect::new(50, 0, 10, 5),
        ];

        let down = mouse(MouseEventKind::Down(MouseButton::Left), 2, 2);
        assert_eq!(handle_event(down, &mut state), Action::PickUp);

        // Pointer crosses slots 1 and 2
        handle_event(mouse(MouseEventKind::Drag(MouseButton::Left), 12, 2), &mut state);
        handle_event(mouse(MouseEventKind::Drag(MouseButton::Left), 22, 2), &mut state);
        assert_eq!(ids(&state), vec!["web", "data", "pdf", "slides", "code", "summary"]);

        // Release outside any panel still ends the gesture without moving
        let up = mouse(MouseEventKind::Up(MouseButton::Left), 200, 40);
        assert_eq!(handle_event(up, &mut state), Action::Drop);
        assert!(!state.is_dragging());
        assert_eq!(ids(&state)[2], "pdf");
    }
}
