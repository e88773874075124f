use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    MoveUp,
    MoveDown,
    NextPage,
    PrevPage,
    NextPane,
    PrevPane,
    Select,
    Remove,
    OpenInBrowser,
    Reload,
    FeedView,
    ManageView,
    Search,
    ClearStatus,
    None,
}

impl From<KeyEvent> for Action {
    fn from(key: KeyEvent) -> Self {
        match key.code {
            KeyCode::Char('q') => Action::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
            KeyCode::Char('j') | KeyCode::Down => Action::MoveDown,
            KeyCode::Char('k') | KeyCode::Up => Action::MoveUp,
            KeyCode::Char('n') | KeyCode::PageDown => Action::NextPage,
            KeyCode::Char('p') | KeyCode::PageUp => Action::PrevPage,
            KeyCode::Tab => Action::NextPane,
            KeyCode::BackTab => Action::PrevPane,
            KeyCode::Enter => Action::Select,
            KeyCode::Char('d') | KeyCode::Delete => Action::Remove,
            KeyCode::Char('o') => Action::OpenInBrowser,
            KeyCode::Char('R') => Action::Reload,
            KeyCode::Char('f') => Action::FeedView,
            KeyCode::Char('m') => Action::ManageView,
            KeyCode::Char('/') => Action::Search,
            KeyCode::Esc => Action::ClearStatus,
            _ => Action::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;

    #[test]
    fn letters_map_to_actions() {
        assert_eq!(Action::from(KeyEvent::from(KeyCode::Char('q'))), Action::Quit);
        assert_eq!(Action::from(KeyEvent::from(KeyCode::Char('j'))), Action::MoveDown);
        assert_eq!(Action::from(KeyEvent::from(KeyCode::Char('/'))), Action::Search);
        assert_eq!(Action::from(KeyEvent::from(KeyCode::Char('f'))), Action::FeedView);
    }

    #[test]
    fn ctrl_c_quits() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(Action::from(key), Action::Quit);
    }

    #[test]
    fn esc_maps_to_clear_status() {
        assert_eq!(
            Action::from(KeyEvent::from(KeyCode::Esc)),
            Action::ClearStatus
        );
    }

    #[test]
    fn unknown_keys_do_nothing() {
        assert_eq!(Action::from(KeyEvent::from(KeyCode::Char('z'))), Action::None);
    }
}
