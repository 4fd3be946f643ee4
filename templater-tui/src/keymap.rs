use templater_core::{
    action::{Action, EditAction},
    config::{Command, KeysConfig},
    keyboard::KeyEvent,
    status::ScreenStatus,
};

/// Resolve a key event into an Action for the current screen.
///
/// Bound keys win. While editing, any other printable character is typed into
/// the buffer.
pub fn resolve_action(key: &KeyEvent, status: &ScreenStatus, keys: &KeysConfig) -> Option<Action> {
    let keymap = keys.keymap_for_status(status);

    if let Some(command) = keymap.get(key) {
        return command_to_action(command);
    }

    if *status == ScreenStatus::Editing {
        return key.printable_char().map(|c| Action::Edit(EditAction::Insert(c)));
    }

    None
}

fn command_to_action(command: &Command) -> Option<Action> {
    match command {
        Command::Noop => None,
        Command::Quit => Some(Action::Quit),
        Command::MoveUp => Some(Action::MoveUp),
        Command::MoveDown => Some(Action::MoveDown),
        Command::Select => Some(Action::Select),
        Command::GoBack => Some(Action::GoBack),
        Command::Save => Some(Action::Save),
        Command::NewLine => Some(Action::Edit(EditAction::SplitLine)),
        Command::DeleteBackwardChar => Some(Action::Edit(EditAction::Backspace)),
        Command::MoveCursorUp => Some(Action::Edit(EditAction::MoveUp)),
        Command::MoveCursorDown => Some(Action::Edit(EditAction::MoveDown)),
        Command::MoveCursorLeft => Some(Action::Edit(EditAction::MoveLeft)),
        Command::MoveCursorRight => Some(Action::Edit(EditAction::MoveRight)),
        Command::Confirm => Some(Action::Confirm),
        Command::Decline => Some(Action::Decline),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use templater_core::{
        keyboard::{KeyCode, KeyModifiers},
        recovery::RecoveryAction,
        state::ErrorReason,
    };

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::plain(code)
    }

    #[test]
    fn test_list_navigation() {
        let keys = KeysConfig::default();
        let status = ScreenStatus::SelectingBranch;
        assert_eq!(
            resolve_action(&key(KeyCode::Down), &status, &keys),
            Some(Action::MoveDown)
        );
        assert_eq!(
            resolve_action(&KeyEvent::ctrl('p'), &status, &keys),
            Some(Action::MoveUp)
        );
        assert_eq!(
            resolve_action(&key(KeyCode::Right), &status, &keys),
            Some(Action::Select)
        );
        assert_eq!(
            resolve_action(&key(KeyCode::Char('q')), &status, &keys),
            Some(Action::Quit)
        );
        assert_eq!(resolve_action(&key(KeyCode::Char('x')), &status, &keys), None);
    }

    #[test]
    fn test_left_only_goes_back_from_templates() {
        let keys = KeysConfig::default();
        assert_eq!(
            resolve_action(&key(KeyCode::Left), &ScreenStatus::SelectingBranch, &keys),
            None
        );
        assert_eq!(
            resolve_action(&key(KeyCode::Left), &ScreenStatus::SelectingTemplate, &keys),
            Some(Action::GoBack)
        );
    }

    #[test]
    fn test_editing_types_unbound_characters() {
        let keys = KeysConfig::default();
        let status = ScreenStatus::Editing;
        assert_eq!(
            resolve_action(&key(KeyCode::Char('q')), &status, &keys),
            Some(Action::Edit(EditAction::Insert('q')))
        );
        assert_eq!(
            resolve_action(&key(KeyCode::Char(' ')), &status, &keys),
            Some(Action::Edit(EditAction::Insert(' ')))
        );
        assert_eq!(
            resolve_action(&key(KeyCode::Enter), &status, &keys),
            Some(Action::Edit(EditAction::SplitLine))
        );
        assert_eq!(
            resolve_action(&key(KeyCode::Backspace), &status, &keys),
            Some(Action::Edit(EditAction::Backspace))
        );
        assert_eq!(
            resolve_action(&key(KeyCode::Left), &status, &keys),
            Some(Action::Edit(EditAction::MoveLeft))
        );
        assert_eq!(
            resolve_action(&KeyEvent::ctrl('s'), &status, &keys),
            Some(Action::Save)
        );
        assert_eq!(
            resolve_action(&KeyEvent::ctrl('b'), &status, &keys),
            Some(Action::GoBack)
        );
    }

    #[test]
    fn test_editing_ignores_unbound_chords() {
        let keys = KeysConfig::default();
        let alt_x = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::ALT);
        assert_eq!(resolve_action(&alt_x, &ScreenStatus::Editing, &keys), None);
        assert_eq!(
            resolve_action(&KeyEvent::ctrl('z'), &ScreenStatus::Editing, &keys),
            None
        );
    }

    #[test]
    fn test_creating_only_hard_quit() {
        let keys = KeysConfig::default();
        let status = ScreenStatus::Creating;
        assert_eq!(resolve_action(&key(KeyCode::Char('q')), &status, &keys), None);
        assert_eq!(resolve_action(&key(KeyCode::Esc), &status, &keys), None);
        assert_eq!(
            resolve_action(&KeyEvent::ctrl('c'), &status, &keys),
            Some(Action::Quit)
        );
    }

    #[test]
    fn test_recovery_prompt() {
        let keys = KeysConfig::default();
        let status = ScreenStatus::Error {
            reason: ErrorReason::GhNotInstalled,
            compare_url: None,
            recovery: Some(RecoveryAction::OpenInstallPage),
        };
        assert_eq!(
            resolve_action(&key(KeyCode::Char('y')), &status, &keys),
            Some(Action::Confirm)
        );
        assert_eq!(
            resolve_action(&key(KeyCode::Enter), &status, &keys),
            Some(Action::Confirm)
        );
        assert_eq!(
            resolve_action(&key(KeyCode::Char('n')), &status, &keys),
            Some(Action::Decline)
        );
    }

    #[test]
    fn test_finished_screens_quit_on_enter() {
        let keys = KeysConfig::default();
        let status = ScreenStatus::Success {
            url: "https://github.com/o/r/pull/1".into(),
        };
        assert_eq!(
            resolve_action(&key(KeyCode::Enter), &status, &keys),
            Some(Action::Quit)
        );
        assert_eq!(resolve_action(&key(KeyCode::Char('y')), &status, &keys), None);
    }
}
