/// Every user interaction produces an Action. The UI never calls git or gh directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Navigation
    MoveUp,
    MoveDown,
    Select,
    GoBack,
    Quit,

    // Editing
    Save,
    Edit(EditAction),

    // Recovery prompt
    Confirm,
    Decline,
}

/// Text-editing intents, applied to the edit buffer while editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditAction {
    Insert(char),
    SplitLine,
    Backspace,
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
}
