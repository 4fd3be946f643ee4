use crate::keyboard::{KeyCode, KeyEvent, KeyModifiers};
use crate::status::ScreenStatus;
use serde::Deserialize;
use std::collections::HashMap;
use std::str::FromStr;

/// Commands that can be bound to keys
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Command {
    /// No-op: explicitly unbinds a key (removes inherited/default binding)
    Noop,

    // General commands
    Quit,

    // List commands
    MoveUp,
    MoveDown,
    Select,
    GoBack,

    // Editor commands
    Save,
    NewLine,
    DeleteBackwardChar,
    MoveCursorUp,
    MoveCursorDown,
    MoveCursorLeft,
    MoveCursorRight,

    // Recovery prompt commands
    Confirm,
    Decline,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "noop" | "none" | "unbound" => Ok(Command::Noop),
            "quit" => Ok(Command::Quit),
            "move_up" => Ok(Command::MoveUp),
            "move_down" => Ok(Command::MoveDown),
            "select" => Ok(Command::Select),
            "go_back" => Ok(Command::GoBack),
            "save" => Ok(Command::Save),
            "new_line" => Ok(Command::NewLine),
            "delete_backward_char" => Ok(Command::DeleteBackwardChar),
            "move_cursor_up" => Ok(Command::MoveCursorUp),
            "move_cursor_down" => Ok(Command::MoveCursorDown),
            "move_cursor_left" => Ok(Command::MoveCursorLeft),
            "move_cursor_right" => Ok(Command::MoveCursorRight),
            "confirm" => Ok(Command::Confirm),
            "decline" => Ok(Command::Decline),
            _ => Err(format!("Unknown command: {s}")),
        }
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Command::Noop => "noop",
            Command::Quit => "quit",
            Command::MoveUp => "move_up",
            Command::MoveDown => "move_down",
            Command::Select => "select",
            Command::GoBack => "go_back",
            Command::Save => "save",
            Command::NewLine => "new_line",
            Command::DeleteBackwardChar => "delete_backward_char",
            Command::MoveCursorUp => "move_cursor_up",
            Command::MoveCursorDown => "move_cursor_down",
            Command::MoveCursorLeft => "move_cursor_left",
            Command::MoveCursorRight => "move_cursor_right",
            Command::Confirm => "confirm",
            Command::Decline => "decline",
        };
        write!(f, "{s}")
    }
}

impl Command {
    /// Short label for the hint bar
    pub fn description(&self) -> &'static str {
        match self {
            Command::Noop => "unbound",
            Command::Quit => "quit",
            Command::MoveUp => "up",
            Command::MoveDown => "down",
            Command::Select => "select",
            Command::GoBack => "back",
            Command::Save => "save & create",
            Command::NewLine => "new line",
            Command::DeleteBackwardChar => "delete",
            Command::MoveCursorUp => "cursor up",
            Command::MoveCursorDown => "cursor down",
            Command::MoveCursorLeft => "cursor left",
            Command::MoveCursorRight => "cursor right",
            Command::Confirm => "yes",
            Command::Decline => "no",
        }
    }
}

/// Key bindings for a specific layer
pub type KeyMap = HashMap<KeyEvent, Command>;

/// Complete key binding configuration, composed from reusable layers.
#[derive(Debug, Clone)]
pub struct KeysConfig {
    pub general: KeyMap,
    pub list_navigation: KeyMap,
    pub branch_select: KeyMap,
    pub template_select: KeyMap,
    pub editor: KeyMap,
    pub recovery: KeyMap,
    pub finished: KeyMap,
}

/// Intermediate structure for deserializing key bindings
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct KeysConfigRaw {
    #[serde(default)]
    general: HashMap<String, String>,
    #[serde(default)]
    list_navigation: HashMap<String, String>,
    #[serde(default)]
    branch_select: HashMap<String, String>,
    #[serde(default)]
    template_select: HashMap<String, String>,
    #[serde(default)]
    editor: HashMap<String, String>,
    #[serde(default)]
    recovery: HashMap<String, String>,
    #[serde(default)]
    finished: HashMap<String, String>,
}

impl Default for KeysConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn bind(map: &mut KeyMap, key: KeyEvent, command: Command) {
    map.insert(key, command);
}

impl KeysConfig {
    pub fn new() -> Self {
        Self {
            general: Self::default_general(),
            list_navigation: Self::default_list_navigation(),
            branch_select: Self::default_branch_select(),
            template_select: Self::default_template_select(),
            editor: Self::default_editor(),
            recovery: Self::default_recovery(),
            finished: Self::default_finished(),
        }
    }

    /// Build the effective keymap for a screen status using precedence:
    /// general < shared layers < status-specific
    pub fn keymap_for_status(&self, status: &ScreenStatus) -> KeyMap {
        let mut combined = KeyMap::new();
        Self::apply_layer(&mut combined, &self.general);

        match status {
            ScreenStatus::SelectingBranch => {
                Self::apply_layer(&mut combined, &self.list_navigation);
                Self::apply_layer(&mut combined, &self.branch_select);
            }
            ScreenStatus::SelectingTemplate => {
                Self::apply_layer(&mut combined, &self.list_navigation);
                Self::apply_layer(&mut combined, &self.template_select);
            }
            ScreenStatus::Editing => {
                Self::apply_layer(&mut combined, &self.editor);
            }
            ScreenStatus::Error {
                recovery: Some(_), ..
            } => {
                Self::apply_layer(&mut combined, &self.recovery);
            }
            ScreenStatus::Error { recovery: None, .. }
            | ScreenStatus::Success { .. }
            | ScreenStatus::Failed { .. } => {
                Self::apply_layer(&mut combined, &self.finished);
            }
            ScreenStatus::Creating => {
                // general-only: a hard quit is the only way out
            }
        }

        combined
    }

    /// Find the first key bound to a given command in a keymap.
    pub fn find_key(keymap: &KeyMap, command: &Command) -> Option<KeyEvent> {
        // Prefer shorter/simpler key representations
        let mut found: Vec<_> = keymap
            .iter()
            .filter(|(_, cmd)| *cmd == command)
            .map(|(key, _)| *key)
            .collect();
        found.sort();
        found.into_iter().next()
    }

    fn apply_layer(base: &mut KeyMap, layer: &KeyMap) {
        for (key, command) in layer {
            if *command == Command::Noop {
                base.remove(key);
            } else {
                base.insert(*key, command.clone());
            }
        }
    }

    fn default_general() -> KeyMap {
        let mut map = KeyMap::new();
        bind(&mut map, KeyEvent::ctrl('c'), Command::Quit);
        map
    }

    fn default_list_navigation() -> KeyMap {
        let mut map = KeyMap::new();
        bind(&mut map, KeyEvent::plain(KeyCode::Up), Command::MoveUp);
        bind(&mut map, KeyEvent::plain(KeyCode::Down), Command::MoveDown);
        bind(&mut map, KeyEvent::ctrl('p'), Command::MoveUp);
        bind(&mut map, KeyEvent::ctrl('n'), Command::MoveDown);
        bind(&mut map, KeyEvent::plain(KeyCode::Char('q')), Command::Quit);
        bind(&mut map, KeyEvent::plain(KeyCode::Esc), Command::Quit);
        map
    }

    fn default_branch_select() -> KeyMap {
        let mut map = KeyMap::new();
        bind(&mut map, KeyEvent::plain(KeyCode::Enter), Command::Select);
        bind(&mut map, KeyEvent::plain(KeyCode::Right), Command::Select);
        map
    }

    fn default_template_select() -> KeyMap {
        let mut map = KeyMap::new();
        bind(&mut map, KeyEvent::plain(KeyCode::Enter), Command::Select);
        bind(&mut map, KeyEvent::plain(KeyCode::Right), Command::Select);
        bind(&mut map, KeyEvent::plain(KeyCode::Left), Command::GoBack);
        map
    }

    fn default_editor() -> KeyMap {
        let mut map = KeyMap::new();
        bind(&mut map, KeyEvent::ctrl('s'), Command::Save);
        bind(
            &mut map,
            KeyEvent::new(KeyCode::Char('s'), KeyModifiers::SUPER),
            Command::Save,
        );
        bind(&mut map, KeyEvent::ctrl('b'), Command::GoBack);
        bind(&mut map, KeyEvent::plain(KeyCode::Esc), Command::Quit);
        bind(&mut map, KeyEvent::plain(KeyCode::Enter), Command::NewLine);
        bind(
            &mut map,
            KeyEvent::plain(KeyCode::Backspace),
            Command::DeleteBackwardChar,
        );
        bind(&mut map, KeyEvent::plain(KeyCode::Up), Command::MoveCursorUp);
        bind(
            &mut map,
            KeyEvent::plain(KeyCode::Down),
            Command::MoveCursorDown,
        );
        bind(
            &mut map,
            KeyEvent::plain(KeyCode::Left),
            Command::MoveCursorLeft,
        );
        bind(
            &mut map,
            KeyEvent::plain(KeyCode::Right),
            Command::MoveCursorRight,
        );
        map
    }

    fn default_recovery() -> KeyMap {
        let mut map = KeyMap::new();
        bind(&mut map, KeyEvent::plain(KeyCode::Char('y')), Command::Confirm);
        bind(&mut map, KeyEvent::plain(KeyCode::Enter), Command::Confirm);
        bind(&mut map, KeyEvent::plain(KeyCode::Char('n')), Command::Decline);
        bind(&mut map, KeyEvent::plain(KeyCode::Char('q')), Command::Quit);
        bind(&mut map, KeyEvent::plain(KeyCode::Esc), Command::Quit);
        map
    }

    fn default_finished() -> KeyMap {
        let mut map = KeyMap::new();
        bind(&mut map, KeyEvent::plain(KeyCode::Char('q')), Command::Quit);
        bind(&mut map, KeyEvent::plain(KeyCode::Esc), Command::Quit);
        bind(&mut map, KeyEvent::plain(KeyCode::Enter), Command::Quit);
        map
    }

    /// Parse a string representation of keybindings into a `KeyMap`
    fn parse_keymap(raw_map: &HashMap<String, String>) -> Result<KeyMap, String> {
        let mut keymap = KeyMap::new();
        for (key_str, command_str) in raw_map {
            let key_event =
                KeyEvent::from_str(key_str).map_err(|e| format!("Invalid key '{key_str}': {e}"))?;
            let command = Command::from_str(command_str)
                .map_err(|e| format!("Invalid command '{command_str}': {e}"))?;
            keymap.insert(key_event, command);
        }
        Ok(keymap)
    }

    /// Merge user configuration with defaults.
    ///
    /// Keep `Noop` values so higher-precedence layers can explicitly unbind inherited mappings.
    fn from_raw(raw: &KeysConfigRaw) -> Result<Self, String> {
        let mut config = Self::default();

        config.general.extend(Self::parse_keymap(&raw.general)?);
        config
            .list_navigation
            .extend(Self::parse_keymap(&raw.list_navigation)?);
        config
            .branch_select
            .extend(Self::parse_keymap(&raw.branch_select)?);
        config
            .template_select
            .extend(Self::parse_keymap(&raw.template_select)?);
        config.editor.extend(Self::parse_keymap(&raw.editor)?);
        config.recovery.extend(Self::parse_keymap(&raw.recovery)?);
        config.finished.extend(Self::parse_keymap(&raw.finished)?);

        Ok(config)
    }
}

impl<'de> Deserialize<'de> for KeysConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = KeysConfigRaw::deserialize(deserializer)?;
        KeysConfig::from_raw(&raw).map_err(serde::de::Error::custom)
    }
}
