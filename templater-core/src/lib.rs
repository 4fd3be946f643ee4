pub mod action;
pub mod branch;
pub mod config;
pub mod constants;
pub mod context;
pub mod draft;
pub mod editor;
pub mod event;
pub mod gh;
pub mod git;
pub mod keyboard;
pub mod machine;
pub mod recovery;
pub mod state;
pub mod status;
pub mod template;

// Re-export commonly used types at crate root
pub use action::{Action, EditAction};
pub use config::Config;
pub use context::AppContext;
pub use editor::EditBuffer;
pub use event::AppEvent;
pub use gh::{GhProvider, SubmitResult};
pub use git::GitProvider;
pub use keyboard::KeyEvent;
pub use machine::{Effect, StateMachine};
pub use recovery::RecoveryAction;
pub use state::{AppState, ErrorReason, Session};
pub use status::ScreenStatus;
pub use template::{Template, TemplateProvider};
