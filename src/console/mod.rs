mod permissions;
mod terminal_view;

pub use permissions::ConsolePermissions;
pub use terminal_view::TerminalView;
