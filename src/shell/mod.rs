//! Shell command execution, platform detection and profile editing.

pub mod command;
pub mod platform;
pub mod probe;
pub mod profile;

pub use command::{execute, execute_shell, CommandOptions, CommandResult};
pub use platform::{
    can_write_dir, default_profile, detect_shell, is_ci, is_elevated, reload_command, ShellInfo,
    ShellType,
};
pub use probe::{is_executable, parse_system_path, resolve_tool_path, which};
pub use profile::{apply_to_current_session, ensure_entries, ensure_line, ProfileEntry};
