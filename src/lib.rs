//! 在文本启动器中搜索、安装、卸载 Arch Linux 软件包

pub mod config;
pub mod debounce;
pub mod host;
pub mod items;
pub mod launcher;
pub mod merge;
pub mod package_manager;
pub mod session;

pub use config::Config;
pub use items::{Action, ActionKind, Effect, ItemBuilder, ResultItem};
pub use session::{PacmanHandler, QueryContext};
