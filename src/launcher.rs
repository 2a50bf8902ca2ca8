//! 动作的副作用：在终端中执行命令、用浏览器打开链接

use crate::config::Config;
use std::process::{Command, Stdio};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("命令不能为空")]
    EmptyCommand,
    #[error("无法启动 {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

pub trait Launcher: Send + Sync {
    /// 在可见终端中执行一条 shell 命令
    fn run_terminal(&self, command: &str) -> Result<(), LaunchError>;

    /// 用默认浏览器打开链接
    fn open_url(&self, url: &str) -> Result<(), LaunchError>;
}

/// 通过配置中的终端和浏览器程序执行
#[derive(Debug, Clone)]
pub struct SystemLauncher {
    terminal: Vec<String>,
    hold_terminal: bool,
    browser: String,
}

impl SystemLauncher {
    pub fn new(config: &Config) -> Self {
        Self {
            terminal: config.terminal.clone(),
            hold_terminal: config.hold_terminal,
            browser: config.browser.clone(),
        }
    }

    /// 组装终端命令行：`<terminal...> sh -c <command>`
    pub fn terminal_argv(&self, command: &str) -> Result<Vec<String>, LaunchError> {
        if command.trim().is_empty() || self.terminal.is_empty() {
            return Err(LaunchError::EmptyCommand);
        }
        let script = if self.hold_terminal {
            format!("{}; printf '\\nPress Enter to close...'; read _", command)
        } else {
            command.to_string()
        };

        let mut argv = self.terminal.clone();
        argv.extend(["sh".to_string(), "-c".to_string(), script]);
        Ok(argv)
    }
}

impl Launcher for SystemLauncher {
    fn run_terminal(&self, command: &str) -> Result<(), LaunchError> {
        let argv = self.terminal_argv(command)?;
        spawn_detached(&argv)
    }

    fn open_url(&self, url: &str) -> Result<(), LaunchError> {
        if url.trim().is_empty() || self.browser.trim().is_empty() {
            return Err(LaunchError::EmptyCommand);
        }
        spawn_detached(&[self.browser.clone(), url.to_string()])
    }
}

/// 在新会话中启动程序，不等待其结束
fn spawn_detached(argv: &[String]) -> Result<(), LaunchError> {
    use std::os::unix::process::CommandExt;

    let (program, args) = argv.split_first().ok_or(LaunchError::EmptyCommand)?;

    let mut cmd = Command::new(program);
    cmd.args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    unsafe {
        cmd.pre_exec(|| {
            // 脱离启动器的进程组，启动器退出时终端不受影响
            libc::setsid();
            Ok(())
        });
    }
    let mut child = cmd.spawn().map_err(|source| LaunchError::Spawn {
        program: program.clone(),
        source,
    })?;

    // 回收僵尸进程
    std::thread::spawn(move || {
        let _ = child.wait();
    });
    Ok(())
}
