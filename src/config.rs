use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// 插件配置，启动时加载一次，之后只读共享（`Arc<Config>`）
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 结果条目 id 的命名空间前缀
    pub id: String,
    /// 在启动器全局查询中激活本插件的前缀
    pub trigger: String,
    pub icon: String,
    /// 官方包页面基础地址，必须以 `/` 结尾
    pub pkgs_url: String,
    pub arch: String,
    pub pacman: String,
    pub expac: String,
    pub sudo: String,
    /// 终端命令及参数，待执行的命令追加在末尾
    pub terminal: Vec<String>,
    /// 命令结束后保持终端窗口，等待回车
    pub hold_terminal: bool,
    pub browser: String,
    pub debounce_ms: u64,
    pub poll_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            id: "pacman".to_string(),
            trigger: "pac ".to_string(),
            icon: "package-x-generic".to_string(),
            pkgs_url: "https://www.archlinux.org/packages/".to_string(),
            arch: "x86_64".to_string(),
            pacman: "pacman".to_string(),
            expac: "expac".to_string(),
            sudo: "sudo".to_string(),
            terminal: vec!["x-terminal-emulator".to_string(), "-e".to_string()],
            hold_terminal: true,
            browser: "xdg-open".to_string(),
            debounce_ms: 500,
            poll_ms: 10,
        }
    }
}

impl Config {
    pub fn config_path() -> PathBuf {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(".config/pacman-launcher/config.toml")
    }

    pub fn load_or_default() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = fs::read_to_string(&config_path)
                .with_context(|| format!("读取配置文件失败: {}", config_path.display()))?;
            Self::from_toml_str(&content)
                .with_context(|| format!("解析配置文件失败: {}", config_path.display()))
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn poll_step(&self) -> Duration {
        Duration::from_millis(self.poll_ms)
    }

    /// 插件依赖的外部程序，供宿主检查缺失
    pub fn bin_dependencies(&self) -> [&str; 2] {
        [self.pacman.as_str(), self.expac.as_str()]
    }
}
