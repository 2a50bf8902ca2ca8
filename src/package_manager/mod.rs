//! 包管理器模块：对 expac 只读查询的封装

pub mod parser;
pub mod runner;
pub mod types;

// 重新导出常用类型和函数
pub use runner::{SystemRunner, ToolError, ToolRunner};
pub use types::{AnnotatedRecord, InstalledSet, PackageRecord, Snapshot};

use crate::config::Config;
use parser::{parse_available_output, parse_installed_output, AVAILABLE_FORMAT, INSTALLED_FORMAT};
use std::process::Command;

#[derive(Debug, Clone)]
pub struct PackageManager<R = SystemRunner> {
    runner: R,
    expac: String,
}

impl<R: ToolRunner> PackageManager<R> {
    pub fn new(config: &Config, runner: R) -> Self {
        Self {
            runner,
            expac: config.expac.clone(),
        }
    }

    // `--` 之后的查询不会被当作选项，例如 "-h"
    fn available_args(query: &str) -> Vec<String> {
        vec![
            "-Ss".to_string(),
            AVAILABLE_FORMAT.to_string(),
            "--".to_string(),
            query.to_string(),
        ]
    }

    fn installed_args(query: &str) -> Vec<String> {
        vec![
            "-Qs".to_string(),
            INSTALLED_FORMAT.to_string(),
            "--".to_string(),
            query.to_string(),
        ]
    }

    /// 搜索同步数据库中的包 (expac -Ss)，按名称排序
    pub async fn fetch_available(&self, query: &str) -> Vec<PackageRecord> {
        let args = Self::available_args(query);
        match self.runner.run(&self.expac, &args).await {
            Ok(stdout) => {
                let mut records = parse_available_output(&stdout);
                records.sort_by(|a, b| a.name.cmp(&b.name));
                records
            }
            Err(e) => {
                log::warn!("查询可用包失败，按无结果处理: {}", e);
                Vec::new()
            }
        }
    }

    /// 搜索本地已安装包名 (expac -Qs)
    pub async fn fetch_installed_names(&self, query: &str) -> InstalledSet {
        let args = Self::installed_args(query);
        match self.runner.run(&self.expac, &args).await {
            Ok(stdout) => parse_installed_output(&stdout),
            Err(e) => {
                log::warn!("查询已安装包失败，全部视为未安装: {}", e);
                InstalledSet::new()
            }
        }
    }

    /// 两路查询同时启动，互不等待
    pub async fn fetch(&self, query: &str) -> Snapshot {
        let (installed, available) = tokio::join!(
            self.fetch_installed_names(query),
            self.fetch_available(query)
        );
        Snapshot {
            available,
            installed,
        }
    }
}

/// 返回 PATH 中找不到的依赖程序
pub fn missing_dependencies(config: &Config) -> Vec<String> {
    config
        .bin_dependencies()
        .into_iter()
        .filter(|bin| !is_on_path(bin))
        .map(|bin| bin.to_string())
        .collect()
}

/// 用 shell 内建的 `command -v` 检查，不依赖系统是否装了 which
fn is_on_path(bin: &str) -> bool {
    Command::new("sh")
        .args(["-c", "command -v \"$1\" >/dev/null 2>&1", "sh", bin])
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::runner::testing::ScriptedRunner;
    use super::*;

    const TWO_REPOS: &str = "vim\t9.1\textra\tVi Improved\thttps://www.vim.org\tgpm\n\
                             gvim\t9.1\textra\tVi Improved (GUI)\thttps://www.vim.org\tgtk3\n\
                             vim\t9.0\tcommunity-testing\tVi Improved\t\tgpm\n";

    fn manager(
        available: Result<&str, i32>,
        installed: Result<&str, i32>,
    ) -> PackageManager<ScriptedRunner> {
        PackageManager::new(&Config::default(), ScriptedRunner::new(available, installed))
    }

    #[test]
    fn builds_expac_arguments() {
        let args = PackageManager::<SystemRunner>::available_args("htop");
        assert_eq!(args, vec!["-Ss", "%n\t%v\t%r\t%d\t%u\t%E", "--", "htop"]);
        let args = PackageManager::<SystemRunner>::installed_args("htop");
        assert_eq!(args, vec!["-Qs", "%n", "--", "htop"]);
    }

    #[test]
    fn dash_query_stays_positional() {
        let args = PackageManager::<SystemRunner>::available_args("-h");
        assert_eq!(&args[2..], ["--", "-h"]);
    }

    #[test]
    fn reports_only_missing_binaries() {
        let config = Config {
            pacman: "sh".to_string(),
            expac: "pacman-launcher-no-such-binary".to_string(),
            ..Config::default()
        };
        assert_eq!(missing_dependencies(&config), vec!["pacman-launcher-no-such-binary"]);
    }

    #[tokio::test]
    async fn available_is_sorted_by_name_keeping_repo_order() {
        let pm = manager(Ok(TWO_REPOS), Ok(""));
        let records = pm.fetch_available("vim").await;
        let keys: Vec<(&str, &str)> = records
            .iter()
            .map(|r| (r.name.as_str(), r.repository.as_str()))
            .collect();
        assert_eq!(
            keys,
            vec![("gvim", "extra"), ("vim", "extra"), ("vim", "community-testing")]
        );
    }

    #[tokio::test]
    async fn failures_degrade_to_empty_collections() {
        let pm = manager(Err(1), Err(127));
        let snapshot = pm.fetch("vim").await;
        assert!(snapshot.available.is_empty());
        assert!(snapshot.installed.is_empty());
    }

    #[tokio::test]
    async fn installed_failure_does_not_affect_available() {
        let pm = manager(Ok(TWO_REPOS), Err(1));
        let snapshot = pm.fetch("vim").await;
        assert_eq!(snapshot.available.len(), 3);
        assert!(snapshot.installed.is_empty());
    }

    #[tokio::test]
    async fn fetch_runs_both_queries() {
        let runner = ScriptedRunner::new(Ok(TWO_REPOS), Ok("vim\n"));
        let pm = PackageManager::new(&Config::default(), runner.clone());
        let snapshot = pm.fetch("vim").await;
        assert_eq!(runner.call_count(), 2);
        assert!(snapshot.installed.contains("vim"));
    }
}
