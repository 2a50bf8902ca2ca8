//! 单次查询的处理流程

use crate::config::Config;
use crate::debounce;
use crate::items::{ItemBuilder, ResultItem};
use crate::merge::merge;
use crate::package_manager::{PackageManager, SystemRunner, ToolRunner};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// 宿主传入的查询：文本 + 取消令牌，只在一次 `items` 调用期间有效
#[derive(Debug, Clone)]
pub struct QueryContext {
    query: String,
    token: CancellationToken,
}

impl QueryContext {
    pub fn new(query: &str, token: CancellationToken) -> Self {
        Self {
            query: query.trim().to_string(),
            token,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// 查询仍是宿主当前的活动查询
    pub fn is_valid(&self) -> bool {
        !self.token.is_cancelled()
    }

    pub async fn cancelled(&self) {
        self.token.cancelled().await
    }
}

pub struct PacmanHandler<R = SystemRunner> {
    config: Arc<Config>,
    packages: PackageManager<R>,
}

impl PacmanHandler<SystemRunner> {
    pub fn new(config: Arc<Config>) -> Self {
        Self::with_runner(config, SystemRunner)
    }
}

impl<R: ToolRunner> PacmanHandler<R> {
    pub fn with_runner(config: Arc<Config>, runner: R) -> Self {
        let packages = PackageManager::new(&config, runner);
        Self { config, packages }
    }

    pub fn id(&self) -> &str {
        &self.config.id
    }

    pub fn trigger(&self) -> &str {
        &self.config.trigger
    }

    pub fn synopsis(&self) -> &'static str {
        "<package name>"
    }

    pub fn bin_dependencies(&self) -> [&str; 2] {
        self.config.bin_dependencies()
    }

    /// 处理一次查询，返回一批结果。
    ///
    /// - 空查询：系统更新条目，不启动子进程
    /// - 有匹配：按名称排序的包条目
    /// - 无匹配：官网搜索条目
    /// - 查询已失效：空批次
    pub async fn items(&self, ctx: &QueryContext) -> Vec<ResultItem> {
        let builder = ItemBuilder::new(&self.config);
        let query = ctx.query();

        if query.is_empty() {
            return vec![builder.update_item()];
        }

        let proceed = debounce::should_proceed(
            || ctx.is_valid(),
            self.config.debounce(),
            self.config.poll_step(),
        )
        .await;
        if !proceed {
            log::debug!("查询 {:?} 已被新输入取代，跳过", query);
            return Vec::new();
        }

        let snapshot = tokio::select! {
            _ = ctx.cancelled() => {
                log::debug!("查询 {:?} 在等待 expac 时失效，丢弃输出", query);
                return Vec::new();
            }
            snapshot = self.packages.fetch(query) => snapshot,
        };

        if !ctx.is_valid() {
            return Vec::new();
        }

        let merged = merge(snapshot.available, &snapshot.installed, query);
        if merged.is_empty() {
            return vec![builder.search_fallback(query)];
        }

        merged.iter().map(|record| builder.build(record)).collect()
    }
}
