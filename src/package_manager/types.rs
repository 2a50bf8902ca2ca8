//! PackageManager 相关数据类型定义

use std::collections::HashSet;

/// `expac -Ss` 输出的一行：可用（同步数据库中的）包
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRecord {
    pub name: String,
    pub version: String,
    pub repository: String,
    pub description: String,
    /// 上游项目主页，可能为空
    pub upstream_url: String,
    /// 原样保留，不做解析
    pub dependencies: String,
}

/// 已安装包名集合，单次查询内只读
pub type InstalledSet = HashSet<String>;

/// 合并后的条目：可用包 + 是否已安装
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedRecord {
    pub record: PackageRecord,
    pub installed: bool,
}

/// 一次查询的两路数据快照
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub available: Vec<PackageRecord>,
    pub installed: InstalledSet,
}
