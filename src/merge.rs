//! 可用包与已安装包的合并过滤

use crate::package_manager::{AnnotatedRecord, InstalledSet, PackageRecord};
use std::collections::HashSet;

/// 过滤出名称包含 `query` 的可用包并标注安装状态。
///
/// expac 的匹配同时覆盖描述字段且按正则解释，这里再按名称做一次字面子串过滤。
/// 输出保持 `available` 的顺序；重复的 (仓库, 名称) 只保留第一条。
pub fn merge(
    available: Vec<PackageRecord>,
    installed: &InstalledSet,
    query: &str,
) -> Vec<AnnotatedRecord> {
    let mut seen: HashSet<(String, String)> = HashSet::new();
    let mut merged = Vec::with_capacity(available.len());

    for record in available {
        if !record.name.contains(query) {
            continue;
        }
        if !seen.insert((record.repository.clone(), record.name.clone())) {
            log::debug!("重复条目 {}/{}，已忽略", record.repository, record.name);
            continue;
        }
        let installed = installed.contains(&record.name);
        merged.push(AnnotatedRecord { record, installed });
    }

    merged
}
