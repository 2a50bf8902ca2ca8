//! 输出解析函数

use super::types::{InstalledSet, PackageRecord};

/// `expac -Ss` 使用的输出格式：名称、版本、仓库、描述、项目地址、依赖
pub const AVAILABLE_FORMAT: &str = "%n\t%v\t%r\t%d\t%u\t%E";

/// `expac -Qs` 使用的输出格式：仅名称
pub const INSTALLED_FORMAT: &str = "%n";

const AVAILABLE_FIELDS: usize = 6;

/// 解析单行制表符分隔的记录，字段数不对时返回 None
pub fn parse_available_line(line: &str) -> Option<PackageRecord> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() != AVAILABLE_FIELDS || fields[0].is_empty() {
        return None;
    }

    Some(PackageRecord {
        name: fields[0].to_string(),
        version: fields[1].to_string(),
        repository: fields[2].to_string(),
        description: fields[3].to_string(),
        upstream_url: fields[4].to_string(),
        dependencies: fields[5].to_string(),
    })
}

/// 解析 `expac -Ss` 的完整输出，跳过格式错误的行
pub fn parse_available_output(output: &str) -> Vec<PackageRecord> {
    let mut records = Vec::new();

    for line in output.lines() {
        if line.trim().is_empty() {
            continue;
        }
        match parse_available_line(line) {
            Some(record) => records.push(record),
            None => log::debug!("跳过格式错误的 expac 输出行: {:?}", line),
        }
    }

    records
}

/// 解析 `expac -Qs` 的输出为包名集合
pub fn parse_installed_output(output: &str) -> InstalledSet {
    output
        .lines()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| name.to_string())
        .collect()
}
