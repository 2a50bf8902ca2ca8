//! 输入防抖：快速连续输入时只有最后一次查询会启动子进程

use std::time::Duration;

const MIN_STEP: Duration = Duration::from_millis(1);

/// 分步等待 `delay`，每一步之后检查 `is_valid`。
///
/// 查询失效时立即返回 `false`；完整等待结束且查询仍有效时返回 `true`。
/// 等待开始前也会检查一次，已失效的查询不会睡眠。
pub async fn should_proceed<F>(is_valid: F, delay: Duration, step: Duration) -> bool
where
    F: Fn() -> bool,
{
    if !is_valid() {
        return false;
    }

    let step = step.max(MIN_STEP);
    let mut waited = Duration::ZERO;
    while waited < delay {
        let slice = step.min(delay - waited);
        tokio::time::sleep(slice).await;
        waited += slice;
        if !is_valid() {
            return false;
        }
    }

    true
}
