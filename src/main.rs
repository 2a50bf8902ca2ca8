use anyhow::Result;
use pacman_launcher::{config::Config, host, package_manager, PacmanHandler};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    // 加载配置
    let config = Arc::new(Config::load_or_default()?);
    let missing = package_manager::missing_dependencies(&config);

    if std::env::args().skip(1).any(|arg| arg == "--check") {
        let handler = PacmanHandler::new(config.clone());
        println!("插件 {}，用法: {}{}", handler.id(), handler.trigger(), handler.synopsis());
        if missing.is_empty() {
            println!("依赖程序齐全: {}", handler.bin_dependencies().join(", "));
            return Ok(());
        }
        eprintln!("缺少依赖程序: {}", missing.join(", "));
        eprintln!("请安装: sudo pacman -S {}", missing.join(" "));
        std::process::exit(1);
    }

    if !missing.is_empty() {
        log::warn!("缺少依赖程序 {}，查询将没有结果", missing.join(", "));
    }

    host::run(config).await
}
