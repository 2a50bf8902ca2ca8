//! 基于标准输入输出的简易宿主
//!
//! 每行输入一条命令：以触发前缀开头的是查询，`!<条目 id> <动作 id>` 触发上一批结果中的动作。
//! 每个批次以一行 JSON 输出到标准输出。

use crate::config::Config;
use crate::items::ResultItem;
use crate::launcher::{Launcher, SystemLauncher};
use crate::package_manager::ToolRunner;
use crate::session::{PacmanHandler, QueryContext};
use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCommand {
    Query(String),
    Activate { item: String, action: String },
}

impl HostCommand {
    pub fn parse(line: &str, trigger: &str) -> Option<Self> {
        if let Some(rest) = line.strip_prefix('!') {
            let mut parts = rest.split_whitespace();
            let item = parts.next()?.to_string();
            let action = parts.next()?.to_string();
            return Some(Self::Activate { item, action });
        }

        // 宿主通常会裁掉行尾空白，仅输入触发词本身（如 "pac"）也算空查询
        if let Some(query) = line.strip_prefix(trigger) {
            return Some(Self::Query(query.to_string()));
        }
        if !trigger.trim().is_empty() && line.trim_end() == trigger.trim_end() {
            return Some(Self::Query(String::new()));
        }
        None
    }
}

#[derive(Debug, Serialize)]
struct Batch<'a> {
    query: &'a str,
    items: &'a [ResultItem],
}

struct QueryDone {
    token: CancellationToken,
    query: String,
    items: Vec<ResultItem>,
}

pub async fn run(config: Arc<Config>) -> Result<()> {
    let handler = Arc::new(PacmanHandler::new(config.clone()));
    let launcher: Arc<dyn Launcher> = Arc::new(SystemLauncher::new(&config));
    let input = BufReader::new(tokio::io::stdin());
    serve(handler, launcher, input, &mut std::io::stdout()).await
}

/// 逐行处理输入直到 EOF；EOF 后等待仍在进行的查询输出完毕
pub async fn serve<R, I, W>(
    handler: Arc<PacmanHandler<R>>,
    launcher: Arc<dyn Launcher>,
    input: I,
    out: &mut W,
) -> Result<()>
where
    R: ToolRunner + 'static,
    I: AsyncBufRead + Unpin,
    W: Write,
{
    let (tx, mut rx) = mpsc::channel::<QueryDone>(32);
    let mut tx = Some(tx);
    let mut lines = input.lines();
    let mut current: Option<CancellationToken> = None;
    let mut last_batch: Vec<ResultItem> = Vec::new();

    loop {
        tokio::select! {
            line = lines.next_line(), if tx.is_some() => {
                let Some(line) = line.context("读取输入失败")? else {
                    // 关闭发送端，所有查询任务结束后 recv 返回 None
                    tx = None;
                    continue;
                };
                match HostCommand::parse(&line, handler.trigger()) {
                    Some(HostCommand::Query(query)) => {
                        // 新查询到来，旧查询立即失效
                        if let Some(previous) = current.take() {
                            previous.cancel();
                        }
                        let token = CancellationToken::new();
                        current = Some(token.clone());

                        let Some(tx) = tx.clone() else { continue };
                        let handler = handler.clone();
                        tokio::spawn(async move {
                            let ctx = QueryContext::new(&query, token.clone());
                            let items = handler.items(&ctx).await;
                            let query = ctx.query().to_string();
                            let _ = tx.send(QueryDone { token, query, items }).await;
                        });
                    }
                    Some(HostCommand::Activate { item, action }) => {
                        activate(&last_batch, &item, &action, &launcher);
                    }
                    None => log::debug!("忽略输入: {:?}", line),
                }
            }
            done = rx.recv() => {
                let Some(done) = done else { break };
                if done.token.is_cancelled() {
                    continue;
                }
                print_batch(out, &done.query, &done.items)?;
                last_batch = done.items;
            }
        }
    }

    Ok(())
}

fn activate(
    batch: &[ResultItem],
    item_id: &str,
    action_id: &str,
    launcher: &Arc<dyn Launcher>,
) {
    let Some(item) = batch.iter().find(|i| i.id == item_id) else {
        log::warn!("未找到条目 {}", item_id);
        return;
    };
    let Some(action) = item.action(action_id) else {
        log::warn!("条目 {} 没有动作 {}", item_id, action_id);
        return;
    };
    let run = action.handler(launcher.clone());
    run();
}

fn print_batch<W: Write>(out: &mut W, query: &str, items: &[ResultItem]) -> Result<()> {
    let line = serde_json::to_string(&Batch { query, items })?;
    writeln!(out, "{}", line)?;
    out.flush()?;
    Ok(())
}
