//! 外部只读查询程序的执行

use std::future::Future;
use std::process::Stdio;
use thiserror::Error;
use tokio::process::Command;

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("无法启动 {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{program} 执行失败 (exit={code:?}): {stderr}")]
    Exit {
        program: String,
        code: Option<i32>,
        stderr: String,
    },
}

/// 运行外部程序并取回完整标准输出
pub trait ToolRunner: Send + Sync {
    fn run(
        &self,
        program: &str,
        args: &[String],
    ) -> impl Future<Output = Result<String, ToolError>> + Send;
}

/// 基于 tokio 子进程的实现
///
/// 子进程一旦启动就会运行到结束：等待它的 future 被丢弃时不会杀死进程，
/// 输出直接作废，由 tokio 在后台回收。
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ToolRunner for SystemRunner {
    fn run(
        &self,
        program: &str,
        args: &[String],
    ) -> impl Future<Output = Result<String, ToolError>> + Send {
        let mut cmd = Command::new(program);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        let program = program.to_string();

        async move {
            let output = cmd.output().await.map_err(|source| ToolError::Spawn {
                program: program.clone(),
                source,
            })?;
            if !output.status.success() {
                return Err(ToolError::Exit {
                    program,
                    code: output.status.code(),
                    stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
                });
            }
            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_binary_is_spawn_error() {
        let err = SystemRunner
            .run("pacman-launcher-no-such-binary", &[])
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::Spawn { .. }));
    }

    #[tokio::test]
    async fn non_zero_exit_is_exit_error() {
        let args = vec!["-c".to_string(), "echo oops >&2; exit 3".to_string()];
        let err = SystemRunner.run("sh", &args).await.unwrap_err();
        match err {
            ToolError::Exit { code, stderr, .. } => {
                assert_eq!(code, Some(3));
                assert_eq!(stderr, "oops");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn captures_stdout() {
        let args = vec!["-c".to_string(), "printf 'a\\tb\\n'".to_string()];
        let out = SystemRunner.run("sh", &args).await.unwrap();
        assert_eq!(out, "a\tb\n");
    }
}
