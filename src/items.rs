//! 结果条目与动作的构建

use crate::config::Config;
use crate::launcher::{LaunchError, Launcher};
use crate::package_manager::AnnotatedRecord;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Install,
    Remove,
    Reinstall,
    ShowPage,
    ShowProject,
    Search,
    UpdateFull,
    UpdateNoConfirm,
    UpdateCacheOnly,
}

impl ActionKind {
    pub fn id(self) -> &'static str {
        match self {
            Self::Install => "inst",
            Self::Remove => "rem",
            Self::Reinstall => "reinst",
            Self::ShowPage => "pkg_url",
            Self::ShowProject => "proj_url",
            Self::Search => "search",
            Self::UpdateFull => "up",
            Self::UpdateNoConfirm => "up-nc",
            Self::UpdateCacheOnly => "up-cache",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Install => "Install",
            Self::Remove => "Remove",
            Self::Reinstall => "Reinstall",
            Self::ShowPage => "Show on packages.archlinux.org",
            Self::ShowProject => "Show project website",
            Self::Search => "Search on archlinux.org",
            Self::UpdateFull => "Update packages",
            Self::UpdateNoConfirm => "Update packages (no confirm)",
            Self::UpdateCacheOnly => "Update pacman cache",
        }
    }
}

/// 动作触发时的实际效果，构建时按值确定
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "target", rename_all = "snake_case")]
pub enum Effect {
    Terminal(String),
    OpenUrl(String),
}

impl Effect {
    pub fn apply(&self, launcher: &dyn Launcher) -> Result<(), LaunchError> {
        match self {
            Self::Terminal(command) => launcher.run_terminal(command),
            Self::OpenUrl(url) => launcher.open_url(url),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Action {
    pub id: &'static str,
    pub kind: ActionKind,
    pub label: String,
    pub effect: Effect,
}

impl Action {
    pub fn new(kind: ActionKind, effect: Effect) -> Self {
        Self {
            id: kind.id(),
            kind,
            label: kind.label().to_string(),
            effect,
        }
    }

    pub fn trigger(&self, launcher: &dyn Launcher) -> Result<(), LaunchError> {
        log::info!("执行动作 {}: {:?}", self.id, self.effect);
        self.effect.apply(launcher)
    }

    /// 供宿主使用的无参回调，持有效果的独立副本
    pub fn handler(&self, launcher: Arc<dyn Launcher>) -> impl Fn() + Send + Sync + 'static {
        let action = self.clone();
        move || {
            if let Err(e) = action.trigger(launcher.as_ref()) {
                log::warn!("动作 {} 执行失败: {}", action.id, e);
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultItem {
    pub id: String,
    pub text: String,
    pub subtext: String,
    pub input_action_text: Option<String>,
    pub icon: String,
    pub actions: Vec<Action>,
}

impl ResultItem {
    pub fn action(&self, id: &str) -> Option<&Action> {
        self.actions.iter().find(|a| a.id == id)
    }
}

pub struct ItemBuilder<'a> {
    config: &'a Config,
}

impl<'a> ItemBuilder<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    fn pacman_command(&self, flags: &str, target: Option<&str>) -> Effect {
        let mut command = format!("{} {} {}", self.config.sudo, self.config.pacman, flags);
        if let Some(target) = target {
            command.push(' ');
            command.push_str(target);
        }
        Effect::Terminal(command)
    }

    pub fn package_page_url(&self, repository: &str, name: &str) -> String {
        format!("{}{}/{}/{}/", self.config.pkgs_url, repository, self.config.arch, name)
    }

    pub fn search_url(&self, query: &str) -> String {
        format!("{}?q={}", self.config.pkgs_url, query)
    }

    /// 单个包的条目；已安装与未安装的动作集合不同
    pub fn build(&self, annotated: &AnnotatedRecord) -> ResultItem {
        let pkg = &annotated.record;
        let name = pkg.name.as_str();

        let mut actions = Vec::with_capacity(4);
        if annotated.installed {
            actions.push(Action::new(ActionKind::Remove, self.pacman_command("-Rs", Some(name))));
            actions.push(Action::new(ActionKind::Reinstall, self.pacman_command("-S", Some(name))));
        } else {
            actions.push(Action::new(ActionKind::Install, self.pacman_command("-S", Some(name))));
        }
        actions.push(Action::new(
            ActionKind::ShowPage,
            Effect::OpenUrl(self.package_page_url(&pkg.repository, name)),
        ));
        if !pkg.upstream_url.is_empty() {
            actions.push(Action::new(
                ActionKind::ShowProject,
                Effect::OpenUrl(pkg.upstream_url.clone()),
            ));
        }

        let subtext = match (annotated.installed, pkg.description.is_empty()) {
            (true, true) => "[Installed]".to_string(),
            (true, false) => format!("{} [Installed]", pkg.description),
            (false, _) => pkg.description.clone(),
        };

        ResultItem {
            id: format!("{}_{}_{}", self.config.id, pkg.repository, name),
            text: format!("{} {} [{}]", name, pkg.version, pkg.repository),
            subtext,
            input_action_text: Some(name.to_string()),
            icon: self.config.icon.clone(),
            actions,
        }
    }

    /// 空查询时的系统更新条目
    pub fn update_item(&self) -> ResultItem {
        ResultItem {
            id: format!("{}-update", self.config.id),
            text: "Pacman package manager".to_string(),
            subtext: "Enter the package you are looking for or hit enter to update.".to_string(),
            input_action_text: None,
            icon: self.config.icon.clone(),
            actions: vec![
                Action::new(
                    ActionKind::UpdateNoConfirm,
                    self.pacman_command("-Syu --noconfirm", None),
                ),
                Action::new(ActionKind::UpdateFull, self.pacman_command("-Syu", None)),
                Action::new(ActionKind::UpdateCacheOnly, self.pacman_command("-Sy", None)),
            ],
        }
    }

    /// 没有匹配时回退到官网搜索
    pub fn search_fallback(&self, query: &str) -> ResultItem {
        ResultItem {
            id: format!("{}-empty", self.config.id),
            text: "Search on archlinux.org".to_string(),
            subtext: "No results found in the local database".to_string(),
            input_action_text: None,
            icon: self.config.icon.clone(),
            actions: vec![Action::new(
                ActionKind::Search,
                Effect::OpenUrl(self.search_url(query)),
            )],
        }
    }
}
