use crate::error::{Result, RucheckError};
use regex::{Captures, Regex};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// 套件运行的环境配置
///
/// `[env]` 表里的键值在每个检查子进程启动前注入其环境。
/// 典型用途：把被测程序的安装目录加进 PATH。
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct HarnessConfig {
    /// 注入检查子进程的环境变量
    #[serde(default)]
    pub env: BTreeMap<String, String>,
}

/// 配置文件加载器
pub struct ConfigLoader;

impl ConfigLoader {
    /// 配置文件名
    const CONFIG_FILE: &'static str = "rucheck.toml";

    /// 从指定路径加载配置文件
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<HarnessConfig> {
        let content = fs::read_to_string(path.as_ref())?;

        toml::from_str(&content)
            .map_err(|e| RucheckError::ConfigError(format!("Failed to parse config file: {}", e)))
    }

    /// 查找并加载配置文件
    /// 查找顺序：
    /// 1. 当前目录及父目录递归查找
    /// 2. 用户配置目录 ~/.config/rucheck/
    pub fn find_and_load() -> Option<HarnessConfig> {
        if let Some(config) = Self::try_load_from_current_dir() {
            return Some(config);
        }

        if let Some(config) = Self::try_load_from_user_dir() {
            return Some(config);
        }

        None
    }

    /// 尝试从当前目录及其父目录加载
    fn try_load_from_current_dir() -> Option<HarnessConfig> {
        let mut current = std::env::current_dir().ok()?;

        loop {
            let config_path = current.join(Self::CONFIG_FILE);
            if config_path.exists() {
                return Self::load_from_path(&config_path).ok();
            }

            // 尝试父目录
            if !current.pop() {
                break;
            }
        }

        None
    }

    /// 尝试从用户配置目录加载
    fn try_load_from_user_dir() -> Option<HarnessConfig> {
        let home = dirs::home_dir()?;
        let config_path = home.join(".config").join("rucheck").join(Self::CONFIG_FILE);

        if config_path.exists() {
            Self::load_from_path(&config_path).ok()
        } else {
            None
        }
    }

    /// 构建最终注入子进程的环境变量表
    ///
    /// 配置文件的值先做 `${VAR}` 解析，再应用 CLI 传入的覆盖
    /// （--env key=value，优先级最高）。
    pub fn build_env(
        config: &HarnessConfig,
        cli_vars: &[(String, String)],
    ) -> BTreeMap<String, String> {
        let mut env = BTreeMap::new();

        for (key, value) in &config.env {
            env.insert(key.clone(), resolve_env_vars(value));
        }

        for (key, value) in cli_vars {
            env.insert(key.clone(), value.clone());
        }

        env
    }

    /// 解析 CLI 变量参数 "key=value"
    pub fn parse_cli_var(s: &str) -> Option<(String, String)> {
        s.split_once('=')
            .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
    }
}

/// 把文本中的 `${VAR}` 引用替换为本进程的环境变量值
///
/// 未定义的变量保留原样，便于发现拼写错误。
pub fn resolve_env_vars(text: &str) -> String {
    static ENV_REGEX: OnceLock<Regex> = OnceLock::new();
    let re = ENV_REGEX.get_or_init(|| Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap());

    re.replace_all(text, |caps: &Captures| {
        let env_name = &caps[1];
        std::env::var(env_name).unwrap_or_else(|_| caps[0].to_string())
    })
    .to_string()
}
