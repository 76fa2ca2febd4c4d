use crate::cli::OutputFormat;
use crate::error::{MatchError, Result};
use lady_match_common::{AttributeSpec, MandatoryPolicy};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// 기본 출력 형식
    #[serde(default)]
    pub default_format: OutputFormat,
    /// 필수조건 불충족 쌍 처리
    #[serde(default)]
    pub policy: MandatoryPolicy,
    /// 사용자 속성 정의 JSON (없으면 내장 정의)
    #[serde(default)]
    pub spec_path: Option<PathBuf>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| MatchError::Config("홈 디렉터리를 찾을 수 없습니다".into()))?;
        Ok(home.join(".config").join("lady-match").join("config.json"))
    }

    /// 속성 정의 로드 (인자 > 설정 파일 > 내장)
    pub fn load_spec(&self, override_path: Option<&Path>) -> Result<AttributeSpec> {
        match override_path.or(self.spec_path.as_deref()) {
            Some(path) => {
                if !path.exists() {
                    return Err(MatchError::FileNotFound(path.display().to_string()));
                }
                tracing::debug!(path = %path.display(), "사용자 속성 정의 로드");
                Ok(AttributeSpec::from_file(path)?)
            }
            None => Ok(AttributeSpec::builtin()),
        }
    }

    pub fn set_spec_path(&mut self, path: Option<PathBuf>) -> Result<()> {
        if let Some(path) = &path {
            // 저장 전에 읽을 수 있는지 확인
            AttributeSpec::from_file(path)?;
        }
        self.spec_path = path;
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_missing_returns_default() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("none.json")).unwrap();
        assert_eq!(config.policy, MandatoryPolicy::Emit);
        assert!(config.spec_path.is_none());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = Config {
            default_format: OutputFormat::Csv,
            policy: MandatoryPolicy::Drop,
            spec_path: None,
        };
        config.save_to(&path).unwrap();
        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.policy, MandatoryPolicy::Drop);
        assert!(matches!(loaded.default_format, OutputFormat::Csv));
    }

    #[test]
    fn test_load_spec_missing_file() {
        let config = Config::default();
        let err = config.load_spec(Some(Path::new("/nonexistent/spec.json"))).unwrap_err();
        assert!(matches!(err, MatchError::FileNotFound(_)));
    }

    #[test]
    fn test_load_spec_builtin() {
        let spec = Config::default().load_spec(None).unwrap();
        assert_eq!(spec, AttributeSpec::builtin());
    }
}
