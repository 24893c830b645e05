//! 評価関数の設定

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::cache::DEFAULT_CACHE_BITS;

/// パラメータの初期化方法
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum InitMode {
    /// `eval_file` を読む（なければ `legacy_file` から変換、どちらもなければ0）
    #[default]
    File,
    /// 全パラメータ0
    Zero,
    /// 乱数（動作確認用）
    Random { seed: u64 },
}

/// 評価関数の設定
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalConfig {
    pub init: InitMode,
    pub eval_file: PathBuf,
    /// 旧形式のパラメータファイル
    pub legacy_file: PathBuf,
    /// 評価値キャッシュのエントリ数（2^cache_bits）
    pub cache_bits: u32,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            init: InitMode::File,
            eval_file: PathBuf::from("eval.bin"),
            legacy_file: PathBuf::from("fv.bin"),
            cache_bits: DEFAULT_CACHE_BITS,
        }
    }
}

impl EvalConfig {
    /// パラメータ0の設定（テスト・ベンチマーク用）
    pub fn zero() -> Self {
        Self { init: InitMode::Zero, ..Self::default() }
    }

    pub fn random(seed: u64) -> Self {
        Self { init: InitMode::Random { seed }, ..Self::default() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EvalConfig::default();
        assert_eq!(config.init, InitMode::File);
        assert_eq!(config.eval_file, PathBuf::from("eval.bin"));
        assert_eq!(config.legacy_file, PathBuf::from("fv.bin"));
        assert_eq!(config.cache_bits, 18);
    }

    #[test]
    fn test_config_from_yaml() {
        let yaml = "init:\n  mode: random\n  seed: 7\ncache_bits: 12\n";
        let config: EvalConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.init, InitMode::Random { seed: 7 });
        assert_eq!(config.cache_bits, 12);
        assert_eq!(config.eval_file, PathBuf::from("eval.bin"));

        let config: EvalConfig = serde_yaml::from_str("init:\n  mode: zero\n").unwrap();
        assert_eq!(config, EvalConfig::zero());
    }

    #[test]
    fn test_config_rejects_unknown_mode() {
        let result: Result<EvalConfig, _> = serde_yaml::from_str("init:\n  mode: magic\n");
        assert!(result.is_err());
    }
}
