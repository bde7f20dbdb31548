use crate::config::AppConfig;
use crate::utils::error::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "bazi-server")]
#[command(about = "BaZi chart calculation and interpretation service")]
pub struct CliArgs {
    /// TOML 配置檔，值可用 ${VAR} 引用環境變數
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// 覆蓋配置中的監聽埠
    #[arg(long)]
    pub port: Option<u16>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliArgs {
    /// 預設值 < 配置檔 < 環境變數 < 命令列
    pub fn load_config(&self) -> Result<AppConfig> {
        let config = AppConfig::load(self.config.as_deref())?;
        Ok(self.apply(config))
    }

    fn apply(&self, mut config: AppConfig) -> AppConfig {
        if let Some(port) = self.port {
            config.port = port;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_cli_port_overrides_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "port = 4000\nfrontend_url = \"https://bazi.example.com\"").unwrap();

        let args = CliArgs::parse_from([
            "bazi-server",
            "--config",
            file.path().to_str().unwrap(),
            "--port",
            "5000",
        ]);
        let file_config = AppConfig::from_file(file.path()).unwrap();
        let config = args.apply(file_config);

        assert_eq!(5000, config.port);
        assert_eq!("https://bazi.example.com", config.frontend_url);
    }

    #[test]
    fn test_cli_defaults() {
        let args = CliArgs::parse_from(["bazi-server"]);
        assert!(args.config.is_none());
        assert!(args.port.is_none());
        assert!(!args.verbose);
    }
}
