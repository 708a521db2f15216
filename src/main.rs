use anyhow::Result;
use clap::Parser;
use skysmart_answers::utils::logging;
use skysmart_answers::{App, Config, OutputFormat};

#[derive(Parser, Debug)]
#[command(name = "skysmart-answers", about = "提取 Skysmart 作业的题干和正确答案")]
#[command(version)]
struct Cli {
    /// 以 JSON 输出
    #[arg(long)]
    json: bool,

    /// 作业链接或 hash
    #[arg(required = true, value_name = "LINK_OR_HASH")]
    links: Vec<String>,
}

impl Cli {
    fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 加载配置
    let config = Config::load()?;

    // 初始化日志
    logging::init(config.verbose_logging);

    // 初始化并运行应用
    let format = cli.output_format();
    App::initialize(config)?.run(&cli.links, format).await?;

    Ok(())
}
