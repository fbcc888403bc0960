//! 最小示例：打开一个 400x300 的窗口，关闭窗口即退出
//!
//! ```bash
//! cargo run --example hello -- --resizable
//! ```

use gametails::core::{log, Config, WindowConfig};
use gametails::stage::Stage;
use gametails::app_info;

fn main() -> anyhow::Result<()> {
    let mut config = Config {
        window: WindowConfig::new((400, 300), "Hello, world!"),
        ..Config::default()
    };
    config.apply_args(std::env::args());
    config.validate()?;

    log::init_logger(config.logging.level, false, None);
    app_info!(version = env!("CARGO_PKG_VERSION"), "hello starting");

    let mut stage = Stage::open(&config.window)?;
    stage.run(&mut ())?;

    app_info!("Bye");
    Ok(())
}
