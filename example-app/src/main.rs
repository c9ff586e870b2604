//! # 示例应用程序
//!
//! 运行一个包含示例控制器的进程容器：
//!
//! ```text
//! cargo run -p example-app -- -c ./example-app/config/dummy.yaml -p message=hello
//! ```

mod controller;
mod factory;

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut process = factory::new_dummy_process();
    process.run(std::env::args()).await?;
    Ok(())
}
