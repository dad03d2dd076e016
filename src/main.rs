use anyhow::Result;

mod app;
mod logging;

fn main() -> Result<()> {
    let args = files_manager::cli::parse();
    app::run(args)
}
