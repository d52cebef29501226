use anyhow::Result;

fn main() -> Result<()> {
    fintrack::init_tracing();
    let args: Vec<String> = std::env::args().collect();
    fintrack::run::as_cli(&args)
}
