use anyhow::Result;

fn main() -> Result<()> {
    sporthlm_cli::run()
}
