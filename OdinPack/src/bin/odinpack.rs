fn main() -> anyhow::Result<()> {
    odinpack::cli::run_cli()
}
