use json2dart::cli;

fn main() -> anyhow::Result<()> {
    cli::CommandLineInterface::load().run()
}
