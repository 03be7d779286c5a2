use msh::Shell;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    Shell::default().repl()
}
