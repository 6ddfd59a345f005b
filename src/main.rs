fn main() -> anyhow::Result<()> {
    clipwatch_lib::run()
}
