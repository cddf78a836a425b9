fn main() -> eyre::Result<()> {
    task_nexus_service::main()
}
