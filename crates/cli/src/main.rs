fn main() -> Result<(), Box<dyn std::error::Error>> {
    symscope_cli::run()
}
