fn main() -> Result<(), Box<dyn std::error::Error>> {
    minichat::cli::main()
}
