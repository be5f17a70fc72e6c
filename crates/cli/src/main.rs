fn main() -> Result<(), Box<dyn std::error::Error>> {
    wifitrack_cli::run()
}
