use typechain::frontend;

fn main() {
    std::process::exit(frontend::cli_main());
}
