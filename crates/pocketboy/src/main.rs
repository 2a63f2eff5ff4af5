use pocketboy::Options;

fn main() {
    let options = match Options::parse(std::env::args().skip(1)) {
        Ok(options) => options,
        Err(err) => {
            eprintln!("{err:#}");
            std::process::exit(2);
        }
    };

    if let Err(err) = pocketboy::run(&options) {
        eprintln!("pocketboy: {err:#}");
        std::process::exit(1);
    }
}
