use clap::Parser;
use tripsim::app::TripsimCliArguments;

fn main() {
    env_logger::init();
    let args = TripsimCliArguments::parse();
    match args.run() {
        Ok(_) => log::info!("finished."),
        Err(e) => {
            log::error!("failed running tripsim: {e}");
            std::process::exit(1);
        }
    }
}
