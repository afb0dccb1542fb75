use std::{env, io, process};

use itchcap::{convert, replay, ConvertError, Options, ReplayError};
use log::info;
use nasdaq_itch::Record;
use thiserror::Error;

fn main() {
    env_logger::init();

    let options = match Options::from_args(env::args()) {
        Ok(options) => options,
        Err(err) => {
            eprintln!("{err}");
            process::exit(-1);
        }
    };

    if let Err(err) = run(&options) {
        eprintln!("nasdaq-itch failed: {err}");
        process::exit(1);
    }
}

fn run(options: &Options) -> Result<(), AppError> {
    let stats = convert::<Record>(options)?;
    info!(
        "wrote {} rows from {} packets ({} skipped) to {}",
        stats.rows, stats.packets, stats.skipped_packets, options.parquet_file
    );

    let stdout = io::stdout();
    replay::<Record, _>(&options.parquet_file, &mut stdout.lock())?;
    Ok(())
}

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Convert(#[from] ConvertError),
    #[error(transparent)]
    Replay(#[from] ReplayError),
}
